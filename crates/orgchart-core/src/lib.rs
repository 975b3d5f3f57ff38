//! Orgchart Core Types and Definitions
//!
//! This crate provides the foundational types for rendering organization
//! charts. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Person**: Display data carried by every chart node ([`person`] module)
//! - **Draw**: SVG drawing of cards and connecting lines ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod person;
