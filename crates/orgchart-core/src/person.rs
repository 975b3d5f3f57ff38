//! Display data carried by every chart node.
//!
//! A [`Person`] is what a card shows: name, title (as a tooltip), counters,
//! flags, and a [`Membership`] status whose [`MembershipKind`] picks the
//! badge colors.
//! None of it influences layout.

use serde::Deserialize;

/// The fixed set of membership statuses a person can be in.
///
/// Unknown status strings deserialize to [`MembershipKind::Other`], which is
/// drawn with the neutral palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipKind {
    ColdLead,
    HotLead,
    MembershipInProgress,
    ConventionInProgress,
    Member,
    Contracted,
    NotApplicable,
    Terminated,
    Donor,
    CessationOfActivity,
    #[default]
    #[serde(other)]
    Other,
}

/// Text and background colors of a membership badge, as CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipPalette {
    pub text: &'static str,
    pub background: &'static str,
}

impl MembershipKind {
    /// Label shown on the badge when the data carries no free-text override.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::ColdLead => "Cold lead",
            Self::HotLead => "Hot lead",
            Self::MembershipInProgress => "Membership in progress",
            Self::ConventionInProgress => "Convention in progress",
            Self::Member => "Member",
            Self::Contracted => "Contracted",
            Self::NotApplicable => "Not applicable",
            Self::Terminated => "Terminated",
            Self::Donor => "Donor",
            Self::CessationOfActivity => "Cessation of activity",
            Self::Other => "",
        }
    }

    /// Badge colors for this status.
    pub fn palette(self) -> MembershipPalette {
        let (text, background) = match self {
            Self::ColdLead => ("#00C2FF", "rgba(0, 194, 255, 0.08)"),
            Self::HotLead => ("#F2C94C", "rgba(242, 201, 76, 0.08)"),
            Self::MembershipInProgress | Self::ConventionInProgress => {
                ("#ED984F", "rgba(237, 152, 79, 0.08)")
            }
            Self::Member | Self::Contracted => ("#50BD89", "rgba(80, 189, 137, 0.1)"),
            Self::Donor => ("#28276D", "rgba(40, 39, 109, 0.08)"),
            Self::CessationOfActivity => ("#DB394C", "rgba(219, 57, 76, 0.08)"),
            Self::NotApplicable | Self::Terminated | Self::Other => {
                ("#333333", "rgba(51, 51, 51, 0.08)")
            }
        };
        MembershipPalette { text, background }
    }
}

/// Wire forms accepted for a membership: a bare kind, or `{ type, label }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MembershipRepr {
    Kind(MembershipKind),
    Detailed {
        #[serde(rename = "type", default)]
        kind: MembershipKind,
        #[serde(default)]
        label: Option<String>,
    },
}

/// A membership status with an optional free-text label override.
///
/// # Examples
///
/// ```
/// use orgchart_core::person::{Membership, MembershipKind};
///
/// let member = Membership::new(MembershipKind::Member);
/// assert_eq!(member.label(), "Member");
///
/// let custom = Membership::new(MembershipKind::Member).with_label("Adhérent");
/// assert_eq!(custom.label(), "Adhérent");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MembershipRepr")]
pub struct Membership {
    kind: MembershipKind,
    label: Option<String>,
}

impl From<MembershipRepr> for Membership {
    fn from(repr: MembershipRepr) -> Self {
        match repr {
            MembershipRepr::Kind(kind) => Self { kind, label: None },
            MembershipRepr::Detailed { kind, label } => Self { kind, label },
        }
    }
}

impl Membership {
    pub fn new(kind: MembershipKind) -> Self {
        Self { kind, label: None }
    }

    /// Overrides the kind's default label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(&self) -> MembershipKind {
        self.kind
    }

    /// The badge text: the override when present, otherwise the kind's default.
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.kind.default_label())
    }
}

/// Everything a person card displays.
///
/// Field names follow the camelCase keys of org chart data files
/// (`totalReports`, `nbContracts`, `isCurrent`, ...). Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub name: String,
    pub title: Option<String>,
    pub membership: Option<Membership>,
    pub total_reports: u32,
    #[serde(alias = "nbContracts")]
    pub contracts: u32,
    #[serde(alias = "nbSponsors")]
    pub sponsors: u32,
    pub is_current: bool,
    pub is_highlight: bool,
    pub link: Option<String>,
    pub has_parent: bool,
}

impl Person {
    /// Creates a person with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Membership kind, or [`MembershipKind::Other`] when none is set.
    pub fn membership_kind(&self) -> MembershipKind {
        self.membership
            .as_ref()
            .map(Membership::kind)
            .unwrap_or_default()
    }

    /// Text of the membership badge, `None` when there is nothing to show.
    pub fn membership_label(&self) -> Option<&str> {
        self.membership
            .as_ref()
            .map(Membership::label)
            .filter(|label| !label.is_empty())
    }

    /// Text of the reports bubble, e.g. `+ 3`; `None` with no reports.
    pub fn reports_label(&self) -> Option<String> {
        (self.total_reports > 0).then(|| format!("+ {}", self.total_reports))
    }

    pub fn contracts_label(&self) -> String {
        match self.contracts {
            0 => "No contract".to_string(),
            n => format!("{n} contract(s)"),
        }
    }

    pub fn sponsors_label(&self) -> String {
        match self.sponsors {
            0 => "No sponsor".to_string(),
            n => format!("{n} sponsor(s)"),
        }
    }
}
