//! SVG rendering of chart snapshots.
//!
//! Cards are drawn at their laid-out anchors. Link lines run from the bottom
//! of the parent's card box to the top of the child's card, in the configured
//! [`LineType`](orgchart_core::draw::LineType). The canvas is sized from the snapshot's bounds.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use orgchart_core::{
    color::Color,
    draw::{
        CardStyle, Drawable, LayeredOutput, LinkLine, PersonCard, StrokeDefinition,
        SupervisorMarker,
    },
};

use super::{Error, Exporter};
use crate::{
    bounds::supervisor_anchor,
    chart::Snapshot,
    config::{AppConfig, LayoutConfig},
    error::ChartError,
};

/// Builder for [`SvgExporter`].
pub struct SvgBuilder<'a> {
    file_name: String,
    config: Option<&'a AppConfig>,
}

impl<'a> SvgBuilder<'a> {
    /// Creates a builder writing to `file_name`.
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            config: None,
        }
    }

    /// Sets the configuration providing card geometry and colors.
    pub fn with_config(mut self, config: &'a AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Config`] if a configured color is invalid.
    pub fn build(self) -> Result<SvgExporter, ChartError> {
        let default_config = AppConfig::default();
        let config = self.config.unwrap_or(&default_config);
        let style = config.style();

        Ok(SvgExporter {
            file_name: self.file_name,
            layout: config.layout().clone(),
            card_style: style.card_style(config.layout())?,
            line_stroke: style.line_stroke()?,
            background: style.background_color()?,
        })
    }
}

/// Writes snapshots as SVG documents.
#[derive(Debug)]
pub struct SvgExporter {
    file_name: String,
    layout: LayoutConfig,
    card_style: CardStyle,
    line_stroke: StrokeDefinition,
    background: Color,
}

impl SvgExporter {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Renders `snapshot` to an SVG document.
    pub fn render_document(&self, snapshot: &Snapshot) -> Document {
        let bounds = snapshot.bounds();
        let size = bounds.content_size(&self.layout);
        let origin = bounds.content_origin(&self.layout);

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        let background = svg_element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background.to_string());

        let mut chart = svg_element::Group::new()
            .set("class", "org-chart")
            .set("transform", format!("translate({}, {})", origin.x(), origin.y()));
        for node in self.render_layers(snapshot).render() {
            chart = chart.add(node);
        }

        doc.add(background).add(chart)
    }

    fn render_layers(&self, snapshot: &Snapshot) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let box_height = self.card_style.box_size().height();

        for link in snapshot.links() {
            let source = link.source_position();
            let line = LinkLine::new(
                source.with_y(source.y() + box_height),
                link.target_position(),
                self.layout.line_type(),
                &self.line_stroke,
            );
            output.merge(line.render_to_layers());
        }

        for node in snapshot.nodes() {
            let mut card = PersonCard::new(node.person(), &self.card_style);
            if let Some(id) = node.id() {
                card = card.with_key(id.to_string());
            }
            output.merge(card.render_to_layers(node.position()));
        }

        if let Some(root) = snapshot.root().filter(|root| root.person().has_parent) {
            let marker = SupervisorMarker::new(&self.line_stroke);
            output.merge(marker.render_to_layers(supervisor_anchor(root.position(), &self.layout)));
        }

        output
    }

    /// Renders `snapshot` to an SVG string.
    pub fn render_string(&self, snapshot: &Snapshot) -> String {
        self.render_document(snapshot).to_string()
    }
}

impl Exporter for SvgExporter {
    fn export_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        debug!(nodes = snapshot.nodes().len(); "Rendering snapshot");
        let doc = self.render_document(snapshot);

        svg::save(&self.file_name, &doc).map_err(Error::Io)?;
        info!(file_name = self.file_name.as_str(); "SVG exported successfully");
        Ok(())
    }
}
