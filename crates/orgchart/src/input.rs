//! Click handling.
//!
//! A host translates pointer input into [`ChartEvent`]s and hands them to a
//! [`Dispatcher`]. The dispatcher only calls the chart's public operations;
//! following a person's link never touches layout state.

use log::debug;

use orgchart_core::identifier::NodeId;

use crate::{
    chart::OrgChart,
    error::ChartError,
    hierarchy::Toggle,
    render::RenderAdapter,
};

/// Something the user did on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    /// Click on a card body or its reports bubble.
    Toggle(NodeId),
    /// Selection of a card as the current person.
    Select(NodeId),
    /// Click on a card's link icon.
    FollowLink(NodeId),
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A layout pass ran.
    Relaid,
    /// Nothing changed.
    Unchanged,
    /// The host should open this URL.
    OpenLink(String),
}

/// Routes [`ChartEvent`]s to an [`OrgChart`].
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    select_on_toggle: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also make a toggled card the current person.
    pub fn with_select_on_toggle(mut self, select: bool) -> Self {
        self.select_on_toggle = select;
        self
    }

    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::NotFound`] if the event names a node that is not
    /// visible, and any error of the chart's child loader. The chart is
    /// unchanged when an error is returned.
    pub fn dispatch<A: RenderAdapter>(
        &self,
        chart: &mut OrgChart<A>,
        event: ChartEvent,
    ) -> Result<Outcome, ChartError> {
        debug!(event:?; "Dispatching chart event");
        match event {
            ChartEvent::Toggle(id) => {
                let toggle = chart.toggle_expand(id)?;
                if self.select_on_toggle {
                    chart.set_current(id)?;
                    return Ok(Outcome::Relaid);
                }
                Ok(match toggle {
                    Toggle::Unchanged => Outcome::Unchanged,
                    Toggle::Expanded | Toggle::Collapsed => Outcome::Relaid,
                })
            }
            ChartEvent::Select(id) => {
                chart.set_current(id)?;
                Ok(Outcome::Relaid)
            }
            ChartEvent::FollowLink(id) => {
                let node = chart.hierarchy().find(id).ok_or(ChartError::NotFound(id))?;
                Ok(node
                    .person()
                    .link
                    .clone()
                    .map_or(Outcome::Unchanged, Outcome::OpenLink))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use orgchart_core::person::Person;

    use super::*;
    use crate::{
        config::AppConfig,
        hierarchy::{Hierarchy, Node},
    };

    fn chart() -> OrgChart<()> {
        let mut boss = Person::named("Boss");
        boss.link = Some(String::from("https://example.org/people/1"));

        let mut chart = OrgChart::new(AppConfig::default(), ());
        chart.load(Hierarchy::new(
            Node::new("1", boss).with_children(vec![Node::new("2", Person::named("Report"))]),
        ));
        chart
    }

    #[test]
    fn test_toggle_relays() {
        let mut chart = chart();
        let dispatcher = Dispatcher::new();

        let outcome = dispatcher
            .dispatch(&mut chart, ChartEvent::Toggle(NodeId::new("1")))
            .unwrap();
        assert_eq!(outcome, Outcome::Relaid);
        assert_eq!(chart.snapshot().nodes().len(), 1);
    }

    #[test]
    fn test_toggle_leaf_unchanged() {
        let mut chart = chart();
        let outcome = Dispatcher::new()
            .dispatch(&mut chart, ChartEvent::Toggle(NodeId::new("2")))
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_select_on_toggle() {
        let mut chart = chart();
        let dispatcher = Dispatcher::new().with_select_on_toggle(true);
        dispatcher
            .dispatch(&mut chart, ChartEvent::Toggle(NodeId::new("2")))
            .unwrap();
        assert!(chart.hierarchy().find(NodeId::new("2")).unwrap().person().is_current);
    }

    #[test]
    fn test_follow_link_leaves_layout_alone() {
        let mut chart = chart();
        let before = chart.previous().cloned();

        let outcome = Dispatcher::new()
            .dispatch(&mut chart, ChartEvent::FollowLink(NodeId::new("1")))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::OpenLink(String::from("https://example.org/people/1"))
        );
        assert_eq!(chart.previous().cloned(), before);

        let outcome = Dispatcher::new()
            .dispatch(&mut chart, ChartEvent::FollowLink(NodeId::new("2")))
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_unknown_node() {
        let mut chart = chart();
        let result = Dispatcher::new().dispatch(&mut chart, ChartEvent::Select(NodeId::new("9")));
        assert!(matches!(result, Err(ChartError::NotFound(_))));
    }
}
