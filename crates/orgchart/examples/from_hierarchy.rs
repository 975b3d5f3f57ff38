//! Example: Driving a chart from a hand-built hierarchy
//!
//! This example builds a small org tree in code, runs a few interactive
//! passes against a retained scene, and writes the final snapshot to SVG.

use std::time::Duration;

use orgchart::{
    OrgChart,
    config::AppConfig,
    export::{Exporter, svg::SvgBuilder},
    hierarchy::{Hierarchy, Node},
    identifier::NodeId,
    input::{ChartEvent, Dispatcher, Outcome},
    person::{Membership, MembershipKind, Person},
    render::Scene,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building chart from hierarchy...\n");

    let mut ceo = Person::named("Kate Baker");
    ceo.title = Some("Chief Executive Officer".to_string());
    ceo.total_reports = 2;
    ceo.is_current = true;

    let mut cto = Person::named("Rosa Lind");
    cto.title = Some("Chief Technology Officer".to_string());
    cto.membership = Some(Membership::new(MembershipKind::Member));
    cto.link = Some("https://example.org/people/rosa".to_string());
    cto.total_reports = 2;

    let hierarchy = Hierarchy::new(Node::new("ceo", ceo).with_children(vec![
        Node::new("cto", cto).with_collapsed_children(vec![
            Node::new("eng-1", Person::named("Marc Olsen")),
            Node::new("eng-2", Person::named("Ines Duval")),
        ]),
        Node::new("cfo", Person::named("Paul Grant")),
    ]));

    let config = AppConfig::default();
    let mut chart = OrgChart::new(config.clone(), Scene::new());
    chart.on_snapshot(|snapshot| println!("  pass: {} visible nodes", snapshot.nodes().len()));
    chart.load(hierarchy);

    let dispatcher = Dispatcher::new().with_select_on_toggle(true);
    for event in [
        ChartEvent::Toggle(NodeId::new("cto")),
        ChartEvent::FollowLink(NodeId::new("cto")),
    ] {
        match dispatcher.dispatch(&mut chart, event)? {
            Outcome::OpenLink(url) => println!("  open {url}"),
            outcome => println!("  {event:?} -> {outcome:?}"),
        }
    }

    // Let the scene finish animating.
    let duration = chart.config().layout().animation_duration();
    chart.adapter_mut().advance(duration + Duration::from_millis(1));
    println!("\nScene settled: {}", chart.adapter().is_settled());

    let mut exporter = SvgBuilder::new("org_chart.svg").with_config(&config).build()?;
    exporter.export_snapshot(&chart.snapshot())?;
    println!("Chart written to {}", exporter.file_name());

    Ok(())
}
