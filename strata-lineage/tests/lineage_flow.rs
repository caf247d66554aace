//! End-to-end tests over the public API: record list in, traversal
//! response out, the way the dashboard's request handler drives it.

use strata_core::{Direction, LineageEdgeRecord, NodeKey};
use strata_lineage::{build_graph, trace_downstream, trace_records, trace_upstream};

/// The orders chain: app1 staging.orders.id feeds app2 trusted.orders_clean.id,
/// which feeds the table-level app3 gold.orders_gold.
fn orders_records() -> Vec<LineageEdgeRecord> {
    vec![
        LineageEdgeRecord::new(1, "staging", "orders", "bronze", 2, "trusted", "orders_clean", "silver")
            .with_source_column("id")
            .with_target_column("id")
            .with_transformation("direct copy"),
        LineageEdgeRecord::new(2, "trusted", "orders_clean", "silver", 3, "gold", "orders_gold", "gold")
            .with_source_column("id")
            .with_transformation("aggregation"),
    ]
}

fn orders_id() -> String {
    NodeKey::new(1, "staging", "orders", Some("id".to_string())).to_id()
}

fn orders_clean_id() -> String {
    NodeKey::new(2, "trusted", "orders_clean", Some("id".to_string())).to_id()
}

fn orders_gold_id() -> String {
    NodeKey::new(3, "gold", "orders_gold", None).to_id()
}

#[test]
fn orders_chain_builds_three_nodes_two_edges() {
    let (graph, report) = build_graph(&orders_records());

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(report.skipped, 0);
}

#[test]
fn orders_chain_downstream_from_source() {
    let (graph, _) = build_graph(&orders_records());

    let result = trace_downstream(&graph, &orders_id()).unwrap();

    let node_ids: Vec<_> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, [orders_id(), orders_clean_id(), orders_gold_id()]);
    assert_eq!(result.edges.len(), 2);
    assert_eq!(
        result.paths,
        vec![vec![orders_id(), orders_clean_id(), orders_gold_id()]]
    );
}

#[test]
fn orders_chain_upstream_from_sink() {
    let (graph, _) = build_graph(&orders_records());

    let result = trace_upstream(&graph, &orders_gold_id()).unwrap();

    let node_ids: Vec<_> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, [orders_gold_id(), orders_clean_id(), orders_id()]);
    assert_eq!(result.edges.len(), 2);
    assert_eq!(
        result.paths,
        vec![vec![orders_gold_id(), orders_clean_id(), orders_id()]]
    );
}

#[test]
fn node_ids_stable_across_rebuilds() {
    // A UI that captured an id from one response must be able to use it
    // against a graph rebuilt from the same input.
    let first_build = build_graph(&orders_records()).0;
    let captured: Vec<String> = first_build.nodes().map(|n| n.id.clone()).collect();

    let mut reordered = orders_records();
    reordered.reverse();
    let second_build = build_graph(&reordered).0;

    for id in &captured {
        assert!(second_build.contains(id), "id {} lost across rebuild", id);
    }
}

#[test]
fn full_request_from_wire_shapes() {
    // Records arrive as JSON from the storage layer; the response goes
    // back out as JSON to the UI.
    let payload = serde_json::to_string(&orders_records()).unwrap();
    let records: Vec<LineageEdgeRecord> = serde_json::from_str(&payload).unwrap();

    let response = trace_records(&records, &orders_clean_id(), Direction::Both).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
    assert_eq!(json["upstreamPaths"].as_array().unwrap().len(), 1);
    assert_eq!(json["downstreamPaths"].as_array().unwrap().len(), 1);

    let edge = &json["edges"][0];
    assert!(edge.get("sourceId").is_some());
    assert!(edge.get("targetId").is_some());
    assert!(edge.get("transformationType").is_some());
}

#[test]
fn partial_build_still_answers_queries() {
    let mut records = orders_records();
    let mut bad = records[0].clone();
    bad.source_schema = String::new();
    records.push(bad);

    let response = trace_records(&records, &orders_id(), Direction::Downstream).unwrap();
    assert_eq!(response.skipped_records, 1);
    assert_eq!(response.nodes.len(), 3);
}
