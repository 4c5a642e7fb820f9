//! Tests for the adjacency index, cycle detection and bounded traversals.
mod common;
use common::*;
use questcheck::graph::{
    Adjacency, collect_backward, detect_cycle, find_first_forward, outgoing_edges,
};
use questcheck::prelude::*;

fn is_actions(node: &QuestNode) -> bool {
    node.node_type() == NodeType::Actions
}

fn ring(id: NodeId) -> &'static [NodeId] {
    match id {
        1 => &[2],
        2 => &[3],
        3 => &[1],
        _ => &[],
    }
}

#[test]
fn test_outgoing_edges_follow_variant_fields() {
    let decision_node = decision(1, &[&[2, 3], &[4]]);
    assert_eq!(outgoing_edges(&decision_node), vec![2, 3, 4]);

    let branch_node = branch(2, vec![opaque_condition()], &[5], &[6, 7]);
    assert_eq!(outgoing_edges(&branch_node), vec![5, 6, 7]);

    let mut dialog_node = dialog(3, &[8]);
    dialog_node.misplaced.next_nodes_if_true = vec![9];
    assert_eq!(outgoing_edges(&dialog_node), vec![8]);
}

#[test]
fn test_adjacency_indexes() {
    let quest = quest(
        "TestQuest",
        vec![
            entry(0, &[1, 2]),
            dialog(1, &[3]),
            dialog(2, &[3]),
            actions(3, &[], vec![complete()]),
        ],
    );
    let adjacency = Adjacency::build(&quest);

    assert_eq!(adjacency.node_ids(), &[0, 1, 2, 3]);
    assert_eq!(adjacency.outgoing(0), &[1, 2]);
    assert_eq!(adjacency.incoming(3), &[1, 2]);
    assert!(adjacency.incoming(0).is_empty());
    assert!(adjacency.outgoing(42).is_empty());
    assert!(!adjacency.contains(42));

    let targeted = adjacency.targeted();
    assert_eq!(targeted.len(), 3);
    assert!(!targeted.contains(&0));
    assert!(!adjacency.has_cycle());
}

#[test]
fn test_adjacency_first_duplicate_wins_lookup() {
    let quest = quest(
        "TestQuest",
        vec![entry(0, &[1]), dialog(1, &[2]), progress(1, &[3])],
    );
    let adjacency = Adjacency::build(&quest);

    let node = adjacency.node(1).map(QuestNode::node_type);
    assert_eq!(node, Some(NodeType::Dialog));
    assert_eq!(adjacency.outgoing(1), &[2, 3]);
    assert_eq!(adjacency.node_ids(), &[0, 1, 1]);
}

#[test]
fn test_detect_cycle_on_ring() {
    assert!(detect_cycle(&[1], ring));
    assert!(detect_cycle(&[3, 2, 1], ring));
}

#[test]
fn test_detect_cycle_on_dag() {
    let dag = |id: NodeId| -> &'static [NodeId] {
        match id {
            1 => &[2, 3],
            2 => &[4],
            3 => &[4],
            _ => &[],
        }
    };
    assert!(!detect_cycle(&[1, 2, 3, 4], dag));
}

#[test]
fn test_detect_cycle_ignores_unknown_targets() {
    let quest = quest(
        "TestQuest",
        vec![entry(0, &[1, 99]), actions(1, &[], vec![complete()])],
    );
    assert!(!Adjacency::build(&quest).has_cycle());
}

#[test]
fn test_detect_cycle_handles_long_chains() {
    let nodes: Vec<QuestNode> = std::iter::once(entry(0, &[1]))
        .chain((1..50_000).map(|id| dialog(id, &[id + 1])))
        .chain(std::iter::once(actions(50_000, &[], vec![complete()])))
        .collect();
    let quest = quest("TestQuest", nodes);

    assert!(!Adjacency::build(&quest).has_cycle());
}

#[test]
fn test_find_first_forward_stops_at_first_match() {
    let quest = quest(
        "TestQuest",
        vec![
            entry(0, &[1]),
            dialog(1, &[2]),
            actions(2, &[3], vec![journal()]),
            actions(3, &[], vec![complete()]),
        ],
    );
    let adjacency = Adjacency::build(&quest);

    let found = find_first_forward(&adjacency, 0, is_actions).map(|node| node.id);
    assert_eq!(found, Some(2));

    // The start node itself is never a candidate.
    let found = find_first_forward(&adjacency, 2, is_actions).map(|node| node.id);
    assert_eq!(found, Some(3));

    assert!(find_first_forward(&adjacency, 3, is_actions).is_none());
}

#[test]
fn test_find_first_forward_is_breadth_first() {
    let quest = quest(
        "TestQuest",
        vec![
            entry(0, &[1, 2]),
            dialog(1, &[3]),
            actions(2, &[], vec![complete()]),
            actions(3, &[], vec![complete()]),
        ],
    );
    let adjacency = Adjacency::build(&quest);

    let found = find_first_forward(&adjacency, 0, is_actions).map(|node| node.id);
    assert_eq!(found, Some(2));
}

#[test]
fn test_collect_backward_stops_at_rejected_nodes() {
    let quest = quest(
        "TestQuest",
        vec![
            entry(0, &[1]),
            dialog(1, &[2]),
            actions(2, &[3], vec![journal()]),
            actions(3, &[4], vec![]),
            actions(4, &[], vec![complete()]),
        ],
    );
    let adjacency = Adjacency::build(&quest);
    let Some(terminal) = adjacency.node(4) else {
        panic!("node 4 missing");
    };

    let chain: Vec<NodeId> = collect_backward(&adjacency, terminal, is_actions)
        .iter()
        .map(|node| node.id)
        .collect();
    assert_eq!(chain, vec![4, 3, 2]);
}
