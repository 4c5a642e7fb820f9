use super::Adjacency;
use crate::quest::{NodeId, QuestNode};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Breadth-first search along outgoing edges for the first node matching `is_target`.
///
/// The search starts from the successors of `start`; `start` itself is never
/// tested. A matching node is returned without being expanded, and edges to
/// unknown IDs are skipped.
pub fn find_first_forward<'a, P>(
    adjacency: &Adjacency<'a>,
    start: NodeId,
    is_target: P,
) -> Option<&'a QuestNode>
where
    P: Fn(&QuestNode) -> bool,
{
    let mut visited: AHashSet<NodeId> = AHashSet::new();
    let mut queue: VecDeque<NodeId> = adjacency.outgoing(start).iter().copied().collect();

    while let Some(current_id) = queue.pop_front() {
        if !visited.insert(current_id) {
            continue;
        }
        let Some(current) = adjacency.node(current_id) else {
            continue;
        };
        if is_target(current) {
            return Some(current);
        }
        queue.extend(adjacency.outgoing(current_id).iter().copied());
    }

    None
}

/// Walks inbound edges backwards from `origin`, expanding only through
/// predecessors accepted by `allowed`.
///
/// Returns `origin` followed by every accepted predecessor in discovery order.
/// A rejected predecessor bounds the walk on that path.
pub fn collect_backward<'a, P>(
    adjacency: &Adjacency<'a>,
    origin: &'a QuestNode,
    allowed: P,
) -> Vec<&'a QuestNode>
where
    P: Fn(&QuestNode) -> bool,
{
    let mut chain = vec![origin];
    let mut visited: AHashSet<NodeId> = AHashSet::from_iter([origin.id]);
    let mut queue: VecDeque<NodeId> = VecDeque::from([origin.id]);

    while let Some(current_id) = queue.pop_front() {
        for &previous_id in adjacency.incoming(current_id) {
            if visited.contains(&previous_id) {
                continue;
            }
            let Some(previous) = adjacency.node(previous_id) else {
                continue;
            };
            if allowed(previous) {
                visited.insert(previous_id);
                chain.push(previous);
                queue.push_back(previous_id);
            }
        }
    }

    chain
}
