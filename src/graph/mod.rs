use crate::quest::{NodeId, Quest, QuestNode};
use ahash::{AHashMap, AHashSet};

pub mod cycle;
pub mod traversal;

pub use cycle::detect_cycle;
pub use traversal::{collect_backward, find_first_forward};

/// Every outgoing edge of a node, in document order.
///
/// Only the edge fields that are legal for the node's variant are followed.
pub fn outgoing_edges(node: &QuestNode) -> Vec<NodeId> {
    node.kind
        .edge_fields()
        .into_iter()
        .flat_map(|(_, targets)| targets.iter().copied())
        .collect()
}

/// Indexed view of a quest's edge graph, built once per validation pass.
pub struct Adjacency<'a> {
    order: Vec<NodeId>,
    nodes: AHashMap<NodeId, &'a QuestNode>,
    outgoing: AHashMap<NodeId, Vec<NodeId>>,
    incoming: AHashMap<NodeId, Vec<NodeId>>,
}

impl<'a> Adjacency<'a> {
    pub fn build(quest: &'a Quest) -> Self {
        let mut order = Vec::with_capacity(quest.quest_nodes.len());
        let mut nodes = AHashMap::new();
        let mut outgoing: AHashMap<NodeId, Vec<NodeId>> = AHashMap::new();
        let mut incoming: AHashMap<NodeId, Vec<NodeId>> = AHashMap::new();

        for node in &quest.quest_nodes {
            order.push(node.id);
            // On duplicate IDs the first node wins the lookup; edges of all
            // duplicates are merged under the shared ID.
            nodes.entry(node.id).or_insert(node);
            let edges = outgoing_edges(node);
            for &target in &edges {
                incoming.entry(target).or_default().push(node.id);
            }
            outgoing.entry(node.id).or_default().extend(edges);
        }

        Self {
            order,
            nodes,
            outgoing,
            incoming,
        }
    }

    /// Node IDs in document order. Duplicated IDs appear once per occurrence.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    pub fn node(&self, id: NodeId) -> Option<&'a QuestNode> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn outgoing(&self, id: NodeId) -> &[NodeId] {
        self.outgoing.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources of every edge pointing at `id`, in document order.
    pub fn incoming(&self, id: NodeId) -> &[NodeId] {
        self.incoming.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node ID that is the target of at least one edge.
    pub fn targeted(&self) -> AHashSet<NodeId> {
        self.incoming.keys().copied().collect()
    }

    pub fn has_cycle(&self) -> bool {
        detect_cycle(&self.order, |id| self.outgoing(id))
    }
}
