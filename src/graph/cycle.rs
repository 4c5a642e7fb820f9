use crate::quest::NodeId;
use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not visited yet.
    White,
    /// On the current DFS path.
    Gray,
    /// Fully explored.
    Black,
}

/// Three-color depth-first search for a directed cycle.
///
/// Roots are visited in the given order and the search stops at the first edge
/// into a gray node. The walk keeps its own stack, so deep chains cannot
/// overflow the call stack. Targets that are not in `roots` are treated as
/// ordinary nodes with whatever successors `successors` reports for them.
pub fn detect_cycle<'s, F>(roots: &[NodeId], successors: F) -> bool
where
    F: Fn(NodeId) -> &'s [NodeId],
{
    let mut colors: AHashMap<NodeId, Color> = AHashMap::with_capacity(roots.len());
    let color_of = |colors: &AHashMap<NodeId, Color>, id: NodeId| {
        colors.get(&id).copied().unwrap_or(Color::White)
    };

    for &root in roots {
        if color_of(&colors, root) != Color::White {
            continue;
        }

        // Each frame is a node plus the index of the next successor to visit.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        colors.insert(root, Color::Gray);

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            match successors(node).get(cursor) {
                Some(&next) => {
                    frame.1 += 1;
                    match color_of(&colors, next) {
                        Color::Gray => return true,
                        Color::White => {
                            colors.insert(next, Color::Gray);
                            stack.push((next, 0));
                        }
                        Color::Black => {}
                    }
                }
                None => {
                    colors.insert(node, Color::Black);
                    stack.pop();
                }
            }
        }
    }

    false
}
