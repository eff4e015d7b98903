//! Level-based graph layout.
//!
//! A BFS from the root groups nodes into levels; each level becomes a row on
//! the canvas with its nodes spread left to right. Edges are treated as
//! undirected when discovering levels. Nodes the BFS never reaches keep their
//! previous position.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::models::GraphModel;

/// Gap between neighbouring nodes on one level, and between levels.
pub const DEFAULT_GAP: f64 = 80.0;
/// Offset of the first row and column from the canvas origin.
pub const DEFAULT_MARGIN: f64 = 50.0;
/// Minimum canvas height.
pub const DEFAULT_MIN_CANVAS_HEIGHT: f64 = 400.0;
/// Canvas height added per level of depth.
pub const DEFAULT_HEIGHT_PER_LEVEL: f64 = 75.0;

/// How BFS discovery order maps onto levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStrategy {
    /// Level is the true BFS depth from the root.
    #[default]
    PerLayer,
    /// Level counter advances once per dequeued node, so the nodes found by
    /// the k-th dequeued node sit on level k. Dequeues that discover nothing
    /// leave empty levels behind.
    PerDequeue,
}

/// Geometry and strategy for [`apply_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub node_gap: f64,
    pub level_gap: f64,
    pub margin: f64,
    pub min_canvas_height: f64,
    pub height_per_level: f64,
    pub strategy: LevelStrategy,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            node_gap: DEFAULT_GAP,
            level_gap: DEFAULT_GAP,
            margin: DEFAULT_MARGIN,
            min_canvas_height: DEFAULT_MIN_CANVAS_HEIGHT,
            height_per_level: DEFAULT_HEIGHT_PER_LEVEL,
            strategy: LevelStrategy::default(),
        }
    }
}

/// Nodes grouped by level, in discovery order within each level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Levels {
    pub map: BTreeMap<usize, Vec<usize>>,
    /// Depth counter used for canvas sizing.
    ///
    /// With [`LevelStrategy::PerDequeue`] this is the final level counter
    /// (dequeued nodes + 1); with [`LevelStrategy::PerLayer`] it is the number
    /// of populated layers.
    pub depth: usize,
}

impl Levels {
    /// Level assigned to `node`, if it was reached.
    pub fn level_of(&self, node: usize) -> Option<usize> {
        self.map
            .iter()
            .find(|(_, nodes)| nodes.contains(&node))
            .map(|(&level, _)| level)
    }

    /// Number of nodes that were assigned a level.
    pub fn assigned(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub levels: Levels,
    pub canvas_height: f64,
}

/// Group nodes reachable from `root` into levels.
///
/// `root` must index into `graph.nodes`; an empty graph yields no levels.
pub fn compute_levels(graph: &GraphModel, root: usize, strategy: LevelStrategy) -> Levels {
    let mut levels = Levels::default();
    if root >= graph.node_count() {
        return levels;
    }

    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    // Level of each node, only needed for PerLayer
    let mut depth_of = vec![0usize; graph.node_count()];

    visited[root] = true;
    queue.push_back(root);
    levels.map.insert(0, vec![root]);

    let mut counter = 1;

    while let Some(node) = queue.pop_front() {
        let next_level = match strategy {
            LevelStrategy::PerLayer => depth_of[node] + 1,
            LevelStrategy::PerDequeue => counter,
        };

        for neighbor in graph.undirected_neighbors(node) {
            if visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            depth_of[neighbor] = next_level;
            levels.map.entry(next_level).or_default().push(neighbor);
            queue.push_back(neighbor);
        }

        counter += 1;
    }

    levels.depth = match strategy {
        LevelStrategy::PerLayer => levels.map.len(),
        LevelStrategy::PerDequeue => counter,
    };

    tracing::debug!(
        strategy = ?strategy,
        levels = levels.map.len(),
        assigned = levels.assigned(),
        "computed BFS levels"
    );

    levels
}

/// Move every levelled node to its row/column slot.
pub fn assign_positions(graph: &mut GraphModel, levels: &Levels, settings: &LayoutSettings) {
    for (&level, nodes) in &levels.map {
        for (column, &node) in nodes.iter().enumerate() {
            if let Some(n) = graph.nodes.get_mut(node) {
                n.x = column as f64 * settings.node_gap + settings.margin;
                n.y = level as f64 * settings.level_gap + settings.margin;
            }
        }
    }
}

/// Canvas height needed to show `depth` levels.
pub fn canvas_height(depth: usize, settings: &LayoutSettings) -> f64 {
    settings
        .min_canvas_height
        .max(depth as f64 * settings.height_per_level)
}

/// Lay the graph out by BFS level from node 0.
pub fn apply_layout(graph: &mut GraphModel, settings: &LayoutSettings) -> LayoutReport {
    let levels = compute_levels(graph, 0, settings.strategy);
    assign_positions(graph, &levels, settings);
    let canvas_height = canvas_height(levels.depth, settings);

    LayoutReport {
        levels,
        canvas_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &str, edges: &str) -> GraphModel {
        GraphModel::parse(nodes, edges).unwrap()
    }

    #[test]
    fn test_root_and_first_level() {
        let g = graph("A,B,C,D", "0-1;0-2;1-3;0-3;1-2");
        for strategy in [LevelStrategy::PerLayer, LevelStrategy::PerDequeue] {
            let levels = compute_levels(&g, 0, strategy);
            assert_eq!(levels.map[&0], vec![0]);
            assert_eq!(levels.map[&1], vec![1, 2, 3]);
            assert_eq!(levels.map.len(), 2);
        }
    }

    #[test]
    fn test_edges_are_undirected_for_levels() {
        // Only edge points into the root
        let g = graph("A,B", "1-0");
        let levels = compute_levels(&g, 0, LevelStrategy::PerLayer);
        assert_eq!(levels.level_of(1), Some(1));
    }

    #[test]
    fn test_connected_graph_levels_every_node_once() {
        let g = graph("I,J,K,L,M", "0-1;1-2;2-3;3-4;1-2;1-4");
        let levels = compute_levels(&g, 0, LevelStrategy::PerLayer);
        assert_eq!(levels.assigned(), 5);
        let mut all: Vec<_> = levels.map.values().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
        assert_eq!(levels.level_of(0), Some(0));
    }

    #[test]
    fn test_per_layer_uses_true_depth() {
        // A - B, A - C, B - D, C - E: D and E share depth 2
        let g = graph("A,B,C,D,E", "0-1;0-2;1-3;2-4");
        let levels = compute_levels(&g, 0, LevelStrategy::PerLayer);
        assert_eq!(levels.map[&1], vec![1, 2]);
        assert_eq!(levels.map[&2], vec![3, 4]);
        assert_eq!(levels.depth, 3);
    }

    #[test]
    fn test_per_dequeue_advances_per_node() {
        let g = graph("A,B,C,D,E", "0-1;0-2;1-3;2-4");
        let levels = compute_levels(&g, 0, LevelStrategy::PerDequeue);
        // A (1st dequeue) finds B,C on level 1; B (2nd) finds D on level 2;
        // C (3rd) finds E on level 3.
        assert_eq!(levels.map[&1], vec![1, 2]);
        assert_eq!(levels.map[&2], vec![3]);
        assert_eq!(levels.map[&3], vec![4]);
        assert_eq!(levels.depth, 6);
    }

    #[test]
    fn test_unreachable_nodes_keep_position() {
        let mut g = graph("A,B,C", "0-1");
        let before = (g.nodes[2].x, g.nodes[2].y);

        let report = apply_layout(&mut g, &LayoutSettings::default());

        assert_eq!(report.levels.level_of(2), None);
        assert_eq!((g.nodes[2].x, g.nodes[2].y), before);
        assert_eq!((g.nodes[0].x, g.nodes[0].y), (50.0, 50.0));
        assert_eq!((g.nodes[1].x, g.nodes[1].y), (50.0, 130.0));
    }

    #[test]
    fn test_positions_spread_within_level() {
        let mut g = graph("A,B,C,D", "0-1;0-2;1-3;0-3;1-2");
        apply_layout(&mut g, &LayoutSettings::default());
        let positions: Vec<_> = g.nodes.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(
            positions,
            vec![(50.0, 50.0), (50.0, 130.0), (130.0, 130.0), (210.0, 130.0)]
        );
    }

    #[test]
    fn test_canvas_height() {
        let settings = LayoutSettings::default();
        assert_eq!(canvas_height(0, &settings), 400.0);
        assert_eq!(canvas_height(5, &settings), 400.0);
        assert_eq!(canvas_height(8, &settings), 600.0);
    }

    #[test]
    fn test_empty_graph_has_no_levels() {
        let levels = compute_levels(&GraphModel::default(), 0, LevelStrategy::PerLayer);
        assert!(levels.map.is_empty());
        assert_eq!(levels.depth, 0);
    }

    #[test]
    fn test_strategy_deserializes_snake_case() {
        let s: LevelStrategy = serde_json::from_str("\"per_dequeue\"").unwrap();
        assert_eq!(s, LevelStrategy::PerDequeue);
    }
}
