//! Predefined example graphs.

use serde::Serialize;

/// A named graph in the same text form a user would type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    /// Comma-separated node labels.
    pub nodes: &'static str,
    /// `from-to` pairs joined by `;`.
    pub edges: &'static str,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "graph1",
        nodes: "A,B,C,D",
        edges: "0-1;0-2;1-3;0-3;1-2",
    },
    Preset {
        name: "graph2",
        nodes: "E,F,G,H",
        edges: "0-1;1-2;2-3;0-2",
    },
    Preset {
        name: "graph3",
        nodes: "I,J,K,L,M",
        edges: "0-1;1-2;2-3;3-4;1-2;1-4",
    },
];

impl Preset {
    /// All predefined graphs in display order.
    pub fn all() -> &'static [Preset] {
        PRESETS
    }

    /// Look up a predefined graph by name.
    pub fn find(name: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GraphModel;

    #[test]
    fn test_every_preset_parses() {
        for preset in Preset::all() {
            let graph = GraphModel::parse(preset.nodes, preset.edges);
            assert!(graph.is_ok(), "preset {} failed: {:?}", preset.name, graph);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(Preset::find("graph2").map(|p| p.nodes), Some("E,F,G,H"));
        assert!(Preset::find("graph9").is_none());
    }
}
