//! Automation-flow graph shape.
//!
//! Flows are edited and persisted but never executed: nodes carry a label
//! and a display status only.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    TriggerTrend,
    FilterStyle,
    ActionScript,
    OutputNotify,
    LogicDelay,
}

/// Accepts the wire names (`TRIGGER_TREND`) in any case, with `-` or `_`.
impl FromStr for NodeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "trigger_trend" => Ok(NodeType::TriggerTrend),
            "filter_style" => Ok(NodeType::FilterStyle),
            "action_script" => Ok(NodeType::ActionScript),
            "output_notify" => Ok(NodeType::OutputNotify),
            "logic_delay" => Ok(NodeType::LogicDelay),
            _ => Err(CoreError::InvalidNodeType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub status: NodeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub position: NodePosition,
    pub data: NodeData,
}

/// Directed `source -> target` connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationFlow {
    pub id: String,
    pub name: String,
    pub nodes: Vec<AutomationNode>,
    pub edges: Vec<AutomationEdge>,
    pub active: bool,
}

impl AutomationFlow {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            active: false,
        }
    }

    /// The pipeline shown on first launch: trend scan, style filter, draft.
    #[must_use]
    pub fn discovery_pipeline() -> Self {
        let node = |id: &str, kind, x, label: &str| AutomationNode {
            id: id.to_string(),
            kind,
            position: NodePosition { x, y: 150.0 },
            data: NodeData {
                label: label.to_string(),
                config: BTreeMap::new(),
                status: NodeStatus::Idle,
            },
        };
        let edge = |source: &str, target: &str| AutomationEdge {
            id: format!("e{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
        };
        Self {
            id: "flow-1".to_string(),
            name: "Discovery Pipeline".to_string(),
            nodes: vec![
                node("1", NodeType::TriggerTrend, 100.0, "Daily Trend Scan"),
                node("2", NodeType::FilterStyle, 450.0, "Style Match: Noir"),
                node("3", NodeType::ActionScript, 800.0, "Draft Script"),
            ],
            edges: vec![edge("1", "2"), edge("2", "3")],
            active: true,
        }
    }

    /// Appends a new idle node and returns its id.
    pub fn add_node(
        &mut self,
        kind: NodeType,
        label: impl Into<String>,
        position: NodePosition,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.nodes.push(AutomationNode {
            id: id.clone(),
            kind,
            position,
            data: NodeData {
                label: label.into(),
                config: BTreeMap::new(),
                status: NodeStatus::Idle,
            },
        });
        id
    }

    /// Connects two existing nodes. Duplicate connections are not added twice.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownNode`] if either endpoint is not in the flow.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<&AutomationEdge, CoreError> {
        for endpoint in [source, target] {
            if !self.nodes.iter().any(|n| n.id == endpoint) {
                return Err(CoreError::UnknownNode(endpoint.to_string()));
            }
        }
        let idx = match self
            .edges
            .iter()
            .position(|e| e.source == source && e.target == target)
        {
            Some(idx) => idx,
            None => {
                self.edges.push(AutomationEdge {
                    id: format!("e{source}-{target}"),
                    source: source.to_string(),
                    target: target.to_string(),
                });
                self.edges.len() - 1
            }
        };
        Ok(&self.edges[idx])
    }

    /// Checks that node ids are unique and that every edge joins two nodes
    /// of this flow.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateNode`] for a repeated node id, or
    /// [`CoreError::UnknownNode`] naming the first dangling edge endpoint.
    pub fn check_edges(&self) -> Result<(), CoreError> {
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(CoreError::DuplicateNode(node.id.clone()));
            }
        }
        let dangling = self
            .edges
            .iter()
            .flat_map(|e| [&e.source, &e.target])
            .find(|endpoint| !self.nodes.iter().any(|n| &n.id == *endpoint));
        match dangling {
            Some(endpoint) => Err(CoreError::UnknownNode(endpoint.clone())),
            None => Ok(()),
        }
    }

    /// Removes a node together with every edge touching it.
    ///
    /// Returns `false` when no node had that id.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }
}
