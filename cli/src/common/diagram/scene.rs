//! # Scene
//!
//! File: cli/src/common/diagram/scene.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The retained element state of one mounted diagram: node markers and the
//! links leading into them, each keyed by the target node's stable id. The
//! renderer diffs the visible hierarchy against this scene on every update and
//! tags each element with the phase it is in:
//!
//! - `Enter`: appeared in the last update
//! - `Update`: present before and after
//! - `Exit`: removed; it keeps animating toward its destination and is pruned
//!   at the start of the next update
//!
//! Every element carries its own tween, so any instant of the running
//! transition can be sampled with [`Scene::sample`].
//!
use super::transition::{link_path, progress, ease_cubic_in_out, Point, Tween};
use crate::common::tree::{Category, NodeKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Stable per-node identifier. Assigned once from a counter starting at 1.
pub type NodeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Enter,
    Update,
    Exit,
}

/// Which side of the marker a label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    /// Label to the right; used for leaves.
    Start,
    /// Label to the left; used for nodes with visible or stashed children.
    End,
}

impl LabelAnchor {
    /// Horizontal label offset from the marker center.
    pub fn dx(self) -> f64 {
        match self {
            LabelAnchor::Start => 13.0,
            LabelAnchor::End => -13.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelAnchor::Start => "start",
            LabelAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeElement {
    pub id: NodeId,
    /// Full path of the node in the logical tree.
    pub key: String,
    pub label: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub fill: String,
    pub anchor: LabelAnchor,
    /// Number of children currently hidden in the stash.
    pub stashed: usize,
    pub phase: Phase,
    pub tween: Tween,
}

impl NodeElement {
    pub fn is_collapsed(&self) -> bool {
        self.stashed > 0
    }
}

/// The link `source -> target`, keyed by `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeElement {
    pub target: NodeId,
    pub source: NodeId,
    pub phase: Phase,
    /// `(source, target)` endpoints at the start of the transition.
    pub from: (Point, Point),
    /// `(source, target)` endpoints at the end of the transition.
    pub to: (Point, Point),
}

impl EdgeElement {
    /// Eased endpoints at `progress`.
    pub fn at(&self, progress: f64) -> (Point, Point) {
        let t = ease_cubic_in_out(progress);
        (self.from.0.lerp(self.to.0, t), self.from.1.lerp(self.to.1, t))
    }
}

/// A node marker sampled at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFrame {
    pub id: NodeId,
    pub position: Point,
    pub opacity: f64,
}

/// A link sampled at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeFrame {
    pub target: NodeId,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeFrame>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    nodes: BTreeMap<NodeId, NodeElement>,
    edges: BTreeMap<NodeId, EdgeElement>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeElement> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, target: NodeId) -> Option<&EdgeElement> {
        self.edges.get(&target)
    }

    /// All node elements, exiting ones included, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeElement> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeElement> {
        self.edges.values()
    }

    /// Ids of nodes that are not exiting.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.phase != Phase::Exit)
            .map(|node| node.id)
            .collect()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeElement> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn edge_mut(&mut self, target: NodeId) -> Option<&mut EdgeElement> {
        self.edges.get_mut(&target)
    }

    pub(crate) fn insert_node(&mut self, node: NodeElement) {
        self.nodes.insert(node.id, node);
    }

    pub(crate) fn insert_edge(&mut self, edge: EdgeElement) {
        self.edges.insert(edge.target, edge);
    }

    /// Drops elements left in the exit phase by the previous update.
    pub fn prune_exited(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.phase != Phase::Exit);
        self.edges.retain(|_, edge| edge.phase != Phase::Exit);
        before - self.nodes.len()
    }

    /// Tears the whole scene down.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Jumps every transition to its end: exits are dropped and every other
    /// element rests at its target.
    pub fn settle(&mut self) {
        self.prune_exited();
        for node in self.nodes.values_mut() {
            node.tween = Tween::still(node.tween.to);
            node.phase = Phase::Update;
        }
        for edge in self.edges.values_mut() {
            edge.from = edge.to;
            edge.phase = Phase::Update;
        }
    }

    /// Samples the running transition `elapsed_ms` after it started.
    /// Entering markers fade in, exiting ones fade out and are left out once
    /// the transition has finished.
    pub fn sample(&self, elapsed_ms: u64, duration_ms: u64) -> Frame {
        let p = progress(elapsed_ms, duration_ms);
        let finished = p >= 1.0;
        let eased = ease_cubic_in_out(p);

        let nodes = self
            .nodes
            .values()
            .filter(|node| !(finished && node.phase == Phase::Exit))
            .map(|node| NodeFrame {
                id: node.id,
                position: node.tween.at(p),
                opacity: match node.phase {
                    Phase::Enter => eased,
                    Phase::Update => 1.0,
                    Phase::Exit => 1.0 - eased,
                },
            })
            .collect();

        let edges = self
            .edges
            .values()
            .filter(|edge| !(finished && edge.phase == Phase::Exit))
            .map(|edge| {
                let (source, target) = edge.at(p);
                EdgeFrame {
                    target: edge.target,
                    path: link_path(source, target),
                }
            })
            .collect();

        Frame { nodes, edges }
    }
}
