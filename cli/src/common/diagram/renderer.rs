//! # Diagram Renderer
//!
//! File: cli/src/common/diagram/renderer.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The stateful engine that keeps a [`Container`] in sync with a logical
//! [`TreeNode`]. It re-renders on four triggers:
//!
//! 1. initial mount (`render`)
//! 2. a node click (`toggle`, `set_collapsed`)
//! 3. a container resize (`resize`)
//! 4. new tree data (`render` with another tree)
//!
//! ## State
//!
//! The logical tree is never mutated. The renderer owns everything else:
//!
//! - `ids`: stable node id per path, assigned from a counter the first time a
//!   node becomes visible and never reused
//! - `records`: per id, the last rendered position and visible parent; the
//!   position is forgotten when the node leaves the screen
//! - `collapse`: explicit expand/collapse choices per path; folders without a
//!   choice start collapsed when deeper than `initial_depth`
//!
//! Keying all of it by path means identity, positions and collapse state
//! survive both toggles and a fresh tree containing the same paths.
//!
//! ## Update
//!
//! Each update rebuilds the visible hierarchy from the tree, lays it out and
//! diffs it against the container's scene in three passes keyed by id:
//!
//! - **enter**: new nodes start at their parent's previous position, or where
//!   the parent itself starts when it enters in the same update, falling back
//!   to the triggering node's previous position; new links start collapsed at
//!   the point their node starts from
//! - **update**: persisting elements move from their previous to their new
//!   position
//! - **exit**: removed elements move to the new position of their nearest
//!   visible ancestor (or the triggering node's new position)
//!
//! Finally every visible node's new position is recorded as its previous one.
//!
//! ## Usage
//!
//! ```rust
//! let mut renderer = DiagramRenderer::new(cfg.renderer_config("repo"), cfg.legend());
//! let mut container = Container::mounted(Size::new(960.0, 600.0));
//! renderer.render(&mut container, Some(Arc::new(root)));
//! if let Some(id) = renderer.node_id("src/components") {
//!     renderer.toggle(&mut container, id)?;
//! }
//! ```
//!
use super::layout::{layout, LayoutConfig, Size};
use super::legend::Legend;
use super::scene::{EdgeElement, LabelAnchor, NodeElement, NodeId, Phase, Scene};
use super::transition::{Point, Tween};
use super::viewport::{Viewport, ZoomBounds};
use crate::common::tree::TreeNode;
use crate::core::error::TreeptError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// The surface a diagram is drawn into. Without a size it is unmounted and
/// every render against it is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Container {
    size: Option<Size>,
    scene: Scene,
    viewport: Viewport,
}

impl Container {
    pub fn unmounted() -> Self {
        Self::default()
    }

    pub fn mounted(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn mount(&mut self, size: Size) {
        self.size = Some(size);
    }

    pub fn is_mounted(&self) -> bool {
        self.size.is_some()
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn teardown(&mut self) {
        self.scene.clear();
        self.viewport.reset();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RendererConfig {
    pub layout: LayoutConfig,
    pub duration_ms: u64,
    /// Folders deeper than this start collapsed.
    pub initial_depth: usize,
    pub zoom: ZoomBounds,
    /// Label drawn for the unnamed root.
    pub root_label: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            duration_ms: 400,
            initial_depth: 2,
            zoom: ZoomBounds::default(),
            root_label: "root".to_string(),
        }
    }
}

/// Element counts produced by one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    pub visible: usize,
}

#[derive(Debug, Clone)]
struct NodeRecord {
    key: String,
    previous: Option<Point>,
    parent: Option<NodeId>,
}

/// One node of the visible hierarchy, stored in an arena.
struct VisibleNode<'t> {
    id: NodeId,
    node: &'t TreeNode,
    parent: Option<usize>,
    children: Vec<usize>,
    stashed: usize,
}

pub struct DiagramRenderer {
    config: RendererConfig,
    legend: Legend,
    tree: Option<Arc<TreeNode>>,
    next_id: NodeId,
    ids: HashMap<String, NodeId>,
    records: HashMap<NodeId, NodeRecord>,
    collapse: HashMap<String, bool>,
}

impl DiagramRenderer {
    pub fn new(config: RendererConfig, legend: Legend) -> Self {
        Self {
            config,
            legend,
            tree: None,
            next_id: 1,
            ids: HashMap::new(),
            records: HashMap::new(),
            collapse: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn tree(&self) -> Option<&Arc<TreeNode>> {
        self.tree.as_ref()
    }

    /// Stable id of the node at `path`, if it has ever been visible.
    pub fn node_id(&self, path: &str) -> Option<NodeId> {
        self.ids.get(path).copied()
    }

    /// Path of the node with the given id.
    pub fn key_of(&self, id: NodeId) -> Option<&str> {
        self.records.get(&id).map(|record| record.key.as_str())
    }

    /// Current collapse state of the folder at `path`; `None` for files and
    /// unknown paths.
    pub fn is_collapsed(&self, path: &str) -> Option<bool> {
        let node = self.tree.as_ref()?.find(path)?;
        node.is_folder()
            .then(|| self.collapsed_state(node, depth_of(path)))
    }

    /// Renders `tree` into `container`. A new tree replaces the previous one;
    /// nodes whose paths persist keep their ids and animate from where they were.
    pub fn render(&mut self, container: &mut Container, tree: Option<Arc<TreeNode>>) -> Option<RenderReport> {
        if !container.is_mounted() {
            debug!("Render skipped: container is not mounted.");
            return None;
        }
        let tree = tree?;
        self.tree = Some(tree);
        self.update(container, "")
    }

    /// Flips the collapse state of the folder with id `id`. Toggling a file,
    /// or a node that is not on screen, changes nothing and returns `Ok(None)`.
    pub fn toggle(&mut self, container: &mut Container, id: NodeId) -> Result<Option<RenderReport>, TreeptError> {
        if !container.is_mounted() || self.tree.is_none() {
            return Ok(None);
        }
        let key = self
            .key_of(id)
            .ok_or_else(|| TreeptError::NodeNotFound { key: id.to_string() })?
            .to_string();
        let collapsed = match self.tree.as_ref().and_then(|tree| tree.find(&key)) {
            None => return Err(TreeptError::NodeNotFound { key }),
            Some(node) if !node.is_folder() => {
                debug!("Ignoring toggle on file '{}'.", key);
                return Ok(None);
            }
            Some(node) => self.collapsed_state(node, depth_of(&key)),
        };
        let on_screen = container
            .scene()
            .node(id)
            .is_some_and(|element| element.phase != Phase::Exit);
        if !on_screen {
            debug!("Ignoring toggle on hidden node '{}' (id {}).", key, id);
            return Ok(None);
        }
        debug!("Toggling '{}' (id {}) to {}.", key, id, if collapsed { "expanded" } else { "collapsed" });
        self.collapse.insert(key.clone(), !collapsed);
        Ok(self.update(container, &key))
    }

    /// Sets the collapse state of the folder at `path`. Expanding also expands
    /// every ancestor so the folder ends up visible.
    pub fn set_collapsed(
        &mut self,
        container: &mut Container,
        path: &str,
        collapsed: bool,
    ) -> Result<Option<RenderReport>, TreeptError> {
        let Some(tree) = self.tree.clone() else {
            return Ok(None);
        };
        let node = tree.find(path).ok_or_else(|| TreeptError::NodeNotFound {
            key: path.to_string(),
        })?;
        if !node.is_folder() {
            return Ok(None);
        }
        self.collapse.insert(node.path.clone(), collapsed);
        if !collapsed {
            for ancestor in ancestry(&node.path).skip(1) {
                self.collapse.insert(ancestor.to_string(), false);
            }
        }
        if !container.is_mounted() {
            return Ok(None);
        }
        Ok(self.update(container, &node.path))
    }

    /// Tears the container down and renders from scratch at the new size.
    /// Previous positions are forgotten, so everything enters from the root.
    pub fn resize(&mut self, container: &mut Container, size: Size) -> Option<RenderReport> {
        if !container.is_mounted() {
            return None;
        }
        debug!("Resizing diagram to {}x{}.", size.width, size.height);
        container.mount(size);
        container.teardown();
        for record in self.records.values_mut() {
            record.previous = None;
        }
        self.update(container, "")
    }

    /// Moves the viewport. Never redraws.
    pub fn pan(&self, container: &mut Container, dx: f64, dy: f64) {
        if container.is_mounted() {
            container.viewport.pan(dx, dy);
        }
    }

    /// Zooms the viewport by `factor` around `focus`, clamped to the
    /// configured bounds. Never redraws.
    pub fn zoom(&self, container: &mut Container, factor: f64, focus: Point) {
        if container.is_mounted() {
            container.viewport.set_bounds(self.config.zoom);
            container.viewport.zoom_by(factor, focus);
        }
    }

    fn collapsed_state(&self, node: &TreeNode, depth: usize) -> bool {
        node.is_folder()
            && self
                .collapse
                .get(&node.path)
                .copied()
                .unwrap_or(depth > self.config.initial_depth)
    }

    fn assign_id(&mut self, path: &str) -> NodeId {
        if let Some(id) = self.ids.get(path) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(path.to_string(), id);
        self.records.insert(
            id,
            NodeRecord {
                key: path.to_string(),
                previous: None,
                parent: None,
            },
        );
        trace!("Assigned id {} to '{}'.", id, path);
        id
    }

    fn collect<'t>(
        &mut self,
        node: &'t TreeNode,
        depth: usize,
        parent: Option<usize>,
        out: &mut Vec<VisibleNode<'t>>,
    ) -> usize {
        let index = out.len();
        let id = self.assign_id(&node.path);
        let collapsed = self.collapsed_state(node, depth);
        out.push(VisibleNode {
            id,
            node,
            parent,
            children: Vec::new(),
            stashed: if collapsed { node.children.len() } else { 0 },
        });
        if !collapsed {
            for child in &node.children {
                let child_index = self.collect(child, depth + 1, Some(index), out);
                out[index].children.push(child_index);
            }
        }
        index
    }

    /// First previous position found walking from `path` up to the root.
    fn previous_along(&self, path: &str) -> Option<Point> {
        ancestry(path).find_map(|key| {
            let id = self.ids.get(key)?;
            self.records.get(id)?.previous
        })
    }

    /// New position of the closest ancestor of `id` that is still visible.
    fn exit_destination(&self, id: NodeId, positions: &HashMap<NodeId, Point>) -> Option<Point> {
        let mut cursor = self.records.get(&id).and_then(|record| record.parent);
        while let Some(parent) = cursor {
            if let Some(position) = positions.get(&parent) {
                return Some(*position);
            }
            cursor = self.records.get(&parent).and_then(|record| record.parent);
        }
        None
    }

    fn update(&mut self, container: &mut Container, source: &str) -> Option<RenderReport> {
        let size = container.size?;
        let tree = self.tree.clone()?;
        container.viewport.set_bounds(self.config.zoom);
        let pruned = container.scene.prune_exited();
        if pruned > 0 {
            trace!("Pruned {} exited nodes.", pruned);
        }

        let mut visible = Vec::new();
        if !tree.children.is_empty() {
            self.collect(&tree, 0, None, &mut visible);
        }
        let arena: Vec<Vec<usize>> = visible.iter().map(|v| v.children.clone()).collect();
        let laid_out = layout(&arena, 0, size, &self.config.layout);

        let positions: HashMap<NodeId, Point> = visible
            .iter()
            .zip(laid_out.iter())
            .filter_map(|(v, position)| position.map(|p| (v.id, p)))
            .collect();

        let root_origin = Point::new(self.config.layout.margin, size.height / 2.0);
        let source_previous = self.previous_along(source).unwrap_or(root_origin);
        let source_current = ancestry(source)
            .find_map(|key| self.ids.get(key).and_then(|id| positions.get(id)))
            .copied()
            .unwrap_or(root_origin);

        let mut report = RenderReport {
            visible: visible.len(),
            ..RenderReport::default()
        };
        // origin of every node entering in this update; pre-order guarantees
        // a parent is seen before its children
        let mut entered_from: HashMap<NodeId, Point> = HashMap::new();

        // enter + update
        for v in &visible {
            let Some(&target) = positions.get(&v.id) else {
                continue;
            };
            let parent_id = v.parent.map(|index| visible[index].id);
            let previous = self.records.get(&v.id).and_then(|record| record.previous);
            let anchor = if v.children.is_empty() && v.stashed == 0 {
                LabelAnchor::Start
            } else {
                LabelAnchor::End
            };
            let label = if v.node.is_root() {
                self.config.root_label.clone()
            } else {
                v.node.name.clone()
            };
            let fill = self.legend.color_for(v.node.kind, v.node.category).to_string();

            match container.scene.node_mut(v.id) {
                Some(element) => {
                    element.tween = Tween::new(previous.unwrap_or(element.tween.to), target);
                    element.phase = Phase::Update;
                    element.label = label;
                    element.fill = fill;
                    element.anchor = anchor;
                    element.stashed = v.stashed;
                    element.kind = v.node.kind;
                    element.category = v.node.category;
                    report.updated += 1;
                }
                None => {
                    let from = parent_id
                        .and_then(|parent| {
                            entered_from.get(&parent).copied().or_else(|| {
                                self.records.get(&parent).and_then(|record| record.previous)
                            })
                        })
                        .unwrap_or(source_previous);
                    entered_from.insert(v.id, from);
                    container.scene.insert_node(NodeElement {
                        id: v.id,
                        key: v.node.path.clone(),
                        label,
                        kind: v.node.kind,
                        category: v.node.category,
                        fill,
                        anchor,
                        stashed: v.stashed,
                        phase: Phase::Enter,
                        tween: Tween::new(from, target),
                    });
                    report.entered += 1;
                }
            }

            let Some(parent_id) = parent_id else {
                continue;
            };
            let Some(&parent_target) = positions.get(&parent_id) else {
                continue;
            };
            let parent_previous = self.records.get(&parent_id).and_then(|record| record.previous);
            match container.scene.edge_mut(v.id) {
                Some(edge) => {
                    edge.from = (
                        parent_previous.unwrap_or(edge.to.0),
                        previous.unwrap_or(edge.to.1),
                    );
                    edge.to = (parent_target, target);
                    edge.source = parent_id;
                    edge.phase = Phase::Update;
                }
                None => {
                    let origin = entered_from.get(&v.id).copied().unwrap_or(source_previous);
                    container.scene.insert_edge(EdgeElement {
                        target: v.id,
                        source: parent_id,
                        phase: Phase::Enter,
                        from: (origin, origin),
                        to: (parent_target, target),
                    });
                }
            }
        }

        // exit
        let stale: Vec<NodeId> = container
            .scene
            .visible_ids()
            .into_iter()
            .filter(|id| !positions.contains_key(id))
            .collect();
        for id in stale {
            let destination = self.exit_destination(id, &positions).unwrap_or(source_current);
            if let Some(element) = container.scene.node_mut(id) {
                let from = self
                    .records
                    .get(&id)
                    .and_then(|record| record.previous)
                    .unwrap_or(element.tween.to);
                element.tween = Tween::new(from, destination);
                element.phase = Phase::Exit;
                report.exited += 1;
            }
            // a node that re-enters later spawns from its parent, not from here
            if let Some(record) = self.records.get_mut(&id) {
                record.previous = None;
            }
        }
        let stale_edges: Vec<NodeId> = container
            .scene
            .edges()
            .filter(|edge| edge.phase != Phase::Exit && !positions.contains_key(&edge.target))
            .map(|edge| edge.target)
            .collect();
        for target in stale_edges {
            let destination = self
                .exit_destination(target, &positions)
                .unwrap_or(source_current);
            if let Some(edge) = container.scene.edge_mut(target) {
                edge.from = edge.to;
                edge.to = (destination, destination);
                edge.phase = Phase::Exit;
            }
        }

        // remember where everything ended up
        for v in &visible {
            let parent = v.parent.map(|index| visible[index].id);
            if let Some(record) = self.records.get_mut(&v.id) {
                record.previous = positions.get(&v.id).copied();
                record.parent = parent;
            }
        }

        debug!(
            "Diagram updated from '{}': {} entered, {} updated, {} exited, {} visible.",
            source, report.entered, report.updated, report.exited, report.visible
        );
        Some(report)
    }
}

/// Path depth: the number of segments, `0` for the root.
fn depth_of(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}

/// `path` followed by each of its ancestors up to and including the root `""`.
fn ancestry(path: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(path);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current.is_empty() {
            None
        } else {
            Some(current.rfind('/').map_or("", |index| &current[..index]))
        };
        Some(current)
    })
}
