//! # Diagram Session
//!
//! File: cli/src/commands/serve/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The state behind one `treept serve` process: a renderer, its mounted
//! container and the tree being shown. Handlers share it as
//! `Arc<Mutex<Session>>`; every mutation happens under the lock, so updates
//! never interleave.
//!
//! Each snapshot carries the animation of the most recent update. Once it has
//! been written the scene is settled, so a later snapshot that follows a
//! pan or zoom does not replay that transition.
//!
use crate::common::diagram::{
    render_svg, Container, DiagramRenderer, NodeId, Point, RenderReport, Size, SvgOptions,
};
use crate::common::tree::TreeNode;
use crate::core::error::{Result, TreeptError};
use crate::core::templating::{self, PageContext};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub type SharedSession = Arc<Mutex<Session>>;

pub struct Session {
    renderer: DiagramRenderer,
    container: Container,
    tree: Arc<TreeNode>,
    title: String,
}

impl Session {
    /// Mounts a container of `size` and draws the initial diagram.
    pub fn new(mut renderer: DiagramRenderer, size: Size, tree: TreeNode, title: &str) -> Self {
        let tree = Arc::new(tree);
        let mut container = Container::mounted(size);
        if let Some(report) = renderer.render(&mut container, Some(Arc::clone(&tree))) {
            debug!("Initial render: {} visible nodes.", report.visible);
        }
        Self {
            renderer,
            container,
            tree,
            title: title.to_string(),
        }
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn renderer(&self) -> &DiagramRenderer {
        &self.renderer
    }

    pub fn size(&self) -> Option<Size> {
        self.container.size()
    }

    /// Writes the current scene and settles it.
    pub fn snapshot(&mut self) -> String {
        let options = SvgOptions {
            duration_ms: self.renderer.config().duration_ms,
            ..SvgOptions::default()
        };
        let svg = render_svg(&self.container, self.renderer.legend(), &options);
        self.container.scene_mut().settle();
        svg
    }

    /// The interactive page around a snapshot.
    pub fn page(&mut self) -> Result<String> {
        let svg = self.snapshot();
        let context = PageContext::new(&self.title, &self.tree, svg, true);
        templating::render_diagram_page(&context)
    }

    pub fn toggle(&mut self, id: NodeId) -> std::result::Result<Option<RenderReport>, TreeptError> {
        self.renderer.toggle(&mut self.container, id)
    }

    /// Re-renders at `size`. A request for the current size is ignored.
    pub fn resize(&mut self, size: Size) -> Option<RenderReport> {
        if self.container.size() == Some(size) {
            return None;
        }
        self.renderer.resize(&mut self.container, size)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.renderer.pan(&mut self.container, dx, dy);
    }

    pub fn zoom(&mut self, factor: f64, focus: Point) {
        self.renderer.zoom(&mut self.container, factor, focus);
    }

    pub fn scale(&self) -> f64 {
        self.container.viewport().scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::diagram::{Legend, RendererConfig};
    use crate::common::tree::{build_tree, entries_from_paths};

    fn session() -> Session {
        let tree = build_tree(&entries_from_paths([
            "src/index.js",
            "src/components/ui/Card.tsx",
        ]));
        Session::new(
            DiagramRenderer::new(RendererConfig::default(), Legend::default()),
            Size::new(800.0, 400.0),
            tree,
            "demo",
        )
    }

    #[test]
    fn test_snapshot_settles_scene() {
        let mut session = session();
        let first = session.snapshot();
        assert!(first.contains("<animateTransform"));
        let second = session.snapshot();
        assert!(!second.contains("<animateTransform"));
    }

    #[test]
    fn test_toggle_and_resize() {
        let mut session = session();
        let ui = session.renderer().node_id("src/components/ui").unwrap();
        let report = session.toggle(ui).unwrap().unwrap();
        assert_eq!(report.entered, 1);
        assert!(session.toggle(999).is_err());

        assert!(session.resize(Size::new(800.0, 400.0)).is_none());
        let report = session.resize(Size::new(1000.0, 500.0)).unwrap();
        assert_eq!(report.entered, report.visible);
        assert_eq!(session.size(), Some(Size::new(1000.0, 500.0)));
    }

    #[test]
    fn test_page_is_interactive() -> Result<()> {
        let mut session = session();
        let html = session.page()?;
        assert!(html.contains("data-interactive=\"true\""));
        assert!(html.contains("<title>demo · TreePT</title>"));
        Ok(())
    }
}
