//! # TreePT Diagram Module (`common::diagram`)
//!
//! File: cli/src/common/diagram/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The interactive node-link view of a `TreeNode`. `DiagramRenderer` owns all
//! per-node state (ids, previous positions, collapse choices) and keeps a
//! `Container`'s scene up to date; `svg` turns that scene into markup.
//!
//! ```rust
//! let mut renderer = DiagramRenderer::new(RendererConfig::default(), Legend::categories());
//! let mut container = Container::mounted(Size::new(960.0, 600.0));
//! renderer.render(&mut container, Some(Arc::new(root)));
//! let svg = render_svg(&container, renderer.legend(), &SvgOptions::default());
//! ```
//!

pub mod layout;
pub mod legend;
pub mod renderer;
pub mod scene;
pub mod svg;
pub mod transition;
pub mod viewport;

pub use layout::{LayoutConfig, Size};
pub use legend::{Legend, LegendScheme};
pub use renderer::{Container, DiagramRenderer, RenderReport, RendererConfig};
pub use scene::NodeId;
pub use svg::{render_svg, SvgOptions};
pub use transition::Point;
pub use viewport::ZoomBounds;
