//! # SVG Writer
//!
//! File: cli/src/common/diagram/svg.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Serializes a container's scene to a standalone SVG document. With
//! `animate` set, every element carries SMIL animations replaying the
//! transition of the last update (cubic in-out via `keySplines`), so a browser
//! shows the same enter/update/exit motion the renderer computed. Without it,
//! the scene is written at rest and exiting elements are left out.
//!
//! With `frame_at` set, the transition is sampled at that instant instead
//! (see [`Scene::sample`](super::scene::Scene::sample)) and written as a still
//! frame: markers sit at their eased positions with the fade applied as
//! `opacity`.
//!
//! Node groups carry `data-id` and `data-path` attributes so a page script can
//! map clicks back to renderer ids.
//!
use super::legend::Legend;
use super::renderer::Container;
use super::scene::{EdgeElement, Frame, NodeElement, Phase};
use super::transition::{fmt_num, link_path, Point, CUBIC_IN_OUT_SPLINE};
use crate::common::tree::NodeKind;
use std::fmt::Write;

const LINK_STROKE: &str = "#cbd5e1";
const NODE_RADIUS: f64 = 6.0;

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Emit SMIL animations for the last transition.
    pub animate: bool,
    pub show_legend: bool,
    pub duration_ms: u64,
    /// Draw the still frame this many milliseconds into the transition.
    /// Takes precedence over `animate`.
    pub frame_at: Option<u64>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            animate: true,
            show_legend: true,
            duration_ms: 400,
            frame_at: None,
        }
    }
}

/// Writes the container's scene as an SVG document. An unmounted container
/// yields an empty zero-sized document.
pub fn render_svg(container: &Container, legend: &Legend, options: &SvgOptions) -> String {
    let (width, height) = container
        .size()
        .map(|size| (size.width, size.height))
        .unwrap_or((0.0, 0.0));
    let mut out = String::new();
    let _ = write_document(&mut out, container, legend, options, width, height);
    out
}

fn write_document(
    out: &mut String,
    container: &Container,
    legend: &Legend,
    options: &SvgOptions,
    width: f64,
    height: f64,
) -> std::fmt::Result {
    let (w, h) = (fmt_num(width), fmt_num(height));
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="treept-diagram" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(
        out,
        r#"<g class="viewport" transform="{}">"#,
        container.viewport().transform()
    )?;

    match options.frame_at {
        Some(elapsed_ms) => {
            let frame = container.scene().sample(elapsed_ms, options.duration_ms);
            write_frame(out, container, &frame)?;
        }
        None => {
            writeln!(out, r#"<g class="links">"#)?;
            for edge in container.scene().edges() {
                if options.animate || edge.phase != Phase::Exit {
                    write_edge(out, edge, options)?;
                }
            }
            writeln!(out, "</g>")?;

            writeln!(out, r#"<g class="nodes">"#)?;
            for node in container.scene().nodes() {
                if options.animate || node.phase != Phase::Exit {
                    write_node(out, node, options)?;
                }
            }
            writeln!(out, "</g>")?;
        }
    }
    writeln!(out, "</g>")?;

    if options.show_legend {
        write_legend(out, legend)?;
    }
    writeln!(out, "</svg>")
}

fn phase_class(phase: Phase) -> &'static str {
    match phase {
        Phase::Enter => "enter",
        Phase::Update => "update",
        Phase::Exit => "exit",
    }
}

fn spline_attrs(duration_ms: u64) -> String {
    format!(
        r#"dur="{}ms" begin="0s" fill="freeze" calcMode="spline" keyTimes="0;1" keySplines="{}""#,
        duration_ms, CUBIC_IN_OUT_SPLINE
    )
}

fn write_edge(out: &mut String, edge: &EdgeElement, options: &SvgOptions) -> std::fmt::Result {
    let to = link_path(edge.to.0, edge.to.1);
    write!(
        out,
        r#"<path class="link {}" data-target="{}" fill="none" stroke="{}" stroke-width="1.5" d="{}""#,
        phase_class(edge.phase),
        edge.target,
        LINK_STROKE,
        to
    )?;
    if options.animate && edge.from != edge.to {
        let from = link_path(edge.from.0, edge.from.1);
        writeln!(out, ">")?;
        writeln!(
            out,
            r#"<animate attributeName="d" from="{}" to="{}" {}/>"#,
            from,
            to,
            spline_attrs(options.duration_ms)
        )?;
        writeln!(out, "</path>")
    } else {
        writeln!(out, "/>")
    }
}

fn translate(point: Point) -> String {
    format!("translate({},{})", fmt_num(point.x), fmt_num(point.y))
}

fn open_node(out: &mut String, node: &NodeElement, at: Point, opacity: Option<f64>) -> std::fmt::Result {
    let collapsed = if node.is_collapsed() { " collapsed" } else { "" };
    write!(
        out,
        r#"<g class="node {}{}" data-id="{}" data-path="{}" data-kind="{}" transform="{}""#,
        phase_class(node.phase),
        collapsed,
        node.id,
        tera::escape_html(&node.key),
        match node.kind {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        },
        translate(at)
    )?;
    match opacity {
        Some(opacity) => writeln!(out, r#" opacity="{}">"#, fmt_num(opacity)),
        None => writeln!(out, ">"),
    }
}

fn write_node(out: &mut String, node: &NodeElement, options: &SvgOptions) -> std::fmt::Result {
    let moving = options.animate && node.tween.from != node.tween.to;
    open_node(out, node, node.tween.to, None)?;
    if moving {
        writeln!(
            out,
            r#"<animateTransform attributeName="transform" type="translate" from="{} {}" to="{} {}" {}/>"#,
            fmt_num(node.tween.from.x),
            fmt_num(node.tween.from.y),
            fmt_num(node.tween.to.x),
            fmt_num(node.tween.to.y),
            spline_attrs(options.duration_ms)
        )?;
    }
    if options.animate {
        let fade = match node.phase {
            Phase::Enter => Some(("0", "1")),
            Phase::Exit => Some(("1", "0")),
            Phase::Update => None,
        };
        if let Some((from, to)) = fade {
            writeln!(
                out,
                r#"<animate attributeName="opacity" from="{}" to="{}" {}/>"#,
                from,
                to,
                spline_attrs(options.duration_ms)
            )?;
        }
    }
    close_node(out, node)
}

/// Marker, label and the closing tag of a node group.
fn close_node(out: &mut String, node: &NodeElement) -> std::fmt::Result {
    let stroke_width = if node.is_collapsed() { 3 } else { 1 };
    writeln!(
        out,
        r#"<circle r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt_num(NODE_RADIUS),
        node.fill,
        LINK_STROKE,
        stroke_width
    )?;
    writeln!(
        out,
        r#"<text dy="0.35em" x="{}" text-anchor="{}">{}</text>"#,
        fmt_num(node.anchor.dx()),
        node.anchor.as_str(),
        tera::escape_html(&node.label)
    )?;
    writeln!(out, "</g>")
}

fn write_frame(out: &mut String, container: &Container, frame: &Frame) -> std::fmt::Result {
    writeln!(out, r#"<g class="links">"#)?;
    for edge in &frame.edges {
        writeln!(
            out,
            r#"<path class="link" data-target="{}" fill="none" stroke="{}" stroke-width="1.5" d="{}"/>"#,
            edge.target, LINK_STROKE, edge.path
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="nodes">"#)?;
    for sampled in &frame.nodes {
        let Some(node) = container.scene().node(sampled.id) else {
            continue;
        };
        let opacity = (sampled.opacity < 1.0).then_some(sampled.opacity);
        open_node(out, node, sampled.position, opacity)?;
        close_node(out, node)?;
    }
    writeln!(out, "</g>")
}

fn write_legend(out: &mut String, legend: &Legend) -> std::fmt::Result {
    writeln!(out, r#"<g class="legend" transform="translate(16,16)">"#)?;
    for (row, entry) in legend.entries().iter().enumerate() {
        let y = row as f64 * 18.0;
        writeln!(
            out,
            r#"<g transform="translate(0,{})"><circle r="5" cx="5" cy="0" fill="{}"/><text x="16" dy="0.35em">{}</text></g>"#,
            fmt_num(y),
            entry.color,
            tera::escape_html(&entry.label)
        )?;
    }
    writeln!(out, "</g>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::diagram::layout::Size;
    use crate::common::diagram::renderer::{DiagramRenderer, RendererConfig};
    use crate::common::tree::{build_tree, PathEntry};
    use std::sync::Arc;

    fn rendered() -> (DiagramRenderer, Container) {
        let entries = vec![
            PathEntry::file("src/pages/index.js"),
            PathEntry::file("src/<odd>&name.js"),
        ];
        let mut renderer = DiagramRenderer::new(RendererConfig::default(), Legend::categories());
        let mut container = Container::mounted(Size::new(800.0, 400.0));
        renderer.render(&mut container, Some(Arc::new(build_tree(&entries))));
        (renderer, container)
    }

    #[test]
    fn test_document_structure() {
        let (renderer, container) = rendered();
        let svg = render_svg(&container, renderer.legend(), &SvgOptions::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#));
        assert!(svg.contains(r#"transform="translate(0,0) scale(1)""#));
        assert_eq!(svg.matches(r#"<g class="node "#).count(), 5);
        assert_eq!(svg.matches("<path ").count(), 4);
        assert!(svg.contains(r#"data-path="src&#x2F;pages&#x2F;index.js""#));
        assert!(svg.contains(r#"class="legend""#));
    }

    #[test]
    fn test_labels_are_escaped() {
        let (renderer, container) = rendered();
        let svg = render_svg(&container, renderer.legend(), &SvgOptions::default());
        assert!(svg.contains("&lt;odd&gt;&amp;name.js"));
        assert!(!svg.contains("<odd>"));
    }

    #[test]
    fn test_animation_toggle() {
        let (renderer, container) = rendered();
        let animated = render_svg(&container, renderer.legend(), &SvgOptions::default());
        assert!(animated.contains("<animateTransform"));
        assert!(animated.contains(CUBIC_IN_OUT_SPLINE));
        assert!(animated.contains(r#"dur="400ms""#));

        let still = render_svg(
            &container,
            renderer.legend(),
            &SvgOptions {
                animate: false,
                show_legend: false,
                duration_ms: 400,
                frame_at: None,
            },
        );
        assert!(!still.contains("<animate"));
        assert!(!still.contains(r#"class="legend""#));
    }

    #[test]
    fn test_exiting_nodes_only_when_animated() {
        let (mut renderer, mut container) = rendered();
        let src = renderer.node_id("src").unwrap();
        renderer.toggle(&mut container, src).unwrap();
        let animated = render_svg(&container, renderer.legend(), &SvgOptions::default());
        assert!(animated.contains(r#"class="node exit""#));
        let still = render_svg(
            &container,
            renderer.legend(),
            &SvgOptions {
                animate: false,
                ..SvgOptions::default()
            },
        );
        assert!(!still.contains("node exit"));
        assert!(still.contains(r#"class="node update collapsed""#));
    }

    #[test]
    fn test_still_frames_of_the_reveal() {
        let (renderer, container) = rendered();
        let at = |elapsed_ms| {
            render_svg(
                &container,
                renderer.legend(),
                &SvgOptions {
                    frame_at: Some(elapsed_ms),
                    ..SvgOptions::default()
                },
            )
        };

        // everything starts collapsed onto the root origin, fully transparent
        let start = at(0);
        assert!(!start.contains("<animate"));
        assert_eq!(start.matches(r#"transform="translate(40,200)" opacity="0""#).count(), 5);
        assert_eq!(start.matches(r#"d="M40,200C40,200 40,200 40,200""#).count(), 4);

        let midway = at(200);
        assert_eq!(midway.matches(r#"opacity="0.5""#).count(), 5);

        let end = at(400);
        assert!(!end.contains("opacity="));
        for node in container.scene().nodes() {
            assert!(end.contains(&format!(
                r#"data-id="{}" data-path="{}""#,
                node.id,
                tera::escape_html(&node.key)
            )));
        }
        assert!(!end.contains(r#"transform="translate(40,200)" opacity"#));
    }

    #[test]
    fn test_unmounted_container() {
        let svg = render_svg(&Container::unmounted(), &Legend::default(), &SvgOptions::default());
        assert!(svg.contains(r#"width="0""#));
        assert!(!svg.contains("<circle r=\"6\""));
    }
}
