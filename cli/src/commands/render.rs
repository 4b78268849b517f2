//! # Render Command (`treept render`)
//!
//! File: cli/src/commands/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Headless diagram rendering. The tree is rendered into a container of the
//! requested size, any `--expand`/`--collapse` choices are applied, and the
//! result is written as SVG or as a standalone HTML page.
//!
//! When collapse choices are given, the diagram is re-rendered from scratch
//! afterwards so the written animation is the initial reveal from the root
//! rather than the transition of the last toggle.
//!
//! ```bash
//! treept render --dir . -o diagram.svg
//! treept render --github-tree tree.json --expand src/components --format html -o repo.html
//! treept render --related related.json --legend categories --static
//! treept render --dir . --frame-at 200 -o halfway.svg
//! ```
//!
use super::input::InputArgs;
use crate::common::diagram::{
    render_svg, Container, DiagramRenderer, LegendScheme, Point, RenderReport, Size, SvgOptions,
};
use crate::common::fs::io;
use crate::core::config::{self, Config};
use crate::core::error::{Result, TreeptError};
use crate::core::templating::{self, PageContext};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Svg,
    Html,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file. Relative paths resolve against `[render] output_dir`.
    /// Writes to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format. Defaults to the output file's extension, else SVG.
    #[arg(long, value_enum)]
    pub format: Option<RenderFormat>,

    /// Container width (defaults to `[render] width`).
    #[arg(long)]
    pub width: Option<f64>,

    /// Container height (defaults to `[render] height`).
    #[arg(long)]
    pub height: Option<f64>,

    /// Expand the folder at this path (and its ancestors). Repeatable.
    #[arg(long, value_name = "PATH")]
    pub expand: Vec<String>,

    /// Collapse the folder at this path. Repeatable; applied after `--expand`.
    #[arg(long, value_name = "PATH")]
    pub collapse: Vec<String>,

    /// Expand every folder.
    #[arg(long)]
    pub expand_all: bool,

    /// Legend preset. Defaults to `[legend] scheme`, or two-tone for `--related`.
    #[arg(long, value_enum)]
    pub legend: Option<LegendScheme>,

    /// Initial zoom level, clamped to `[viewport]` bounds.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Omit animations and draw the diagram at rest.
    #[arg(long = "static")]
    pub still: bool,

    /// Draw a still frame of the reveal this many milliseconds after it starts.
    #[arg(long, value_name = "MS", conflicts_with = "still")]
    pub frame_at: Option<u64>,

    /// Omit the legend.
    #[arg(long)]
    pub no_legend: bool,
}

impl RenderArgs {
    fn format(&self) -> RenderFormat {
        if let Some(format) = self.format {
            return format;
        }
        let is_html = self
            .output
            .as_deref()
            .and_then(Path::extension)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if is_html {
            RenderFormat::Html
        } else {
            RenderFormat::Svg
        }
    }

    fn size(&self, cfg: &Config) -> Result<Size> {
        let size = Size::new(
            self.width.unwrap_or(cfg.render.width),
            self.height.unwrap_or(cfg.render.height),
        );
        if !size.is_drawable() {
            anyhow::bail!(TreeptError::Input(format!(
                "Diagram size must be finite and positive, got {}x{}",
                size.width, size.height
            )));
        }
        Ok(size)
    }
}

/// Output of one headless render.
#[derive(Debug)]
pub struct RenderedDiagram {
    pub content: String,
    pub report: RenderReport,
}

/// Renders the diagram described by `args` without writing it anywhere.
pub fn render_diagram(args: &RenderArgs, cfg: &Config) -> Result<RenderedDiagram> {
    let loaded = args.input.load_tree(cfg)?;
    let size = args.size(cfg)?;
    let scheme = args.legend.unwrap_or(if loaded.scheme == LegendScheme::TwoTone {
        LegendScheme::TwoTone
    } else {
        cfg.legend.scheme
    });

    let tree = Arc::new(loaded.root);
    let mut renderer = DiagramRenderer::new(cfg.renderer_config(&loaded.title), cfg.legend_for(scheme));
    let mut container = Container::mounted(size);
    let mut report = renderer
        .render(&mut container, Some(Arc::clone(&tree)))
        .unwrap_or_default();

    let toggled = args.expand_all || !args.expand.is_empty() || !args.collapse.is_empty();
    if args.expand_all {
        for folder in tree.iter().filter(|node| node.is_folder()) {
            renderer.set_collapsed(&mut container, &folder.path, false)?;
        }
    }
    for path in &args.expand {
        renderer
            .set_collapsed(&mut container, path.trim_matches('/'), false)
            .with_context(|| format!("Cannot expand '{}'", path))?;
    }
    for path in &args.collapse {
        renderer
            .set_collapsed(&mut container, path.trim_matches('/'), true)
            .with_context(|| format!("Cannot collapse '{}'", path))?;
    }
    if toggled {
        debug!("Re-rendering from scratch after applying collapse choices.");
        report = renderer.resize(&mut container, size).unwrap_or_default();
    }

    if let Some(zoom) = args.zoom {
        renderer.zoom(
            &mut container,
            zoom,
            Point::new(size.width / 2.0, size.height / 2.0),
        );
    }
    if args.still {
        container.scene_mut().settle();
    }

    let options = SvgOptions {
        animate: !args.still,
        show_legend: !args.no_legend,
        duration_ms: renderer.config().duration_ms,
        frame_at: args.frame_at,
    };
    let svg = render_svg(&container, renderer.legend(), &options);
    let content = match args.format() {
        RenderFormat::Svg => svg,
        RenderFormat::Html => {
            templating::render_diagram_page(&PageContext::new(&loaded.title, &tree, svg, false))?
        }
    };
    Ok(RenderedDiagram { content, report })
}

pub async fn handle_render(args: RenderArgs) -> Result<()> {
    info!("Handling render command...");
    let cfg = config::load_config().context("Failed to load TreePT configuration")?;
    let rendered = render_diagram(&args, &cfg)?;
    info!(
        "Rendered {} visible nodes ({} entered).",
        rendered.report.visible, rendered.report.entered
    );

    match &args.output {
        Some(output) => {
            let target = if output.is_absolute() {
                output.clone()
            } else {
                PathBuf::from(&cfg.render.output_dir).join(output)
            };
            io::write_string_to_file(&target, &rendered.content)?;
            println!("Wrote diagram to {}", target.display());
        }
        None => print!("{}", rendered.content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args_for(file: PathBuf) -> RenderArgs {
        RenderArgs {
            input: InputArgs {
                github_tree: None,
                related: Some(file),
                dir: None,
            },
            output: None,
            format: None,
            width: Some(800.0),
            height: Some(400.0),
            expand: Vec::new(),
            collapse: Vec::new(),
            expand_all: false,
            legend: None,
            zoom: None,
            still: false,
            frame_at: None,
            no_legend: false,
        }
    }

    fn related_file(dir: &Path) -> PathBuf {
        let file = dir.join("related.json");
        fs::write(
            &file,
            r#"["src/components/ui/Card.tsx", "src/components/Button.jsx", "src/index.js"]"#,
        )
        .unwrap();
        file
    }

    #[test]
    fn test_render_default_depth() -> Result<()> {
        let dir = tempdir()?;
        let rendered = render_diagram(&args_for(related_file(dir.path())), &Config::default())?;
        // root, src, components, ui (collapsed), Button.jsx, index.js
        assert_eq!(rendered.report.visible, 6);
        assert!(rendered.content.starts_with("<svg"));
        assert!(rendered.content.contains("#60a5fa")); // two-tone file color
        Ok(())
    }

    #[test]
    fn test_expand_and_collapse_paths() -> Result<()> {
        let dir = tempdir()?;
        let mut args = args_for(related_file(dir.path()));
        args.expand = vec!["src/components/ui".to_string()];
        let rendered = render_diagram(&args, &Config::default())?;
        assert_eq!(rendered.report.visible, 7);
        assert_eq!(rendered.report.entered, 7);

        args.expand.clear();
        args.collapse = vec!["src".to_string()];
        let rendered = render_diagram(&args, &Config::default())?;
        assert_eq!(rendered.report.visible, 2);

        args.collapse = vec!["src/missing".to_string()];
        assert!(render_diagram(&args, &Config::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_static_html_output() -> Result<()> {
        let dir = tempdir()?;
        let mut args = args_for(related_file(dir.path()));
        args.output = Some(PathBuf::from("out.html"));
        args.still = true;
        args.expand_all = true;
        args.legend = Some(LegendScheme::Categories);
        let rendered = render_diagram(&args, &Config::default())?;
        assert_eq!(rendered.report.visible, 7);
        assert!(rendered.content.starts_with("<!DOCTYPE html>"));
        assert!(!rendered.content.contains("<animate"));
        assert!(rendered.content.contains("#f59e0b")); // component color
        Ok(())
    }

    #[test]
    fn test_frame_at_draws_a_still_frame() -> Result<()> {
        let dir = tempdir()?;
        let mut args = args_for(related_file(dir.path()));
        args.frame_at = Some(0);
        let rendered = render_diagram(&args, &Config::default())?;
        assert!(!rendered.content.contains("<animate"));
        // every marker starts on the root origin: margin 40, half of 400
        assert_eq!(
            rendered.content.matches(r#"transform="translate(40,200)" opacity="0""#).count(),
            rendered.report.visible
        );
        Ok(())
    }

    #[test]
    fn test_invalid_size() {
        let dir = tempdir().unwrap();
        let mut args = args_for(related_file(dir.path()));
        args.width = Some(0.0);
        assert!(render_diagram(&args, &Config::default()).is_err());
        args.width = Some(f64::INFINITY);
        let err = render_diagram(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("finite"));
    }
}
