//! # TreePT Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Loading, merging, expansion and validation of TreePT settings. Every
//! value has a built-in default, so no configuration file is required.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.treept.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (`~/.config/treept/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! A project value wins only when it differs from the default, so a project
//! file can override a handful of keys without resetting the rest.
//!
//! ## Architecture
//!
//! Each TOML table maps onto one struct (`[layout]` to `LayoutSettings`,
//! `[server]` to `ServerConfig` and so on) with `deny_unknown_fields`, so a
//! misspelled key is reported instead of silently ignored. Loading runs in
//! four steps:
//!
//! 1. `load_user_config` and `load_project_config` parse whichever files exist
//! 2. `merge_configs` combines them key by key (`extra_excludes` lists are
//!    concatenated without duplicates, CORS is on if either file enables it)
//! 3. `expand_config_paths` expands `~` in `[render] output_dir`
//! 4. `validate_config` rejects non-positive spacings or sizes, inverted zoom
//!    bounds and malformed colors
//!
//! Commands never read the raw sections directly for diagram settings; they go
//! through `Config::renderer_config`, `Config::legend_for` and
//! `Config::path_filter`.
//!
//! ## Usage
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let mut renderer = DiagramRenderer::new(cfg.renderer_config("my-app"), cfg.legend());
//! let entries = cfg.path_filter().apply(entries);
//! ```
//!
//! ## Example
//!
//! ```toml
//! [filter]
//! extra_excludes = ["__tests__", "storybook"]
//!
//! [layout]
//! level_spacing = 180
//! initial_depth = 1
//!
//! [legend]
//! scheme = "two-tone"
//! folder = "#111827"
//!
//! [render]
//! output_dir = "~/diagrams"
//!
//! [server]
//! port = 8080
//! enable_cors = true
//! ```
//!
use crate::common::diagram::{LayoutConfig, Legend, LegendScheme, RendererConfig, ZoomBounds};
use crate::common::tree::{Category, PathFilter};
use crate::core::error::{Result, TreeptError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The full configuration, as loaded from TOML.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Extra path substrings excluded on top of the fixed denylist.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub extra_excludes: Vec<String>,
}

/// Geometry of the tidy-tree layout (`[layout]`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Horizontal distance between depth levels.
    #[serde(default = "default_level_spacing")]
    pub level_spacing: f64,
    /// Smallest vertical gap between neighbouring slots; the diagram overflows
    /// the container rather than squeeze below it.
    #[serde(default = "default_min_node_spacing")]
    pub min_node_spacing: f64,
    #[serde(default = "default_sibling_separation")]
    pub sibling_separation: f64,
    #[serde(default = "default_cousin_separation")]
    pub cousin_separation: f64,
    /// Folders deeper than this start collapsed.
    #[serde(default = "default_initial_depth")]
    pub initial_depth: usize,
    /// Inset from the container edge; also the x of the root.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            level_spacing: default_level_spacing(),
            min_node_spacing: default_min_node_spacing(),
            sibling_separation: default_sibling_separation(),
            cousin_separation: default_cousin_separation(),
            initial_depth: default_initial_depth(),
            margin: default_margin(),
        }
    }
}

/// Transition timing (`[animation]`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

/// Zoom limits for pan/zoom (`[viewport]`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewportConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

/// Legend preset plus optional per-color overrides (`#rgb` or `#rrggbb`).
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LegendConfig {
    #[serde(default)]
    pub scheme: LegendScheme,
    pub folder: Option<String>,
    pub page: Option<String>,
    pub api: Option<String>,
    pub component: Option<String>,
    pub code: Option<String>,
    pub other: Option<String>,
    pub fallback: Option<String>,
}

impl LegendConfig {
    fn overrides(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("folder", &self.folder),
            ("page", &self.page),
            ("api", &self.api),
            ("component", &self.component),
            ("code", &self.code),
            ("other", &self.other),
            ("fallback", &self.fallback),
        ]
    }
}

/// Defaults for headless renders (`treept render`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Directory relative output names are resolved against. Supports `~`.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output_dir: default_output_dir(),
        }
    }
}

/// Settings for the interactive session (`treept serve`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: false,
        }
    }
}

fn default_level_spacing() -> f64 {
    220.0
}
fn default_min_node_spacing() -> f64 {
    20.0
}
fn default_sibling_separation() -> f64 {
    1.0
}
fn default_cousin_separation() -> f64 {
    2.0
}
fn default_initial_depth() -> usize {
    2
}
fn default_margin() -> f64 {
    40.0
}
fn default_duration_ms() -> u64 {
    400
}
fn default_min_zoom() -> f64 {
    0.25
}
fn default_max_zoom() -> f64 {
    4.0
}
pub(crate) fn default_width() -> f64 {
    960.0
}
pub(crate) fn default_height() -> f64 {
    600.0
}
fn default_output_dir() -> String {
    ".".to_string()
}
pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}
pub(crate) fn default_port() -> u16 {
    8000
}

impl Config {
    /// # Renderer Settings (`renderer_config`)
    ///
    /// Builds the `RendererConfig` a `DiagramRenderer` is created with, from
    /// the `[layout]`, `[animation]` and `[viewport]` sections.
    ///
    /// ## Arguments
    ///
    /// * `root_label`: Text drawn next to the root marker, usually the name of
    ///   the input source.
    ///
    /// ## Returns
    ///
    /// * `RendererConfig`: Layout geometry, transition duration, initial
    ///   collapse depth and zoom bounds.
    pub fn renderer_config(&self, root_label: &str) -> RendererConfig {
        RendererConfig {
            layout: LayoutConfig {
                level_spacing: self.layout.level_spacing,
                min_node_spacing: self.layout.min_node_spacing,
                sibling_separation: self.layout.sibling_separation,
                cousin_separation: self.layout.cousin_separation,
                margin: self.layout.margin,
            },
            duration_ms: self.animation.duration_ms,
            initial_depth: self.layout.initial_depth,
            zoom: ZoomBounds {
                min: self.viewport.min_zoom,
                max: self.viewport.max_zoom,
            },
            root_label: root_label.to_string(),
        }
    }

    /// The configured legend preset with color overrides applied.
    pub fn legend(&self) -> Legend {
        self.legend_for(self.legend.scheme)
    }

    /// # Legend For Preset (`legend_for`)
    ///
    /// Like `legend`, but starting from an explicitly chosen preset. Folder
    /// and fallback overrides always apply; per-category overrides only apply
    /// to the `categories` preset, since `two-tone` colors every file alike.
    ///
    /// ## Arguments
    ///
    /// * `scheme`: The preset to start from, e.g. the one picked with
    ///   `--legend` or implied by `--related`.
    ///
    /// ## Returns
    ///
    /// * `Legend`: The color table handed to the renderer.
    pub fn legend_for(&self, scheme: LegendScheme) -> Legend {
        let mut legend = Legend::from_scheme(scheme);
        if let Some(color) = &self.legend.folder {
            legend.folder = color.clone();
        }
        if let Some(color) = &self.legend.fallback {
            legend.fallback = color.clone();
        }
        if scheme == LegendScheme::Categories {
            let categories = [
                (Category::Page, &self.legend.page),
                (Category::Api, &self.legend.api),
                (Category::Component, &self.legend.component),
                (Category::Code, &self.legend.code),
                (Category::Other, &self.legend.other),
            ];
            for (category, color) in categories {
                if let Some(color) = color {
                    legend.categories.insert(category, color.clone());
                }
            }
        }
        legend
    }

    /// The fixed denylist extended with `[filter] extra_excludes`.
    pub fn path_filter(&self) -> PathFilter {
        PathFilter::default().with_extra_excludes(self.filter.extra_excludes.iter().cloned())
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".treept.toml";

/// # Load Configuration (`load_config`)
///
/// Loads the merged, expanded and validated configuration for the current
/// directory. Called once per command.
///
/// ## Returns
///
/// * `Result<Config>`: The effective configuration, or defaults when no file
///   exists.
///
/// ## Errors
///
/// Returns an error if the current directory cannot be determined, a
/// configuration file cannot be read or parsed, or validation fails.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_in(&current_dir)
}

/// Same as `load_config`, searching for the project file from `start`.
pub fn load_config_in(start: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("dev", "TreePT", "treept") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!("User configuration file not found at {}", config_path.display());
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    match find_project_config_path(start) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in {} or its ancestors.", PROJECT_CONFIG_FILENAME, start.display());
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.treept.toml`, giving up at the first
/// directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!("Found .git directory at {}, stopping project config search.", path.display());
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(TreeptError::Config(format!(
            "Failed to parse TOML from file {}: {}",
            path.display(),
            e
        )))
    })
}

/// The project value if it differs from the default, else the user value.
fn pick<T: PartialEq>(project: T, user: T, default: T) -> T {
    if project != default {
        project
    } else {
        user
    }
}

/// # Merge Configurations (`merge_configs`)
///
/// Combines the user configuration with an optional project configuration.
/// Scalars go through `pick`; `extra_excludes` from both files are kept in
/// order with duplicates dropped; `enable_cors` is on if either enables it.
///
/// ## Arguments
///
/// * `user`: The user-level configuration, or defaults if there is none.
/// * `project`: The project-level configuration, if one was found.
///
/// ## Returns
///
/// * `Config`: The merged configuration, before path expansion and validation.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let defaults = Config::default();

    let mut extra_excludes = user.filter.extra_excludes;
    for exclude in project.filter.extra_excludes {
        if !extra_excludes.contains(&exclude) {
            extra_excludes.push(exclude);
        }
    }

    Config {
        filter: FilterConfig { extra_excludes },
        layout: LayoutSettings {
            level_spacing: pick(project.layout.level_spacing, user.layout.level_spacing, defaults.layout.level_spacing),
            min_node_spacing: pick(
                project.layout.min_node_spacing,
                user.layout.min_node_spacing,
                defaults.layout.min_node_spacing,
            ),
            sibling_separation: pick(
                project.layout.sibling_separation,
                user.layout.sibling_separation,
                defaults.layout.sibling_separation,
            ),
            cousin_separation: pick(
                project.layout.cousin_separation,
                user.layout.cousin_separation,
                defaults.layout.cousin_separation,
            ),
            initial_depth: pick(project.layout.initial_depth, user.layout.initial_depth, defaults.layout.initial_depth),
            margin: pick(project.layout.margin, user.layout.margin, defaults.layout.margin),
        },
        animation: AnimationConfig {
            duration_ms: pick(
                project.animation.duration_ms,
                user.animation.duration_ms,
                defaults.animation.duration_ms,
            ),
        },
        viewport: ViewportConfig {
            min_zoom: pick(project.viewport.min_zoom, user.viewport.min_zoom, defaults.viewport.min_zoom),
            max_zoom: pick(project.viewport.max_zoom, user.viewport.max_zoom, defaults.viewport.max_zoom),
        },
        legend: LegendConfig {
            scheme: pick(project.legend.scheme, user.legend.scheme, defaults.legend.scheme),
            folder: project.legend.folder.or(user.legend.folder),
            page: project.legend.page.or(user.legend.page),
            api: project.legend.api.or(user.legend.api),
            component: project.legend.component.or(user.legend.component),
            code: project.legend.code.or(user.legend.code),
            other: project.legend.other.or(user.legend.other),
            fallback: project.legend.fallback.or(user.legend.fallback),
        },
        render: RenderConfig {
            width: pick(project.render.width, user.render.width, defaults.render.width),
            height: pick(project.render.height, user.render.height, defaults.render.height),
            output_dir: pick(project.render.output_dir, user.render.output_dir, defaults.render.output_dir),
        },
        server: ServerConfig {
            host: pick(project.server.host, user.server.host, defaults.server.host),
            port: pick(project.server.port, user.server.port, defaults.server.port),
            enable_cors: project.server.enable_cors || user.server.enable_cors,
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    config.render.output_dir = shellexpand::tilde(&config.render.output_dir).into_owned();
    debug!("Expanded render output directory: {}", config.render.output_dir);
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn config_error(message: String) -> anyhow::Error {
    anyhow!(TreeptError::Config(message))
}

/// # Validate Configuration (`validate_config`)
///
/// Checks the merged configuration before any command uses it.
///
/// ## Errors
///
/// Returns a `TreeptError::Config` naming the offending key when a spacing,
/// size or zoom limit is not a finite positive number, the margin is negative,
/// the animation duration is zero, `max_zoom` is below `min_zoom`, or a legend
/// color is not `#rgb`/`#rrggbb`.
fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let positive = [
        ("layout.level_spacing", config.layout.level_spacing),
        ("layout.min_node_spacing", config.layout.min_node_spacing),
        ("layout.sibling_separation", config.layout.sibling_separation),
        ("layout.cousin_separation", config.layout.cousin_separation),
        ("render.width", config.render.width),
        ("render.height", config.render.height),
        ("viewport.min_zoom", config.viewport.min_zoom),
    ];
    for (key, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(config_error(format!("'{}' must be a positive number, got {}.", key, value)));
        }
    }
    if !(config.layout.margin.is_finite() && config.layout.margin >= 0.0) {
        return Err(config_error(format!(
            "'layout.margin' must not be negative, got {}.",
            config.layout.margin
        )));
    }
    if config.animation.duration_ms == 0 {
        return Err(config_error("'animation.duration_ms' must be greater than 0.".to_string()));
    }
    if !(config.viewport.max_zoom.is_finite() && config.viewport.max_zoom >= config.viewport.min_zoom) {
        return Err(config_error(format!(
            "Invalid zoom bounds: min_zoom {} is greater than max_zoom {}.",
            config.viewport.min_zoom, config.viewport.max_zoom
        )));
    }
    for (key, color) in config.legend.overrides() {
        if let Some(color) = color {
            if !is_hex_color(color) {
                return Err(config_error(format!(
                    "Invalid color for 'legend.{}': '{}'. Expected #rgb or #rrggbb.",
                    key, color
                )));
            }
        }
    }
    if config.server.host.trim().is_empty() {
        return Err(config_error("'server.host' cannot be empty.".to_string()));
    }
    let output_dir = PathBuf::from(&config.render.output_dir);
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(config_error(format!(
            "Configured output path '{}' exists but is not a directory.",
            output_dir.display()
        )));
    }
    debug!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r##"
            [filter]
            extra_excludes = ["__tests__"]

            [layout]
            level_spacing = 180
            initial_depth = 1

            [legend]
            scheme = "two-tone"
            folder = "#111"

            [server]
            port = 9000
        "##;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.filter.extra_excludes, vec!["__tests__"]);
        assert_eq!(config.layout.level_spacing, 180.0);
        assert_eq!(config.layout.initial_depth, 1);
        assert_eq!(config.layout.min_node_spacing, 20.0); // Default
        assert_eq!(config.legend.scheme, LegendScheme::TwoTone);
        assert_eq!(config.legend.folder.as_deref(), Some("#111"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1"); // Default
        assert_eq!(config.animation.duration_ms, 400); // Default
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[layout]\nspacing = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_non_default_project_values() {
        let user: Config = toml::from_str(
            "[layout]\nlevel_spacing = 150\n[server]\nport = 9000\n[filter]\nextra_excludes = [\"a\"]\n",
        )
        .unwrap();
        let project: Config = toml::from_str(
            "[server]\nport = 9100\n[filter]\nextra_excludes = [\"b\", \"a\"]\n",
        )
        .unwrap();
        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.layout.level_spacing, 150.0); // user, project left default
        assert_eq!(merged.server.port, 9100);
        assert_eq!(merged.filter.extra_excludes, vec!["a", "b"]);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            render: RenderConfig {
                output_dir: "~/diagrams".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        expand_config_paths(&mut config);
        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.render.output_dir,
            home_dir.join("diagrams").to_string_lossy()
        );
    }

    #[test]
    fn test_validate_config_defaults() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_bad_values() {
        let mut config = Config::default();
        config.layout.level_spacing = 0.0;
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("layout.level_spacing"));

        let mut config = Config::default();
        config.viewport.min_zoom = 2.0;
        config.viewport.max_zoom = 1.0;
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("Invalid zoom bounds"));

        let mut config = Config::default();
        config.legend.page = Some("blue".to_string());
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("legend.page"));

        let mut config = Config::default();
        config.animation.duration_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_output_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();
        let mut config = Config::default();
        config.render.output_dir = file_path.to_string_lossy().to_string();
        assert!(validate_config(&config)
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_find_project_config_stops_at_git_root() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("src/pages");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();
        // above the git root, must not be found
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_legend_overrides() {
        let config: Config =
            toml::from_str("[legend]\npage = \"#000000\"\nfolder = \"#fff\"\n").unwrap();
        let legend = config.legend();
        assert_eq!(legend.folder, "#fff");
        assert_eq!(legend.categories[&Category::Page], "#000000");
        let two_tone = config.legend_for(LegendScheme::TwoTone);
        assert!(two_tone.categories.is_empty());
        assert_eq!(two_tone.folder, "#fff");
    }

    #[test]
    fn test_renderer_config_and_filter() {
        let config: Config =
            toml::from_str("[layout]\ninitial_depth = 4\n[filter]\nextra_excludes = [\"fixtures\"]\n")
                .unwrap();
        let renderer = config.renderer_config("repo");
        assert_eq!(renderer.initial_depth, 4);
        assert_eq!(renderer.root_label, "repo");
        assert_eq!(renderer.duration_ms, 400);
        assert!(config.path_filter().is_excluded("test/fixtures/a.js"));
    }
}
