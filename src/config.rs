use crate::theme::{Rgb, Theme, parse_hex_color};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub junction_size: f32,
    /// Horizontal gap between grid columns.
    pub node_spacing_x: f32,
    /// Vertical gap between grid rows.
    pub node_spacing_y: f32,
    pub group_padding: f32,
    pub canvas_padding: f32,
    pub layer_height: f32,
    pub layer_spacing: f32,
    pub layer_label_width: f32,
    /// Explicit BFS origin. Falls back to the first-declared service or junction.
    pub origin: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 80.0,
            node_height: 80.0,
            junction_size: 20.0,
            node_spacing_x: 120.0,
            node_spacing_y: 100.0,
            group_padding: 40.0,
            canvas_padding: 50.0,
            layer_height: 140.0,
            layer_spacing: 60.0,
            layer_label_width: 120.0,
            origin: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_seconds: f32,
    pub dash: f32,
    pub gap: f32,
    /// Dash-pattern periods travelled per loop.
    pub loop_periods: u32,
    /// Distance between a node edge and the connector endpoint.
    pub port_clearance: f32,
    pub arrow_width: f32,
}

impl AnimationConfig {
    pub fn total_frames(&self) -> u32 {
        (self.fps as f32 * self.duration_seconds) as u32
    }

    /// Dash offset reached on the last frame; a whole number of periods.
    pub fn loop_offset(&self) -> f32 {
        -(self.dash + self.gap) * self.loop_periods as f32
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 60,
            duration_seconds: 2.0,
            dash: 8.0,
            gap: 4.0,
            loop_periods: 10,
            port_clearance: 5.0,
            arrow_width: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("invalid color for `{field}`: {value}")]
    InvalidColor { field: String, value: String },
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    animation: Option<AnimationConfigFile>,
    theme: Option<ThemeFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    junction_size: Option<f32>,
    node_spacing_x: Option<f32>,
    node_spacing_y: Option<f32>,
    group_padding: Option<f32>,
    canvas_padding: Option<f32>,
    layer_height: Option<f32>,
    layer_spacing: Option<f32>,
    layer_label_width: Option<f32>,
    origin: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnimationConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<u32>,
    duration_seconds: Option<f32>,
    dash: Option<f32>,
    gap: Option<f32>,
    loop_periods: Option<u32>,
    port_clearance: Option<f32>,
    arrow_width: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    background: Option<String>,
    group_stroke: Option<String>,
    arrow: Option<String>,
    text: Option<String>,
    fallback: Option<String>,
    layer_input: Option<String>,
    layer_process: Option<String>,
    layer_action: Option<String>,
    layer_output: Option<String>,
    icons: Option<BTreeMap<String, String>>,
}

/// Loads a JSON or JSON5 config file layered over the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    info!(path = path.display().to_string(); "Loading configuration");
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = json5::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    if let Some(layout) = parsed.layout {
        apply_layout_overrides(&mut config.layout, layout);
    }
    if let Some(animation) = parsed.animation {
        apply_animation_overrides(&mut config.animation, animation);
    }
    if let Some(theme) = parsed.theme {
        apply_theme_overrides(&mut config.theme, theme)?;
    }
    Ok(config)
}

fn apply_layout_overrides(config: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.node_width {
        config.node_width = v;
    }
    if let Some(v) = file.node_height {
        config.node_height = v;
    }
    if let Some(v) = file.junction_size {
        config.junction_size = v;
    }
    if let Some(v) = file.node_spacing_x {
        config.node_spacing_x = v;
    }
    if let Some(v) = file.node_spacing_y {
        config.node_spacing_y = v;
    }
    if let Some(v) = file.group_padding {
        config.group_padding = v;
    }
    if let Some(v) = file.canvas_padding {
        config.canvas_padding = v;
    }
    if let Some(v) = file.layer_height {
        config.layer_height = v;
    }
    if let Some(v) = file.layer_spacing {
        config.layer_spacing = v;
    }
    if let Some(v) = file.layer_label_width {
        config.layer_label_width = v;
    }
    if file.origin.is_some() {
        config.origin = file.origin;
    }
}

fn apply_animation_overrides(config: &mut AnimationConfig, file: AnimationConfigFile) {
    if let Some(v) = file.width {
        config.width = v;
    }
    if let Some(v) = file.height {
        config.height = v;
    }
    if let Some(v) = file.fps {
        config.fps = v;
    }
    if let Some(v) = file.duration_seconds {
        config.duration_seconds = v;
    }
    if let Some(v) = file.dash {
        config.dash = v;
    }
    if let Some(v) = file.gap {
        config.gap = v;
    }
    if let Some(v) = file.loop_periods {
        config.loop_periods = v;
    }
    if let Some(v) = file.port_clearance {
        config.port_clearance = v;
    }
    if let Some(v) = file.arrow_width {
        config.arrow_width = v;
    }
}

fn color_override(field: &str, value: &str) -> Result<Rgb, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn apply_theme_overrides(theme: &mut Theme, file: ThemeFile) -> Result<(), ConfigError> {
    if let Some(v) = file.font_family {
        theme.font_family = v;
    }
    if let Some(v) = file.background {
        color_override("background", &v)?;
        theme.background = v;
    }
    let slots: [(&str, Option<String>, &mut Rgb); 8] = [
        ("groupStroke", file.group_stroke, &mut theme.group_stroke),
        ("arrow", file.arrow, &mut theme.arrow),
        ("text", file.text, &mut theme.text),
        ("fallback", file.fallback, &mut theme.fallback),
        ("layerInput", file.layer_input, &mut theme.layer_input),
        ("layerProcess", file.layer_process, &mut theme.layer_process),
        ("layerAction", file.layer_action, &mut theme.layer_action),
        ("layerOutput", file.layer_output, &mut theme.layer_output),
    ];
    for (field, value, slot) in slots {
        if let Some(value) = value {
            *slot = color_override(field, &value)?;
        }
    }
    if let Some(icons) = file.icons {
        for (key, value) in icons {
            let color = color_override(&format!("icons.{key}"), &value)?;
            theme.icon_colors.insert(key, color);
        }
    }
    Ok(())
}
