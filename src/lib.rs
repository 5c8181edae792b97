#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod icon;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod lottie;
pub mod parser;
pub mod preview;
pub mod theme;
pub mod validate;

pub use config::{AnimationConfig, Config, ConfigError, LayoutConfig, load_config};
pub use ir::Diagram;
pub use layout::{LayoutReport, compute_layout};
pub use lottie::{Document, render_document};
pub use parser::parse_architecture;
pub use theme::Theme;
pub use validate::{ValidationError, validate};

/// Parses, lays out and renders architecture source in one call.
pub fn render_architecture(input: &str, config: &Config) -> Document {
    let mut diagram = parse_architecture(input);
    compute_layout(&mut diagram, &config.layout);
    render_document(&diagram, &config.theme, &config.animation)
}

/// Like [`render_architecture`], serialized as pretty-printed JSON.
pub fn render_architecture_json(input: &str, config: &Config) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&render_architecture(input, config))
}
