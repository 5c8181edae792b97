use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Color with channels normalized to `0.0..=1.0`, the form Lottie expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }

    pub fn components(self) -> [f32; 3] {
        self.0
    }
}

/// Parses `#RRGGBB` / `#RGB` into a normalized color.
pub fn parse_hex_color(value: &str) -> Option<Rgb> {
    let hex = value.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |idx: usize| -> Option<f32> {
        let byte = u8::from_str_radix(expanded.get(idx..idx + 2)?, 16).ok()?;
        Some(f32::from(byte) / 255.0)
    };
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    /// Solid background, as a hex string for the `sc` field.
    pub background: String,
    pub group_stroke: Rgb,
    pub arrow: Rgb,
    pub text: Rgb,
    /// Used for services whose icon has no color entry.
    pub fallback: Rgb,
    pub layer_input: Rgb,
    pub layer_process: Rgb,
    pub layer_action: Rgb,
    pub layer_output: Rgb,
    /// Semantic color key to fill color.
    pub icon_colors: BTreeMap<String, Rgb>,
}

const BLUE: Rgb = Rgb::new(0.365, 0.678, 0.886);
const GREEN: Rgb = Rgb::new(0.0, 0.851, 0.647);
const PURPLE: Rgb = Rgb::new(0.851, 0.275, 0.937);
const TEAL: Rgb = Rgb::new(0.306, 0.804, 0.769);
const CORAL: Rgb = Rgb::new(1.0, 0.420, 0.420);
const PINK: Rgb = Rgb::new(0.988, 0.549, 0.675);
const LIGHT_BLUE: Rgb = Rgb::new(0.565, 0.792, 0.976);
const GOLD: Rgb = Rgb::new(0.988, 0.773, 0.318);
const YELLOW: Rgb = Rgb::new(0.988, 0.867, 0.318);

impl Theme {
    /// Dark theme with teal groups and coral connectors.
    pub fn dark() -> Self {
        let icon_colors = [
            ("cloud", TEAL),
            ("server", BLUE),
            ("database", GREEN),
            ("disk", PURPLE),
            ("brain", PINK),
            ("neural", PINK),
            ("ai", PINK),
            ("api", BLUE),
            ("sensor", LIGHT_BLUE),
            ("logs", LIGHT_BLUE),
            ("search", LIGHT_BLUE),
            ("query", LIGHT_BLUE),
            ("wifi", TEAL),
            ("globe", TEAL),
            ("web", TEAL),
            ("gear", GOLD),
            ("cog", GOLD),
            ("settings", GOLD),
            ("tools", GOLD),
            ("lightbulb", YELLOW),
            ("idea", YELLOW),
            ("output", LIGHT_BLUE),
            ("decision", GOLD),
            ("loop", LIGHT_BLUE),
            ("error", CORAL),
            ("check", GREEN),
        ]
        .into_iter()
        .map(|(key, color)| (key.to_string(), color))
        .collect();

        Self {
            font_family: "Arial".to_string(),
            background: "#2B2B2B".to_string(),
            group_stroke: TEAL,
            arrow: CORAL,
            text: Rgb::new(1.0, 1.0, 1.0),
            fallback: BLUE,
            layer_input: Rgb::new(0.298, 0.475, 0.329),
            layer_process: Rgb::new(0.227, 0.318, 0.502),
            layer_action: GOLD,
            layer_output: Rgb::new(0.400, 0.318, 0.600),
            icon_colors,
        }
    }

    pub fn color_for_key(&self, key: Option<&str>) -> Rgb {
        key.and_then(|key| self.icon_colors.get(key))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Layer swatch picked by keyword inside the layer's icon text.
    pub fn layer_color(&self, icon: Option<&str>) -> Rgb {
        let Some(icon) = icon.map(str::to_ascii_lowercase) else {
            return self.layer_process;
        };
        if icon.contains("input") {
            self.layer_input
        } else if icon.contains("process") {
            self.layer_process
        } else if icon.contains("action") {
            self.layer_action
        } else if icon.contains("output") {
            self.layer_output
        } else {
            self.layer_process
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
