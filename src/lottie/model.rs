//! Serde model for the subset of the Lottie (bodymovin) format the generator
//! emits. Field names are the format's short keys; declaration order is the
//! emitted key order.

use serde::{Serialize, Serializer};
use serde_json::Value;

pub const LOTTIE_VERSION: &str = "5.7.4";
pub const DOCUMENT_NAME: &str = "Architecture Diagram";
pub const FONT_ASCENT: f64 = 71.5988159179688;

pub const JUSTIFY_LEFT: u8 = 0;
pub const JUSTIFY_CENTER: u8 = 2;

/// Round line cap / line join.
pub const ROUND: u8 = 2;

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub v: String,
    pub fr: u32,
    pub ip: u32,
    pub op: u32,
    pub w: u32,
    pub h: u32,
    pub nm: String,
    pub ddd: u8,
    pub assets: Vec<Value>,
    pub fonts: FontTable,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontTable {
    pub list: Vec<Font>,
}

impl FontTable {
    pub fn single(family: &str) -> Self {
        Self {
            list: vec![Font {
                name: family.to_string(),
                family: family.to_string(),
                style: "Regular".to_string(),
                ascent: FONT_ASCENT,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    #[serde(rename = "fName")]
    pub name: String,
    #[serde(rename = "fFamily")]
    pub family: String,
    #[serde(rename = "fStyle")]
    pub style: String,
    pub ascent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Solid,
    Image,
    Shape,
    Text,
}

impl LayerKind {
    pub fn code(self) -> u8 {
        match self {
            Self::Solid => 1,
            Self::Image => 2,
            Self::Shape => 4,
            Self::Text => 5,
        }
    }
}

impl Serialize for LayerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Static (`a = 0`) or animated (`a = 1`) property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property<T> {
    pub a: u8,
    pub k: T,
}

impl<T> Property<T> {
    pub fn fixed(k: T) -> Self {
        Self { a: 0, k }
    }
}

impl Property<Vec<Keyframe>> {
    pub fn animated(keyframes: Vec<Keyframe>) -> Self {
        Self {
            a: 1,
            k: keyframes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframe {
    pub t: u32,
    pub s: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i: Option<Easing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o: Option<Easing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Easing {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

impl Easing {
    pub fn uniform(value: f32) -> Self {
        Self {
            x: vec![value],
            y: vec![value],
        }
    }
}

/// Layer transform block (`ks`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub o: Property<f32>,
    pub r: Property<f32>,
    pub p: Property<[f32; 3]>,
    pub a: Property<[f32; 3]>,
    pub s: Property<[f32; 3]>,
}

impl Transform {
    pub fn at(x: f32, y: f32) -> Self {
        Self::anchored(x, y, [0.0, 0.0, 0.0])
    }

    pub fn anchored(x: f32, y: f32, anchor: [f32; 3]) -> Self {
        Self {
            o: Property::fixed(100.0),
            r: Property::fixed(0.0),
            p: Property::fixed([x, y, 0.0]),
            a: Property::fixed(anchor),
            s: Property::fixed([100.0, 100.0, 100.0]),
        }
    }

    pub fn position(&self) -> [f32; 3] {
        self.p.k
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bezier {
    pub c: bool,
    pub v: Vec<[f32; 2]>,
    pub i: Vec<[f32; 2]>,
    pub o: Vec<[f32; 2]>,
}

impl Bezier {
    /// Straight segments through `vertices`; all tangents are zero.
    pub fn polyline(vertices: Vec<[f32; 2]>, closed: bool) -> Self {
        let zeros = vec![[0.0, 0.0]; vertices.len()];
        Self {
            c: closed,
            i: zeros.clone(),
            o: zeros,
            v: vertices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DashValue {
    Length(f32),
    Keyframes(Vec<Keyframe>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashEntry {
    pub n: String,
    pub nm: String,
    pub v: Property<DashValue>,
}

impl DashEntry {
    pub fn dash(length: f32) -> Self {
        Self::fixed("d", "dash", length)
    }

    pub fn gap(length: f32) -> Self {
        Self::fixed("g", "gap", length)
    }

    pub fn offset(keyframes: Vec<Keyframe>) -> Self {
        Self {
            n: "o".to_string(),
            nm: "offset".to_string(),
            v: Property {
                a: 1,
                k: DashValue::Keyframes(keyframes),
            },
        }
    }

    fn fixed(n: &str, nm: &str, length: f32) -> Self {
        Self {
            n: n.to_string(),
            nm: nm.to_string(),
            v: Property::fixed(DashValue::Length(length)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "ty")]
pub enum Shape {
    #[serde(rename = "gr")]
    Group { it: Vec<Shape>, nm: String },
    #[serde(rename = "rc")]
    Rect {
        s: Property<[f32; 2]>,
        p: Property<[f32; 2]>,
        r: Property<f32>,
    },
    #[serde(rename = "el")]
    Ellipse {
        s: Property<[f32; 2]>,
        p: Property<[f32; 2]>,
    },
    #[serde(rename = "sh")]
    Path { ks: Property<Bezier> },
    #[serde(rename = "fl")]
    Fill {
        c: Property<[f32; 4]>,
        o: Property<f32>,
    },
    #[serde(rename = "st")]
    Stroke {
        c: Property<[f32; 4]>,
        o: Property<f32>,
        w: Property<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lc: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lj: Option<u8>,
        d: Vec<DashEntry>,
    },
    #[serde(rename = "tr")]
    Transform {
        p: Property<[f32; 2]>,
        a: Property<[f32; 2]>,
        s: Property<[f32; 2]>,
        r: Property<f32>,
        o: Property<f32>,
    },
}

impl Shape {
    /// Group closed by an identity transform.
    pub fn group(name: &str, items: Vec<Shape>) -> Self {
        Self::rotated_group(name, items, 0.0)
    }

    pub fn rotated_group(name: &str, mut items: Vec<Shape>, rotation: f32) -> Self {
        items.push(Shape::Transform {
            p: Property::fixed([0.0, 0.0]),
            a: Property::fixed([0.0, 0.0]),
            s: Property::fixed([100.0, 100.0]),
            r: Property::fixed(rotation),
            o: Property::fixed(100.0),
        });
        Shape::Group {
            it: items,
            nm: name.to_string(),
        }
    }

    pub fn rect(size: [f32; 2], position: [f32; 2], radius: f32) -> Self {
        Shape::Rect {
            s: Property::fixed(size),
            p: Property::fixed(position),
            r: Property::fixed(radius),
        }
    }

    pub fn ellipse(size: [f32; 2], position: [f32; 2]) -> Self {
        Shape::Ellipse {
            s: Property::fixed(size),
            p: Property::fixed(position),
        }
    }

    pub fn path(bezier: Bezier) -> Self {
        Shape::Path {
            ks: Property::fixed(bezier),
        }
    }

    pub fn fill(color: [f32; 4], opacity: f32) -> Self {
        Shape::Fill {
            c: Property::fixed(color),
            o: Property::fixed(opacity),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Shape::Group { nm, .. } => Some(nm.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub sz: [f32; 2],
    pub ps: [f32; 2],
    pub s: f32,
    pub f: String,
    pub t: String,
    pub ca: u8,
    pub j: u8,
    pub tr: f32,
    pub lh: f32,
    pub ls: f32,
    pub fc: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextKeyframe {
    pub s: TextStyle,
    pub t: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextDocument {
    pub k: Vec<TextKeyframe>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPathOptions {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMoreOptions {
    pub g: u8,
    pub a: Property<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextData {
    pub d: TextDocument,
    pub p: TextPathOptions,
    pub m: TextMoreOptions,
    pub a: Vec<Value>,
}

impl TextData {
    pub fn single(style: TextStyle) -> Self {
        Self {
            d: TextDocument {
                k: vec![TextKeyframe { s: style, t: 0 }],
            },
            p: TextPathOptions {},
            m: TextMoreOptions {
                g: 1,
                a: Property::fixed([0.0, 0.0]),
            },
            a: Vec::new(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.d.k.first().map(|frame| frame.s.t.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    pub ddd: u8,
    pub ind: u32,
    pub ty: LayerKind,
    pub nm: String,
    pub sr: u8,
    pub ks: Transform,
    pub ao: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Shape>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<TextData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sh: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sc: Option<String>,
    pub ip: u32,
    pub op: u32,
    pub st: u32,
}

impl Layer {
    fn base(ind: u32, ty: LayerKind, name: String, ks: Transform, op: u32) -> Self {
        Self {
            ddd: 0,
            ind,
            ty,
            nm: name,
            sr: 1,
            ks,
            ao: 0,
            shapes: None,
            t: None,
            sw: None,
            sh: None,
            sc: None,
            ip: 0,
            op,
            st: 0,
        }
    }

    pub fn shape(ind: u32, name: String, position: [f32; 2], shapes: Vec<Shape>, op: u32) -> Self {
        let mut layer = Self::base(
            ind,
            LayerKind::Shape,
            name,
            Transform::at(position[0], position[1]),
            op,
        );
        layer.shapes = Some(shapes);
        layer
    }

    pub fn text(ind: u32, name: String, position: [f32; 2], style: TextStyle, op: u32) -> Self {
        let mut layer = Self::base(
            ind,
            LayerKind::Text,
            name,
            Transform::at(position[0], position[1]),
            op,
        );
        layer.t = Some(TextData::single(style));
        layer
    }

    /// Full-canvas solid color layer anchored at the canvas center.
    pub fn solid(ind: u32, name: String, width: u32, height: u32, color: String, op: u32) -> Self {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let mut layer = Self::base(
            ind,
            LayerKind::Solid,
            name,
            Transform::anchored(cx, cy, [cx, cy, 0.0]),
            op,
        );
        layer.sw = Some(width);
        layer.sh = Some(height);
        layer.sc = Some(color);
        layer
    }
}

/// Hands out layer indices in emission order, starting at 1. One counter per
/// generated document.
#[derive(Debug)]
pub struct LayerIndex(u32);

impl LayerIndex {
    pub fn new() -> Self {
        Self(1)
    }

    pub fn next(&mut self) -> u32 {
        let ind = self.0;
        self.0 += 1;
        ind
    }

    pub fn peek(&self) -> u32 {
        self.0
    }
}

impl Default for LayerIndex {
    fn default() -> Self {
        Self::new()
    }
}
