use crate::icon::Icon;

use super::model::Shape;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy)]
enum Primitive {
    Rect {
        size: [f32; 2],
        at: [f32; 2],
        radius: f32,
    },
    Ellipse {
        size: [f32; 2],
        at: [f32; 2],
    },
}

impl Primitive {
    fn to_shape(self) -> Shape {
        match self {
            Primitive::Rect { size, at, radius } => Shape::rect(size, at, radius),
            Primitive::Ellipse { size, at } => Shape::ellipse(size, at),
        }
    }
}

const fn rect(w: f32, h: f32, x: f32, y: f32, radius: f32) -> Primitive {
    Primitive::Rect {
        size: [w, h],
        at: [x, y],
        radius,
    }
}

const fn ellipse(w: f32, h: f32, x: f32, y: f32) -> Primitive {
    Primitive::Ellipse {
        size: [w, h],
        at: [x, y],
    }
}

/// One white shape group drawn over a service box.
struct Glyph {
    name: &'static str,
    primitives: &'static [Primitive],
    opacity: f32,
    rotation: f32,
}

const fn glyph(name: &'static str, primitives: &'static [Primitive], opacity: f32) -> Glyph {
    Glyph {
        name,
        primitives,
        opacity,
        rotation: 0.0,
    }
}

const SERVER: &[Glyph] = &[glyph(
    "ServerIcon",
    &[
        rect(50.0, 10.0, 0.0, -18.0, 2.0),
        rect(50.0, 10.0, 0.0, 0.0, 2.0),
        rect(50.0, 10.0, 0.0, 18.0, 2.0),
    ],
    70.0,
)];

const DATABASE: &[Glyph] = &[glyph(
    "DBIcon",
    &[
        rect(44.0, 35.0, 0.0, 0.0, 0.0),
        ellipse(44.0, 14.0, 0.0, -18.0),
        ellipse(44.0, 14.0, 0.0, 18.0),
    ],
    60.0,
)];

const DISK: &[Glyph] = &[
    glyph("DiskPlatter", &[ellipse(45.0, 45.0, 0.0, 0.0)], 50.0),
    glyph("DiskHub", &[ellipse(14.0, 14.0, 0.0, 0.0)], 100.0),
];

const BRAIN: &[Glyph] = &[glyph(
    "BrainIcon",
    &[
        ellipse(40.0, 35.0, 0.0, 0.0),
        ellipse(20.0, 18.0, -12.0, -8.0),
        ellipse(20.0, 18.0, 12.0, -8.0),
        ellipse(16.0, 14.0, 0.0, 12.0),
    ],
    70.0,
)];

const GEAR: &[Glyph] = &[glyph(
    "GearIcon",
    &[
        ellipse(30.0, 30.0, 0.0, 0.0),
        rect(10.0, 44.0, 0.0, 0.0, 2.0),
        rect(44.0, 10.0, 0.0, 0.0, 2.0),
    ],
    70.0,
)];

const LIGHTBULB: &[Glyph] = &[glyph(
    "LightbulbIcon",
    &[
        ellipse(35.0, 35.0, 0.0, -5.0),
        rect(20.0, 15.0, 0.0, 15.0, 3.0),
    ],
    80.0,
)];

const API: &[Glyph] = &[glyph("APIIcon", &[rect(45.0, 30.0, 0.0, 0.0, 4.0)], 60.0)];

const SEARCH: &[Glyph] = &[glyph(
    "SearchIcon",
    &[
        ellipse(32.0, 32.0, -5.0, -5.0),
        rect(8.0, 20.0, 12.0, 12.0, 3.0),
    ],
    70.0,
)];

const WIFI: &[Glyph] = &[glyph(
    "WifiIcon",
    &[
        ellipse(12.0, 12.0, 0.0, 10.0),
        ellipse(30.0, 20.0, 0.0, 0.0),
        ellipse(45.0, 30.0, 0.0, -8.0),
    ],
    60.0,
)];

const GLOBE: &[Glyph] = &[glyph(
    "GlobeIcon",
    &[
        ellipse(40.0, 40.0, 0.0, 0.0),
        ellipse(20.0, 40.0, 0.0, 0.0),
        rect(40.0, 2.0, 0.0, 0.0, 0.0),
    ],
    60.0,
)];

const LOGS: &[Glyph] = &[glyph(
    "LogsIcon",
    &[
        rect(40.0, 6.0, 0.0, -12.0, 2.0),
        rect(40.0, 6.0, 0.0, -4.0, 2.0),
        rect(40.0, 6.0, 0.0, 4.0, 2.0),
        rect(40.0, 6.0, 0.0, 12.0, 2.0),
    ],
    70.0,
)];

const TOOLS: &[Glyph] = &[glyph(
    "ToolsIcon",
    &[
        rect(12.0, 40.0, -8.0, 0.0, 3.0),
        rect(12.0, 40.0, 8.0, 0.0, 3.0),
    ],
    70.0,
)];

const LOOP: &[Glyph] = &[glyph(
    "LoopIcon",
    &[
        ellipse(38.0, 38.0, 0.0, 0.0),
        rect(12.0, 12.0, 19.0, 0.0, 0.0),
    ],
    70.0,
)];

const ERROR: &[Glyph] = &[Glyph {
    name: "ErrorIcon",
    primitives: &[
        rect(8.0, 45.0, 0.0, 0.0, 2.0),
        rect(45.0, 8.0, 0.0, 0.0, 2.0),
    ],
    opacity: 80.0,
    rotation: 45.0,
}];

const CHECK: &[Glyph] = &[glyph("CheckIcon", &[ellipse(40.0, 40.0, 0.0, 0.0)], 70.0)];

const OUTPUT: &[Glyph] = &[glyph(
    "OutputIcon",
    &[
        rect(35.0, 30.0, 0.0, 0.0, 4.0),
        rect(10.0, 20.0, 5.0, 0.0, 2.0),
    ],
    70.0,
)];

fn glyphs(icon: Icon) -> &'static [Glyph] {
    match icon {
        Icon::Server => SERVER,
        Icon::Database => DATABASE,
        Icon::Disk | Icon::Storage => DISK,
        Icon::Brain | Icon::Neural | Icon::Ai => BRAIN,
        Icon::Gear | Icon::Cog | Icon::Settings => GEAR,
        Icon::Lightbulb | Icon::Idea => LIGHTBULB,
        Icon::Api => API,
        Icon::Search | Icon::Query => SEARCH,
        Icon::Wifi | Icon::Sensor => WIFI,
        Icon::Globe | Icon::Web => GLOBE,
        Icon::Logs => LOGS,
        Icon::Tools | Icon::Decision => TOOLS,
        Icon::Loop => LOOP,
        Icon::Error => ERROR,
        Icon::Check => CHECK,
        Icon::Output => OUTPUT,
        Icon::Cloud | Icon::Box | Icon::Node => &[],
    }
}

/// Shape groups for a service icon overlay. Empty when the icon has no glyph.
pub(super) fn icon_shapes(icon: Icon) -> Vec<Shape> {
    glyphs(icon)
        .iter()
        .map(|glyph| {
            let mut items: Vec<Shape> = glyph.primitives.iter().map(|p| p.to_shape()).collect();
            items.push(Shape::fill(WHITE, glyph.opacity));
            Shape::rotated_group(glyph.name, items, glyph.rotation)
        })
        .collect()
}
