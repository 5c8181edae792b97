use std::fmt;
use std::str::FromStr;

/// Icon keywords understood by the generator. Unknown keywords still parse
/// as free text on the diagram side; they just never resolve to an `Icon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Cloud,
    Server,
    Database,
    Disk,
    Storage,
    Brain,
    Neural,
    Ai,
    Api,
    Sensor,
    Logs,
    Search,
    Query,
    Wifi,
    Globe,
    Web,
    Gear,
    Cog,
    Settings,
    Tools,
    Lightbulb,
    Idea,
    Output,
    Decision,
    Loop,
    Error,
    Check,
    Box,
    Node,
}

impl Icon {
    pub const ALL: [Icon; 29] = [
        Icon::Cloud,
        Icon::Server,
        Icon::Database,
        Icon::Disk,
        Icon::Storage,
        Icon::Brain,
        Icon::Neural,
        Icon::Ai,
        Icon::Api,
        Icon::Sensor,
        Icon::Logs,
        Icon::Search,
        Icon::Query,
        Icon::Wifi,
        Icon::Globe,
        Icon::Web,
        Icon::Gear,
        Icon::Cog,
        Icon::Settings,
        Icon::Tools,
        Icon::Lightbulb,
        Icon::Idea,
        Icon::Output,
        Icon::Decision,
        Icon::Loop,
        Icon::Error,
        Icon::Check,
        Icon::Box,
        Icon::Node,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Icon::Cloud => "cloud",
            Icon::Server => "server",
            Icon::Database => "database",
            Icon::Disk => "disk",
            Icon::Storage => "storage",
            Icon::Brain => "brain",
            Icon::Neural => "neural",
            Icon::Ai => "ai",
            Icon::Api => "api",
            Icon::Sensor => "sensor",
            Icon::Logs => "logs",
            Icon::Search => "search",
            Icon::Query => "query",
            Icon::Wifi => "wifi",
            Icon::Globe => "globe",
            Icon::Web => "web",
            Icon::Gear => "gear",
            Icon::Cog => "cog",
            Icon::Settings => "settings",
            Icon::Tools => "tools",
            Icon::Lightbulb => "lightbulb",
            Icon::Idea => "idea",
            Icon::Output => "output",
            Icon::Decision => "decision",
            Icon::Loop => "loop",
            Icon::Error => "error",
            Icon::Check => "check",
            Icon::Box => "box",
            Icon::Node => "node",
        }
    }

    /// Semantic color key looked up in the theme. `box` and `node` have none.
    pub fn color_key(self) -> Option<&'static str> {
        match self {
            Icon::Storage => Some("disk"),
            Icon::Box | Icon::Node => None,
            other => Some(other.keyword()),
        }
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .iter()
            .copied()
            .find(|icon| icon.keyword() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown icon `{0}`")]
pub struct UnknownIcon(pub String);

/// Resolves an optional icon keyword, ignoring anything outside the vocabulary.
pub fn resolve_icon(keyword: Option<&str>) -> Option<Icon> {
    keyword.and_then(|keyword| keyword.parse().ok())
}
