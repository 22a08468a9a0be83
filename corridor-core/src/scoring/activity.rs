use std::fmt;

use serde::{Deserialize, Serialize};

/// Activity a corridor is scored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    RoadCycling,
    GravelCycling,
    Running,
    Walking,
}

impl ActivityType {
    pub const ALL: [Self; 4] = [
        Self::RoadCycling,
        Self::GravelCycling,
        Self::Running,
        Self::Walking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoadCycling => "road-cycling",
            Self::GravelCycling => "gravel-cycling",
            Self::Running => "running",
            Self::Walking => "walking",
        }
    }

    pub fn is_cycling(self) -> bool {
        matches!(self, Self::RoadCycling | Self::GravelCycling)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
