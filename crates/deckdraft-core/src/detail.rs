//! Extraction detail level: how verbose the service should make the deck.

use serde::{Deserialize, Serialize};

/// Integer 0-4 sent to the extraction endpoint as `detail_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetailLevel {
    VeryConcise,
    Concise,
    Normal,
    Detailed,
    VeryDetailed,
}

impl Default for DetailLevel {
    fn default() -> Self {
        DetailLevel::Normal
    }
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 5] = [
        DetailLevel::VeryConcise,
        DetailLevel::Concise,
        DetailLevel::Normal,
        DetailLevel::Detailed,
        DetailLevel::VeryDetailed,
    ];

    /// Wire value, 0 = very concise ... 4 = very detailed.
    pub fn value(self) -> u8 {
        match self {
            Self::VeryConcise => 0,
            Self::Concise => 1,
            Self::Normal => 2,
            Self::Detailed => 3,
            Self::VeryDetailed => 4,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryConcise => "Very Concise",
            Self::Concise => "Concise",
            Self::Normal => "Normal",
            Self::Detailed => "Detailed",
            Self::VeryDetailed => "Very Detailed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VeryConcise => "Minimal content, key points only",
            Self::Concise => "Brief content with essential details",
            Self::Normal => "Balanced content with good detail",
            Self::Detailed => "Comprehensive content with examples",
            Self::VeryDetailed => "Extensive content with full explanations",
        }
    }

    /// One step more detailed, saturating.
    pub fn more(self) -> Self {
        Self::from_value(self.value().saturating_add(1)).unwrap_or(Self::VeryDetailed)
    }

    /// One step less detailed, saturating.
    pub fn less(self) -> Self {
        Self::from_value(self.value().saturating_sub(1)).unwrap_or(Self::VeryConcise)
    }
}
