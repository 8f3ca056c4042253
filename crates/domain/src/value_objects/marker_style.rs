//! Map marker styling derived from provider category codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color used when no table entry matches
pub const DEFAULT_MARKER_COLOR: &str = "gray";

/// Icon used when no table entry matches
pub const DEFAULT_MARKER_ICON: &str = "map-marker";

/// Ordered (substring, color) table. First match wins, so order matters:
/// category codes are dotted hierarchies and several keys can match one code.
static COLOR_TABLE: &[(&str, &str)] = &[
    ("catering.restaurant", "green"),
    ("catering.bar", "purple"),
    ("catering.pub", "purple"),
    ("catering.cafe", "orange"),
    ("catering.fast_food", "lightgreen"),
    ("entertainment", "blue"),
    ("tourism.attraction", "red"),
    ("commercial", "gray"),
];

/// Ordered (substring, icon) table, same matching rule as [`COLOR_TABLE`]
static ICON_TABLE: &[(&str, &str)] = &[
    ("catering.restaurant", "cutlery"),
    ("catering.bar", "glass"),
    ("catering.pub", "beer"),
    ("catering.cafe", "coffee"),
    ("catering.fast_food", "cutlery"),
    ("entertainment", "music"),
    ("tourism.attraction", "camera"),
    ("commercial", "shopping-cart"),
];

fn first_match(
    table: &'static [(&'static str, &'static str)],
    category: &str,
) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| category.contains(key))
        .map(|(_, value)| *value)
}

/// Marker color for a category code
#[must_use]
pub fn marker_color(category: &str) -> &'static str {
    first_match(COLOR_TABLE, category).unwrap_or(DEFAULT_MARKER_COLOR)
}

/// Marker icon for a category code
#[must_use]
pub fn marker_icon(category: &str) -> &'static str {
    first_match(ICON_TABLE, category).unwrap_or(DEFAULT_MARKER_ICON)
}

/// Rendered marker size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSize {
    /// Place markers
    Medium,
    /// The event marker
    Large,
}

impl fmt::Display for MarkerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Complete presentation metadata for one map marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Display color
    pub color: &'static str,
    /// Icon name
    pub icon: &'static str,
    /// Marker size
    pub size: MarkerSize,
}

impl MarkerStyle {
    /// Style of the originating event marker
    pub const EVENT: Self = Self {
        color: "red",
        icon: "star",
        size: MarkerSize::Large,
    };

    /// Style for a place with the given category code
    #[must_use]
    pub fn for_category(category: &str) -> Self {
        Self {
            color: marker_color(category),
            icon: marker_icon(category),
            size: MarkerSize::Medium,
        }
    }
}
