use serde::{Deserialize, Serialize};

/// Classification of the current scroll gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Content is moving toward the top
    Up,
    /// Content is moving toward the bottom
    Down,
    /// No active gesture
    #[default]
    Idle,
}

impl ScrollDirection {
    pub fn is_idle(&self) -> bool {
        matches!(self, ScrollDirection::Idle)
    }
}

impl std::fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
            ScrollDirection::Idle => "idle",
        };
        write!(f, "{label}")
    }
}

/// Direction that hides a direction-bound component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideDirection {
    Up,
    Down,
}

impl HideDirection {
    /// Whether the given classification triggers hiding
    pub fn matches(&self, direction: ScrollDirection) -> bool {
        matches!(
            (self, direction),
            (HideDirection::Up, ScrollDirection::Up) | (HideDirection::Down, ScrollDirection::Down)
        )
    }
}

impl From<&str> for HideDirection {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "up" => HideDirection::Up,
            _ => HideDirection::Down, // Default to down
        }
    }
}

/// Discrete notification delivered to low-frequency consumers when the
/// classification changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionEvent {
    /// The direction just entered
    pub direction: ScrollDirection,
    /// Clamped offset at which the change happened
    pub offset_y: f32,
}
