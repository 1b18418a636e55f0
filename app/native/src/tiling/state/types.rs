//! Core value types for the tiling state model.
//!
//! Identifiers are opaque newtypes over the platform handles:
//! - `WindowId` is the window server's window number
//! - `MonitorId` is the display identifier
//! - `ContainerId` is allocated per monitor state and never reused
//!
//! None of the identifiers implement `Ord`: they are handles, not positions.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque window handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

/// Opaque display handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorId(pub u32);

/// Container handle, unique within one monitor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "c{}", self.0) }
}

/// Process identifier of a window's owning application.
pub type Pid = i32;

// ============================================================================
// Geometry Types
// ============================================================================

/// A rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a zero-sized rectangle at origin.
    #[must_use]
    pub const fn zero() -> Self { Self::new(0.0, 0.0, 0.0, 0.0) }

    /// Check if this rectangle has valid dimensions.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.width > 0.0 && self.height > 0.0 }

    #[must_use]
    pub const fn min_x(&self) -> f64 { self.x }

    #[must_use]
    pub const fn min_y(&self) -> f64 { self.y }

    #[must_use]
    pub fn max_x(&self) -> f64 { self.x + self.width }

    #[must_use]
    pub fn max_y(&self) -> f64 { self.y + self.height }

    /// Check if this rectangle contains a point (half-open on the far edges).
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Get the center point of this rectangle.
    #[must_use]
    pub fn center(&self) -> (f64, f64) { (self.x + self.width / 2.0, self.y + self.height / 2.0) }

    /// Euclidean distance between the centers of two rectangles.
    #[must_use]
    pub fn center_distance(&self, other: &Self) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }

    /// Shrink the rectangle by `amount` on every edge.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            2.0f64.mul_add(-amount, self.width),
            2.0f64.mul_add(-amount, self.height),
        )
    }

    /// Check if two rectangles are approximately equal (within epsilon).
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.width - other.width).abs() < epsilon
            && (self.height - other.height).abs() < epsilon
    }

    /// Returns true when both rectangles have the same size.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        (self.width - other.width).abs() < 0.5 && (self.height - other.height).abs() < 0.5
    }
}

// ============================================================================
// Layout Identifiers
// ============================================================================

/// Built-in layouts. Each one carves the monitor into a fixed set of containers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutId {
    /// One container covering the whole monitor.
    #[default]
    Monocle,
    /// Two side-by-side columns.
    #[serde(rename = "columns-2")]
    Columns2,
    /// Three side-by-side columns.
    #[serde(rename = "columns-3")]
    Columns3,
    /// Two stacked rows.
    #[serde(rename = "rows-2")]
    Rows2,
    /// Four quadrants.
    #[serde(rename = "grid-2x2")]
    Grid2x2,
}

impl LayoutId {
    /// All built-in layouts, in menu order.
    pub const ALL: [Self; 5] =
        [Self::Monocle, Self::Columns2, Self::Columns3, Self::Rows2, Self::Grid2x2];

    /// Returns the layout name as a static kebab-case string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monocle => "monocle",
            Self::Columns2 => "columns-2",
            Self::Columns3 => "columns-3",
            Self::Rows2 => "rows-2",
            Self::Grid2x2 => "grid-2x2",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for LayoutId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown layout '{s}'"))
    }
}

/// Axis along which an accordion stacks its windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Windows offset along the X axis.
    #[default]
    Horizontal,
    /// Windows offset along the Y axis.
    Vertical,
}

// ============================================================================
// Direction
// ============================================================================

/// Direction for focus, move and cycle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Next,
    Previous,
}

impl Direction {
    /// Returns true for up/down/left/right.
    #[must_use]
    pub const fn is_spatial(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    /// Whether this direction walks a ring forward.
    ///
    /// Right and down count as forward so spatial keys still cycle sensibly.
    #[must_use]
    pub const fn is_forward(self) -> bool { matches!(self, Self::Next | Self::Right | Self::Down) }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "next" => Ok(Self::Next),
            "previous" | "prev" => Ok(Self::Previous),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
