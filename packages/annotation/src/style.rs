//! Closed lookup tables for marker icons, priority colors, and the outage
//! polygon style.

use emergency_map_models::{CategoryTag, Priority, ResourceCategory};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Marker pin colors available in the map stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PinColor {
    /// Orange
    Orange,
    /// Red
    Red,
    /// Blue
    Blue,
    /// Navy
    Navy,
    /// Green
    Green,
    /// Cyan
    Cyan,
    /// Purple
    Purple,
}

/// A marker pin: color plus a Font Awesome glyph name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerIcon {
    /// Pin color.
    pub color: PinColor,
    /// Glyph name without the `fa-` prefix.
    pub glyph: &'static str,
}

impl MarkerIcon {
    /// Icon size in pixels, `[width, height]`.
    pub const SIZE: [u16; 2] = [30, 42];
    /// Pixel offset of the pin tip from the icon's top-left corner.
    pub const ANCHOR: [i16; 2] = [15, 42];
    /// Pixel offset of the popup from the pin tip.
    pub const POPUP_ANCHOR: [i16; 2] = [0, -42];

    const fn new(color: PinColor, glyph: &'static str) -> Self {
        Self { color, glyph }
    }

    /// CSS classes for the pin element.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("marker-pin marker-{}", self.color)
    }
}

/// Icon used for resources whose category is not recognized.
pub const DEFAULT_RESOURCE_ICON: MarkerIcon = category_icon(ResourceCategory::Generator);

/// Icon used for every incident regardless of its type.
pub const ALERT_ICON: MarkerIcon = MarkerIcon::new(PinColor::Red, "exclamation-triangle");

/// Icon for a known category.
#[must_use]
pub const fn category_icon(category: ResourceCategory) -> MarkerIcon {
    match category {
        ResourceCategory::Generator => MarkerIcon::new(PinColor::Orange, "bolt"),
        ResourceCategory::Medical => MarkerIcon::new(PinColor::Red, "plus"),
        ResourceCategory::Shelter => MarkerIcon::new(PinColor::Blue, "shield-alt"),
        ResourceCategory::FireStation => MarkerIcon::new(PinColor::Red, "fire"),
        ResourceCategory::Police => MarkerIcon::new(PinColor::Navy, "shield"),
        ResourceCategory::Supply => MarkerIcon::new(PinColor::Green, "box"),
        ResourceCategory::Water => MarkerIcon::new(PinColor::Cyan, "tint"),
        ResourceCategory::Evacuation => MarkerIcon::new(PinColor::Purple, "route"),
    }
}

/// Icon for a resource's category tag, falling back to
/// [`DEFAULT_RESOURCE_ICON`].
#[must_use]
pub const fn resource_icon(tag: &CategoryTag) -> MarkerIcon {
    match tag {
        CategoryTag::Known(category) => category_icon(*category),
        CategoryTag::Unrecognized(_) => DEFAULT_RESOURCE_ICON,
    }
}

/// Indicator color for a priority. Unspecified uses the medium color.
#[must_use]
pub const fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "#dc2626",
        Priority::High => "#f59e0b",
        Priority::Medium | Priority::Unspecified => "#10b981",
        Priority::Low => "#6b7280",
    }
}

/// Stroke and fill for a polygon overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    /// Stroke color.
    pub color: &'static str,
    /// Fill color.
    pub fill_color: &'static str,
    /// Fill opacity, 0 to 1.
    pub fill_opacity: f64,
    /// Stroke width in pixels.
    pub weight: u8,
}

/// Style of every outage zone overlay.
pub const OUTAGE_STYLE: PolygonStyle = PolygonStyle {
    color: "#dc2626",
    fill_color: "#dc2626",
    fill_opacity: 0.3,
    weight: 2,
};
