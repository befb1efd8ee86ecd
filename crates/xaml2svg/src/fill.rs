//! Brush conversion to SVG fills
//!
//! Only solid colors have an SVG counterpart here. Gradients, every other
//! brush, and color strings that cannot be read degrade to a fixed fallback
//! color so the icon still renders, and the degradation is flagged for the
//! caller to report.

use tracing::debug;

use crate::xaml::Brush;

/// Color used for brushes that cannot be converted
pub const DEFAULT_FALLBACK_COLOR: &str = "red";

/// An SVG fill color with its opacity
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// `#rrggbb`, a lower-case color name, or `none`
    pub color: String,
    pub opacity: f32,
}

impl Paint {
    pub fn none() -> Self {
        Self::opaque("none")
    }

    pub fn opaque(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn is_none(&self) -> bool {
        self.color == "none"
    }

    /// Opacity rounded to two decimals, or `None` when the fill is opaque
    pub fn fill_opacity(&self) -> Option<f32> {
        let rounded = (self.opacity * 100.0).round() / 100.0;
        (rounded < 1.0).then_some(rounded)
    }
}

/// The outcome of resolving a brush
#[derive(Clone, Debug, PartialEq)]
pub enum FillResult {
    Solid(Paint),
    /// The brush was not convertible; `brush` names what was replaced
    Fallback { paint: Paint, brush: String },
}

impl FillResult {
    pub fn paint(&self) -> &Paint {
        match self {
            FillResult::Solid(paint) | FillResult::Fallback { paint, .. } => paint,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FillResult::Fallback { .. })
    }
}

/// Resolve a brush into a fill; never fails
pub fn resolve_fill(brush: &Brush, fallback_color: &str) -> FillResult {
    match brush {
        Brush::None => FillResult::Solid(Paint::none()),
        Brush::Empty => {
            debug!("empty brush element, filling with none");
            FillResult::Solid(Paint::none())
        }
        Brush::Solid { color, opacity } => match parse_color(color) {
            Some(paint) => {
                let opacity = opacity.as_deref().map_or(1.0, parse_opacity);
                let combined = paint.opacity * opacity;
                FillResult::Solid(paint.with_opacity(combined))
            }
            None => FillResult::Fallback {
                paint: Paint::opaque(fallback_color),
                brush: format!("color `{}`", color.trim()),
            },
        },
        other => FillResult::Fallback {
            paint: Paint::opaque(fallback_color),
            brush: other.kind().to_string(),
        },
    }
}

fn parse_opacity(value: &str) -> f32 {
    value.trim().parse().unwrap_or_else(|_| {
        debug!("ignoring invalid Opacity=\"{}\"", value);
        1.0
    })
}

/// Convert a XAML color string to an SVG paint
///
/// `#AARRGGBB` and `#ARGB` carry their alpha into the opacity; `#RRGGBB`,
/// `#RGB` and named colors are opaque. `Transparent` and empty values become
/// `none`. Returns `None` for anything unrecognized (malformed hex, markup
/// extensions such as `{StaticResource Accent}`).
pub fn parse_color(value: &str) -> Option<Paint> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("transparent") {
        return Some(Paint::none());
    }

    let Some(hex) = value.strip_prefix('#') else {
        if value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(Paint::opaque(value.to_ascii_lowercase()));
        }
        debug!("unsupported color value `{}`", value);
        return None;
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        debug!("invalid hex color `{}`", value);
        return None;
    }
    let hex = hex.to_ascii_lowercase();

    let (alpha, rgb) = match hex.len() {
        3 => (None, expand_short(&hex)),
        4 => (Some(expand_short(&hex[..1])), expand_short(&hex[1..])),
        6 => (None, hex.clone()),
        8 => (Some(hex[..2].to_string()), hex[2..].to_string()),
        _ => {
            debug!("invalid hex color `{}`", value);
            return None;
        }
    };

    let paint = Paint::opaque(format!("#{}", rgb));
    Some(match alpha.and_then(|a| u8::from_str_radix(&a, 16).ok()) {
        Some(alpha) => paint.with_opacity(alpha as f32 / 255.0),
        None => paint,
    })
}

/// `f80` -> `ff8800`
fn expand_short(hex: &str) -> String {
    hex.chars().flat_map(|c| [c, c]).collect()
}
