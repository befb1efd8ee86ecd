//! Drawing translation into shape descriptors

use crate::error::GeometryError;
use crate::fill::{resolve_fill, FillResult};
use crate::path::{PathData, Point};
use crate::xaml::{Geometry, GeometryDrawing};

/// The outline of one shape
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path(PathData),
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// A shape ready for emission: outline, fill and placement
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub shape: Shape,
    pub fill: FillResult,
    /// Translation inherited from enclosing drawing groups
    pub offset: Point,
}

/// Translate one geometry drawing
///
/// Fails when the geometry has no supported SVG form; the caller drops that
/// shape and keeps its siblings.
pub fn translate(
    drawing: &GeometryDrawing,
    fallback_color: &str,
) -> Result<ShapeDescriptor, GeometryError> {
    let shape = translate_geometry(&drawing.geometry)?;

    Ok(ShapeDescriptor {
        shape,
        fill: resolve_fill(&drawing.brush, fallback_color),
        offset: drawing.offset,
    })
}

fn translate_geometry(geometry: &Geometry) -> Result<Shape, GeometryError> {
    match geometry {
        Geometry::Path(data) => Ok(Shape::Path(PathData::parse(data)?)),
        Geometry::Ellipse {
            center,
            radius_x,
            radius_y,
        } => {
            let center = match center {
                Some(value) => {
                    let [x, y] = numbers(value, "Center")?;
                    Point::new(x, y)
                }
                None => Point::ZERO,
            };

            Ok(Shape::Ellipse {
                center,
                radius_x: optional_number(radius_x.as_deref(), "RadiusX", 1.0)?,
                radius_y: optional_number(radius_y.as_deref(), "RadiusY", 1.0)?,
            })
        }
        Geometry::Rectangle {
            rect,
            radius_x,
            radius_y,
        } => {
            let corner_x = optional_number(radius_x.as_deref(), "RadiusX", 0.0)?;
            let corner_y = optional_number(radius_y.as_deref(), "RadiusY", 0.0)?;
            if corner_x != 0.0 || corner_y != 0.0 {
                return Err(GeometryError::RoundedRectangle {
                    radius_x: corner_x,
                    radius_y: corner_y,
                });
            }

            let [x, y, width, height] = match rect {
                Some(value) => numbers(value, "Rect")?,
                None => [0.0, 0.0, 1.0, 1.0],
            };
            if width < 0.0 || height < 0.0 {
                return Err(GeometryError::InvalidAttribute {
                    attribute: "Rect",
                    value: rect.clone().unwrap_or_default(),
                });
            }

            Ok(Shape::Rect {
                x,
                y,
                width,
                height,
            })
        }
        Geometry::Unsupported(name) => Err(GeometryError::Unsupported(name.clone())),
        Geometry::Missing => Err(GeometryError::Missing),
    }
}

/// Parse a comma or space separated list of exactly `N` numbers
fn numbers<const N: usize>(
    value: &str,
    attribute: &'static str,
) -> Result<[f64; N], GeometryError> {
    let invalid = || GeometryError::InvalidAttribute {
        attribute,
        value: value.to_string(),
    };

    let parsed = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    parsed.try_into().map_err(|_| invalid())
}

fn optional_number(
    value: Option<&str>,
    attribute: &'static str,
    default: f64,
) -> Result<f64, GeometryError> {
    match value {
        Some(value) => numbers::<1>(value, attribute).map(|[n]| n),
        None => Ok(default),
    }
}
