//! SVG document assembly for one icon

use svg::node::element::{Ellipse, Path, Rectangle};
use svg::{Document, Node};

use crate::key::IconKey;
use crate::path::{FillRule, Point};
use crate::shape::{Shape, ShapeDescriptor};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Everything needed to emit one icon
#[derive(Clone, Debug)]
pub struct IconRecord {
    /// The full identifier, e.g. `Home24`
    pub identifier: String,
    pub key: IconKey,
    pub shapes: Vec<ShapeDescriptor>,
}

impl IconRecord {
    pub fn new(identifier: impl Into<String>, key: IconKey, shapes: Vec<ShapeDescriptor>) -> Self {
        Self {
            identifier: identifier.into(),
            key,
            shapes,
        }
    }

    /// Side of the square canvas
    pub fn view_box_size(&self) -> u32 {
        self.key.size
    }

    /// Build the SVG document
    pub fn to_document(&self) -> Document {
        let size = self.view_box_size();
        let document = Document::new()
            .set("xmlns", SVG_NAMESPACE)
            .set("id", self.identifier.as_str())
            .set("viewBox", format!("0 0 {} {}", size, size));

        self.shapes
            .iter()
            .fold(document, |document, descriptor| match &descriptor.shape {
                Shape::Path(path) => {
                    let mut node = Path::new().set("d", path.to_svg_data());
                    if path.fill_rule() == FillRule::EvenOdd {
                        node = node.set("fill-rule", "evenodd");
                    }
                    document.add(paint(node, descriptor))
                }
                Shape::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                } => document.add(paint(
                    Ellipse::new()
                        .set("cx", center.x as f32)
                        .set("cy", center.y as f32)
                        .set("rx", *radius_x as f32)
                        .set("ry", *radius_y as f32),
                    descriptor,
                )),
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    let mut node = Rectangle::new()
                        .set("width", *width as f32)
                        .set("height", *height as f32);
                    if *x != 0.0 {
                        node = node.set("x", *x as f32);
                    }
                    if *y != 0.0 {
                        node = node.set("y", *y as f32);
                    }
                    document.add(paint(node, descriptor))
                }
            })
    }

    /// Serialize to SVG markup
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }
}

/// Attach fill and placement attributes to a shape node
fn paint<N: Node>(mut node: N, descriptor: &ShapeDescriptor) -> N {
    let paint = descriptor.fill.paint();
    node.assign("fill", paint.color.as_str());
    if let Some(opacity) = paint.fill_opacity() {
        node.assign("fill-opacity", opacity);
    }

    let offset = descriptor.offset;
    if offset != Point::ZERO {
        let [x, y] = offset.to_f32();
        node.assign("transform", format!("translate({},{})", x, y));
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::{FillResult, Paint};
    use crate::path::PathData;

    fn record(identifier: &str, shapes: Vec<ShapeDescriptor>) -> IconRecord {
        IconRecord::new(identifier, IconKey::parse(identifier).unwrap(), shapes)
    }

    fn solid(shape: Shape, color: &str) -> ShapeDescriptor {
        ShapeDescriptor {
            shape,
            fill: FillResult::Solid(Paint::opaque(color)),
            offset: Point::ZERO,
        }
    }

    #[test]
    fn test_square_view_box_and_rect() {
        let icon = record(
            "Star16",
            vec![solid(
                Shape::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 16.0,
                    height: 16.0,
                },
                "blue",
            )],
        );

        let svg = icon.to_svg_string();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 16 16""#));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"id="Star16""#));
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.contains(r#"fill="blue""#));
        assert!(svg.contains(r#"width="16""#));
        // Zero origin is left to the SVG default
        assert!(!svg.contains(" x="));
        assert!(!svg.contains(" y="));
    }

    #[test]
    fn test_ellipse_and_offset_rect() {
        let mut rect = solid(
            Shape::Rect {
                x: 2.0,
                y: 0.0,
                width: 4.0,
                height: 4.0,
            },
            "#00ff00",
        );
        rect.offset = Point::new(1.5, -2.0);

        let icon = record(
            "Mixed24",
            vec![
                solid(
                    Shape::Ellipse {
                        center: Point::new(12.0, 12.0),
                        radius_x: 6.0,
                        radius_y: 4.0,
                    },
                    "black",
                ),
                rect,
            ],
        );

        let svg = icon.to_svg_string();
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains(r#"cx="12""#));
        assert!(svg.contains(r#"rx="6""#));
        assert!(svg.contains(r#"ry="4""#));
        assert!(svg.contains(r#"x="2""#));
        assert!(svg.contains(r#"transform="translate(1.5,-2)""#));
        assert!(svg.contains("#00ff00"));
    }

    #[test]
    fn test_path_fill_rule_and_opacity() {
        let even_odd = ShapeDescriptor {
            shape: Shape::Path(PathData::parse("M0,0 L8,0 L8,8 Z").unwrap()),
            fill: FillResult::Solid(Paint::opaque("#212121").with_opacity(0.5)),
            offset: Point::ZERO,
        };
        let non_zero = solid(
            Shape::Path(PathData::parse("F1 M0,0 L8,8").unwrap()),
            "red",
        );

        let svg = record("Paths8", vec![even_odd]).to_svg_string();
        assert!(svg.contains("<path"));
        assert!(svg.contains(r#"fill-rule="evenodd""#));
        assert!(svg.contains(r#"fill-opacity="0.5""#));

        let svg = record("Paths8", vec![non_zero]).to_svg_string();
        assert!(!svg.contains("fill-rule"));
        assert!(!svg.contains("fill-opacity"));
    }

    #[test]
    fn test_fallback_fill_is_emitted() {
        let icon = record(
            "Gradient16",
            vec![ShapeDescriptor {
                shape: Shape::Ellipse {
                    center: Point::new(8.0, 8.0),
                    radius_x: 8.0,
                    radius_y: 8.0,
                },
                fill: FillResult::Fallback {
                    paint: Paint::opaque("red"),
                    brush: "LinearGradientBrush".to_string(),
                },
                offset: Point::ZERO,
            }],
        );

        assert!(icon.to_svg_string().contains(r#"fill="red""#));
    }
}
