//! XAML resource dictionary decoding
//!
//! Walks the markup once and produces a typed description of every
//! `DrawingImage`: its key, and the flat list of geometry drawings it holds.
//! Nested `DrawingGroup`s are flattened; their translations are accumulated
//! into a per-drawing placement offset.

use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::ConvertError;
use crate::path::Point;

/// WPF presentation namespace
pub const NS_PRESENTATION: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
/// XAML language namespace (`x:Key`)
pub const NS_XAML: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// A brush as written in the source
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    /// The drawing names no brush
    None,
    /// A `GeometryDrawing.Brush` property element with nothing inside
    Empty,
    /// A `Brush` attribute string or a `SolidColorBrush` element
    Solid {
        color: String,
        opacity: Option<String>,
    },
    LinearGradient,
    RadialGradient,
    /// Any other brush element
    Other(String),
}

impl Brush {
    /// Element name used in diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Brush::None => "no brush",
            Brush::Empty => "empty brush",
            Brush::Solid { .. } => "SolidColorBrush",
            Brush::LinearGradient => "LinearGradientBrush",
            Brush::RadialGradient => "RadialGradientBrush",
            Brush::Other(name) => name,
        }
    }
}

/// A geometry as written in the source
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// The drawing has no geometry
    Missing,
    /// Path mini-language data
    Path(String),
    Ellipse {
        center: Option<String>,
        radius_x: Option<String>,
        radius_y: Option<String>,
    },
    Rectangle {
        rect: Option<String>,
        radius_x: Option<String>,
        radius_y: Option<String>,
    },
    /// A geometry or drawing kind with no SVG counterpart here
    Unsupported(String),
}

/// One `GeometryDrawing`, placed by its enclosing groups
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryDrawing {
    pub geometry: Geometry,
    pub brush: Brush,
    pub offset: Point,
}

/// One `DrawingImage` resource
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingImage {
    /// The `x:Key` identifier
    pub key: Option<String>,
    /// `None` when there is no `DrawingImage.Drawing` content
    pub drawings: Option<Vec<GeometryDrawing>>,
    /// Constructs that were dropped while decoding (transforms, clips)
    pub ignored: Vec<String>,
}

/// Decode every `DrawingImage` directly under the root `ResourceDictionary`
pub fn parse_dictionary(xaml: &str) -> Result<Vec<DrawingImage>, ConvertError> {
    let doc = Document::parse(xaml)?;
    let root = doc.root_element();

    if !is(root, "ResourceDictionary") {
        return Err(ConvertError::NotADictionary(
            root.tag_name().name().to_string(),
        ));
    }

    let images: Vec<DrawingImage> = root
        .children()
        .filter(|n| is(*n, "DrawingImage"))
        .map(decode_image)
        .collect();

    debug!("decoded {} DrawingImage resources", images.len());
    Ok(images)
}

fn decode_image(node: Node) -> DrawingImage {
    let mut image = DrawingImage {
        key: node.attribute((NS_XAML, "Key")).map(str::to_string),
        ..DrawingImage::default()
    };

    if let Some(content) = child_element(node, "DrawingImage.Drawing") {
        let mut drawings = Vec::new();
        for child in content.children().filter(Node::is_element) {
            walk(child, Point::ZERO, &mut drawings, &mut image.ignored);
        }
        image.drawings = Some(drawings);
    }

    image
}

fn walk(
    node: Node,
    offset: Point,
    drawings: &mut Vec<GeometryDrawing>,
    ignored: &mut Vec<String>,
) {
    match node.tag_name().name() {
        "GeometryDrawing" if in_presentation(node) => {
            drawings.push(decode_geometry_drawing(node, offset, ignored))
        }
        "DrawingGroup" if in_presentation(node) => {
            if node.attribute("Transform").is_some() {
                ignored.push("DrawingGroup.Transform".to_string());
            }
            let offset = child_element(node, "DrawingGroup.Transform")
                .map_or(offset, |property| apply_transforms(property, offset, ignored));

            for property in node.children().filter(|n| is_property_element(*n)) {
                match property.tag_name().name() {
                    "DrawingGroup.Transform" => {}
                    "DrawingGroup.Children" => {
                        for child in property.children().filter(Node::is_element) {
                            walk(child, offset, drawings, ignored);
                        }
                    }
                    other => ignored.push(other.to_string()),
                }
            }

            for child in node
                .children()
                .filter(|n| n.is_element() && !is_property_element(*n))
            {
                walk(child, offset, drawings, ignored);
            }
        }
        other => {
            debug!("unsupported drawing <{}>", other);
            drawings.push(GeometryDrawing {
                geometry: Geometry::Unsupported(other.to_string()),
                brush: Brush::None,
                offset,
            });
        }
    }
}

/// Fold the translations of a `DrawingGroup.Transform` into `offset`
fn apply_transforms(property: Node, offset: Point, ignored: &mut Vec<String>) -> Point {
    let mut offset = offset;

    for transform in property.children().filter(Node::is_element) {
        if is(transform, "TransformGroup") {
            for inner in transform.children().filter(Node::is_element) {
                offset = apply_transform(inner, offset, ignored);
            }
        } else {
            offset = apply_transform(transform, offset, ignored);
        }
    }

    offset
}

fn apply_transform(transform: Node, offset: Point, ignored: &mut Vec<String>) -> Point {
    let name = transform.tag_name().name();
    if !is(transform, "TranslateTransform") {
        ignored.push(name.to_string());
        return offset;
    }

    offset.offset(
        number_attribute(transform, "X"),
        number_attribute(transform, "Y"),
    )
}

fn number_attribute(node: Node, name: &str) -> f64 {
    let Some(value) = node.attribute(name) else {
        return 0.0;
    };
    value.trim().parse().unwrap_or_else(|_| {
        debug!("ignoring invalid {}=\"{}\"", name, value);
        0.0
    })
}

fn decode_geometry_drawing(
    node: Node,
    offset: Point,
    ignored: &mut Vec<String>,
) -> GeometryDrawing {
    let brush = match node.attribute("Brush") {
        Some(color) => Brush::Solid {
            color: color.to_string(),
            opacity: None,
        },
        None => child_element(node, "GeometryDrawing.Brush").map_or(Brush::None, decode_brush),
    };

    let geometry = match node.attribute("Geometry") {
        Some(data) => Geometry::Path(data.to_string()),
        None => child_element(node, "GeometryDrawing.Geometry")
            .map_or(Geometry::Missing, |property| decode_geometry(property, ignored)),
    };

    GeometryDrawing {
        geometry,
        brush,
        offset,
    }
}

fn decode_brush(property: Node) -> Brush {
    let Some(brush) = first_element(property) else {
        return Brush::Empty;
    };
    if !in_presentation(brush) {
        return Brush::Other(brush.tag_name().name().to_string());
    }

    match brush.tag_name().name() {
        "SolidColorBrush" => Brush::Solid {
            color: brush.attribute("Color").unwrap_or_default().to_string(),
            opacity: brush.attribute("Opacity").map(str::to_string),
        },
        "LinearGradientBrush" => Brush::LinearGradient,
        "RadialGradientBrush" => Brush::RadialGradient,
        other => Brush::Other(other.to_string()),
    }
}

fn decode_geometry(property: Node, ignored: &mut Vec<String>) -> Geometry {
    let Some(mut geometry) = first_element(property) else {
        return Geometry::Missing;
    };

    // A group holding a single geometry is that geometry
    if is(geometry, "GeometryGroup") {
        let mut children = geometry
            .children()
            .filter(|n| n.is_element() && !is_property_element(*n));
        match (children.next(), children.next()) {
            (Some(only), None) => geometry = only,
            _ => return Geometry::Unsupported("GeometryGroup".to_string()),
        }
    }

    let name = geometry.tag_name().name();
    if !in_presentation(geometry) {
        return Geometry::Unsupported(name.to_string());
    }
    if geometry.attribute("Transform").is_some()
        || child_element(geometry, &format!("{}.Transform", name)).is_some()
    {
        ignored.push(format!("{}.Transform", name));
    }

    let attribute = |attr: &str| geometry.attribute(attr).map(str::to_string);

    match name {
        "EllipseGeometry" => Geometry::Ellipse {
            center: attribute("Center"),
            radius_x: attribute("RadiusX"),
            radius_y: attribute("RadiusY"),
        },
        "RectangleGeometry" => Geometry::Rectangle {
            rect: attribute("Rect"),
            radius_x: attribute("RadiusX"),
            radius_y: attribute("RadiusY"),
        },
        "PathGeometry" => match geometry.attribute("Figures") {
            Some(figures) => Geometry::Path(figures.to_string()),
            None => Geometry::Unsupported("PathGeometry".to_string()),
        },
        "StreamGeometry" => match geometry.text().map(str::trim) {
            Some(data) if !data.is_empty() => Geometry::Path(data.to_string()),
            _ => Geometry::Unsupported("StreamGeometry".to_string()),
        },
        other => Geometry::Unsupported(other.to_string()),
    }
}

fn is(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && in_presentation(node)
}

fn in_presentation(node: Node) -> bool {
    node.tag_name().namespace() == Some(NS_PRESENTATION)
}

/// `Owner.Property` elements set properties rather than adding content
fn is_property_element(node: Node) -> bool {
    node.is_element() && node.tag_name().name().contains('.')
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is(*n, name))
}

fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(Node::is_element)
}
