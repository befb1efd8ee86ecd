//! XAML icon conversion to SVG
//!
//! This crate reads a WPF `ResourceDictionary` of `DrawingImage` icons and
//! writes each icon as a standalone SVG document. Identifiers such as
//! `Home24` carry the logical name and the pixel size of the square canvas.
//! It uses `roxmltree` to read the markup and `svg` to build the output.
//!
//! # Example
//!
//! ```ignore
//! use xaml2svg::{ConvertOptions, Converter};
//!
//! let outcome = Converter::new(ConvertOptions::default())
//!     .convert_file("Icons.xaml", "out/")?;
//! for diagnostic in &outcome.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

mod convert;
mod diagnostics;
mod document;
mod error;
mod fill;
mod key;
mod path;
mod shape;
mod xaml;

pub use convert::{
    ConvertOptions, Converter, DirectorySink, FileNaming, IconSink, MemorySink, Outcome,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, SkipReason};
pub use document::IconRecord;
pub use error::{ConvertError, GeometryError, KeyFormatError, PathError};
pub use fill::{parse_color, resolve_fill, FillResult, Paint, DEFAULT_FALLBACK_COLOR};
pub use key::IconKey;
pub use path::{DrawingCommand, FillRule, PathData, Point, Vec2};
pub use shape::{translate, Shape, ShapeDescriptor};
pub use xaml::{parse_dictionary, Brush, DrawingImage, Geometry, GeometryDrawing};
