//! Error types

use std::io;
use thiserror::Error;

/// Errors that abort a whole conversion run
#[derive(Error, Debug)]
pub enum ConvertError {
    /// IO error when reading the input file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not well-formed XML
    #[error("XAML parsing error: {0}")]
    Parse(#[from] roxmltree::Error),

    /// The root element is not a resource dictionary
    #[error("root element <{0}> is not a WPF ResourceDictionary")]
    NotADictionary(String),
}

/// An icon identifier that does not split into a name and a pixel size
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyFormatError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier `{0}` does not end with a pixel size")]
    MissingSize(String),

    #[error("identifier `{0}` has no name before its pixel size")]
    MissingName(String),

    /// Zero, or too large for a pixel size
    #[error("identifier `{0}` has an invalid pixel size")]
    InvalidSize(String),
}

/// Errors in path mini-language data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,

    #[error("unknown path command `{letter}` at offset {offset}")]
    UnknownCommand { letter: char, offset: usize },

    #[error("path must start with a move-to, found `{letter}` at offset {offset}")]
    MissingMoveTo { letter: char, offset: usize },

    #[error("expected a number at offset {offset}")]
    ExpectedNumber { offset: usize },

    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("expected a 0 or 1 flag at offset {offset}")]
    ExpectedFlag { offset: usize },

    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
}

/// A drawing primitive that cannot be translated into an SVG shape
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid path data: {0}")]
    Path(#[from] PathError),

    #[error("rounded rectangles are not supported (RadiusX={radius_x}, RadiusY={radius_y})")]
    RoundedRectangle { radius_x: f64, radius_y: f64 },

    #[error("unsupported geometry <{0}>")]
    Unsupported(String),

    #[error("invalid {attribute} value `{value}`")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error("drawing has no geometry")]
    Missing,
}
