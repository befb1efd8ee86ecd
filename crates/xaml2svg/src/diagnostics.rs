//! Conversion diagnostics
//!
//! Skips, dropped shapes and degraded fills are collected as values and
//! handed back to the caller, which decides how to surface them.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::{GeometryError, KeyFormatError};

/// Why an icon produced no output file
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("DrawingImage has no x:Key")]
    MissingKey,

    #[error(transparent)]
    InvalidKey(#[from] KeyFormatError),

    #[error("DrawingImage has no drawing content")]
    MissingDrawing,

    #[error("no convertible shapes")]
    NoShapes,

    #[error("`{0}` is not a plain file name")]
    InvalidFileName(String),

    #[error("another icon was already written to {}", .0.display())]
    DuplicateOutput(PathBuf),

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to an icon or one of its shapes
#[derive(Debug)]
pub enum DiagnosticKind {
    /// The icon was skipped entirely
    SkippedIcon(SkipReason),
    /// One drawing was dropped; its siblings were kept
    DroppedShape { index: usize, error: GeometryError },
    /// One shape's brush was replaced by the fallback color
    FallbackFill { index: usize, brush: String },
    /// A construct was ignored while decoding (non-translate transforms, clips)
    Ignored { construct: String },
}

/// A diagnostic attributed to one icon
#[derive(Debug)]
pub struct Diagnostic {
    /// The icon identifier, or a positional label when it has none
    pub icon: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(icon: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            icon: icon.into(),
            kind,
        }
    }

    /// True when the icon produced no output
    pub fn is_skip(&self) -> bool {
        matches!(self.kind, DiagnosticKind::SkippedIcon(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::SkippedIcon(reason) => {
                write!(f, "{}: skipped: {}", self.icon, reason)
            }
            DiagnosticKind::DroppedShape { index, error } => {
                write!(f, "{}: dropped drawing #{}: {}", self.icon, index, error)
            }
            DiagnosticKind::FallbackFill { index, brush } => write!(
                f,
                "{}: drawing #{} uses an unsupported {}, filled with the fallback color",
                self.icon, index, brush
            ),
            DiagnosticKind::Ignored { construct } => {
                write!(f, "{}: ignored {}", self.icon, construct)
            }
        }
    }
}

/// Ordered collection of diagnostics from one run
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of icons that produced no output
    pub fn skipped_icons(&self) -> usize {
        self.entries.iter().filter(|d| d.is_skip()).count()
    }

    /// Number of shapes painted with the fallback color
    pub fn fallback_fills(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::FallbackFill { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;

    #[test]
    fn test_display_names_icon_and_reason() {
        let skip = Diagnostic::new(
            "Bad",
            DiagnosticKind::SkippedIcon(SkipReason::InvalidKey(KeyFormatError::MissingSize(
                "Bad".to_string(),
            ))),
        );
        assert_eq!(
            skip.to_string(),
            "Bad: skipped: identifier `Bad` does not end with a pixel size"
        );

        let dropped = Diagnostic::new(
            "Home24",
            DiagnosticKind::DroppedShape {
                index: 1,
                error: GeometryError::Path(PathError::UnknownCommand {
                    letter: 'X',
                    offset: 5,
                }),
            },
        );
        assert_eq!(
            dropped.to_string(),
            "Home24: dropped drawing #1: invalid path data: unknown path command `X` at offset 5"
        );
    }

    #[test]
    fn test_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(
            "A16",
            DiagnosticKind::FallbackFill {
                index: 0,
                brush: "LinearGradientBrush".to_string(),
            },
        ));
        diagnostics.push(Diagnostic::new(
            "B",
            DiagnosticKind::SkippedIcon(SkipReason::MissingDrawing),
        ));
        diagnostics.push(Diagnostic::new(
            "C16",
            DiagnosticKind::Ignored {
                construct: "RotateTransform".to_string(),
            },
        ));

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.skipped_icons(), 1);
        assert_eq!(diagnostics.fallback_fills(), 1);
    }
}
