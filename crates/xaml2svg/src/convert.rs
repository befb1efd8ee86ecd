//! Conversion driver
//!
//! Processes resource entries one at a time: decode the key, translate each
//! drawing, emit the document and hand it to an [`IconSink`]. Failures are
//! contained at the smallest scope they affect: a bad drawing drops that
//! shape, a bad entry skips that icon, and only unreadable input aborts the
//! run.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, SkipReason};
use crate::document::IconRecord;
use crate::error::ConvertError;
use crate::fill::{FillResult, DEFAULT_FALLBACK_COLOR};
use crate::key::IconKey;
use crate::shape::translate;
use crate::xaml::{parse_dictionary, DrawingImage};

/// How output files are named
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileNaming {
    /// The logical name: `Home24` -> `Home.svg`
    #[default]
    Name,
    /// The full identifier: `Home24` -> `Home24.svg`
    Key,
}

/// Conversion settings
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    pub naming: FileNaming,
    /// Fill color substituted for unsupported brushes
    pub fallback_color: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            naming: FileNaming::default(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

/// Destination for rendered icons
pub trait IconSink {
    /// Store one icon; `file_name` includes the `.svg` extension
    fn write_icon(&mut self, file_name: &str, svg: &str) -> io::Result<PathBuf>;
}

/// Writes each icon to its own file in a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IconSink for DirectorySink {
    fn write_icon(&mut self, file_name: &str, svg: &str) -> io::Result<PathBuf> {
        if !is_plain_file_name(file_name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("`{}` would be written outside {}", file_name, self.dir.display()),
            ));
        }

        let path = self.dir.join(file_name);
        // The document is fully rendered before the file is opened, so a
        // failed icon leaves nothing behind.
        fs::write(&path, svg)?;
        Ok(path)
    }
}

/// Keeps rendered icons in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub icons: Vec<(String, String)>,
}

impl IconSink for MemorySink {
    fn write_icon(&mut self, file_name: &str, svg: &str) -> io::Result<PathBuf> {
        self.icons.push((file_name.to_string(), svg.to_string()));
        Ok(PathBuf::from(file_name))
    }
}

/// Result of a conversion run
#[derive(Debug, Default)]
pub struct Outcome {
    /// Paths reported by the sink, in input order
    pub written: Vec<PathBuf>,
    pub diagnostics: Diagnostics,
}

/// Drives a whole resource dictionary through the conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a XAML file, writing one SVG per icon into `output_dir`
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<Outcome, ConvertError> {
        let input = input.as_ref();
        info!("converting {}", input.display());

        let xaml = fs::read_to_string(input)?;
        let mut sink = DirectorySink::new(output_dir.as_ref());
        self.convert_str(&xaml, &mut sink)
    }

    /// Convert XAML markup into `sink`
    pub fn convert_str(
        &self,
        xaml: &str,
        sink: &mut dyn IconSink,
    ) -> Result<Outcome, ConvertError> {
        let images = parse_dictionary(xaml)?;

        let mut outcome = Outcome::default();
        let mut file_names = HashSet::new();

        for (index, image) in images.iter().enumerate() {
            let label = image
                .key
                .clone()
                .unwrap_or_else(|| format!("<DrawingImage #{}>", index));

            let result = self
                .build_record(image, &label, &mut outcome.diagnostics)
                .and_then(|record| self.write_record(&record, sink, &mut file_names));

            match result {
                Ok(path) => {
                    debug!("{} -> {}", label, path.display());
                    outcome.written.push(path);
                }
                Err(reason) => outcome
                    .diagnostics
                    .push(Diagnostic::new(label, DiagnosticKind::SkippedIcon(reason))),
            }
        }

        info!(
            "wrote {} icon(s), skipped {}",
            outcome.written.len(),
            outcome.diagnostics.skipped_icons()
        );
        Ok(outcome)
    }

    /// Decode one entry into an icon record, reporting shape-level problems
    fn build_record(
        &self,
        image: &DrawingImage,
        label: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<IconRecord, SkipReason> {
        let identifier = image.key.as_deref().ok_or(SkipReason::MissingKey)?;
        let key = IconKey::parse(identifier)?;
        let drawings = image.drawings.as_ref().ok_or(SkipReason::MissingDrawing)?;

        for construct in &image.ignored {
            diagnostics.push(Diagnostic::new(
                label,
                DiagnosticKind::Ignored {
                    construct: construct.clone(),
                },
            ));
        }

        let mut shapes = Vec::with_capacity(drawings.len());
        for (index, drawing) in drawings.iter().enumerate() {
            match translate(drawing, &self.options.fallback_color) {
                Ok(shape) => {
                    if let FillResult::Fallback { brush, .. } = &shape.fill {
                        diagnostics.push(Diagnostic::new(
                            label,
                            DiagnosticKind::FallbackFill {
                                index,
                                brush: brush.clone(),
                            },
                        ));
                    }
                    shapes.push(shape);
                }
                Err(error) => diagnostics.push(Diagnostic::new(
                    label,
                    DiagnosticKind::DroppedShape { index, error },
                )),
            }
        }

        if shapes.is_empty() {
            return Err(SkipReason::NoShapes);
        }

        Ok(IconRecord::new(identifier, key, shapes))
    }

    fn write_record(
        &self,
        record: &IconRecord,
        sink: &mut dyn IconSink,
        file_names: &mut HashSet<String>,
    ) -> Result<PathBuf, SkipReason> {
        let stem = match self.options.naming {
            FileNaming::Name => record.key.name.as_str(),
            FileNaming::Key => record.identifier.as_str(),
        };
        if !is_plain_file_name(stem) {
            return Err(SkipReason::InvalidFileName(stem.to_string()));
        }
        let file_name = format!("{}.svg", stem);

        if !file_names.insert(file_name.clone()) {
            return Err(SkipReason::DuplicateOutput(PathBuf::from(file_name)));
        }

        let svg = record.to_svg_string();
        sink.write_icon(&file_name, &svg)
            .map_err(|source| SkipReason::Io {
                path: PathBuf::from(file_name),
                source,
            })
    }
}

/// A single normal path component: no separators, no `.`/`..`, no root or
/// drive prefix
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == name,
        _ => false,
    }
}
