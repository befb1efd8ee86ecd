//! Path mini-language interpreter
//!
//! Parses XAML path markup (`F1 M0,0 L10,0 A5,5 0 0 1 15,5 Z`) into absolute
//! drawing commands and re-serializes them as SVG path data. Both grammars
//! share the same command letters and arc operand order, so the translation
//! is one command in, one command out.

use std::str::FromStr;

use svg::node::element::path::Data;

use crate::error::PathError;

// ─────────────────────────────────────────────────────────────────────────────
// Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// A point in icon coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by a delta
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Narrow to the single-precision pair the SVG writer takes
    pub fn to_f32(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }

    /// Mirror this point through `center`
    pub fn reflect_about(self, center: Point) -> Self {
        Self::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }
}

/// A 2D vector (arc radii)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One resolved drawing command; all points are absolute
#[derive(Clone, Debug, PartialEq)]
pub enum DrawingCommand {
    /// Start a new subpath
    MoveTo(Point),
    /// Straight line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Elliptical arc
    ///
    /// `rotation` is the x-axis rotation in degrees, as written in the source.
    ArcTo {
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath, returning to its start
    ClosePath,
}

/// How overlapping subpaths are filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// `F0`, and the default when a path names no rule
    #[default]
    EvenOdd,
    /// `F1`
    NonZero,
}

/// A parsed path: a non-empty command list whose first command is a move-to
#[derive(Clone, Debug, PartialEq)]
pub struct PathData {
    commands: Vec<DrawingCommand>,
    fill_rule: FillRule,
}

impl PathData {
    /// Parse path mini-language data
    pub fn parse(data: &str) -> Result<Self, PathError> {
        let mut lexer = Lexer::new(data);
        let fill_rule = lexer.fill_rule()?.unwrap_or_default();

        let mut interpreter = Interpreter::default();
        while let Some((letter, offset)) = lexer.command()? {
            interpreter.execute(letter, offset, &mut lexer)?;
        }

        if interpreter.commands.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self {
            commands: interpreter.commands,
            fill_rule,
        })
    }

    /// Get the path commands
    pub fn commands(&self) -> &[DrawingCommand] {
        &self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Convert to SVG path data (absolute commands only)
    ///
    /// Coordinates are resolved in `f64` and narrowed here, so relative
    /// chains do not carry single-precision drift into the output.
    pub fn to_svg_data(&self) -> Data {
        self.commands
            .iter()
            .fold(Data::new(), |data, command| match *command {
                DrawingCommand::MoveTo(p) => data.move_to(p.to_f32().to_vec()),
                DrawingCommand::LineTo(p) => data.line_to(p.to_f32().to_vec()),
                DrawingCommand::CurveTo {
                    control1,
                    control2,
                    end,
                } => data.cubic_curve_to(
                    [control1.to_f32(), control2.to_f32(), end.to_f32()].concat(),
                ),
                DrawingCommand::QuadTo { control, end } => {
                    data.quadratic_curve_to([control.to_f32(), end.to_f32()].concat())
                }
                DrawingCommand::ArcTo {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    end,
                } => {
                    let [x, y] = end.to_f32();
                    data.elliptical_arc_to(vec![
                        radii.x as f32,
                        radii.y as f32,
                        rotation as f32,
                        flag_value(large_arc),
                        flag_value(sweep),
                        x,
                        y,
                    ])
                }
                DrawingCommand::ClosePath => data.close(),
            })
    }
}

impl FromStr for PathData {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn flag_value(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────────────────────────────────────

/// Byte cursor over path data; numbers may be separated by whitespace, commas,
/// or nothing at all (`M-1-2L.5.5`).
struct Lexer<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// True if the next token starts a number
    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'+' | b'-'))
    }

    /// Leading `F0` / `F1` fill rule token
    fn fill_rule(&mut self) -> Result<Option<FillRule>, PathError> {
        self.skip_separators();
        if self.peek() != Some(b'F') {
            return Ok(None);
        }
        self.pos += 1;

        Ok(Some(if self.flag()? {
            FillRule::NonZero
        } else {
            FillRule::EvenOdd
        }))
    }

    /// Next command letter and its byte offset, or `None` at end of input
    fn command(&mut self) -> Result<Option<(u8, usize)>, PathError> {
        self.skip_separators();
        let offset = self.pos;

        match self.peek() {
            None => Ok(None),
            Some(b) if b.is_ascii_alphabetic() => {
                self.pos += 1;
                Ok(Some((b, offset)))
            }
            Some(_) => Err(PathError::UnexpectedCharacter {
                ch: self.data[offset..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER),
                offset,
            }),
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let int_digits = self.digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.digits();
        }
        if int_digits + frac_digits == 0 {
            self.pos = start;
            return Err(PathError::ExpectedNumber { offset: start });
        }

        // Exponent only counts when digits follow it
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }

        let text = &self.data[start..self.pos];
        text.parse::<f64>().map_err(|_| PathError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        })
    }

    /// Arc flags are a single `0` or `1` and may be packed (`a5,5 0 1015,5`)
    fn flag(&mut self) -> Result<bool, PathError> {
        self.skip_separators();
        let offset = self.pos;

        let flag = match self.peek() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => return Err(PathError::ExpectedFlag { offset }),
        };
        self.pos += 1;
        Ok(flag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interpreter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Segment {
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quad,
    SmoothQuad,
    Arc,
}

/// Resolution state: current point, subpath start and the control points
/// smooth curves reflect.
#[derive(Default)]
struct Interpreter {
    commands: Vec<DrawingCommand>,
    current: Point,
    subpath_start: Point,
    last_cubic_control: Option<Point>,
    last_quad_control: Option<Point>,
    closed: bool,
}

impl Interpreter {
    fn execute(
        &mut self,
        letter: u8,
        offset: usize,
        lexer: &mut Lexer<'_>,
    ) -> Result<(), PathError> {
        let relative = letter.is_ascii_lowercase();

        let segment = match letter.to_ascii_uppercase() {
            b'M' => return self.move_to(lexer, relative),
            b'Z' => return self.close(letter, offset),
            b'L' => Segment::Line,
            b'H' => Segment::Horizontal,
            b'V' => Segment::Vertical,
            b'C' => Segment::Cubic,
            b'S' => Segment::SmoothCubic,
            b'Q' => Segment::Quad,
            b'T' => Segment::SmoothQuad,
            b'A' => Segment::Arc,
            _ => {
                return Err(PathError::UnknownCommand {
                    letter: letter as char,
                    offset,
                })
            }
        };

        self.begin_segment(letter, offset)?;

        // One letter may be followed by any number of operand groups
        loop {
            self.segment(segment, relative, lexer)?;
            if !lexer.at_number() {
                return Ok(());
            }
        }
    }

    fn move_to(&mut self, lexer: &mut Lexer<'_>, relative: bool) -> Result<(), PathError> {
        let point = self.point(lexer, relative)?;
        self.push(DrawingCommand::MoveTo(point));

        // Extra coordinate pairs after a move-to are line-tos
        while lexer.at_number() {
            let point = self.point(lexer, relative)?;
            self.push(DrawingCommand::LineTo(point));
        }
        Ok(())
    }

    fn close(&mut self, letter: u8, offset: usize) -> Result<(), PathError> {
        if self.commands.is_empty() {
            return Err(PathError::MissingMoveTo {
                letter: letter as char,
                offset,
            });
        }
        if !self.closed {
            self.push(DrawingCommand::ClosePath);
        }
        Ok(())
    }

    /// Every subpath starts with a move-to; drawing after a close reopens a
    /// subpath at the closed one's start.
    fn begin_segment(&mut self, letter: u8, offset: usize) -> Result<(), PathError> {
        if self.commands.is_empty() {
            return Err(PathError::MissingMoveTo {
                letter: letter as char,
                offset,
            });
        }
        if self.closed {
            self.push(DrawingCommand::MoveTo(self.subpath_start));
        }
        Ok(())
    }

    fn segment(
        &mut self,
        segment: Segment,
        relative: bool,
        lexer: &mut Lexer<'_>,
    ) -> Result<(), PathError> {
        let command = match segment {
            Segment::Line => DrawingCommand::LineTo(self.point(lexer, relative)?),
            Segment::Horizontal => {
                let x = lexer.number()?;
                let x = if relative { self.current.x + x } else { x };
                DrawingCommand::LineTo(Point::new(x, self.current.y))
            }
            Segment::Vertical => {
                let y = lexer.number()?;
                let y = if relative { self.current.y + y } else { y };
                DrawingCommand::LineTo(Point::new(self.current.x, y))
            }
            Segment::Cubic => DrawingCommand::CurveTo {
                control1: self.point(lexer, relative)?,
                control2: self.point(lexer, relative)?,
                end: self.point(lexer, relative)?,
            },
            Segment::SmoothCubic => DrawingCommand::CurveTo {
                control1: self
                    .last_cubic_control
                    .map_or(self.current, |c| c.reflect_about(self.current)),
                control2: self.point(lexer, relative)?,
                end: self.point(lexer, relative)?,
            },
            Segment::Quad => DrawingCommand::QuadTo {
                control: self.point(lexer, relative)?,
                end: self.point(lexer, relative)?,
            },
            Segment::SmoothQuad => DrawingCommand::QuadTo {
                control: self
                    .last_quad_control
                    .map_or(self.current, |c| c.reflect_about(self.current)),
                end: self.point(lexer, relative)?,
            },
            Segment::Arc => DrawingCommand::ArcTo {
                radii: Vec2::new(lexer.number()?.abs(), lexer.number()?.abs()),
                rotation: lexer.number()?,
                large_arc: lexer.flag()?,
                sweep: lexer.flag()?,
                end: self.point(lexer, relative)?,
            },
        };

        self.push(command);
        Ok(())
    }

    /// Read a coordinate pair; relative pairs are offsets from the current point
    fn point(&self, lexer: &mut Lexer<'_>, relative: bool) -> Result<Point, PathError> {
        let x = lexer.number()?;
        let y = lexer.number()?;
        Ok(if relative {
            self.current.offset(x, y)
        } else {
            Point::new(x, y)
        })
    }

    fn push(&mut self, command: DrawingCommand) {
        self.last_cubic_control = None;
        self.last_quad_control = None;

        match &command {
            DrawingCommand::MoveTo(p) => {
                self.current = *p;
                self.subpath_start = *p;
                self.closed = false;
            }
            DrawingCommand::LineTo(p) | DrawingCommand::ArcTo { end: p, .. } => {
                self.current = *p;
            }
            DrawingCommand::CurveTo { control2, end, .. } => {
                self.last_cubic_control = Some(*control2);
                self.current = *end;
            }
            DrawingCommand::QuadTo { control, end } => {
                self.last_quad_control = Some(*control);
                self.current = *end;
            }
            DrawingCommand::ClosePath => {
                self.current = self.subpath_start;
                self.closed = true;
            }
        }

        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::path::{Command, Position};

    fn parse(data: &str) -> Vec<DrawingCommand> {
        PathData::parse(data).unwrap().commands().to_vec()
    }

    fn endpoints(commands: &[DrawingCommand]) -> Vec<Point> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawingCommand::MoveTo(p) | DrawingCommand::LineTo(p) => Some(*p),
                DrawingCommand::CurveTo { end, .. }
                | DrawingCommand::QuadTo { end, .. }
                | DrawingCommand::ArcTo { end, .. } => Some(*end),
                DrawingCommand::ClosePath => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_closed_polyline() {
        assert_eq!(
            parse("M0,0L10,0L10,10Z"),
            vec![
                DrawingCommand::MoveTo(Point::new(0.0, 0.0)),
                DrawingCommand::LineTo(Point::new(10.0, 0.0)),
                DrawingCommand::LineTo(Point::new(10.0, 10.0)),
                DrawingCommand::ClosePath,
            ]
        );
    }

    #[test]
    fn test_implicit_repetition() {
        assert_eq!(
            parse("M0,0 L1,1 2,2"),
            vec![
                DrawingCommand::MoveTo(Point::new(0.0, 0.0)),
                DrawingCommand::LineTo(Point::new(1.0, 1.0)),
                DrawingCommand::LineTo(Point::new(2.0, 2.0)),
            ]
        );

        // Pairs after a move-to are line-tos, relative ones chaining
        assert_eq!(
            parse("m1,1 2,2 1,0"),
            vec![
                DrawingCommand::MoveTo(Point::new(1.0, 1.0)),
                DrawingCommand::LineTo(Point::new(3.0, 3.0)),
                DrawingCommand::LineTo(Point::new(4.0, 3.0)),
            ]
        );
    }

    #[test]
    fn test_relative_matches_absolute() {
        assert_eq!(parse("M0,0l5,0l0,5"), parse("M0,0L5,0L5,5"));
    }

    #[test]
    fn test_leading_relative_move_starts_at_origin() {
        assert_eq!(
            endpoints(&parse("m5,5 l1,0")),
            vec![Point::new(5.0, 5.0), Point::new(6.0, 5.0)]
        );
    }

    #[test]
    fn test_dense_numbers() {
        assert_eq!(
            endpoints(&parse("M-1-2L.5.5")),
            vec![Point::new(-1.0, -2.0), Point::new(0.5, 0.5)]
        );
        assert_eq!(
            endpoints(&parse("M10-5l+2-.5")),
            vec![Point::new(10.0, -5.0), Point::new(12.0, -5.5)]
        );
        assert_eq!(
            endpoints(&parse("M1e2,1E-1 L2.5e+1 0")),
            vec![Point::new(100.0, 0.1), Point::new(25.0, 0.0)]
        );
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        assert_eq!(
            endpoints(&parse("M1,1 H5 v3 h-2 V0")),
            vec![
                Point::new(1.0, 1.0),
                Point::new(5.0, 1.0),
                Point::new(5.0, 4.0),
                Point::new(3.0, 4.0),
                Point::new(3.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_arc_operands() {
        let commands = parse("M0,0 A5,5 0 0 1 15,5 Z");
        assert_eq!(
            commands[1],
            DrawingCommand::ArcTo {
                radii: Vec2::new(5.0, 5.0),
                rotation: 0.0,
                large_arc: false,
                sweep: true,
                end: Point::new(15.0, 5.0),
            }
        );

        // Packed flags, relative end point
        let commands = parse("M1,1a5,4 30 1015,5");
        assert_eq!(
            commands[1],
            DrawingCommand::ArcTo {
                radii: Vec2::new(5.0, 4.0),
                rotation: 30.0,
                large_arc: true,
                sweep: false,
                end: Point::new(16.0, 6.0),
            }
        );
    }

    #[test]
    fn test_smooth_curves_reflect_previous_control() {
        let commands = parse("M0,0 C0,10 10,10 10,0 S20,-10 20,0");
        assert_eq!(
            commands[2],
            DrawingCommand::CurveTo {
                control1: Point::new(10.0, -10.0),
                control2: Point::new(20.0, -10.0),
                end: Point::new(20.0, 0.0),
            }
        );

        let commands = parse("M0,0 Q5,5 10,0 T20,0");
        assert_eq!(
            commands[2],
            DrawingCommand::QuadTo {
                control: Point::new(15.0, -5.0),
                end: Point::new(20.0, 0.0),
            }
        );

        // Without a preceding curve the control point is the current point
        let commands = parse("M3,3 S5,5 6,6");
        assert_eq!(
            commands[1],
            DrawingCommand::CurveTo {
                control1: Point::new(3.0, 3.0),
                control2: Point::new(5.0, 5.0),
                end: Point::new(6.0, 6.0),
            }
        );
    }

    #[test]
    fn test_drawing_after_close_reopens_subpath() {
        assert_eq!(
            parse("M1,1 L5,1 z l0,5"),
            vec![
                DrawingCommand::MoveTo(Point::new(1.0, 1.0)),
                DrawingCommand::LineTo(Point::new(5.0, 1.0)),
                DrawingCommand::ClosePath,
                DrawingCommand::MoveTo(Point::new(1.0, 1.0)),
                DrawingCommand::LineTo(Point::new(1.0, 6.0)),
            ]
        );
    }

    #[test]
    fn test_fill_rule_prefix() {
        assert_eq!(
            PathData::parse("F1 M0,0 L1,1").unwrap().fill_rule(),
            FillRule::NonZero
        );
        assert_eq!(
            PathData::parse("F0M0,0 L1,1").unwrap().fill_rule(),
            FillRule::EvenOdd
        );
        assert_eq!(
            PathData::parse("M0,0 L1,1").unwrap().fill_rule(),
            FillRule::EvenOdd
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(PathData::parse(""), Err(PathError::Empty));
        assert_eq!(PathData::parse("  F1 "), Err(PathError::Empty));
        assert_eq!(
            PathData::parse("M0,0 X1"),
            Err(PathError::UnknownCommand {
                letter: 'X',
                offset: 5
            })
        );
        assert_eq!(
            PathData::parse("M0,0 Q1"),
            Err(PathError::ExpectedNumber { offset: 7 })
        );
        assert_eq!(
            PathData::parse("L1,1"),
            Err(PathError::MissingMoveTo {
                letter: 'L',
                offset: 0
            })
        );
        assert!(matches!(
            PathData::parse("M0,0 A5,5 0 2 1 3,3"),
            Err(PathError::ExpectedFlag { .. })
        ));
        assert_eq!(
            PathData::parse("M0,0 Z 5"),
            Err(PathError::UnexpectedCharacter { ch: '5', offset: 7 })
        );
    }

    #[test]
    fn test_svg_data_keeps_arc_operand_order() {
        let path = PathData::parse("M0,0 a5,5 0 0 1 15,5 z").unwrap();
        let data = path.to_svg_data();

        assert_eq!(data.len(), 3);
        match &data[1] {
            Command::EllipticalArc(Position::Absolute, params) => {
                assert_eq!(&params[..], &[5.0, 5.0, 0.0, 0.0, 1.0, 15.0, 5.0]);
            }
            other => panic!("expected absolute arc, got {:?}", other),
        }
        assert!(matches!(data[2], Command::Close));
    }

    #[test]
    fn test_relative_chain_has_no_single_precision_drift() {
        let path = PathData::parse("M10.1,0 l2.8,0 l0.1,0").unwrap();
        let data = path.to_svg_data();

        match &data[1] {
            Command::Line(Position::Absolute, params) => {
                assert_eq!(&params[..], &[12.9f32, 0.0]);
            }
            other => panic!("expected absolute line, got {:?}", other),
        }
        match &data[2] {
            Command::Line(Position::Absolute, params) => {
                assert_eq!(&params[..], &[13.0f32, 0.0]);
            }
            other => panic!("expected absolute line, got {:?}", other),
        }
    }
}
