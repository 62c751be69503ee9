//! SVG path attribute parser.
//!
//! Two layers: a tokenizer for the `d` attribute grammar, and a state
//! machine that replays the tokens into bezier subpaths. Only the
//! commands M/m, L/l, C/c and Z/z are recognized; anything else
//! (arcs, quadratics, H/V shorthand) fails the whole parse.

use crate::curve::Bezier;
use crate::error::PathError;
use crate::geom::Complex;

/// One path token.
///
/// A trailing `z`/`Z` on a coordinate group is emitted as a separate
/// `Close` token after the pair, so the pair is resolved under the
/// normal rules before the subpath closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Command letter with its coordinate pair, e.g. `M0 0`.
    Command(char, Complex),
    /// Bare coordinate pair, a continuation of the previous command.
    Pair(Complex),
    /// Subpath closure marker.
    Close,
}

/// Split path data into tokens.
///
/// The grammar: an optional ASCII command letter, two signed decimal
/// numbers, an optional trailing closure marker. Anything that does
/// not scan as a number where one is required fails the whole parse.
pub fn tokenize(data: &str) -> Result<Vec<Token>, PathError> {
    let mut scanner = Scanner { src: data, pos: 0 };
    let mut tokens = Vec::new();

    loop {
        scanner.skip_whitespace();
        let letter = match scanner.peek() {
            None => break,
            Some(c) if c.is_ascii_alphabetic() => {
                scanner.bump();
                if c == 'z' || c == 'Z' {
                    tokens.push(Token::Close);
                    continue;
                }
                Some(c)
            }
            Some(_) => None,
        };

        scanner.skip_whitespace();
        let x = scanner.number()?;
        scanner.skip_whitespace();
        let y = scanner.number()?;
        let point = Complex::new(x, y);

        tokens.push(match letter {
            Some(c) => Token::Command(c, point),
            None => Token::Pair(point),
        });

        // Trailing closure marker attached to the pair, e.g. `0 10z`.
        if matches!(scanner.peek(), Some('z') | Some('Z')) {
            scanner.bump();
            tokens.push(Token::Close);
        }
    }

    Ok(tokens)
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Scan one signed decimal number: `[+-]? digits [. digits]`.
    fn number(&mut self) -> Result<f64, PathError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        let mut digits = false;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
            digits = true;
        }
        if self.peek() == Some('.') {
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
                digits = true;
            }
        }
        if !digits {
            return Err(PathError::MalformedPair(self.context(start)));
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| PathError::MalformedPair(self.context(start)))
    }

    fn context(&self, from: usize) -> String {
        self.src[from..].chars().take(16).collect()
    }
}

/// Which curve kind bare coordinate pairs currently extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurveMode {
    Linear,
    Cubic,
}

/// The path state machine.
///
/// Mutable state is confined to this value; each token is applied by a
/// small transition method, so transitions are unit-testable in
/// isolation. Output is one segment list per subpath, in source order.
pub struct Parser {
    dt: f64,
    current: Complex,
    initial: Complex,
    relative: bool,
    mode: CurveMode,
    pending: Vec<Complex>,
    segments: Vec<Bezier>,
    subpaths: Vec<Vec<Bezier>>,
}

impl Parser {
    pub fn new(dt: f64) -> Parser {
        Parser {
            dt,
            current: Complex::ZERO,
            initial: Complex::ZERO,
            relative: false,
            mode: CurveMode::Cubic,
            pending: Vec::new(),
            segments: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    /// Tokenize and parse `data` in one go.
    ///
    /// `dt` is the arc-length sampling step handed to each constructed
    /// segment. Errors are fatal: no partial subpath list is returned.
    pub fn parse(data: &str, dt: f64) -> Result<Vec<Vec<Bezier>>, PathError> {
        let tokens = tokenize(data)?;
        let mut parser = Parser::new(dt);
        for token in &tokens {
            parser.step(token)?;
        }
        Ok(parser.finish())
    }

    /// Apply one token to the state machine.
    pub fn step(&mut self, token: &Token) -> Result<(), PathError> {
        match *token {
            Token::Command(letter, point) => {
                // Relative mode is sticky: set by the case of each
                // command letter, untouched by Z.
                self.relative = letter.is_ascii_lowercase();
                match letter {
                    'M' | 'm' => self.move_to(point),
                    'L' | 'l' => self.line_to(point)?,
                    'C' | 'c' => self.curve_to(point),
                    other => return Err(PathError::UnsupportedCommand(other)),
                }
            }
            Token::Pair(point) => self.pair(point)?,
            Token::Close => self.close()?,
        }
        Ok(())
    }

    /// Drain the machine, flushing any still-open subpath.
    pub fn finish(mut self) -> Vec<Vec<Bezier>> {
        self.flush();
        self.subpaths
    }

    fn resolve(&self, point: Complex) -> Complex {
        if self.relative {
            self.current + point
        } else {
            point
        }
    }

    /// M/m: start a new subpath, flushing the open one if any.
    fn move_to(&mut self, point: Complex) {
        self.current = self.resolve(point);
        self.initial = self.current;
        self.pending.clear();
        self.flush();
    }

    /// L/l: switch to linear mode and emit a segment immediately.
    fn line_to(&mut self, point: Complex) -> Result<(), PathError> {
        self.mode = CurveMode::Linear;
        let destination = self.resolve(point);
        self.emit_linear(self.current, destination)?;
        self.current = destination;
        Ok(())
    }

    /// C/c: switch to cubic mode and seed the pending buffer with the
    /// start point and first control point. Emission waits until the
    /// buffer holds all four points.
    fn curve_to(&mut self, point: Complex) {
        self.mode = CurveMode::Cubic;
        let control = self.resolve(point);
        self.pending.clear();
        self.pending.push(self.current);
        self.pending.push(control);
    }

    /// Bare pair: dispatched by the sticky curve mode.
    fn pair(&mut self, point: Complex) -> Result<(), PathError> {
        let destination = self.resolve(point);
        match self.mode {
            CurveMode::Linear => {
                // A linear curve never grows past two points; a bare
                // pair is always a final destination.
                self.emit_linear(self.current, destination)?;
                self.current = destination;
            }
            CurveMode::Cubic => {
                self.pending.push(destination);
                if self.pending.len() == 4 {
                    self.current = destination;
                    let segment = Bezier::new(&self.pending, self.dt)?;
                    self.segments.push(segment);
                    // Reseed with the endpoint so further unlabeled
                    // groups chain into more cubics without a new `c`.
                    self.pending.clear();
                    self.pending.push(self.current);
                }
            }
        }
        Ok(())
    }

    /// Z/z: close the subpath with an implicit line back to its
    /// initial point (if the pen is not already there) and flush.
    fn close(&mut self) -> Result<(), PathError> {
        if self.current != self.initial {
            self.emit_linear(self.current, self.initial)?;
        }
        self.current = self.initial;
        self.pending.clear();
        self.flush();
        Ok(())
    }

    fn emit_linear(&mut self, from: Complex, to: Complex) -> Result<(), PathError> {
        let segment = Bezier::new(&[from, to], self.dt)?;
        self.segments.push(segment);
        Ok(())
    }

    fn flush(&mut self) {
        if !self.segments.is_empty() {
            self.subpaths.push(std::mem::take(&mut self.segments));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::PolyBezier;
    use approx::assert_relative_eq;
    use kurbo::Rect;

    const DT: f64 = 0.01;

    fn c(re: f64, im: f64) -> Complex {
        Complex::new(re, im)
    }

    #[test]
    fn tokenizes_letters_pairs_and_closure() {
        let tokens = tokenize("M0 0L10 0 10 10z").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command('M', c(0.0, 0.0)),
                Token::Command('L', c(10.0, 0.0)),
                Token::Pair(c(10.0, 10.0)),
                Token::Close,
            ]
        );
    }

    #[test]
    fn tokenizes_signed_decimals() {
        let tokens = tokenize("m-1.5 2.25 -3 0.5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command('m', c(-1.5, 2.25)),
                Token::Pair(c(-3.0, 0.5)),
            ]
        );
    }

    #[test]
    fn lone_number_is_malformed() {
        assert!(matches!(
            tokenize("L10"),
            Err(PathError::MalformedPair(_))
        ));
    }

    #[test]
    fn unsupported_command_fails_the_parse() {
        assert!(matches!(
            Parser::parse("M0 0Q5 5 10 0", DT),
            Err(PathError::UnsupportedCommand('Q'))
        ));
    }

    #[test]
    fn absolute_square_parses_to_four_linear_segments() {
        let subpaths = Parser::parse("M0 0L10 0L10 10L0 10Z", DT).unwrap();
        assert_eq!(subpaths.len(), 1);
        let poly = PolyBezier::new(subpaths.into_iter().next().unwrap());
        assert_eq!(poly.len(), 4);
        assert!(poly.iter().all(|seg| seg.degree() == 1));
        assert_eq!(poly.bounding_box(), Rect::new(0.0, 0.0, 10.0, 10.0));
        // Closed: last segment returns to the initial point.
        let last = poly.iter().last().unwrap();
        assert_eq!(last.end(), c(0.0, 0.0));
    }

    #[test]
    fn relative_commands_match_absolute_geometry() {
        let relative = Parser::parse("M0 0l10 0l0 10z", DT).unwrap();
        let absolute = Parser::parse("M0 0L10 0L10 10Z", DT).unwrap();
        assert_eq!(relative.len(), 1);
        assert_eq!(absolute.len(), 1);
        for (r, a) in relative[0].iter().zip(absolute[0].iter()) {
            assert_eq!(r.start(), a.start());
            assert_eq!(r.end(), a.end());
        }
    }

    #[test]
    fn implicit_closing_segment_is_added() {
        let subpaths = Parser::parse("M1 1L5 1L5 5Z", DT).unwrap();
        let segments = &subpaths[0];
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].start(), c(5.0, 5.0));
        assert_eq!(segments[2].end(), c(1.0, 1.0));
    }

    #[test]
    fn already_closed_subpath_gets_no_extra_segment() {
        let subpaths = Parser::parse("M0 0L4 0L0 0Z", DT).unwrap();
        assert_eq!(subpaths[0].len(), 2);
    }

    #[test]
    fn bare_pairs_chain_cubics_without_a_new_command() {
        let subpaths =
            Parser::parse("M0 0C1 1 2 1 3 0 4 -1 5 -1 6 0", DT).unwrap();
        let segments = &subpaths[0];
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|seg| seg.degree() == 3));
        assert_eq!(segments[0].start(), c(0.0, 0.0));
        assert_eq!(segments[0].end(), c(3.0, 0.0));
        assert_eq!(segments[1].start(), c(3.0, 0.0));
        assert_eq!(segments[1].end(), c(6.0, 0.0));
    }

    #[test]
    fn relative_mode_is_sticky_across_bare_pairs() {
        let subpaths = Parser::parse("M1 1l1 0 1 0", DT).unwrap();
        let segments = &subpaths[0];
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].end(), c(2.0, 1.0));
        assert_eq!(segments[1].end(), c(3.0, 1.0));
    }

    #[test]
    fn move_splits_subpaths() {
        let subpaths =
            Parser::parse("M0 0L1 0L1 1ZM5 5L6 5L6 6Z", DT).unwrap();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].len(), 3);
        assert_eq!(subpaths[1][0].start(), c(5.0, 5.0));
    }

    #[test]
    fn unclosed_trailing_subpath_is_flushed_open() {
        let subpaths = Parser::parse("M0 0L3 4", DT).unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].len(), 1);
        assert_relative_eq!(subpaths[0][0].dist(), 5.0);
    }

    #[test]
    fn close_on_empty_subpath_produces_nothing() {
        let subpaths = Parser::parse("M0 0Z", DT).unwrap();
        assert!(subpaths.is_empty());
    }
}
