//! Path `d` attribute parsing.

use vectorkit_core::SvgError;

use crate::model::{PathPoint, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn invalid(d: &str) -> SvgError {
    SvgError::InvalidNumber {
        attribute: "d".to_string(),
        value: d.to_string(),
    }
}

fn tokenize(d: &str) -> Result<Vec<Token>, SvgError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
            continue;
        }
        if b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E') {
            tokens.push(Token::Command(b as char));
            i += 1;
            continue;
        }

        let start = i;
        if matches!(b, b'+' | b'-') {
            i += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            i += 1;
        }
        if seen_digit && i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }
        if !seen_digit {
            return Err(invalid(d));
        }
        let value: f64 = d[start..i].parse().map_err(|_| invalid(d))?;
        tokens.push(Token::Number(value));
    }

    Ok(tokens)
}

/// Number of arguments one repetition of `command` consumes.
fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

/// Parses path data into points with absolute coordinates.
///
/// `M`, `L`, `C` and `Z` (either case) become path points. `H`, `V`, `S`,
/// `Q`, `T` and `A` are consumed and move the current point but produce no
/// output.
pub fn parse_path_data(d: &str) -> Result<Vec<PathPoint>, SvgError> {
    let tokens = tokenize(d)?;
    let mut points = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();
    let mut i = 0;

    while i < tokens.len() {
        let Token::Command(mut command) = tokens[i] else {
            return Err(invalid(d));
        };
        i += 1;
        let n = arity(command).ok_or_else(|| invalid(d))?;

        if n == 0 {
            points.push(PathPoint::close(subpath_start.x, subpath_start.y));
            current = subpath_start;
            continue;
        }

        // One command letter may be followed by several argument groups.
        loop {
            let mut args = [0.0; 7];
            for slot in args.iter_mut().take(n) {
                match tokens.get(i) {
                    Some(Token::Number(v)) => *slot = *v,
                    _ => return Err(invalid(d)),
                }
                i += 1;
            }

            let relative = command.is_ascii_lowercase();
            let offset = if relative { current } else { Point::default() };
            let at = |x: f64, y: f64| Point::new(offset.x + x, offset.y + y);

            match command.to_ascii_uppercase() {
                'M' => {
                    current = at(args[0], args[1]);
                    subpath_start = current;
                    points.push(PathPoint::move_to(current.x, current.y));
                    // Further pairs are implicit line-tos.
                    command = if relative { 'l' } else { 'L' };
                }
                'L' => {
                    current = at(args[0], args[1]);
                    points.push(PathPoint::line_to(current.x, current.y));
                }
                'C' => {
                    let c1 = at(args[0], args[1]);
                    let c2 = at(args[2], args[3]);
                    current = at(args[4], args[5]);
                    points.push(PathPoint::curve_to(c1, c2, current.x, current.y));
                }
                'H' => current.x = if relative { current.x + args[0] } else { args[0] },
                'V' => current.y = if relative { current.y + args[0] } else { args[0] },
                'S' | 'Q' => current = at(args[2], args[3]),
                'T' => current = at(args[0], args[1]),
                'A' => current = at(args[5], args[6]),
                _ => return Err(invalid(d)),
            }

            if !matches!(tokens.get(i), Some(Token::Number(_))) {
                break;
            }
        }
    }

    Ok(points)
}
