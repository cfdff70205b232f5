use std::fmt;

use crate::scan::Cursor;

use super::Matrix;

/// A malformed transform list.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError {
    pub message: String,
    /// Byte offset into the source string.
    pub offset: usize,
}

impl TransformError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self { message: message.into(), offset }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for TransformError {}

/// Parses an SVG transform list such as `"translate(10) rotate(45, 5 5)"`.
///
/// Functions compose left to right, so the last one listed is applied to
/// points first. An empty list is the identity.
pub fn parse_transform_list(src: &str) -> Result<Matrix, TransformError> {
    let mut cur = Cursor::new(src);
    let mut result = Matrix::identity();

    loop {
        cur.skip_separators();
        if cur.at_end() {
            return Ok(result);
        }

        let start = cur.pos();
        let name = cur.ident();
        if name.is_empty() {
            return Err(TransformError::new(
                format!("expected a transform function, found {:?}", cur.peek().unwrap_or_default()),
                start,
            ));
        }

        cur.skip_whitespace();
        let open = cur.pos();
        if cur.advance() != Some('(') {
            return Err(TransformError::new(format!("expected '(' after {name}"), open));
        }
        let args = arguments(&mut cur, open)?;
        result = result.multiply(&function(name, &args, start)?);
    }
}

/// Reads numbers up to and including the closing parenthesis.
fn arguments(cur: &mut Cursor<'_>, open: usize) -> Result<Vec<f32>, TransformError> {
    let mut args = Vec::new();
    loop {
        cur.skip_separators();
        match cur.peek() {
            None => return Err(TransformError::new("unclosed parenthesis", open)),
            Some(')') => {
                cur.advance();
                return Ok(args);
            }
            Some(_) => {
                let at = cur.pos();
                match cur.number() {
                    Some(n) => args.push(n),
                    None => {
                        let token: String = cur
                            .rest()
                            .chars()
                            .take_while(|c| !c.is_whitespace() && *c != ',' && *c != ')')
                            .collect();
                        return Err(TransformError::new(format!("invalid number {token:?}"), at));
                    }
                }
            }
        }
    }
}

fn function(name: &str, args: &[f32], at: usize) -> Result<Matrix, TransformError> {
    let arity = |expected: &str| {
        TransformError::new(format!("{name} takes {expected} arguments, got {}", args.len()), at)
    };
    match name {
        "matrix" => match *args {
            [a, b, c, d, e, f] => Ok(Matrix::new(a, b, c, d, e, f)),
            _ => Err(arity("6")),
        },
        "translate" => match *args {
            [tx] => Ok(Matrix::translate(tx, 0.0)),
            [tx, ty] => Ok(Matrix::translate(tx, ty)),
            _ => Err(arity("1 or 2")),
        },
        "scale" => match *args {
            [s] => Ok(Matrix::scale(s, s)),
            [sx, sy] => Ok(Matrix::scale(sx, sy)),
            _ => Err(arity("1 or 2")),
        },
        "rotate" => match *args {
            [angle] => Ok(Matrix::rotate(angle)),
            [angle, cx, cy] => Ok(Matrix::rotate_about(angle, cx, cy)),
            _ => Err(arity("1 or 3")),
        },
        "skewX" => match *args {
            [angle] => Ok(Matrix::skew(angle, 0.0)),
            _ => Err(arity("1")),
        },
        "skewY" => match *args {
            [angle] => Ok(Matrix::skew(0.0, angle)),
            _ => Err(arity("1")),
        },
        other => Err(TransformError::new(format!("unknown transform function {other:?}"), at)),
    }
}
