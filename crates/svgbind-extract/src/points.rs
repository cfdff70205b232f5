//! `points` lists for `<polygon>` and `<polyline>`.

use std::fmt::Write as _;

use crate::coords::Vec2;
use crate::error::{ExtractError, ParseOutcome};
use crate::scan::Cursor;
use crate::value::AttrValue;

/// Parses `"x1,y1 x2,y2 …"` into points.
///
/// Numbers are separated by whitespace and/or commas; a `-` directly after
/// a number starts the next one. An odd number of coordinates fails.
pub fn parse_points(src: &str) -> ParseOutcome<Vec<Vec2>> {
    let coords = match Cursor::new(src).number_list() {
        Ok(c) => c,
        Err((token, offset)) => return ParseOutcome::Failed(ExtractError::InvalidPoints { token, offset }),
    };
    if coords.len() % 2 != 0 {
        return ParseOutcome::Failed(ExtractError::OddCoordinateCount(coords.len()));
    }
    ParseOutcome::Parsed(coords.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect())
}

/// Accepts either a point string or a flat numeric list.
pub fn parse_points_value(value: &AttrValue) -> ParseOutcome<Vec<Vec2>> {
    match value {
        AttrValue::Str(s) => parse_points(s),
        AttrValue::List(items) => {
            let mut coords = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item.as_f32() {
                    Some(n) => coords.push(n),
                    None => {
                        return ParseOutcome::Failed(ExtractError::InvalidPoints {
                            token: format!("{item:?}"),
                            offset: i,
                        });
                    }
                }
            }
            if coords.len() % 2 != 0 {
                return ParseOutcome::Failed(ExtractError::OddCoordinateCount(coords.len()));
            }
            ParseOutcome::Parsed(coords.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect())
        }
        other => ParseOutcome::Failed(ExtractError::InvalidPoints { token: format!("{other:?}"), offset: 0 }),
    }
}

/// `M x,y` for the first point, `L x,y` for the rest. Empty input gives an
/// empty path.
pub fn points_to_path(points: &[Vec2], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", p.x, p.y);
    }
    if closed && !points.is_empty() {
        d.push('z');
    }
    d
}

pub fn polygon_path(value: &AttrValue) -> ParseOutcome<String> {
    parse_points_value(value).map(|pts| points_to_path(&pts, true))
}

pub fn polyline_path(value: &AttrValue) -> ParseOutcome<String> {
    parse_points_value(value).map(|pts| points_to_path(&pts, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_closes() {
        let d = polygon_path(&AttrValue::from("0,0 10,0 10,10")).into_value();
        assert_eq!(d.as_deref(), Some("M0,0L10,0L10,10z"));
    }

    #[test]
    fn polyline_stays_open() {
        let d = polyline_path(&AttrValue::from("0,0 10,0 10,10")).into_value();
        assert_eq!(d.as_deref(), Some("M0,0L10,0L10,10"));
    }

    #[test]
    fn minus_starts_new_number() {
        let pts = parse_points("10-5 -3.5,2").into_value().unwrap();
        assert_eq!(pts, vec![Vec2::new(10.0, -5.0), Vec2::new(-3.5, 2.0)]);
    }

    #[test]
    fn odd_count_fails() {
        assert_eq!(
            parse_points("0,0 10"),
            ParseOutcome::Failed(ExtractError::OddCoordinateCount(3))
        );
    }

    #[test]
    fn bad_token_fails_with_offset() {
        assert_eq!(
            parse_points("0,0 1,oops"),
            ParseOutcome::Failed(ExtractError::InvalidPoints { token: "oops".into(), offset: 6 })
        );
    }

    #[test]
    fn empty_gives_empty_path() {
        assert_eq!(polygon_path(&AttrValue::from("")).into_value().as_deref(), Some(""));
        assert_eq!(polyline_path(&AttrValue::from("  ")).into_value().as_deref(), Some(""));
    }

    #[test]
    fn flat_list_form() {
        let list: Vec<AttrValue> = [0, 0, 5, 5].into_iter().map(AttrValue::from).collect();
        let d = polyline_path(&AttrValue::from(list)).into_value();
        assert_eq!(d.as_deref(), Some("M0,0L5,5"));
    }
}
