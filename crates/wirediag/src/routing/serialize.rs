use crate::geometry::Coordinate;

use super::wire::{Wire, WireColor, WireSegment};

/// Tag for a segment that does not move.
const JOG_TAG: char = 'J';
/// Tag for a segment that moves on both axes.
const DIAGONAL_TAG: char = 'D';

/// Serialize a wire to the textual wire format.
///
/// Format: `(100.5,330)-V-(100.5,443.4)-H-(62.7,443.4)`
///
/// Each waypoint is followed by the tag of the segment leaving it: `H` or
/// `V` for axis moves, `J` for a zero-length turn, `D` for anything else.
/// Whole numbers are written without decimals.
pub fn wire_to_string(wire: &Wire) -> String {
    let Some(first) = wire.start() else {
        return String::new();
    };
    let mut parts = vec![format_coord(first)];
    for segment in wire {
        parts.push(segment_tag(segment).to_string());
        parts.push(format_coord(&segment.end));
    }
    parts.join("-")
}

fn segment_tag(segment: &WireSegment) -> char {
    match segment.axis() {
        Some(axis) => axis.tag(),
        None if segment.start == segment.end => JOG_TAG,
        None => DIAGONAL_TAG,
    }
}

fn format_coord(coord: &Coordinate) -> String {
    format!("({},{})", format_number(coord.x), format_number(coord.y))
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Parse a wire from the textual wire format.
///
/// Segments get the given label prefix, colour and width. Returns `None` if
/// the string is malformed, has fewer than two waypoints, or a tag does not
/// match the geometry of its segment.
pub fn string_to_wire(s: &str, label: &str, color: WireColor, width: u32) -> Option<Wire> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let tokens = tokenize(s)?;
    // Tokens alternate: Coord, Tag, Coord, Tag, ..., Coord
    if tokens.len() < 3 || tokens.len() % 2 == 0 {
        return None;
    }

    let mut wire = Wire::new(label, color, width);
    let mut prev = parse_coord(&tokens[0])?;
    for pair in tokens[1..].chunks(2) {
        let tag = parse_tag(&pair[0])?;
        let next = parse_coord(&pair[1])?;
        wire.add_segment(prev, next.clone());
        let added = wire.segment(wire.len())?;
        if segment_tag(added) != tag {
            return None;
        }
        prev = next;
    }
    Some(wire)
}

/// Split into coordinate groups `(...)` and single-letter tags.
fn tokenize(s: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();

    while chars.peek().is_some() {
        while chars.peek() == Some(&'-') {
            chars.next();
        }
        let Some(&ch) = chars.peek() else {
            break;
        };

        if ch == '(' {
            // Negative numbers live inside the parentheses.
            let mut token = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                token.push(ch);
                if ch == ')' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return None;
            }
            tokens.push(token);
        } else if ch.is_ascii_alphabetic() {
            chars.next();
            tokens.push(ch.to_string());
        } else {
            return None;
        }
    }

    Some(tokens)
}

fn parse_coord(s: &str) -> Option<Coordinate> {
    let inner = s.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Coordinate::at(x, y))
}

fn parse_tag(s: &str) -> Option<char> {
    match s {
        "H" => Some('H'),
        "V" => Some('V'),
        "J" => Some(JOG_TAG),
        "D" => Some(DIAGONAL_TAG),
        _ => None,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(100.5), "100.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("(1,1)-H-(2,1)").unwrap();
        assert_eq!(tokens, vec!["(1,1)", "H", "(2,1)"]);
    }

    #[test]
    fn test_tokenize_negative_coord() {
        let tokens = tokenize("(-1,1)-V-(-1,-4.5)").unwrap();
        assert_eq!(tokens, vec!["(-1,1)", "V", "(-1,-4.5)"]);
    }

    #[test]
    fn test_tokenize_unclosed_group() {
        assert!(tokenize("(1,1)-H-(2,1").is_none());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("(3,2)"), Some(Coordinate::at(3.0, 2.0)));
        assert_eq!(parse_coord("( 1.5 , 2 )"), Some(Coordinate::at(1.5, 2.0)));
        assert_eq!(parse_coord("(1;2)"), None);
        assert_eq!(parse_coord("(NaN,2)"), None);
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("H"), Some('H'));
        assert_eq!(parse_tag("J"), Some('J'));
        assert_eq!(parse_tag("L"), None);
    }
}
