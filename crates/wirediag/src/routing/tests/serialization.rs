use super::*;
use crate::routing::serialize::{string_to_wire, wire_to_string};

#[test]
fn straight_wire_to_string() {
    let mut r = router(200, 200, 10.0);
    let wire = route(&mut r, pt(50.0, 10.0), pt(50.0, 100.0), Direction::Down);
    assert_eq!(
        wire_to_string(&wire),
        "(50,10)-V-(50,40)-V-(50,50)-V-(50,60)-J-(50,60)-V-(50,70)-V-(50,80)-V-(50,90)-J-(50,90)-V-(50,100)"
    );
}

#[test]
fn staircase_to_string() {
    let mut r = router(200, 200, 10.0);
    let wire = route(&mut r, pt(10.0, 10.0), pt(80.0, 50.0), Direction::Right);
    let text = wire_to_string(&wire);
    assert!(text.starts_with("(10,10)-H-(40,10)-H-(50,10)-V-(50,20)"), "{text}");
    assert!(text.ends_with("-(80,50)"), "{text}");
}

#[test]
fn fractional_coordinates_survive_parsing() {
    let mut r = router(1000, 1000, 37.8);
    let wire = route(&mut r, pt(100.5, 330.0), pt(50.0, 800.0), Direction::Down);
    let text = wire_to_string(&wire);
    assert!(text.starts_with("(100.5,330)-V-"), "{text}");

    let parsed = string_to_wire(&text, "test", WireColor::black(), 3).unwrap();
    assert_eq!(waypoints(&parsed), waypoints(&wire));
    assert_eq!(parsed, wire);
}

#[test]
fn hand_written_wire_parses() {
    let wire = string_to_wire("(0,0)-H-(10,0)-V-(10,-5)", "w", WireColor::black(), 3).unwrap();
    assert_eq!(wire.len(), 2);
    assert_eq!(wire.end(), Some(&pt(10.0, -5.0)));
    assert_eq!(wire.segment(2).unwrap().label, "w Segment 2");
}

#[test]
fn empty_wire_serializes_to_nothing() {
    let wire = Wire::new("empty", WireColor::black(), 3);
    assert_eq!(wire_to_string(&wire), "");
}

#[test]
fn malformed_strings_are_rejected() {
    let parse = |s: &str| string_to_wire(s, "w", WireColor::black(), 3);
    assert!(parse("").is_none());
    assert!(parse("(1,1)").is_none());
    assert!(parse("(1,1)-H").is_none());
    assert!(parse("(1,1)-X-(2,1)").is_none());
    assert!(parse("(1,1)-H-(2,1)-(3,1)").is_none());
    assert!(parse("(1,1)-H-(2,one)").is_none());
    assert!(parse("(1,1)-H-(2,1)!").is_none());
}

#[test]
fn tag_must_match_geometry() {
    let parse = |s: &str| string_to_wire(s, "w", WireColor::black(), 3);
    assert!(parse("(1,1)-V-(5,1)").is_none());
    assert!(parse("(1,1)-H-(1,1)").is_none());
    assert!(parse("(1,1)-J-(1,1)").is_some());
    assert!(parse("(1,1)-D-(4,4)").is_some());
}
