use super::*;
use crate::path::command::parse;

#[test]
fn line_split_in_two() {
    let out = subdivide(&parse("M0 0 L10 0"), 2);
    assert_eq!(
        out,
        vec![
            PathCommand::move_to(0.0, 0.0),
            PathCommand::line_to(5.0, 0.0),
            PathCommand::line_to(10.0, 0.0),
        ]
    );
}

#[test]
fn single_segment_yields_exactly_n_lines() {
    for text in ["M0 0 L10 3", "M1 1 Q5 9 9 1", "M0 0 C0 10 10 10 10 0", "m2 2 c0 5 5 5 5 0"] {
        for n in [1u32, 2, 3, 7, 16] {
            let out = subdivide(&parse(text), n);
            assert_eq!(out.len(), n as usize + 1, "{text} n={n}");
            assert_eq!(out[0].kind, CommandKind::Move);
            assert!(out[1..].iter().all(|c| c.kind == CommandKind::Line && !c.relative));
        }
    }
}

#[test]
fn curve_endpoint_is_preserved_exactly() {
    let out = subdivide(&parse("M0 0 C0 10 10 10 10 0"), 5);
    assert_eq!(out.last().unwrap(), &PathCommand::line_to(10.0, 0.0));
}

#[test]
fn relative_commands_resolve_against_running_point() {
    let out = subdivide(&parse("m5 5 l10 0 l0 10"), 1);
    assert_eq!(
        out,
        vec![
            PathCommand::move_to(5.0, 5.0),
            PathCommand::line_to(15.0, 5.0),
            PathCommand::line_to(15.0, 15.0),
        ]
    );
}

#[test]
fn close_resets_to_subpath_start() {
    let out = subdivide(&parse("M0 0 L10 0 Z l0 4"), 1);
    assert_eq!(out[2], PathCommand::close());
    assert_eq!(out[3], PathCommand::line_to(0.0, 4.0));
}

#[test]
fn other_kinds_pass_through_and_advance_the_pen() {
    let out = subdivide(&parse("M0 0 h10 l0 2"), 2);
    assert_eq!(out[1], PathCommand::rel(CommandKind::HorizontalLine, [10.0]));
    assert_eq!(out[2], PathCommand::line_to(10.0, 1.0));
    assert_eq!(out[3], PathCommand::line_to(10.0, 2.0));
}

#[test]
fn zero_is_clamped_to_one() {
    assert_eq!(subdivide(&parse("M0 0 L4 4"), 0).len(), 2);
}
