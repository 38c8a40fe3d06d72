use crate::foundation::core::Point;
use crate::path::command::{CommandKind, PathCommand};
use crate::path::convert::Cursor;
use crate::path::sample::{cubic_point, line_point, quad_point};

/// Replace every line, quadratic and cubic segment with `n` straight lines sampled at
/// `t = i/n`, `i = 1..=n`.
///
/// Moves are made absolute and close commands pass through unchanged. Every other command
/// (including no-ops) passes through verbatim, but the pen still advances past it so later
/// relative commands resolve against the right point. `n` below 1 is treated as 1.
pub fn subdivide(commands: &[PathCommand], n: u32) -> Vec<PathCommand> {
    let n = n.max(1);
    let mut out = Vec::with_capacity(commands.len() * n as usize);
    let mut cur = Cursor::default();

    for cmd in commands {
        if !cmd.is_well_formed() {
            if cmd.kind == CommandKind::Close {
                cur.advance(cmd);
            }
            out.push(cmd.clone());
            continue;
        }

        match cmd.kind {
            CommandKind::Move => {
                let p = cur.point(cmd, 0);
                out.push(PathCommand::move_to(p.x, p.y));
            }
            CommandKind::Line => {
                let (p0, p1) = (cur.current, cur.point(cmd, 0));
                push_samples(&mut out, n, |t| line_point(p0, p1, t));
            }
            CommandKind::QuadraticCurve => {
                let (p0, c, p) = (cur.current, cur.point(cmd, 0), cur.point(cmd, 1));
                push_samples(&mut out, n, |t| quad_point(p0, c, p, t));
            }
            CommandKind::CubicCurve => {
                let (p0, c1, c2, p) = (
                    cur.current,
                    cur.point(cmd, 0),
                    cur.point(cmd, 1),
                    cur.point(cmd, 2),
                );
                push_samples(&mut out, n, |t| cubic_point(p0, c1, c2, p, t));
            }
            _ => out.push(cmd.clone()),
        }
        cur.advance(cmd);
    }
    out
}

fn push_samples(out: &mut Vec<PathCommand>, n: u32, at: impl Fn(f64) -> Point) {
    for i in 1..=n {
        let t = f64::from(i) / f64::from(n);
        let p = at(t);
        out.push(PathCommand::line_to(p.x, p.y));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/subdivide.rs"]
mod tests;
