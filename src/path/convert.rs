use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::path::command::{CommandKind, PathCommand};
use kurbo::Shape;

const ARC_TOLERANCE: f64 = 0.1;

/// Running pen state while walking a command sequence.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Cursor {
    pub(crate) current: Point,
    pub(crate) start: Point,
}

impl Cursor {
    /// Resolve operand pair `i` (x at `2i`, y at `2i+1`) to an absolute point.
    pub(crate) fn point(&self, cmd: &PathCommand, i: usize) -> Point {
        let x = cmd.operands[2 * i];
        let y = cmd.operands[2 * i + 1];
        if cmd.relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    /// Move the pen past `cmd` without emitting anything.
    pub(crate) fn advance(&mut self, cmd: &PathCommand) {
        if cmd.kind == CommandKind::Close {
            self.current = self.start;
            return;
        }
        if !cmd.is_well_formed() {
            return;
        }
        let o = &cmd.operands;
        let next = match cmd.kind {
            CommandKind::HorizontalLine => {
                let x = if cmd.relative { self.current.x + o[0] } else { o[0] };
                Point::new(x, self.current.y)
            }
            CommandKind::VerticalLine => {
                let y = if cmd.relative { self.current.y + o[0] } else { o[0] };
                Point::new(self.current.x, y)
            }
            CommandKind::Arc => {
                let (x, y) = (o[5], o[6]);
                if cmd.relative {
                    Point::new(self.current.x + x, self.current.y + y)
                } else {
                    Point::new(x, y)
                }
            }
            kind => self.point(cmd, kind.arity() / 2 - 1),
        };
        if cmd.kind == CommandKind::Move {
            self.start = next;
        }
        self.current = next;
    }
}

/// Rewrite `commands` using only absolute move/line/cubic/quadratic/close.
///
/// Horizontal and vertical lines become lines, smooth curves get their reflected control
/// points spelled out and arcs are approximated by cubics. No-op commands are dropped.
pub fn absolutize(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len());
    let mut cur = Cursor::default();
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    for cmd in commands {
        if cmd.kind != CommandKind::Close && !cmd.is_well_formed() {
            continue;
        }
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match cmd.kind {
            CommandKind::Move => {
                let p = cur.point(cmd, 0);
                out.push(PathCommand::move_to(p.x, p.y));
            }
            CommandKind::Line => {
                let p = cur.point(cmd, 0);
                out.push(PathCommand::line_to(p.x, p.y));
            }
            CommandKind::HorizontalLine | CommandKind::VerticalLine => {
                let mut probe = cur;
                probe.advance(cmd);
                out.push(PathCommand::line_to(probe.current.x, probe.current.y));
            }
            CommandKind::CubicCurve => {
                let (c1, c2, p) = (cur.point(cmd, 0), cur.point(cmd, 1), cur.point(cmd, 2));
                out.push(PathCommand::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
                cubic_ctrl = Some(c2);
            }
            CommandKind::SmoothCubic => {
                let c1 = reflect(last_cubic_ctrl, cur.current);
                let (c2, p) = (cur.point(cmd, 0), cur.point(cmd, 1));
                out.push(PathCommand::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
                cubic_ctrl = Some(c2);
            }
            CommandKind::QuadraticCurve => {
                let (c, p) = (cur.point(cmd, 0), cur.point(cmd, 1));
                out.push(PathCommand::quad_to(c.x, c.y, p.x, p.y));
                quad_ctrl = Some(c);
            }
            CommandKind::SmoothQuadratic => {
                let c = reflect(last_quad_ctrl, cur.current);
                let p = cur.point(cmd, 0);
                out.push(PathCommand::quad_to(c.x, c.y, p.x, p.y));
                quad_ctrl = Some(c);
            }
            CommandKind::Arc => {
                let mut probe = cur;
                probe.advance(cmd);
                push_arc(&mut out, cur.current, probe.current, &cmd.operands);
            }
            CommandKind::Close => out.push(PathCommand::close()),
        }

        cur.advance(cmd);
        last_cubic_ctrl = cubic_ctrl;
        last_quad_ctrl = quad_ctrl;
    }
    out
}

fn reflect(ctrl: Option<Point>, about: Point) -> Point {
    match ctrl {
        Some(c) => about + (about - c),
        None => about,
    }
}

fn push_arc(out: &mut Vec<PathCommand>, from: Point, to: Point, o: &[f64]) {
    let arc = kurbo::SvgArc {
        from,
        to,
        radii: Vec2::new(o[0].abs(), o[1].abs()),
        x_rotation: o[2].to_radians(),
        large_arc: o[3] != 0.0,
        sweep: o[4] != 0.0,
    };
    match kurbo::Arc::from_svg_arc(&arc) {
        Some(arc) => arc.to_cubic_beziers(ARC_TOLERANCE, |c1, c2, p| {
            out.push(PathCommand::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y));
        }),
        None => out.push(PathCommand::line_to(to.x, to.y)),
    }
}

/// Map every point of `commands` through `affine`. The result is absolute.
pub fn transform(commands: &[PathCommand], affine: Affine) -> Vec<PathCommand> {
    let mut out = absolutize(commands);
    for cmd in &mut out {
        for pair in cmd.operands.chunks_exact_mut(2) {
            let p = affine * Point::new(pair[0], pair[1]);
            pair[0] = p.x;
            pair[1] = p.y;
        }
    }
    out
}

/// Build a kurbo path. Commands that cannot be drawn are skipped.
pub fn to_bezpath(commands: &[PathCommand]) -> BezPath {
    let mut path = BezPath::new();
    let mut open = false;
    let mut subpath_start = Point::ZERO;
    for cmd in absolutize(commands) {
        let o = &cmd.operands;
        match cmd.kind {
            CommandKind::Move => {
                subpath_start = Point::new(o[0], o[1]);
                path.move_to(subpath_start);
                open = true;
            }
            CommandKind::Close => {
                if open {
                    path.close_path();
                    open = false;
                }
            }
            // kurbo requires a move before any segment; after a close the pen sits at the
            // subpath start.
            _ if !open => {
                path.move_to(subpath_start);
                open = true;
                push_segment(&mut path, &cmd);
            }
            _ => push_segment(&mut path, &cmd),
        }
    }
    path
}

fn push_segment(path: &mut BezPath, cmd: &PathCommand) {
    let o = &cmd.operands;
    match cmd.kind {
        CommandKind::Line => path.line_to((o[0], o[1])),
        CommandKind::QuadraticCurve => path.quad_to((o[0], o[1]), (o[2], o[3])),
        CommandKind::CubicCurve => path.curve_to((o[0], o[1]), (o[2], o[3]), (o[4], o[5])),
        _ => {}
    }
}

/// Tight bounds of the drawn geometry under `affine`.
///
/// Returns `None` for empty outlines and for outlines whose bounds are not finite.
pub fn bounds(commands: &[PathCommand], affine: Affine) -> Option<Rect> {
    let path = to_bezpath(commands);
    if path.elements().is_empty() {
        return None;
    }
    let r = (affine * path).bounding_box();
    r.is_finite().then_some(r)
}

#[cfg(test)]
#[path = "../../tests/unit/path/convert.rs"]
mod tests;
