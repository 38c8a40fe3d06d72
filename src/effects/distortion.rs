use crate::effects::model::{DistortionParams, WaveType};
use crate::foundation::core::Point;
use crate::foundation::math::period_fraction;
use crate::path::command::{CommandKind, PathCommand};
use crate::path::convert::absolutize;
use crate::path::sample::{line_tangent, normal};
use crate::path::subdivide::subdivide;
use crate::scene::model::{Outline, Scene};

/// Segments each source segment is split into before displacement.
pub const DISTORTION_SUBDIVISIONS: u32 = 8;

/// Evaluate the wave shape at `x` radians. Every shape has period `2π` and range `[-1, 1]`.
pub fn wave(kind: WaveType, x: f64) -> f64 {
    match kind {
        WaveType::Sine => x.sin(),
        WaveType::Saw => 2.0 * period_fraction(x) - 1.0,
        WaveType::Triangle => {
            let p = period_fraction(x);
            if p < 0.5 { 4.0 * p - 1.0 } else { 3.0 - 4.0 * p }
        }
    }
}

/// Ripple every outline along its normals.
pub fn distortion(scene: &Scene, params: &DistortionParams) -> Scene {
    scene.map_outlines(|o| Outline {
        commands: distort_commands(&o.commands, params),
        style: o.style.clone(),
    })
}

/// Flatten `commands` and displace every line vertex by
/// `amplitude * wave(frequency * arcLength + phase)` along the incoming segment's normal.
///
/// Arc length runs on across subpaths; moves and closes keep their positions.
pub fn distort_commands(commands: &[PathCommand], params: &DistortionParams) -> Vec<PathCommand> {
    let flat = subdivide(&absolutize(commands), DISTORTION_SUBDIVISIONS);
    let phase = params.phase.to_radians();
    let mut out = Vec::with_capacity(flat.len());
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    let mut arc_length = 0.0;

    for cmd in flat {
        match cmd.kind {
            CommandKind::Move => {
                current = Point::new(cmd.operands[0], cmd.operands[1]);
                start = current;
                out.push(cmd);
            }
            CommandKind::Line => {
                let p = Point::new(cmd.operands[0], cmd.operands[1]);
                arc_length += (p - current).hypot();
                let n = normal(line_tangent(current, p));
                let d = params.amplitude
                    * wave(params.wave_type, params.frequency * arc_length + phase);
                let moved = p + n * d;
                out.push(PathCommand::line_to(moved.x, moved.y));
                current = p;
            }
            CommandKind::Close => {
                arc_length += (start - current).hypot();
                current = start;
                out.push(cmd);
            }
            _ => out.push(cmd),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/distortion.rs"]
mod tests;
