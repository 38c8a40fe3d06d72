use crate::foundation::math::fmt_num;

/// Instruction kinds of the path mini-language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CommandKind {
    /// `M`: start a subpath.
    Move,
    /// `L`: straight line.
    Line,
    /// `C`: cubic Bezier.
    CubicCurve,
    /// `Q`: quadratic Bezier.
    QuadraticCurve,
    /// `Z`: close the current subpath.
    Close,
    /// `H`: horizontal line.
    HorizontalLine,
    /// `V`: vertical line.
    VerticalLine,
    /// `S`: cubic with reflected first control point.
    SmoothCubic,
    /// `T`: quadratic with reflected control point.
    SmoothQuadratic,
    /// `A`: elliptical arc.
    Arc,
}

impl CommandKind {
    /// Operand count of one instance of this command.
    pub fn arity(self) -> usize {
        match self {
            Self::Move | Self::Line | Self::SmoothQuadratic => 2,
            Self::CubicCurve => 6,
            Self::QuadraticCurve | Self::SmoothCubic => 4,
            Self::Close => 0,
            Self::HorizontalLine | Self::VerticalLine => 1,
            Self::Arc => 7,
        }
    }

    /// Decode a command letter. Lowercase letters are relative.
    pub fn from_letter(c: char) -> Option<(Self, bool)> {
        let kind = match c.to_ascii_uppercase() {
            'M' => Self::Move,
            'L' => Self::Line,
            'C' => Self::CubicCurve,
            'Q' => Self::QuadraticCurve,
            'Z' => Self::Close,
            'H' => Self::HorizontalLine,
            'V' => Self::VerticalLine,
            'S' => Self::SmoothCubic,
            'T' => Self::SmoothQuadratic,
            'A' => Self::Arc,
            _ => return None,
        };
        Some((kind, c.is_ascii_lowercase()))
    }

    /// Command letter, lowercase when `relative`.
    pub fn letter(self, relative: bool) -> char {
        let c = match self {
            Self::Move => 'M',
            Self::Line => 'L',
            Self::CubicCurve => 'C',
            Self::QuadraticCurve => 'Q',
            Self::Close => 'Z',
            Self::HorizontalLine => 'H',
            Self::VerticalLine => 'V',
            Self::SmoothCubic => 'S',
            Self::SmoothQuadratic => 'T',
            Self::Arc => 'A',
        };
        if relative { c.to_ascii_lowercase() } else { c }
    }
}

/// One instruction of a path: a kind, an absolute/relative flag and its operands.
///
/// A command whose operand list is empty while its kind needs operands is a no-op. The parser
/// produces those for numeric runs it cannot read.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathCommand {
    /// Instruction kind.
    pub kind: CommandKind,
    /// Operands are offsets from the current point.
    pub relative: bool,
    /// Flat operand list, `kind.arity()` long for well-formed commands.
    pub operands: Vec<f64>,
}

impl PathCommand {
    /// Absolute command.
    pub fn abs(kind: CommandKind, operands: impl Into<Vec<f64>>) -> Self {
        Self {
            kind,
            relative: false,
            operands: operands.into(),
        }
    }

    /// Relative command.
    pub fn rel(kind: CommandKind, operands: impl Into<Vec<f64>>) -> Self {
        Self {
            kind,
            relative: true,
            operands: operands.into(),
        }
    }

    /// Absolute move-to.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::abs(CommandKind::Move, [x, y])
    }

    /// Absolute line-to.
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::abs(CommandKind::Line, [x, y])
    }

    /// Absolute quadratic curve.
    pub fn quad_to(x1: f64, y1: f64, x: f64, y: f64) -> Self {
        Self::abs(CommandKind::QuadraticCurve, [x1, y1, x, y])
    }

    /// Absolute cubic curve.
    pub fn curve_to(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Self::abs(CommandKind::CubicCurve, [x1, y1, x2, y2, x, y])
    }

    /// Close the current subpath.
    pub fn close() -> Self {
        Self::abs(CommandKind::Close, [])
    }

    /// Whether the command carries the operands its kind requires.
    pub fn is_well_formed(&self) -> bool {
        self.operands.len() == self.kind.arity()
    }

    /// A command that needs operands but has none does nothing.
    pub fn is_noop(&self) -> bool {
        self.kind.arity() > 0 && self.operands.is_empty()
    }
}

/// Parse path text into commands.
///
/// Never fails: a numeric run that cannot be tokenized yields one command with no operands, and
/// an incomplete trailing operand group is dropped. Runs holding several operand groups are split
/// into one command per group; extra pairs after a move become lines.
pub fn parse(text: &str) -> Vec<PathCommand> {
    let mut out = Vec::new();
    let mut current: Option<(CommandKind, bool)> = None;
    let mut run_start = 0usize;

    for (i, c) in text.char_indices() {
        // `e`/`E` belong to exponents and are not command letters.
        if let Some(cmd) = CommandKind::from_letter(c) {
            if let Some((kind, relative)) = current {
                push_run(&mut out, kind, relative, &text[run_start..i]);
            }
            current = Some(cmd);
            run_start = i + c.len_utf8();
        }
    }
    if let Some((kind, relative)) = current {
        push_run(&mut out, kind, relative, &text[run_start..]);
    }
    out
}

fn push_run(out: &mut Vec<PathCommand>, kind: CommandKind, relative: bool, run: &str) {
    let arity = kind.arity();
    let Some(numbers) = tokenize_numbers(run) else {
        out.push(PathCommand {
            kind,
            relative,
            operands: Vec::new(),
        });
        return;
    };

    if arity == 0 {
        out.push(PathCommand {
            kind,
            relative,
            operands: Vec::new(),
        });
        return;
    }

    let groups = numbers.len() / arity;
    if groups == 0 {
        out.push(PathCommand {
            kind,
            relative,
            operands: Vec::new(),
        });
        return;
    }

    for (gi, chunk) in numbers.chunks_exact(arity).enumerate() {
        let kind = if gi > 0 && kind == CommandKind::Move {
            CommandKind::Line
        } else {
            kind
        };
        out.push(PathCommand {
            kind,
            relative,
            operands: chunk.to_vec(),
        });
    }
}

/// Read a run of signed decimals with optional exponents, separated by whitespace or commas.
///
/// Returns `None` when the run contains anything else.
pub(crate) fn tokenize_numbers(run: &str) -> Option<Vec<f64>> {
    let bytes = run.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
            continue;
        }

        let start = i;
        if bytes[i] == b'+' || bytes[i] == b'-' {
            i += 1;
        }
        let mut digits = 0usize;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return None;
        }
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exp_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j == exp_start {
                return None;
            }
            i = j;
        }

        let v: f64 = run[start..i].parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        out.push(v);
    }

    Some(out)
}

/// Serialize commands back to path text, operands rounded to two decimals.
pub fn serialize(commands: &[PathCommand]) -> String {
    let mut parts = Vec::with_capacity(commands.len());
    for cmd in commands {
        let mut s = String::new();
        s.push(cmd.kind.letter(cmd.relative));
        let nums: Vec<String> = cmd.operands.iter().map(|&v| fmt_num(v)).collect();
        s.push_str(&nums.join(" "));
        parts.push(s);
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/path/command.rs"]
mod tests;
