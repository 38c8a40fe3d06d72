use crate::foundation::core::Rgba8;
use crate::foundation::math::fmt_num;

/// CSS `hsl()` string for the given hue (degrees) and saturation/lightness (percent).
pub fn hsl_string(hue: f64, saturation: f64, lightness: f64) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        fmt_num(hue),
        fmt_num(saturation),
        fmt_num(lightness)
    )
}

/// Parse the CSS color forms the scene produces or accepts from configuration: named colors,
/// `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()/rgba()` and `hsl()/hsla()`.
///
/// Returns `None` for `none`, `transparent`-like unknowns and malformed input.
pub fn parse_css_color(s: &str) -> Option<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = func_args(&lower, "rgba").or_else(|| func_args(&lower, "rgb")) {
        return parse_rgb_args(&args);
    }
    if let Some(args) = func_args(&lower, "hsla").or_else(|| func_args(&lower, "hsl")) {
        return parse_hsl_args(&args);
    }
    named(&lower)
}

fn func_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start();
    let inner = inner.strip_prefix('(')?.strip_suffix(')')?;
    Some(
        inner
            .split([',', ' ', '/'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect(),
    )
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    fn nib(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }
    let b = hex.as_bytes();
    match b.len() {
        3 => Some(Rgba8::rgb(
            nib(b[0])? * 17,
            nib(b[1])? * 17,
            nib(b[2])? * 17,
        )),
        6 | 8 => {
            let byte = |i: usize| -> Option<u8> { Some(nib(b[i])? * 16 + nib(b[i + 1])?) };
            let a = if b.len() == 8 { byte(6)? } else { 255 };
            Some(Rgba8::rgba(byte(0)?, byte(2)?, byte(4)?, a))
        }
        _ => None,
    }
}

fn alpha_arg(args: &[String]) -> Option<u8> {
    match args.get(3) {
        None => Some(255),
        Some(a) => {
            let v = match a.strip_suffix('%') {
                Some(p) => p.parse::<f64>().ok()? / 100.0,
                None => a.parse::<f64>().ok()?,
            };
            Some(unit_to_u8(v))
        }
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Rgba8> {
    if args.len() < 3 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v = match s.strip_suffix('%') {
            Some(p) => p.parse::<f64>().ok()? / 100.0 * 255.0,
            None => s.parse::<f64>().ok()?,
        };
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    Some(Rgba8::rgba(
        channel(&args[0])?,
        channel(&args[1])?,
        channel(&args[2])?,
        alpha_arg(args)?,
    ))
}

fn parse_hsl_args(args: &[String]) -> Option<Rgba8> {
    if args.len() < 3 {
        return None;
    }
    let h: f64 = args[0].trim_end_matches("deg").parse().ok()?;
    let s: f64 = args[1].trim_end_matches('%').parse().ok()?;
    let l: f64 = args[2].trim_end_matches('%').parse().ok()?;
    let [r, g, b] = hsl_to_rgb(h, s / 100.0, l / 100.0);
    Some(Rgba8::rgba(
        unit_to_u8(r),
        unit_to_u8(g),
        unit_to_u8(b),
        alpha_arg(args)?,
    ))
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Standard HSL -> RGB conversion. `h` in degrees, `s` and `l` in `[0, 1]`.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn named(name: &str) -> Option<Rgba8> {
    let c = match name {
        "black" => Rgba8::rgb(0, 0, 0),
        "white" => Rgba8::rgb(255, 255, 255),
        "red" => Rgba8::rgb(255, 0, 0),
        "lime" => Rgba8::rgb(0, 255, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba8::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::rgb(255, 0, 255),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        "silver" => Rgba8::rgb(192, 192, 192),
        "maroon" => Rgba8::rgb(128, 0, 0),
        "olive" => Rgba8::rgb(128, 128, 0),
        "navy" => Rgba8::rgb(0, 0, 128),
        "purple" => Rgba8::rgb(128, 0, 128),
        "teal" => Rgba8::rgb(0, 128, 128),
        "orange" => Rgba8::rgb(255, 165, 0),
        "pink" => Rgba8::rgb(255, 192, 203),
        "transparent" => Rgba8::rgba(0, 0, 0, 0),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
