use super::*;

#[test]
fn hsl_string_formats_trimmed_numbers() {
    assert_eq!(hsl_string(120.0, 100.0, 50.0), "hsl(120, 100%, 50%)");
    assert_eq!(hsl_string(33.333, 12.5, 0.0), "hsl(33.33, 12.5%, 0%)");
}

#[test]
fn parses_named_hex_and_functional_forms() {
    assert_eq!(parse_css_color("red"), Some(Rgba8::rgb(255, 0, 0)));
    assert_eq!(parse_css_color(" Black "), Some(Rgba8::rgb(0, 0, 0)));
    assert_eq!(parse_css_color("#0f0"), Some(Rgba8::rgb(0, 255, 0)));
    assert_eq!(parse_css_color("#336699"), Some(Rgba8::rgb(0x33, 0x66, 0x99)));
    assert_eq!(
        parse_css_color("#33669980"),
        Some(Rgba8::rgba(0x33, 0x66, 0x99, 0x80))
    );
    assert_eq!(
        parse_css_color("rgb(10, 20, 30)"),
        Some(Rgba8::rgb(10, 20, 30))
    );
    assert_eq!(
        parse_css_color("rgba(10,20,30,0.5)"),
        Some(Rgba8::rgba(10, 20, 30, 128))
    );
    assert_eq!(
        parse_css_color("hsl(120, 100%, 50%)"),
        Some(Rgba8::rgb(0, 255, 0))
    );
    assert_eq!(parse_css_color("hsl(0, 0%, 100%)"), Some(Rgba8::rgb(255, 255, 255)));
}

#[test]
fn rejects_none_and_garbage() {
    assert_eq!(parse_css_color("none"), None);
    assert_eq!(parse_css_color("#12"), None);
    assert_eq!(parse_css_color("#zzzzzz"), None);
    assert_eq!(parse_css_color("rgb(1, 2)"), None);
    assert_eq!(parse_css_color("hsl(a, b, c)"), None);
}

#[test]
fn hue_wraps_around() {
    let a = hsl_to_rgb(-120.0, 1.0, 0.5);
    let b = hsl_to_rgb(240.0, 1.0, 0.5);
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() < 1e-12);
    }
}
