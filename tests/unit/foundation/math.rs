use super::*;

#[test]
fn fmt_num_rounds_and_trims() {
    assert_eq!(fmt_num(10.0), "10");
    assert_eq!(fmt_num(2.5), "2.5");
    assert_eq!(fmt_num(1.23456), "1.23");
    assert_eq!(fmt_num(-0.001), "0");
    assert_eq!(fmt_num(-3.456), "-3.46");
    assert_eq!(fmt_num(f64::NAN), "0");
}

#[test]
fn period_fraction_wraps_negative_inputs() {
    assert_eq!(period_fraction(0.0), 0.0);
    assert!((period_fraction(std::f64::consts::PI) - 0.5).abs() < 1e-12);
    assert!((period_fraction(-std::f64::consts::FRAC_PI_2) - 0.75).abs() < 1e-12);
}
