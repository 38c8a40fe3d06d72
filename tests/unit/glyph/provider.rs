use super::*;
use crate::path::command::parse;

#[test]
fn memory_provider_returns_registered_glyphs_only() {
    let mut p = MemoryOutlineProvider::new(1000.0);
    p.insert('a', parse("M0 0 L500 0 L500 700 Z"), 600.0)
        .insert(' ', Vec::new(), 250.0);

    assert_eq!(p.units_per_em(), 1000.0);
    let a = p.glyph('a').unwrap().unwrap();
    assert_eq!(a.advance, 600.0);
    assert_eq!(a.units_per_em, 1000.0);
    assert_eq!(a.commands.len(), 4);
    assert!(p.glyph(' ').unwrap().unwrap().commands.is_empty());
    assert!(p.glyph('z').unwrap().is_none());
}
