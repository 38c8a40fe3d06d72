use std::collections::HashMap;

use color_quant::NeuQuant;

use crate::encode::sink::IndexedFrame;
use crate::foundation::error::{GlyphfxError, GlyphfxResult};
use crate::render::cpu::FrameRGBA;

/// Largest palette a frame may use.
pub const MAX_COLORS: usize = 256;

/// NeuQuant sampling factor: 1 is slowest and best, 30 fastest.
pub const SAMPLE_FACTOR: i32 = 10;

/// Reduce an opaque RGBA frame to a palette of at most [`MAX_COLORS`] entries and map every
/// pixel to its nearest entry.
///
/// Frames that already fit the palette are mapped exactly; others go through NeuQuant.
pub fn quantize(frame: &FrameRGBA, delay_ms: u32) -> GlyphfxResult<IndexedFrame> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected || expected == 0 {
        return Err(GlyphfxError::encode(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    if let Some((palette, indices)) = exact_palette(&frame.data) {
        return Ok(IndexedFrame {
            width: frame.width,
            height: frame.height,
            palette,
            indices,
            delay_ms,
        });
    }

    let nq = NeuQuant::new(SAMPLE_FACTOR, MAX_COLORS, &frame.data);
    let palette: Vec<[u8; 3]> = nq
        .color_map_rgb()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    // Antialiased frames still repeat most colors; look each one up once.
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let indices = frame
        .data
        .chunks_exact(4)
        .map(|px| {
            let key = [px[0], px[1], px[2], px[3]];
            *lookup
                .entry(key)
                .or_insert_with(|| nq.index_of(&key) as u8)
        })
        .collect();

    Ok(IndexedFrame {
        width: frame.width,
        height: frame.height,
        palette,
        indices,
        delay_ms,
    })
}

/// Lossless palette for frames with at most [`MAX_COLORS`] distinct colors.
fn exact_palette(data: &[u8]) -> Option<(Vec<[u8; 3]>, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(data.len() / 4);
    for px in data.chunks_exact(4) {
        let key = [px[0], px[1], px[2], px[3]];
        let idx = match lookup.get(&key) {
            Some(&i) => i,
            None => {
                if palette.len() == MAX_COLORS {
                    return None;
                }
                let i = palette.len() as u8;
                lookup.insert(key, i);
                palette.push([px[0], px[1], px[2]]);
                i
            }
        };
        indices.push(idx);
    }
    Some((palette, indices))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/quantize.rs"]
mod tests;
