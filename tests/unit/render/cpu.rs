use super::*;
use crate::foundation::core::Viewport;
use crate::path::command::parse;
use crate::scene::model::{CharGroup, Scene, Style};

const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

fn square_frame(style: Style, opacity: f64) -> Frame {
    let mut scene = Scene::new("black");
    scene.groups.push(CharGroup::new(
        'a',
        vec![Outline::new(parse("M0 0 L10 0 L10 10 L0 10 Z"), style)],
    ));
    scene.groups[0].layers[0].opacity = opacity;
    Frame {
        scene,
        viewport: Viewport {
            x: -5.0,
            y: -5.0,
            width: 20.0,
            height: 20.0,
        },
    }
}

fn canvas() -> Canvas {
    Canvas::new(20, 20).unwrap()
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 3)
}

#[test]
fn fills_over_opaque_background() {
    let out = rasterize(&square_frame(Style::filled("red"), 1.0), canvas(), WHITE).unwrap();
    assert_eq!((out.width, out.height), (20, 20));
    assert_eq!(out.data.len(), 20 * 20 * 4);
    assert_eq!(out.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(out.pixel(20, 0), None);
}

#[test]
fn layer_opacity_blends_with_background() {
    let out = rasterize(&square_frame(Style::filled("red"), 0.5), canvas(), WHITE).unwrap();
    let px = out.pixel(10, 10).unwrap();
    assert!(close(px, [255, 128, 128, 255]), "{px:?}");
}

#[test]
fn stroke_only_leaves_interior_clear() {
    let mut style = Style::wireframe("blue");
    style.stroke_width = 2.0;
    let out = rasterize(&square_frame(style, 1.0), canvas(), WHITE).unwrap();
    assert_eq!(out.pixel(10, 10), Some([255, 255, 255, 255]));
    let edge = out.pixel(10, 5).unwrap();
    assert!(edge[2] == 255 && edge[0] < 200, "{edge:?}");
}

#[test]
fn unparsable_paint_is_skipped() {
    let out = rasterize(&square_frame(Style::filled("not-a-color"), 1.0), canvas(), WHITE).unwrap();
    assert_eq!(out.pixel(10, 10), Some([255, 255, 255, 255]));
}

#[test]
fn rasterizer_reuses_buffers_across_sizes() {
    let frame = square_frame(Style::filled("lime"), 1.0);
    let mut r = CpuRasterizer::new();
    let a = r.rasterize(&frame, canvas(), WHITE, Affine::IDENTITY).unwrap();
    let b = r.rasterize(&frame, canvas(), WHITE, Affine::IDENTITY).unwrap();
    assert_eq!(a, b);
    let c = r
        .rasterize(&frame, Canvas::new(40, 20).unwrap(), WHITE, Affine::IDENTITY)
        .unwrap();
    assert_eq!(c.width, 40);
    // Aspect ratio is preserved and the content centered.
    assert_eq!(c.pixel(20, 10), Some([0, 255, 0, 255]));
    assert_eq!(c.pixel(5, 10), Some([255, 255, 255, 255]));
}

#[test]
fn view_transform_moves_content() {
    let frame = square_frame(Style::filled("red"), 1.0);
    let mut r = CpuRasterizer::new();
    let out = r
        .rasterize(&frame, canvas(), WHITE, Affine::translate((-8.0, 0.0)))
        .unwrap();
    assert_eq!(out.pixel(3, 10), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(12, 10), Some([255, 255, 255, 255]));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let frame = square_frame(Style::filled("red"), 1.0);
    let err = rasterize(&frame, Canvas { width: 0, height: 5 }, WHITE).unwrap_err();
    assert!(matches!(err, GlyphfxError::Render(_)));
}
