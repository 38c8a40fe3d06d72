use ::svg::Document;
use ::svg::node::element::{Group, Path, Rectangle};

use crate::foundation::core::{Affine, Canvas, Rgba8};
use crate::foundation::math::fmt_num;
use crate::path::command::serialize;
use crate::render::frame::Frame;
use crate::scene::model::{LineCap, LineJoin, Outline, PaintOrder};

impl Frame {
    /// The frame as a standalone SVG document whose `viewBox` is the fitted viewport.
    pub fn to_svg(&self) -> String {
        self.document().to_string()
    }

    /// Like [`Frame::to_svg`] with explicit pixel size and a background rectangle.
    pub fn to_svg_sized(&self, canvas: Canvas, background: Rgba8) -> String {
        let vp = self.viewport;
        let bg = Rectangle::new()
            .set("x", fmt_num(vp.x))
            .set("y", fmt_num(vp.y))
            .set("width", fmt_num(vp.width))
            .set("height", fmt_num(vp.height))
            .set(
                "fill",
                format!("rgb({}, {}, {})", background.r, background.g, background.b),
            );
        let mut doc = Document::new()
            .set("width", canvas.width)
            .set("height", canvas.height)
            .add(bg);
        doc = self.add_groups(doc);
        self.finish(doc).to_string()
    }

    fn document(&self) -> Document {
        let doc = self.add_groups(Document::new());
        self.finish(doc)
    }

    fn finish(&self, doc: Document) -> Document {
        let vp = self.viewport;
        doc.set("xmlns", "http://www.w3.org/2000/svg").set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_num(vp.x),
                fmt_num(vp.y),
                fmt_num(vp.width),
                fmt_num(vp.height)
            ),
        )
    }

    fn add_groups(&self, mut doc: Document) -> Document {
        for g in &self.scene.groups {
            let mut char_group = Group::new().set("data-char", g.ch.to_string());
            for layer in &g.layers {
                let mut el = Group::new();
                if layer.transform != Affine::IDENTITY {
                    let c = layer.transform.as_coeffs();
                    el = el.set(
                        "transform",
                        format!(
                            "matrix({} {} {} {} {} {})",
                            c[0], c[1], c[2], c[3], c[4], c[5]
                        ),
                    );
                }
                if layer.opacity < 1.0 {
                    el = el.set("opacity", layer.opacity.clamp(0.0, 1.0));
                }
                for o in &layer.outlines {
                    el = el.add(path_element(o));
                }
                char_group = char_group.add(el);
            }
            doc = doc.add(char_group);
        }
        doc
    }
}

fn path_element(o: &Outline) -> Path {
    let s = &o.style;
    let mut p = Path::new()
        .set("d", serialize(&o.commands))
        .set("fill", s.fill.to_string())
        .set("stroke", s.stroke.to_string());
    if !s.stroke.is_none() {
        p = p
            .set("stroke-width", fmt_num(s.stroke_width))
            .set(
                "stroke-linejoin",
                match s.line_join {
                    LineJoin::Miter => "miter",
                    LineJoin::Round => "round",
                    LineJoin::Bevel => "bevel",
                },
            )
            .set(
                "stroke-linecap",
                match s.line_cap {
                    LineCap::Butt => "butt",
                    LineCap::Round => "round",
                    LineCap::Square => "square",
                },
            );
    }
    if s.paint_order == PaintOrder::StrokeFill {
        p = p.set("paint-order", "stroke");
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
