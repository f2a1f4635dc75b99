// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Surface`].

use core::fmt::Write as _;

use kurbo::Affine;
use peniko::Brush;

use crate::mark::{Mark, Shape, TextAnchor, TextBaseline};
use crate::surface::{Animation, Element, Surface};

impl Surface {
    /// Serializes the surface into a standalone SVG document.
    ///
    /// Elements are written in paint order. Pending transitions are emitted as SMIL
    /// `<animate>` children so the document plays them back when opened.
    pub fn to_svg(&self) -> String {
        let size = self.size();
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = size.width,
            h = size.height,
        );
        for element in self.elements() {
            write_element(&mut out, element);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_element(out: &mut String, element: &Element) {
    let mark = &element.mark;
    let tag = match &mark.shape {
        Shape::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.to_svg());
            "path"
        }
        Shape::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            );
            "circle"
        }
        Shape::Line(l) => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                l.p0.x, l.p0.y, l.p1.x, l.p1.y
            );
            "line"
        }
        Shape::Rect(r) => {
            let r = r.abs();
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.x0,
                r.y0,
                r.width(),
                r.height()
            );
            "rect"
        }
        Shape::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
                t.pos.x, t.pos.y, t.font_size
            );
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            "text"
        }
    };

    write_common_attrs(out, mark);

    let children = animation_children(element);
    match (&mark.shape, children.is_empty()) {
        (Shape::Text(t), _) => {
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str(&children);
            let _ = writeln!(out, "</{tag}>");
        }
        (_, true) => out.push_str("/>\n"),
        (_, false) => {
            out.push('>');
            out.push_str(&children);
            let _ = writeln!(out, "</{tag}>");
        }
    }
}

fn write_common_attrs(out: &mut String, mark: &Mark) {
    if !mark.class.is_empty() {
        let _ = write!(out, r#" class="{}""#, escape_xml(&mark.class));
    }
    if let Some(label) = &mark.label {
        let _ = write!(out, r#" data-label="{}""#, escape_xml(label));
    }
    write_paint_attr(out, "fill", &mark.fill);
    if mark.stroke_width > 0.0 {
        write_paint_attr(out, "stroke", &mark.stroke);
        let _ = write!(out, r#" stroke-width="{}""#, mark.stroke_width);
    }
    if let Some(t) = mark.transform
        && !matches!(mark.shape, Shape::Text(_))
    {
        let _ = write!(out, r#" transform="{}""#, svg_transform(t));
    }
}

fn animation_children(element: &Element) -> String {
    let mut out = String::new();
    match &element.animation {
        None => {}
        Some(Animation::Reveal { duration, length }) => {
            // The dash pattern is attached here so static renders stay undashed.
            let ms = duration.as_millis();
            let _ = write!(
                out,
                r#"<set attributeName="stroke-dasharray" to="{length} {length}"/><animate attributeName="stroke-dashoffset" from="{length}" to="0" dur="{ms}ms" fill="freeze"/>"#
            );
        }
        Some(Animation::FadeIn { duration }) => {
            let ms = duration.as_millis();
            let _ = write!(
                out,
                r#"<animate attributeName="opacity" from="0" to="1" dur="{ms}ms" fill="freeze"/>"#
            );
        }
        Some(Animation::Morph {
            duration,
            from,
            from_stroke,
            from_fill,
        }) => {
            let ms = duration.as_millis();
            match (from, &element.mark.shape) {
                (Shape::Path(a), Shape::Path(b)) => {
                    let _ = write!(
                        out,
                        r#"<animate attributeName="d" from="{}" to="{}" dur="{ms}ms" fill="freeze"/>"#,
                        a.to_svg(),
                        b.to_svg()
                    );
                }
                (Shape::Circle(a), Shape::Circle(b)) => {
                    for (attr, v0, v1) in [
                        ("cx", a.center.x, b.center.x),
                        ("cy", a.center.y, b.center.y),
                        ("r", a.radius, b.radius),
                    ] {
                        if v0 != v1 {
                            let _ = write!(
                                out,
                                r#"<animate attributeName="{attr}" from="{v0}" to="{v1}" dur="{ms}ms" fill="freeze"/>"#
                            );
                        }
                    }
                }
                (a, b) => {
                    // Mismatched geometry kinds can't be interpolated; fade the new one in.
                    if a.kind() != b.kind() {
                        let _ = write!(
                            out,
                            r#"<animate attributeName="opacity" from="0" to="1" dur="{ms}ms" fill="freeze"/>"#
                        );
                    }
                }
            }
            for (attr, old, new) in [
                ("stroke", from_stroke, &element.mark.stroke),
                ("fill", from_fill, &element.mark.fill),
            ] {
                if old != new {
                    let (v0, _) = svg_paint(old);
                    let (v1, _) = svg_paint(new);
                    let _ = write!(
                        out,
                        r#"<animate attributeName="{attr}" from="{v0}" to="{v1}" dur="{ms}ms" fill="freeze"/>"#
                    );
                }
            }
        }
    }
    out
}

fn svg_transform(t: Affine) -> String {
    let [a, b, c, d, e, f] = t.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_string(), None);
            }
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (value, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{BezPath, Circle};
    use peniko::color::palette::css;

    use super::*;
    use crate::mark::{MarkKey, TextShape};

    #[test]
    fn svg_carries_class_label_and_escaped_text() {
        let mut s = Surface::new(200.0, 100.0);
        s.join(
            "t",
            [Mark::new(
                MarkKey::new("title"),
                "chart-title",
                Shape::Text(TextShape::new((100.0, 10.0), "A < B")),
            )
            .with_label("S&P")
            .with_fill(css::BLACK)],
        );
        let svg = s.to_svg();
        assert!(svg.contains(r#"class="chart-title""#));
        assert!(svg.contains(r#"data-label="S&amp;P""#));
        assert!(svg.contains("A &lt; B"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn reveal_transition_is_written_as_dash_offset_animation() {
        let mut s = Surface::new(100.0, 100.0);
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 0.0));
        s.join(
            "lines",
            [Mark::new(MarkKey::new("l"), "line", Shape::Path(p))
                .with_stroke(css::BLUE, 1.5)
                .with_transition(Some(Duration::from_millis(300)))
                .with_reveal(true)],
        );
        let svg = s.to_svg();
        assert!(svg.contains(r#"attributeName="stroke-dashoffset""#));
        assert!(svg.contains(r#"dur="300ms""#));
    }

    #[test]
    fn transparent_fill_is_none() {
        let mut s = Surface::new(10.0, 10.0);
        s.insert(Mark::new(
            MarkKey::new("c"),
            "",
            Shape::Circle(Circle::new((1.0, 1.0), 1.0)),
        ));
        let svg = s.to_svg();
        assert!(svg.contains(r#"fill="none""#));
        assert!(!svg.contains("class="));
    }
}
