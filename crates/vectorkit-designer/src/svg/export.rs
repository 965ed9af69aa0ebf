use vectorkit_settings::CanvasSettings;

use crate::geometry::element_center;
use crate::model::{Element, ElementKind, PathCommand, PathPoint};

/// Formats a coordinate rounded to three decimals, without trailing zeros.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn paint_attrs(element: &Element, filled: bool) -> String {
    let mut attrs = String::new();
    if filled {
        attrs.push_str(&format!(" fill=\"{}\"", escape_text(element.fill.as_str())));
    } else {
        attrs.push_str(" fill=\"none\"");
    }
    attrs.push_str(&format!(
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_text(element.stroke.as_str()),
        format_number(element.stroke_width)
    ));
    if filled && element.fill_opacity < 1.0 {
        attrs.push_str(&format!(
            " fill-opacity=\"{}\"",
            format_number(element.fill_opacity)
        ));
    }
    if element.stroke_opacity < 1.0 {
        attrs.push_str(&format!(
            " stroke-opacity=\"{}\"",
            format_number(element.stroke_opacity)
        ));
    }
    if element.rotation != 0.0 {
        let c = element_center(element);
        attrs.push_str(&format!(
            " transform=\"rotate({} {} {})\"",
            format_number(element.rotation),
            format_number(c.x),
            format_number(c.y)
        ));
    }
    attrs
}

fn path_data(element: &Element, points: &[PathPoint]) -> String {
    let n = format_number;
    let (ax, ay) = (element.x, element.y);
    let mut d = String::new();
    for p in points {
        if !d.is_empty() {
            d.push(' ');
        }
        match p.command {
            PathCommand::Move => d.push_str(&format!("M {} {}", n(ax + p.x), n(ay + p.y))),
            PathCommand::Line => d.push_str(&format!("L {} {}", n(ax + p.x), n(ay + p.y))),
            PathCommand::Curve => {
                let c1 = p.control1.unwrap_or_default();
                let c2 = p.control2.unwrap_or_default();
                d.push_str(&format!(
                    "C {} {} {} {} {} {}",
                    n(ax + c1.x),
                    n(ay + c1.y),
                    n(ax + c2.x),
                    n(ay + c2.y),
                    n(ax + p.x),
                    n(ay + p.y)
                ));
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

fn element_markup(element: &Element) -> String {
    let n = format_number;
    match &element.kind {
        ElementKind::Rect { width, height } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
            n(element.x),
            n(element.y),
            n(*width),
            n(*height),
            paint_attrs(element, true)
        ),
        ElementKind::Circle { radius } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            n(element.x),
            n(element.y),
            n(*radius),
            paint_attrs(element, true)
        ),
        ElementKind::Ellipse { radius_x, radius_y } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
            n(element.x),
            n(element.y),
            n(*radius_x),
            n(*radius_y),
            paint_attrs(element, true)
        ),
        ElementKind::Line { x2, y2 } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            n(element.x),
            n(element.y),
            n(*x2),
            n(*y2),
            paint_attrs(element, false)
        ),
        ElementKind::Drawing { points } => {
            let coords: Vec<String> = points
                .chunks_exact(2)
                .map(|pair| format!("{},{}", n(pair[0]), n(pair[1])))
                .collect();
            format!(
                "<polyline points=\"{}\"{}/>",
                coords.join(" "),
                paint_attrs(element, false)
            )
        }
        ElementKind::Path { points } => format!(
            "<path d=\"{}\"{}/>",
            path_data(element, points),
            paint_attrs(element, true)
        ),
        ElementKind::Text {
            content,
            font_size,
            font_family,
            ..
        } => format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"{}\"{}>{}</text>",
            n(element.x),
            n(element.y + font_size),
            n(*font_size),
            escape_text(font_family),
            paint_attrs(element, true),
            escape_text(content)
        ),
    }
}

/// Serializes `elements` as a standalone SVG document sized to the canvas.
pub fn export_svg(elements: &[Element], canvas: &CanvasSettings) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">\n",
        format_number(canvas.width),
        format_number(canvas.height)
    );
    for element in elements {
        svg.push_str("  ");
        svg.push_str(&element_markup(element));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}
