use tracing::debug;
use vectorkit_core::SvgError;
use vectorkit_settings::CanvasSettings;

use super::markup::{self, Tag, TagKind};
use super::path_data::parse_path_data;
use crate::geometry::{group_bounds, transform_element, translate_element, Bounds, GroupTransform};
use crate::model::{Element, ElementId, NewElement, Paint, PathPoint, Point};

/// Elements whose children are never rendered directly.
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "symbol", "marker", "pattern"];

/// Result of an SVG import.
#[derive(Debug, Clone)]
pub struct ImportedDesign {
    /// Elements already fitted onto the canvas
    pub elements: Vec<Element>,
    /// Source document size (width, height)
    pub dimensions: (f64, f64),
    /// Uniform scale applied to fit the canvas
    pub scale: f64,
}

/// SVG importer for the restricted shape subset.
pub struct SvgImporter {
    canvas: CanvasSettings,
}

fn parse_number(attribute: &str, raw: &str) -> Result<f64, SvgError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SvgError::InvalidNumber {
            attribute: attribute.to_string(),
            value: raw.to_string(),
        })
}

fn number_attr(tag: &Tag<'_>, attribute: &str) -> Result<Option<f64>, SvgError> {
    tag.attr(attribute)
        .map(|raw| parse_number(attribute, raw))
        .transpose()
}

fn number_or_zero(tag: &Tag<'_>, attribute: &str) -> Result<f64, SvgError> {
    Ok(number_attr(tag, attribute)?.unwrap_or(0.0))
}

fn parse_view_box(raw: &str) -> Result<Bounds, SvgError> {
    let values = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| parse_number("viewBox", s))
        .collect::<Result<Vec<f64>, _>>()?;
    match values.as_slice() {
        [x, y, w, h] => Ok(Bounds::new(*x, *y, x + w, y + h)),
        _ => Err(SvgError::InvalidNumber {
            attribute: "viewBox".to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Rebases absolute path points onto the minimum of their bounds.
fn path_element(points: Vec<PathPoint>) -> Option<NewElement> {
    let bounds = Bounds::from_points(points.iter().flat_map(PathPoint::coordinates))?;
    let relative = points
        .iter()
        .map(|p| p.map(|q| Point::new(q.x - bounds.min_x, q.y - bounds.min_y)))
        .collect();
    Some(NewElement::path(bounds.min_x, bounds.min_y, relative))
}

fn shape_from_tag(tag: &Tag<'_>) -> Result<Option<NewElement>, SvgError> {
    let shape = match tag.local_name() {
        "rect" => {
            let width = number_or_zero(tag, "width")?;
            let height = number_or_zero(tag, "height")?;
            if width <= 0.0 || height <= 0.0 {
                return Ok(None);
            }
            NewElement::rect(number_or_zero(tag, "x")?, number_or_zero(tag, "y")?, width, height)
        }
        "circle" => {
            let r = number_or_zero(tag, "r")?;
            if r <= 0.0 {
                return Ok(None);
            }
            NewElement::circle(number_or_zero(tag, "cx")?, number_or_zero(tag, "cy")?, r)
        }
        "ellipse" => {
            let rx = number_or_zero(tag, "rx")?;
            let ry = number_or_zero(tag, "ry")?;
            if rx <= 0.0 || ry <= 0.0 {
                return Ok(None);
            }
            NewElement::ellipse(number_or_zero(tag, "cx")?, number_or_zero(tag, "cy")?, rx, ry)
        }
        "path" => {
            let points = parse_path_data(tag.attr("d").unwrap_or_default())?;
            match path_element(points) {
                Some(shape) => shape,
                None => return Ok(None),
            }
        }
        _ => return Ok(None),
    };

    let mut shape = NewElement {
        fill: Some(Paint::new(tag.attr("fill").unwrap_or("#000000"))),
        stroke: Some(Paint::new(tag.attr("stroke").unwrap_or("none"))),
        ..shape
    };
    shape.stroke_width = number_attr(tag, "stroke-width")?;
    shape.fill_opacity = number_attr(tag, "fill-opacity")?;
    shape.stroke_opacity = number_attr(tag, "stroke-opacity")?;
    Ok(Some(shape))
}

impl SvgImporter {
    pub fn new(canvas: CanvasSettings) -> Self {
        Self { canvas }
    }

    /// Parses `svg` and fits its shapes onto the canvas.
    ///
    /// The source box is the root `viewBox`, else its `width`/`height`,
    /// else the bounds of the content. It is scaled uniformly to fill at
    /// most the configured fraction of the canvas (never enlarged) and
    /// centred on it.
    pub fn import_string(&self, svg: &str) -> Result<ImportedDesign, SvgError> {
        let tags = markup::scan(svg)?;
        let root = tags
            .iter()
            .find(|t| t.kind != TagKind::Close)
            .filter(|t| t.local_name() == "svg")
            .ok_or(SvgError::MissingRoot)?;

        let mut elements = Vec::new();
        let mut hidden_depth = 0usize;
        for tag in &tags {
            let hides = NON_RENDERED.contains(&tag.local_name());
            match tag.kind {
                TagKind::Open if hides => hidden_depth += 1,
                TagKind::Close if hides => hidden_depth = hidden_depth.saturating_sub(1),
                TagKind::Close => {}
                TagKind::Open | TagKind::SelfClosing => {
                    if hidden_depth > 0 {
                        continue;
                    }
                    if let Some(shape) = shape_from_tag(tag)? {
                        elements.push(shape.into_element(ElementId::generate()));
                    }
                }
            }
        }

        let content = group_bounds(&elements).ok_or(SvgError::Empty)?;
        let source = match root.attr("viewBox") {
            Some(raw) => parse_view_box(raw)?,
            None => match (number_attr(root, "width")?, number_attr(root, "height")?) {
                (Some(w), Some(h)) => Bounds::new(0.0, 0.0, w, h),
                _ => content,
            },
        };
        let source = if source.width() > 0.0 && source.height() > 0.0 {
            source
        } else {
            content
        };

        let scale = self.fit_scale(&source);
        let from = source.center();
        let to = Point::new(self.canvas.width / 2.0, self.canvas.height / 2.0);
        let fit = GroupTransform::scale(scale);
        let elements: Vec<Element> = elements
            .into_iter()
            .map(|el| {
                let scaled = transform_element(&el, &fit, from).applied(&el);
                translate_element(&scaled, to.x - from.x, to.y - from.y).applied(&scaled)
            })
            .collect();

        debug!(
            count = elements.len(),
            scale,
            width = source.width(),
            height = source.height(),
            "Parsed SVG"
        );
        Ok(ImportedDesign {
            elements,
            dimensions: (source.width(), source.height()),
            scale,
        })
    }

    fn fit_scale(&self, source: &Bounds) -> f64 {
        let ratio = self.canvas.fit_ratio;
        let sx = ratio * self.canvas.width / source.width().max(f64::EPSILON);
        let sy = ratio * self.canvas.height / source.height().max(f64::EPSILON);
        sx.min(sy).min(1.0)
    }
}
