//! SVG generation
//!
//! Draw calls become `<line>` and `<rect>` elements in a typed document that
//! is serialized with `facet_xml`. Blur masks turn into shared
//! `feGaussianBlur` filters. SVG has no source-replace compositing, so
//! [`BlendMode::Src`](super::paint::BlendMode) paints are emitted as ordinary
//! painter's-order elements; for opaque paints the result is the same.

use facet::Facet;
use facet_xml as xml;
use facet_xml::SerializeOptions;

use super::Surface;
use super::geometry::{RoundRect, Segment};
use super::paint::{Paint, PaintStyle};
use crate::types::{Color, Size};

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root `<svg>` element
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct Svg {
    #[facet(xml::attribute)]
    width: Option<f64>,
    #[facet(xml::attribute)]
    height: Option<f64>,
    #[facet(xml::attribute, rename = "viewBox")]
    view_box: Option<String>,
    #[facet(xml::elements)]
    children: Vec<SvgNode>,
}

/// Elements we emit
#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
enum SvgNode {
    #[facet(rename = "defs")]
    Defs(Defs),
    #[facet(rename = "filter")]
    Filter(Filter),
    #[facet(rename = "line")]
    Line(Line),
    #[facet(rename = "rect")]
    Rect(Rect),
}

#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct Defs {
    #[facet(xml::elements)]
    children: Vec<SvgNode>,
}

/// `<filter>` holding a single blur. Regions are in user space: a
/// zero-height line has an empty bounding box.
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct Filter {
    #[facet(xml::attribute)]
    id: String,
    #[facet(xml::attribute, rename = "filterUnits")]
    filter_units: String,
    #[facet(xml::attribute)]
    x: String,
    #[facet(xml::attribute)]
    y: String,
    #[facet(xml::attribute)]
    width: String,
    #[facet(xml::attribute)]
    height: String,
    #[facet(xml::elements)]
    primitives: Vec<FilterPrimitive>,
}

#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
enum FilterPrimitive {
    #[facet(rename = "feGaussianBlur")]
    GaussianBlur(GaussianBlur),
}

#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct GaussianBlur {
    #[facet(xml::attribute, rename = "stdDeviation")]
    std_deviation: f64,
}

#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct Line {
    #[facet(xml::attribute)]
    x1: f64,
    #[facet(xml::attribute)]
    y1: f64,
    #[facet(xml::attribute)]
    x2: f64,
    #[facet(xml::attribute)]
    y2: f64,
    #[facet(xml::attribute)]
    fill: Option<String>,
    #[facet(xml::attribute)]
    stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    stroke_width: Option<f64>,
    #[facet(xml::attribute, rename = "stroke-opacity")]
    stroke_opacity: Option<f64>,
    #[facet(xml::attribute)]
    filter: Option<String>,
    #[facet(xml::attribute, rename = "shape-rendering")]
    shape_rendering: Option<String>,
}

#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
struct Rect {
    #[facet(xml::attribute)]
    x: f64,
    #[facet(xml::attribute)]
    y: f64,
    #[facet(xml::attribute)]
    width: f64,
    #[facet(xml::attribute)]
    height: f64,
    #[facet(xml::attribute)]
    rx: f64,
    #[facet(xml::attribute)]
    ry: f64,
    #[facet(xml::attribute)]
    fill: Option<String>,
    #[facet(xml::attribute, rename = "fill-opacity")]
    fill_opacity: Option<f64>,
    #[facet(xml::attribute)]
    stroke: Option<String>,
    #[facet(xml::attribute, rename = "stroke-width")]
    stroke_width: Option<f64>,
    #[facet(xml::attribute, rename = "stroke-opacity")]
    stroke_opacity: Option<f64>,
    #[facet(xml::attribute)]
    filter: Option<String>,
    #[facet(xml::attribute, rename = "shape-rendering")]
    shape_rendering: Option<String>,
}

/// `rgb()` string plus an opacity when the color is not opaque
fn color_attrs(color: Color) -> (String, Option<f64>) {
    let opacity = (color.alpha() != 0xFF).then(|| f64::from(color.opacity()));
    (color.to_rgb_string(), opacity)
}

fn crisp(paint: &Paint) -> Option<String> {
    (!paint.anti_alias).then(|| "crispEdges".to_string())
}

/// Every number in the document started out as an `f32`, so print it at that
/// precision: `16` rather than `16.0`, `9.7376` rather than `9.737600326538086`.
fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
    write!(writer, "{}", value as f32)
}

/// Surface that accumulates an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    /// Distinct blur sigmas, index == filter id
    filters: Vec<f32>,
    nodes: Vec<SvgNode>,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            filters: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// `url(#blur-N)` reference for the paint's blur, registering a new
    /// filter the first time a sigma shows up
    fn filter_for(&mut self, paint: &Paint) -> Option<String> {
        let sigma = paint.blur?.sigma();
        if sigma <= 0.0 {
            return None;
        }
        let id = match self.filters.iter().position(|s| *s == sigma) {
            Some(id) => id,
            None => {
                self.filters.push(sigma);
                self.filters.len() - 1
            }
        };
        Some(format!("url(#blur-{id})"))
    }

    /// Number of elements drawn so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn document(&self) -> Svg {
        let (w, h) = (self.size.w.0, self.size.h.0);
        let mut children = Vec::with_capacity(self.nodes.len() + 1);
        if !self.filters.is_empty() {
            let filters = self
                .filters
                .iter()
                .enumerate()
                .map(|(id, sigma)| {
                    SvgNode::Filter(Filter {
                        id: format!("blur-{id}"),
                        filter_units: "userSpaceOnUse".to_string(),
                        x: "-50%".to_string(),
                        y: "-50%".to_string(),
                        width: "200%".to_string(),
                        height: "200%".to_string(),
                        primitives: vec![FilterPrimitive::GaussianBlur(GaussianBlur {
                            std_deviation: f64::from(*sigma),
                        })],
                    })
                })
                .collect();
            children.push(SvgNode::Defs(Defs { children: filters }));
        }
        children.extend(self.nodes.iter().cloned());

        Svg {
            width: Some(f64::from(w)),
            height: Some(f64::from(h)),
            view_box: Some(format!("0 0 {w} {h}")),
            children,
        }
    }

    /// Serialize the document
    pub fn finish(&self) -> Result<String, miette::Report> {
        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&self.document(), &options)
            .map_err(|e| miette::miette!("XML serialization error: {}", e))
    }
}

impl Surface for SvgSurface {
    fn draw_line(&mut self, segment: Segment, paint: &Paint) {
        let filter = self.filter_for(paint);
        let (stroke, stroke_opacity) = color_attrs(paint.color);
        self.nodes.push(SvgNode::Line(Line {
            x1: f64::from(segment.from.x),
            y1: f64::from(segment.from.y),
            x2: f64::from(segment.to.x),
            y2: f64::from(segment.to.y),
            fill: Some("none".to_string()),
            stroke: Some(stroke),
            stroke_width: Some(f64::from(paint.stroke_width.0)),
            stroke_opacity,
            filter,
            shape_rendering: crisp(paint),
        }));
    }

    fn draw_round_rect(&mut self, shape: RoundRect, paint: &Paint) {
        let filter = self.filter_for(paint);
        // A usable area smaller than the padding leaves min past max; SVG
        // rejects negative sizes, so emit the same corners the other way round
        let (min, max) = (shape.rect.min.min(shape.rect.max), shape.rect.min.max(shape.rect.max));
        let radius = f64::from(shape.radius.0);
        let mut rect = Rect {
            x: f64::from(min.x),
            y: f64::from(min.y),
            width: f64::from(max.x - min.x),
            height: f64::from(max.y - min.y),
            rx: radius,
            ry: radius,
            filter,
            shape_rendering: crisp(paint),
            ..Default::default()
        };
        let (color, opacity) = color_attrs(paint.color);
        match paint.style {
            PaintStyle::Fill => {
                rect.fill = Some(color);
                rect.fill_opacity = opacity;
            }
            PaintStyle::Stroke => {
                rect.fill = Some("none".to_string());
                rect.stroke = Some(color);
                rect.stroke_width = Some(f64::from(paint.stroke_width.0));
                rect.stroke_opacity = opacity;
            }
        }
        self.nodes.push(SvgNode::Rect(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::paint::{BlendMode, BlurMask, BlurStyle};
    use crate::types::{Px, Rect as PxRect};
    use glam::vec2;

    fn blurred(radius: f32) -> Paint {
        Paint {
            anti_alias: true,
            blend: BlendMode::Src,
            blur: Some(BlurMask { radius: Px(radius), style: BlurStyle::Normal }),
            ..Paint::stroke(Color::argb(0x80, 0, 0, 0), Px(4.0))
        }
    }

    fn rect_node(svg: &SvgSurface, index: usize) -> &Rect {
        match &svg.nodes[index] {
            SvgNode::Rect(rect) => rect,
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn shared_filters_per_sigma() {
        let mut svg = SvgSurface::new(Size::new(Px(100.0), Px(50.0)));
        let seg = Segment::new(vec2(0.0, 0.0), vec2(100.0, 0.0));
        svg.draw_line(seg, &blurred(10.0));
        svg.draw_line(seg, &blurred(10.0));
        svg.draw_line(seg, &blurred(20.0));
        assert_eq!(svg.filters.len(), 2);

        let out = svg.finish().unwrap();
        assert_eq!(out.matches("<filter").count(), 2);
        assert_eq!(out.matches("url(#blur-0)").count(), 2);
        assert!(out.contains("url(#blur-1)"));
        assert!(out.contains("feGaussianBlur"));
        assert!(out.contains(r#"filterUnits="userSpaceOnUse""#));
    }

    #[test]
    fn line_and_rect_elements() {
        let mut svg = SvgSurface::new(Size::new(Px(100.0), Px(50.0)));
        svg.draw_line(Segment::new(vec2(100.0, 0.0), vec2(0.0, 0.0)), &blurred(0.0));
        svg.draw_round_rect(
            RoundRect { rect: PxRect::new(vec2(0.0, 0.0), vec2(100.0, 50.0)), radius: Px(8.0) },
            &Paint::fill(Color::WHITE),
        );

        let SvgNode::Line(line) = &svg.nodes[0] else {
            panic!("expected line");
        };
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (100.0, 0.0, 0.0, 0.0));
        assert_eq!(line.stroke.as_deref(), Some("rgb(0,0,0)"));
        assert!(line.stroke_opacity.is_some());
        assert_eq!(line.filter, None);
        assert_eq!(line.shape_rendering, None);

        let rect = rect_node(&svg, 1);
        assert_eq!(rect.fill.as_deref(), Some("rgb(255,255,255)"));
        assert_eq!(rect.fill_opacity, None);
        assert_eq!(rect.shape_rendering.as_deref(), Some("crispEdges"));

        let out = svg.finish().unwrap();
        assert!(out.contains("<svg"));
        assert!(out.contains(SVG_NS));
        assert!(out.contains(r#"viewBox="0 0 100 50""#));
        assert!(!out.contains("<defs"));
        assert!(out.contains(r#"rx="8""#));
        assert!(out.contains(r#"width="100""#));
    }

    #[test]
    fn inverted_rect_is_normalized() {
        let mut svg = SvgSurface::new(Size::new(Px(10.0), Px(10.0)));
        svg.draw_round_rect(
            RoundRect { rect: PxRect::new(vec2(8.0, 8.0), vec2(2.0, 2.0)), radius: Px::ZERO },
            &Paint::fill(Color::WHITE),
        );
        let rect = rect_node(&svg, 0);
        assert_eq!((rect.x, rect.y), (2.0, 2.0));
        assert_eq!((rect.width, rect.height), (6.0, 6.0));

        let out = svg.finish().unwrap();
        assert!(!out.contains(r#"width="-"#));
        assert!(!out.contains(r#"height="-"#));
    }

    #[test]
    fn stroked_rect_has_no_fill() {
        let mut svg = SvgSurface::new(Size::new(Px(10.0), Px(10.0)));
        svg.draw_round_rect(
            RoundRect { rect: PxRect::new(vec2(0.0, 0.0), vec2(10.0, 10.0)), radius: Px(2.0) },
            &Paint::stroke(Color::argb(0x80, 0, 0, 255), Px(2.0)),
        );
        let rect = rect_node(&svg, 0);
        assert_eq!(rect.fill.as_deref(), Some("none"));
        assert_eq!(rect.stroke.as_deref(), Some("rgb(0,0,255)"));
        assert_eq!(rect.stroke_width, Some(2.0));
        assert!(rect.stroke_opacity.is_some());
    }
}
