//! Geometry engine: shadow segments and the rounded background/border region.
//!
//! All coordinates are local to the usable area (view bounds shrunk by
//! padding), with the origin at its top-left corner. [`GeometryCache::origin`]
//! maps them back into view space when drawing.

use glam::{Vec2, vec2};

use crate::style::StyleConfig;
use crate::types::{Edge, Edges, Insets, Px, Rect, Size};

/// A straight shadow line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Segment { from, to }
    }

    pub fn translate(self, by: Vec2) -> Segment {
        Segment { from: self.from + by, to: self.to + by }
    }
}

/// Rectangle with uniform corner rounding (same x and y radius)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRect {
    pub rect: Rect,
    pub radius: Px,
}

impl RoundRect {
    pub fn translate(self, by: Vec2) -> RoundRect {
        RoundRect { rect: self.rect.translate(by), radius: self.radius }
    }
}

/// Everything the pipeline draws, computed in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCache {
    /// Top-left of the usable area in view space
    pub origin: Vec2,
    /// Usable area size; may be negative when padding exceeds bounds
    pub usable: Size,
    /// Shared upper Y of the top, start and end shadows
    pub anchor_y: Px,
    /// `None` for edges whose shadow is disabled
    pub shadows: Edges<Option<Segment>>,
    pub background: RoundRect,
    /// `None` when the border is disabled
    pub border: Option<RoundRect>,
}

/// Usable area: `bounds` shrunk by `padding` on every side
pub fn usable_area(bounds: Size, padding: Insets) -> Size {
    bounds.inset(padding)
}

/// Corner radius limited to `[0, min(w/2, h/2)]`
pub fn clamp_radius(radius: Px, usable: Size) -> Px {
    radius.min(usable.w / 2.0).min(usable.h / 2.0).max(Px::ZERO)
}

/// Rounded region spanning the whole usable area
pub fn background_region(usable: Size, cfg: &StyleConfig) -> RoundRect {
    RoundRect {
        rect: Rect::from_size(usable),
        radius: clamp_radius(cfg.corner_radius, usable),
    }
}

/// The segment for one edge.
///
/// ```text
///   (start, anchor) <---- top ---- (w + end, anchor)
///        |                                ^
///      start                             end
///        v                                |
///   (start, h + bottom) -- bottom --> (w + end, h + bottom)
/// ```
pub fn shadow_segment(edge: Edge, usable: Size, cfg: &StyleConfig) -> Segment {
    let off = cfg.shadow_offsets;
    let anchor = cfg.anchor_y().0;
    let left = off.start.0;
    let right = (usable.w + off.end).0;
    let bottom = (usable.h + off.bottom).0;

    match edge {
        Edge::Top => Segment::new(vec2(right, anchor), vec2(left, anchor)),
        Edge::Start => Segment::new(vec2(left, anchor), vec2(left, bottom)),
        Edge::Bottom => Segment::new(vec2(left, bottom), vec2(right, bottom)),
        Edge::End => Segment::new(vec2(right, bottom), vec2(right, anchor)),
    }
}

/// Compute the full cache for the given bounds, padding and style.
///
/// Disabled edges and a disabled border are skipped entirely. The anchor is
/// always computed because the start and end segments share it.
pub fn compute_geometry(bounds: Size, padding: Insets, cfg: &StyleConfig) -> GeometryCache {
    let usable = usable_area(bounds, padding);
    let background = background_region(usable, cfg);

    GeometryCache {
        origin: vec2(padding.start.0, padding.top.0),
        usable,
        anchor_y: cfg.anchor_y(),
        shadows: Edges::splat(()).map(|edge, ()| {
            cfg.shadow_enabled(edge)
                .then(|| shadow_segment(edge, usable, cfg))
        }),
        background,
        border: cfg.enable_border.then_some(background),
    }
}

impl GeometryCache {
    /// Regenerate the rounded regions after a corner radius change, keeping
    /// background and border in step.
    pub fn regenerate_background(&mut self, cfg: &StyleConfig) {
        self.background = background_region(self.usable, cfg);
        if let Some(border) = self.border.as_mut() {
            *border = self.background;
        }
    }

    /// Enabled shadow segments in draw order
    pub fn shadow_segments(&self) -> impl Iterator<Item = (Edge, Segment)> + '_ {
        self.shadows.iter().filter_map(|(edge, seg)| seg.map(|s| (edge, s)))
    }
}
