//! Render pipeline - owns one card's cached geometry and paints, reacts to
//! bounds and style changes, and replays the cache in layer order.

use crate::log::{debug, trace};
use crate::style::{Recompute, StyleChange, StyleConfig};
use crate::types::{Color, Insets, Px, Size};

use super::geometry::{GeometryCache, compute_geometry};
use super::paint::{PaintState, background_paint, resolve_paints};
use super::{Content, Surface};

/// Whether the cache reflects the current bounds and style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Clean,
    Dirty,
}

/// Per-card rendering state.
///
/// Drawing always uses what was cached at the last recompute. Style changes
/// other than corner radius and background color only mark the cache dirty;
/// they show up after the next [`refresh`](Self::refresh) or bounds change.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    /// Live style, possibly ahead of the cache
    style: StyleConfig,
    /// Bounds and padding from the last layout; `None` until the first one
    layout: Option<(Size, Insets)>,
    geometry: Option<GeometryCache>,
    paints: PaintState,
    state: CacheState,
    redraw_requested: bool,
}

impl RenderPipeline {
    pub fn new(style: StyleConfig) -> Self {
        let paints = resolve_paints(&style);
        Self {
            style,
            layout: None,
            geometry: None,
            paints,
            state: CacheState::Dirty,
            redraw_requested: false,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn geometry(&self) -> Option<&GeometryCache> {
        self.geometry.as_ref()
    }

    pub fn paints(&self) -> &PaintState {
        &self.paints
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn bounds(&self) -> Option<Size> {
        self.layout.map(|(bounds, _)| bounds)
    }

    pub fn padding(&self) -> Option<Insets> {
        self.layout.map(|(_, padding)| padding)
    }

    /// Size or padding changed: rebuild everything and ask for a draw
    pub fn on_bounds_changed(&mut self, bounds: Size, padding: Insets) {
        debug!(w = %bounds.w, h = %bounds.h, "bounds changed");
        self.layout = Some((bounds, padding));
        self.recompute();
        self.request_redraw();
    }

    /// Assign one style field and apply whatever it invalidates
    pub fn set_style(&mut self, change: StyleChange) {
        match self.style.set(change) {
            Recompute::Background => self.regenerate_background(),
            Recompute::None => {
                debug!(?change, "style changed, cache dirty");
                self.state = CacheState::Dirty;
            }
        }
        self.request_redraw();
    }

    pub fn set_corner_radius(&mut self, radius: Px) {
        self.set_style(StyleChange::CornerRadius(radius));
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.set_style(StyleChange::BackgroundColor(color));
    }

    /// Recompute if dirty. Before the first layout only paints can be
    /// resolved, so the cache stays dirty.
    pub fn refresh(&mut self) {
        if self.state == CacheState::Dirty {
            self.recompute();
        }
    }

    /// Returns and clears the pending redraw request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Replay the cache onto `surface`, then draw `content` on top.
    ///
    /// Layer order is fixed: shadows, background fill, border, children.
    pub fn draw<C: Content + ?Sized>(&self, surface: &mut dyn Surface, content: &C) {
        if let Some(geo) = &self.geometry {
            if let Some(shadow) = &self.paints.shadow {
                for (_edge, segment) in geo.shadow_segments() {
                    trace!(edge = %_edge, "draw shadow");
                    surface.draw_line(segment.translate(geo.origin), shadow);
                }
            }

            surface.draw_round_rect(geo.background.translate(geo.origin), &self.paints.background);

            if let (Some(border), Some(paint)) = (geo.border, &self.paints.border) {
                surface.draw_round_rect(border.translate(geo.origin), paint);
            }
        }

        content.render(surface);
    }

    /// Handle a draw request: bring the cache up to date, then draw
    pub fn frame<C: Content + ?Sized>(&mut self, surface: &mut dyn Surface, content: &C) {
        self.refresh();
        self.redraw_requested = false;
        self.draw(surface, content);
    }

    fn recompute(&mut self) {
        self.paints = resolve_paints(&self.style);
        match self.layout {
            Some((bounds, padding)) => {
                self.geometry = Some(compute_geometry(bounds, padding, &self.style));
                self.state = CacheState::Clean;
                debug!("cache rebuilt");
            }
            None => self.state = CacheState::Dirty,
        }
    }

    fn regenerate_background(&mut self) {
        debug!(radius = %self.style.corner_radius, color = %self.style.background_color, "regenerating background");
        self.paints.background = background_paint(&self.style);
        if let Some(geo) = self.geometry.as_mut() {
            geo.regenerate_background(&self.style);
        }
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::display_list::{DisplayList, DrawCommand};
    use crate::render::paint::PaintStyle;
    use crate::types::{Edge, Edges};
    use glam::vec2;

    fn pipeline() -> RenderPipeline {
        let mut style = StyleConfig::default();
        style.shadow_offsets = Edges::splat(Px::ZERO);
        style.corner_radius = Px(16.0);
        let mut p = RenderPipeline::new(style);
        p.on_bounds_changed(Size::new(Px(200.0), Px(100.0)), Insets::default());
        p
    }

    fn record(p: &RenderPipeline) -> DisplayList {
        let mut list = DisplayList::new();
        p.draw(&mut list, &crate::render::NoContent);
        list
    }

    #[test]
    fn nothing_cached_before_layout() {
        let mut p = RenderPipeline::new(StyleConfig::default());
        assert_eq!(p.state(), CacheState::Dirty);
        p.refresh();
        assert_eq!(p.state(), CacheState::Dirty);
        assert!(record(&p).is_empty());
    }

    #[test]
    fn bounds_change_cleans_and_requests_draw() {
        let mut p = pipeline();
        assert_eq!(p.bounds(), Some(Size::new(Px(200.0), Px(100.0))));
        assert_eq!(p.padding(), Some(Insets::default()));
        assert_eq!(p.style().corner_radius, Px(16.0));
        assert_eq!(p.state(), CacheState::Clean);
        assert!(p.take_redraw_request());
        assert!(!p.take_redraw_request());
    }

    #[test]
    fn draw_order_is_shadow_background_border() {
        let mut p = pipeline();
        p.set_style(StyleChange::EnableBorder(true));
        p.refresh();
        let list = record(&p);
        let kinds: Vec<_> = list
            .iter()
            .map(|c| match c {
                DrawCommand::Line(_) => "line",
                DrawCommand::RoundRect(r) if r.paint.style == PaintStyle::Fill => "fill",
                DrawCommand::RoundRect(_) => "border",
            })
            .collect();
        assert_eq!(kinds, ["line", "line", "line", "line", "fill", "border"]);
    }

    #[test]
    fn radius_change_regenerates_without_dirtying() {
        let mut p = pipeline();
        let _ = p.take_redraw_request();
        p.set_corner_radius(Px(8.0));
        assert_eq!(p.state(), CacheState::Clean);
        assert!(p.take_redraw_request());
        assert_eq!(p.geometry().unwrap().background.radius, Px(8.0));

        p.set_background_color(Color::BLACK);
        assert_eq!(p.paints().background.color, Color::BLACK);
        assert_eq!(p.state(), CacheState::Clean);
    }

    #[test]
    fn other_changes_wait_for_refresh() {
        let mut p = pipeline();
        let before = record(&p);
        p.set_style(StyleChange::EnableShadowEdge(Edge::Top, false));
        assert_eq!(p.state(), CacheState::Dirty);
        assert_eq!(record(&p), before);

        p.refresh();
        assert_eq!(p.state(), CacheState::Clean);
        assert_eq!(record(&p).len(), before.len() - 1);
    }

    #[test]
    fn frame_refreshes_then_draws() {
        let mut p = pipeline();
        p.set_style(StyleChange::EnableShadow(false));
        let mut list = DisplayList::new();
        p.frame(&mut list, &crate::render::NoContent);
        assert_eq!(list.len(), 1);
        assert!(!p.take_redraw_request());
    }

    #[test]
    fn children_draw_last() {
        let p = pipeline();
        let mut list = DisplayList::new();
        let child = |s: &mut dyn Surface| {
            s.draw_line(
                crate::render::Segment::new(vec2(1.0, 1.0), vec2(2.0, 2.0)),
                &crate::render::Paint::stroke(Color::rgb(255, 0, 0), Px(1.0)),
            )
        };
        p.draw(&mut list, &child);
        let last = list.commands.last().unwrap();
        assert_eq!(last.paint().color, Color::rgb(255, 0, 0));
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn padding_translates_into_view_space() {
        let mut p = pipeline();
        let padding = Insets { top: Px(4.0), bottom: Px(4.0), start: Px(6.0), end: Px(6.0) };
        p.on_bounds_changed(Size::new(Px(200.0), Px(100.0)), padding);
        let geo = p.geometry().unwrap();
        assert_eq!(geo.background.rect.max, vec2(188.0, 92.0));

        let list = record(&p);
        let DrawCommand::RoundRect(bg) = list.commands[4] else {
            panic!("expected background");
        };
        assert_eq!(bg.shape.rect.min, vec2(6.0, 4.0));
        assert_eq!(bg.shape.rect.max, vec2(194.0, 96.0));
    }
}
