//! Style configuration: the flat record of visual parameters a card is drawn
//! with, loaded once from an attribute source and then mutable field by field.

use crate::ast::{AttrValue, AttributeSet, DimensionUnit};
use crate::errors::LoadError;
use crate::log::{debug, warn};
use crate::render::defaults;
use crate::types::{Color, Density, Dp, Edge, Edges, Px};

/// Visual parameters of one card, all lengths already in device pixels
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Density the dp-valued fields were converted with
    pub density: Density,
    pub corner_radius: Px,
    pub shadow_color: Color,
    pub border_color: Color,
    pub background_color: Color,
    pub shadow_stroke_width: Px,
    pub blur_radius: Px,
    /// Signed per-edge shift; negative end/bottom values pull the shadow inward
    pub shadow_offsets: Edges<Px>,
    /// Explicit anchor Y for the top shadow. `None` falls back to the top offset.
    pub shadow_start_y: Option<Px>,
    pub enable_shadow: bool,
    pub enable_border: bool,
    pub shadow_edges: Edges<bool>,
    /// Border stroke thickness; zero means the 1dp default
    pub border_height: Px,
}

/// A single field assignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleChange {
    CornerRadius(Px),
    ShadowColor(Color),
    BorderColor(Color),
    BackgroundColor(Color),
    ShadowStrokeWidth(Px),
    BlurRadius(Px),
    ShadowOffset(Edge, Px),
    ShadowStartY(Option<Px>),
    EnableShadow(bool),
    EnableBorder(bool),
    EnableShadowEdge(Edge, bool),
    BorderHeight(Px),
}

/// What a [`StyleChange`] requires of whoever caches derived state
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Nothing derived from this field needs regenerating right away
    None,
    /// The background shape (rounding and fill) must be regenerated
    Background,
}

impl StyleConfig {
    /// Defaults for every field, converted with `density`
    pub fn new(density: Density) -> Self {
        StyleConfig {
            density,
            corner_radius: density.to_px(defaults::CORNER_RADIUS),
            shadow_color: defaults::SHADOW_COLOR,
            border_color: defaults::BORDER_COLOR,
            background_color: defaults::BACKGROUND_COLOR,
            shadow_stroke_width: density.to_px(defaults::SHADOW_STROKE_WIDTH),
            blur_radius: density.to_px(defaults::BLUR_RADIUS),
            shadow_offsets: Edges::splat(density.to_px(defaults::SHADOW_OFFSET)),
            shadow_start_y: None,
            enable_shadow: defaults::ENABLE_SHADOW,
            enable_border: defaults::ENABLE_BORDER,
            shadow_edges: Edges::splat(defaults::ENABLE_SHADOW_EDGE),
            border_height: Px::ZERO,
        }
    }

    /// Build a style from an attribute set. Absent attributes keep their
    /// defaults, unknown ones are skipped.
    pub fn load(attrs: &AttributeSet, density: Density) -> Result<StyleConfig, LoadError> {
        let mut cfg = StyleConfig::new(density);
        for attr in &attrs.attributes {
            let Some(kind) = AttrKind::lookup(&attr.name) else {
                warn!(name = %attr.name, source = %attrs.source.name, "ignoring unknown attribute");
                continue;
            };
            let change = kind
                .resolve(attr.value, density)
                .ok_or_else(|| LoadError::TypeMismatch {
                    name: attr.name.clone(),
                    expected: kind.expected(),
                    got: attr.value.kind(),
                    src: attrs.source.named_source(),
                    span: attr.span,
                })?;
            let _ = cfg.set(change);
        }
        debug!(source = %attrs.source.name, count = attrs.len(), "loaded style");
        Ok(cfg)
    }

    /// Parse and load an attribute source in one step
    pub fn from_source(
        name: &str,
        source: &str,
        density: Density,
    ) -> Result<StyleConfig, miette::Report> {
        let attrs = crate::parse::parse(name, source)?;
        Ok(StyleConfig::load(&attrs, density)?)
    }

    /// Assign one field. Values are taken as-is.
    pub fn set(&mut self, change: StyleChange) -> Recompute {
        match change {
            StyleChange::CornerRadius(v) => {
                self.corner_radius = v;
                return Recompute::Background;
            }
            StyleChange::BackgroundColor(c) => {
                self.background_color = c;
                return Recompute::Background;
            }
            StyleChange::ShadowColor(c) => self.shadow_color = c,
            StyleChange::BorderColor(c) => self.border_color = c,
            StyleChange::ShadowStrokeWidth(v) => self.shadow_stroke_width = v,
            StyleChange::BlurRadius(v) => self.blur_radius = v,
            StyleChange::ShadowOffset(edge, v) => self.shadow_offsets[edge] = v,
            StyleChange::ShadowStartY(v) => self.shadow_start_y = v,
            StyleChange::EnableShadow(b) => self.enable_shadow = b,
            StyleChange::EnableBorder(b) => self.enable_border = b,
            StyleChange::EnableShadowEdge(edge, b) => self.shadow_edges[edge] = b,
            StyleChange::BorderHeight(v) => self.border_height = v,
        }
        Recompute::None
    }

    pub fn set_corner_radius(&mut self, radius: Px) -> Recompute {
        self.set(StyleChange::CornerRadius(radius))
    }

    pub fn set_background_color(&mut self, color: Color) -> Recompute {
        self.set(StyleChange::BackgroundColor(color))
    }

    /// Y of the top shadow and the upper ends of the start/end shadows
    pub fn anchor_y(&self) -> Px {
        self.shadow_start_y.unwrap_or(self.shadow_offsets.top)
    }

    /// Border stroke thickness after applying the 1dp default
    pub fn border_width(&self) -> Px {
        if self.border_height > Px::ZERO {
            self.border_height
        } else {
            self.density.to_px(defaults::BORDER_WIDTH)
        }
    }

    /// Whether the shadow for `edge` is drawn at all
    pub fn shadow_enabled(&self, edge: Edge) -> bool {
        self.enable_shadow && self.shadow_edges[edge]
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig::new(Density::default())
    }
}

/// How a known attribute name maps onto a [`StyleChange`]
#[derive(Clone, Copy)]
enum AttrKind {
    Dimension(fn(Px) -> StyleChange),
    Color(fn(Color) -> StyleChange),
    Bool(fn(bool) -> StyleChange),
}

impl AttrKind {
    fn lookup(name: &str) -> Option<AttrKind> {
        use AttrKind as K;
        use StyleChange as S;
        Some(match name {
            "shadow_top_offset" => K::Dimension(|v| S::ShadowOffset(Edge::Top, v)),
            "shadow_bottom_offset" => K::Dimension(|v| S::ShadowOffset(Edge::Bottom, v)),
            "shadow_start_offset" => K::Dimension(|v| S::ShadowOffset(Edge::Start, v)),
            "shadow_end_offset" => K::Dimension(|v| S::ShadowOffset(Edge::End, v)),
            "shadow_stroke_width" => K::Dimension(S::ShadowStrokeWidth),
            "corner_radius" => K::Dimension(S::CornerRadius),
            "blur_radius" => K::Dimension(S::BlurRadius),
            "shadow_start_y" => K::Dimension(|v| S::ShadowStartY(Some(v))),
            "border_height" => K::Dimension(S::BorderHeight),
            "shadow_color" => K::Color(S::ShadowColor),
            "card_background_color" | "background_color" => K::Color(S::BackgroundColor),
            "border_color" => K::Color(S::BorderColor),
            "enable_shadow" => K::Bool(S::EnableShadow),
            "enable_border" => K::Bool(S::EnableBorder),
            "enable_shadow_top" => K::Bool(|b| S::EnableShadowEdge(Edge::Top, b)),
            "enable_shadow_bottom" => K::Bool(|b| S::EnableShadowEdge(Edge::Bottom, b)),
            "enable_shadow_start" => K::Bool(|b| S::EnableShadowEdge(Edge::Start, b)),
            "enable_shadow_end" => K::Bool(|b| S::EnableShadowEdge(Edge::End, b)),
            _ => return None,
        })
    }

    fn expected(self) -> &'static str {
        match self {
            AttrKind::Dimension(_) => "dimension",
            AttrKind::Color(_) => "color",
            AttrKind::Bool(_) => "boolean",
        }
    }

    /// `None` when the value has the wrong kind. Bare numbers count as px.
    fn resolve(self, value: AttrValue, density: Density) -> Option<StyleChange> {
        match (self, value) {
            (AttrKind::Dimension(f), AttrValue::Dimension(v, DimensionUnit::Dp)) => {
                Some(f(density.to_px(Dp(v))))
            }
            (AttrKind::Dimension(f), AttrValue::Dimension(v, DimensionUnit::Px))
            | (AttrKind::Dimension(f), AttrValue::Number(v)) => Some(f(Px(v))),
            (AttrKind::Color(f), AttrValue::Color(c)) => Some(f(c)),
            (AttrKind::Bool(f), AttrValue::Bool(b)) => Some(f(b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(src: &str, density: f32) -> Result<StyleConfig, LoadError> {
        let attrs = crate::parse::parse("<test>", src).unwrap();
        StyleConfig::load(&attrs, Density::try_new(density).unwrap())
    }

    #[test]
    fn defaults_at_2x() {
        let cfg = StyleConfig::new(Density::try_new(2.0).unwrap());
        assert_eq!(cfg.corner_radius, Px(8.0));
        assert_eq!(cfg.shadow_stroke_width, Px(8.0));
        assert_eq!(cfg.blur_radius, Px(32.0));
        assert_eq!(cfg.shadow_offsets, Edges::splat(Px(2.0)));
        assert_eq!(cfg.shadow_start_y, None);
        assert_eq!(cfg.shadow_color, Color::BLACK);
        assert_eq!(cfg.border_color, Color::BLACK);
        assert_eq!(cfg.background_color, Color::WHITE);
        assert!(cfg.enable_shadow);
        assert!(!cfg.enable_border);
        assert_eq!(cfg.shadow_edges, Edges::splat(true));
        assert_eq!(cfg.border_height, Px::ZERO);
    }

    #[test]
    fn empty_source_is_all_defaults() {
        assert_eq!(load("", 3.0).unwrap(), StyleConfig::new(Density::try_new(3.0).unwrap()));
    }

    #[test]
    fn load_reads_back_every_field() {
        let cfg = load(
            r##"
            app:shadow_top_offset = "2dp"
            app:shadow_bottom_offset = "-3dp"
            app:shadow_start_offset = "5px"
            app:shadow_end_offset = "-7"
            app:shadow_stroke_width = "6dp"
            app:corner_radius = "10dp"
            app:blur_radius = "12dp"
            app:shadow_color = "#40112233"
            app:card_background_color = "#FAFAFA"
            app:border_color = "#F00"
            app:enable_shadow = "false"
            app:enable_border = "true"
            app:enable_shadow_top = "false"
            app:enable_shadow_bottom = "true"
            app:enable_shadow_start = "false"
            app:enable_shadow_end = "true"
            app:shadow_start_y = "20px"
            app:border_height = "3px"
            "##,
            2.0,
        )
        .unwrap();

        assert_eq!(cfg.shadow_offsets.top, Px(4.0));
        assert_eq!(cfg.shadow_offsets.bottom, Px(-6.0));
        assert_eq!(cfg.shadow_offsets.start, Px(5.0));
        assert_eq!(cfg.shadow_offsets.end, Px(-7.0));
        assert_eq!(cfg.shadow_stroke_width, Px(12.0));
        assert_eq!(cfg.corner_radius, Px(20.0));
        assert_eq!(cfg.blur_radius, Px(24.0));
        assert_eq!(cfg.shadow_color, Color(0x4011_2233));
        assert_eq!(cfg.background_color, Color(0xFFFA_FAFA));
        assert_eq!(cfg.border_color, Color(0xFFFF_0000));
        assert!(!cfg.enable_shadow);
        assert!(cfg.enable_border);
        assert_eq!(
            cfg.shadow_edges,
            Edges { top: false, bottom: true, start: false, end: true }
        );
        assert_eq!(cfg.shadow_start_y, Some(Px(20.0)));
        assert_eq!(cfg.border_height, Px(3.0));
    }

    #[test]
    fn background_color_alias() {
        let cfg = load("background_color = #000", 1.0).unwrap();
        assert_eq!(cfg.background_color, Color::BLACK);
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let cfg = load("layout_width = 10dp\ncorner_radius = 2dp", 1.0).unwrap();
        assert_eq!(cfg.corner_radius, Px(2.0));
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let err = load("enable_border = #000", 1.0).unwrap_err();
        let LoadError::TypeMismatch { name, expected, got, .. } = err;
        assert_eq!(name, "enable_border");
        assert_eq!(expected, "boolean");
        assert_eq!(got, "color");
    }

    #[test]
    fn values_are_not_validated() {
        let cfg = load("corner_radius = -5px\nshadow_stroke_width = 0", 1.0).unwrap();
        assert_eq!(cfg.corner_radius, Px(-5.0));
        assert_eq!(cfg.shadow_stroke_width, Px(0.0));
    }

    #[test]
    fn only_radius_and_background_request_recompute() {
        let mut cfg = StyleConfig::default();
        assert_eq!(cfg.set_corner_radius(Px(3.0)), Recompute::Background);
        assert_eq!(cfg.set_background_color(Color::BLACK), Recompute::Background);
        assert_eq!(cfg.set(StyleChange::EnableBorder(true)), Recompute::None);
        assert_eq!(cfg.set(StyleChange::ShadowOffset(Edge::End, Px(-2.0))), Recompute::None);
        assert_eq!(cfg.corner_radius, Px(3.0));
        assert_eq!(cfg.shadow_offsets.end, Px(-2.0));
    }

    #[test]
    fn anchor_falls_back_to_top_offset() {
        let mut cfg = StyleConfig::default();
        let _ = cfg.set(StyleChange::ShadowOffset(Edge::Top, Px(3.0)));
        assert_eq!(cfg.anchor_y(), Px(3.0));
        let _ = cfg.set(StyleChange::ShadowStartY(Some(Px(20.0))));
        assert_eq!(cfg.anchor_y(), Px(20.0));
    }

    #[test]
    fn border_width_override() {
        let mut cfg = StyleConfig::new(Density::try_new(3.0).unwrap());
        assert_eq!(cfg.border_width(), Px(3.0));
        let _ = cfg.set(StyleChange::BorderHeight(Px(5.0)));
        assert_eq!(cfg.border_width(), Px(5.0));
    }
}
