//! Paint resolver: drawing attributes for each geometry element

use std::fmt;

use crate::style::StyleConfig;
use crate::types::{Color, Px};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// How new pixels combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal alpha blending
    SrcOver,
    /// Overwrite the destination
    Src,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurStyle {
    /// Symmetric falloff on both sides of the edge
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurMask {
    pub radius: Px,
    pub style: BlurStyle,
}

impl BlurMask {
    /// Gaussian sigma for this radius, using Skia's radius-to-sigma scale
    pub fn sigma(&self) -> f32 {
        if self.radius.0 > 0.0 {
            0.577_35 * self.radius.0 + 0.5
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub style: PaintStyle,
    pub color: Color,
    /// Only meaningful for [`PaintStyle::Stroke`]
    pub stroke_width: Px,
    pub anti_alias: bool,
    pub blend: BlendMode,
    pub blur: Option<BlurMask>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Paint {
            style: PaintStyle::Fill,
            color,
            stroke_width: Px::ZERO,
            anti_alias: false,
            blend: BlendMode::SrcOver,
            blur: None,
        }
    }

    pub fn stroke(color: Color, width: Px) -> Self {
        Paint {
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Paint::fill(color)
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PaintStyle::Fill => write!(f, "fill {}", self.color)?,
            PaintStyle::Stroke => write!(f, "stroke {} w={}", self.color, self.stroke_width)?,
        }
        if self.anti_alias {
            f.write_str(" aa")?;
        }
        if self.blend == BlendMode::Src {
            f.write_str(" src")?;
        }
        if let Some(blur) = self.blur {
            write!(f, " blur={}", blur.radius)?;
        }
        Ok(())
    }
}

/// Cached paints, one per element kind. Disabled elements have no paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub shadow: Option<Paint>,
    pub background: Paint,
    pub border: Option<Paint>,
}

/// Shadow strokes replace rather than blend so the blurred ends of adjacent
/// edges do not double-darken at the corners.
pub fn shadow_paint(cfg: &StyleConfig) -> Paint {
    Paint {
        anti_alias: true,
        blend: BlendMode::Src,
        blur: Some(BlurMask { radius: cfg.blur_radius, style: BlurStyle::Normal }),
        ..Paint::stroke(cfg.shadow_color, cfg.shadow_stroke_width)
    }
}

pub fn background_paint(cfg: &StyleConfig) -> Paint {
    Paint {
        blend: BlendMode::Src,
        ..Paint::fill(cfg.background_color)
    }
}

pub fn border_paint(cfg: &StyleConfig) -> Paint {
    Paint::stroke(cfg.border_color, cfg.border_width())
}

pub fn resolve_paints(cfg: &StyleConfig) -> PaintState {
    PaintState {
        shadow: cfg.enable_shadow.then(|| shadow_paint(cfg)),
        background: background_paint(cfg),
        border: cfg.enable_border.then(|| border_paint(cfg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleChange;
    use crate::types::Density;

    #[test]
    fn default_paints() {
        let cfg = StyleConfig::new(Density::try_new(2.0).unwrap());
        let paints = resolve_paints(&cfg);

        let shadow = paints.shadow.unwrap();
        assert_eq!(shadow.style, PaintStyle::Stroke);
        assert_eq!(shadow.color, Color::BLACK);
        assert_eq!(shadow.stroke_width, Px(8.0));
        assert!(shadow.anti_alias);
        assert_eq!(shadow.blend, BlendMode::Src);
        assert_eq!(shadow.blur, Some(BlurMask { radius: Px(32.0), style: BlurStyle::Normal }));

        assert_eq!(paints.background.style, PaintStyle::Fill);
        assert_eq!(paints.background.color, Color::WHITE);
        assert_eq!(paints.background.blend, BlendMode::Src);
        assert_eq!(paints.background.blur, None);

        assert_eq!(paints.border, None);
    }

    #[test]
    fn border_is_independent_of_shadow_width() {
        let mut cfg = StyleConfig::new(Density::try_new(2.0).unwrap());
        let _ = cfg.set(StyleChange::EnableBorder(true));
        let _ = cfg.set(StyleChange::ShadowStrokeWidth(Px(30.0)));
        let _ = cfg.set(StyleChange::BorderColor(Color::rgb(0, 0, 255)));
        let border = resolve_paints(&cfg).border.unwrap();
        assert_eq!(border.stroke_width, Px(2.0));
        assert_eq!(border.color, Color::rgb(0, 0, 255));
        assert_eq!(border.blur, None);
        assert_eq!(border.blend, BlendMode::SrcOver);
    }

    #[test]
    fn disabled_shadow_has_no_paint() {
        let mut cfg = StyleConfig::default();
        let _ = cfg.set(StyleChange::EnableShadow(false));
        assert_eq!(resolve_paints(&cfg).shadow, None);
    }

    #[test]
    fn blur_sigma() {
        let blur = BlurMask { radius: Px(10.0), style: BlurStyle::Normal };
        assert!((blur.sigma() - 6.2735).abs() < 1e-4);
        let none = BlurMask { radius: Px::ZERO, style: BlurStyle::Normal };
        assert_eq!(none.sigma(), 0.0);
    }

    #[test]
    fn paint_display() {
        let cfg = StyleConfig::default();
        assert_eq!(shadow_paint(&cfg).to_string(), "stroke #FF000000 w=4 aa src blur=16");
        assert_eq!(background_paint(&cfg).to_string(), "fill #FFFFFFFF src");
    }
}
