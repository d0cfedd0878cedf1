//! Strongly-typed numeric primitives for shadowcard (zero-cost newtypes).
//!
//! Lengths come in two flavors: [`Dp`] (density-independent, what styles are
//! written in) and [`Px`] (device pixels, what geometry is computed in). The
//! only way from one to the other is [`Density::to_px`].

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Sub};
use std::str::FromStr;

use glam::{Vec2, vec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Density-independent length
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Dp(pub f32);

impl Dp {
    #[inline]
    pub const fn new(val: f32) -> Dp {
        Dp(val)
    }
}

/// Device pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);

    #[inline]
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Div<f32> for Px {
    type Output = Px;
    fn div(self, rhs: f32) -> Px { Px(self.0 / rhs) }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Device density scalar: how many pixels one dp covers.
///
/// This is the unit converter every other component goes through. The
/// conversion quantizes to whole pixels so strokes land on the pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    scale: f32,
}

impl Density {
    /// 1 dp == 1 px
    pub const MDPI: Density = Density { scale: 1.0 };

    /// Create a Density with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(scale: f32) -> Result<Self, NumericError> {
        if scale.is_nan() {
            Err(NumericError::NaN)
        } else if scale.is_infinite() {
            Err(NumericError::Infinite)
        } else if scale == 0.0 {
            Err(NumericError::Zero)
        } else if scale < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Density { scale })
        }
    }

    /// Convert dp to pixels, rounded half-up to the nearest whole pixel.
    #[inline]
    pub fn to_px(self, dp: Dp) -> Px {
        Px((dp.0 * self.scale + 0.5).floor())
    }
}

impl Default for Density {
    fn default() -> Self {
        Density::MDPI
    }
}

/// ARGB color packed as 0xAARRGGBB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::argb(0xFF, r, g, b)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as a fraction in `0.0..=1.0`
    pub fn opacity(self) -> f32 {
        self.alpha() as f32 / 255.0
    }

    /// `rgb(r,g,b)` without alpha, for SVG paint attributes
    pub fn to_rgb_string(self) -> String {
        format!("rgb({},{},{})", self.red(), self.green(), self.blue())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Error for malformed `#...` color literals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{literal}` is not a #RGB, #ARGB, #RRGGBB or #AARRGGBB color")]
pub struct ColorParseError {
    pub literal: String,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError { literal: s.to_string() };
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        // Short forms repeat each nibble: #F80 == #FF8800
        let widen = |v: u32, nibbles: u32| {
            (0..nibbles).rev().fold(0u32, |acc, i| {
                let n = (v >> (i * 4)) & 0xF;
                (acc << 8) | (n << 4) | n
            })
        };
        match hex.len() {
            3 => Ok(Color(0xFF00_0000 | widen(value, 3))),
            4 => Ok(Color(widen(value, 4))),
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(err()),
        }
    }
}

/// One of the four sides of the card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Start,
    End,
}

impl Edge {
    /// Shadow draw order
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Start, Edge::End];

    pub fn name(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Start => "start",
            Edge::End => "end",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per edge, indexable by [`Edge`]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub bottom: T,
    pub start: T,
    pub end: T,
}

impl<T: Copy> Edges<T> {
    pub const fn splat(v: T) -> Self {
        Edges { top: v, bottom: v, start: v, end: v }
    }
}

impl<T> Edges<T> {
    /// Map every edge's value, preserving edge identity
    pub fn map<U>(self, mut f: impl FnMut(Edge, T) -> U) -> Edges<U> {
        Edges {
            top: f(Edge::Top, self.top),
            bottom: f(Edge::Bottom, self.bottom),
            start: f(Edge::Start, self.start),
            end: f(Edge::End, self.end),
        }
    }

    /// Iterate `(edge, &value)` in [`Edge::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> {
        Edge::ALL.into_iter().map(move |e| (e, &self[e]))
    }
}

impl<T> Index<Edge> for Edges<T> {
    type Output = T;
    fn index(&self, edge: Edge) -> &T {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
            Edge::Start => &self.start,
            Edge::End => &self.end,
        }
    }
}

impl<T> IndexMut<Edge> for Edges<T> {
    fn index_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Start => &mut self.start,
            Edge::End => &mut self.end,
        }
    }
}

/// Padding around the usable area, in pixels
pub type Insets = Edges<Px>;

/// 2D size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: Px,
    pub h: Px,
}

impl Size {
    pub const fn new(w: Px, h: Px) -> Self {
        Size { w, h }
    }

    /// Shrink by `insets` on every side. May go negative.
    pub fn inset(self, insets: Insets) -> Size {
        Size {
            w: self.w - insets.start - insets.end,
            h: self.h - insets.top - insets.bottom,
        }
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Rect { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(size: Size) -> Self {
        Rect { min: Vec2::ZERO, max: vec2(size.w.0, size.h.0) }
    }

    pub fn translate(self, by: Vec2) -> Rect {
        Rect { min: self.min + by, max: self.max + by }
    }
}
