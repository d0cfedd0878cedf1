//! Recorded draw calls.
//!
//! A [`DisplayList`] is itself a [`Surface`]: draw into it, then inspect the
//! commands or replay them onto another surface.

use std::fmt;

use enum_dispatch::enum_dispatch;

use super::geometry::{RoundRect, Segment};
use super::paint::Paint;
use super::{Content, Surface};

/// Re-issue a recorded command
#[enum_dispatch]
pub trait Replay {
    fn replay(&self, surface: &mut dyn Surface);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawLine {
    pub segment: Segment,
    pub paint: Paint,
}

impl Replay for DrawLine {
    fn replay(&self, surface: &mut dyn Surface) {
        surface.draw_line(self.segment, &self.paint);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRoundRect {
    pub shape: RoundRect,
    pub paint: Paint,
}

impl Replay for DrawRoundRect {
    fn replay(&self, surface: &mut dyn Surface) {
        surface.draw_round_rect(self.shape, &self.paint);
    }
}

#[enum_dispatch(Replay)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line(DrawLine),
    RoundRect(DrawRoundRect),
}

impl DrawCommand {
    pub fn paint(&self) -> &Paint {
        match self {
            DrawCommand::Line(c) => &c.paint,
            DrawCommand::RoundRect(c) => &c.paint,
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Line(DrawLine { segment: s, paint }) => write!(
                f,
                "line ({},{})-({},{}) {}",
                s.from.x, s.from.y, s.to.x, s.to.y, paint
            ),
            DrawCommand::RoundRect(DrawRoundRect { shape, paint }) => write!(
                f,
                "rrect ({},{})-({},{}) r={} {}",
                shape.rect.min.x, shape.rect.min.y, shape.rect.max.x, shape.rect.max.y,
                shape.radius, paint
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Issue every recorded command against `surface`, in order
    pub fn replay(&self, surface: &mut dyn Surface) {
        for cmd in &self.commands {
            cmd.replay(surface);
        }
    }
}

impl Surface for DisplayList {
    fn draw_line(&mut self, segment: Segment, paint: &Paint) {
        self.commands.push(DrawLine { segment, paint: *paint }.into());
    }

    fn draw_round_rect(&mut self, shape: RoundRect, paint: &Paint) {
        self.commands.push(DrawRoundRect { shape, paint: *paint }.into());
    }
}

/// A recorded list can stand in as a card's children
impl Content for DisplayList {
    fn render(&self, surface: &mut dyn Surface) {
        self.replay(surface);
    }
}

impl fmt::Display for DisplayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{}", cmd)?;
        }
        Ok(())
    }
}
