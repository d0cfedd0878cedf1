//! Default style values (in dp, converted through the device density)

use crate::types::{Color, Dp};

pub const SHADOW_OFFSET: Dp = Dp::new(1.0);
pub const SHADOW_STROKE_WIDTH: Dp = Dp::new(4.0);
pub const CORNER_RADIUS: Dp = Dp::new(4.0);
pub const BLUR_RADIUS: Dp = Dp::new(16.0);
/// Border stroke when no `border_height` override is set
pub const BORDER_WIDTH: Dp = Dp::new(1.0);

pub const SHADOW_COLOR: Color = Color::BLACK;
pub const BORDER_COLOR: Color = Color::BLACK;
pub const BACKGROUND_COLOR: Color = Color::WHITE;

pub const ENABLE_SHADOW: bool = true;
pub const ENABLE_BORDER: bool = false;
pub const ENABLE_SHADOW_EDGE: bool = true;
