use bon::Builder;

use crate::animator::Easing;
use crate::drawable::Drawable;

/// Default run time of the sweep, in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 2;

/// Styling attributes a host supplies when creating a [`crate::TimingView`].
///
/// Both drawables are required; construction fails without them.
#[derive(Debug, Builder)]
pub struct TimingAttributes {
    #[builder(default = DEFAULT_DURATION_SECS)]
    pub duration_secs: u32,
    pub start_drawable: Option<Box<dyn Drawable>>,
    pub end_drawable: Option<Box<dyn Drawable>>,
    #[builder(default)]
    pub easing: Easing,
}

/// Configuration for the host window
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub max_framerate: f64,
    pub background: (u8, u8, u8),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Timing View".to_string(),
            width: 300,
            height: 300,
            max_framerate: 60.0,
            background: (0xff, 0xff, 0xff),
        }
    }
}
