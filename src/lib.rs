// ============================================================================
// CRATE CONFIGURATION & MODULES
// ============================================================================

//! Circular countdown widget.
//!
//! [`TimingView`] paints an "end" image and, on top of it, a pie slice of a
//! "start" image that sweeps clockwise from twelve o'clock to a full circle
//! over the configured duration. Hosts drive it through the [`View`] trait;
//! [`host::run_window`] is a ready-made `winit`/`pixels` host.

pub mod animator;
pub mod canvas;
pub mod config;
pub mod drawable;
pub mod error;
pub mod host;
pub mod measure;
pub mod view;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use animator::{AnimatorState, Easing, SweepAnimator};
pub use canvas::Canvas;
pub use config::{TimingAttributes, WindowConfig, DEFAULT_DURATION_SECS};
pub use drawable::{
    rescale, resolve_to_bitmap, BitmapDrawable, ColorDrawable, Drawable, ImageSlot,
    ScaleTransform,
};
pub use error::{ConfigError, HostError};
pub use measure::{resolve_dimension, resolve_size, MeasureMode, MeasureSpec, Size};
pub use view::{TimingView, View, FULL_SWEEP, START_ANGLE};
