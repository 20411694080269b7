//! The widget and the callbacks a host drives it through.

use std::time::{Duration, Instant};

use log::debug;

use crate::animator::{AnimatorState, SweepAnimator};
use crate::canvas::Canvas;
use crate::config::TimingAttributes;
use crate::drawable::{resolve_to_bitmap, ImageSlot};
use crate::error::ConfigError;
use crate::measure::{resolve_size, MeasureSpec, Size};

/// Callbacks a host invokes on a widget, all from its UI thread.
pub trait View {
    /// Resolves the widget size for the proposed constraints.
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size;

    fn on_size_changed(&mut self, new: Size, old: Size);

    fn draw(&self, canvas: &mut Canvas);

    /// Advances animations to `now`. Returns `true` when a redraw is wanted.
    fn on_frame(&mut self, now: Instant) -> bool;

    fn on_detached(&mut self);
}

/// Arc start, twelve o'clock.
pub const START_ANGLE: f32 = 270.0;

/// Full sweep reached at the end of the run.
pub const FULL_SWEEP: f32 = 360.0;

/// Circular countdown: the end image is the base layer and a clockwise pie
/// slice of the start image grows from twelve o'clock to a full circle over
/// the configured duration.
#[derive(Debug)]
pub struct TimingView {
    duration: Duration,
    start_image: ImageSlot,
    end_image: ImageSlot,
    measured: Size,
    size: Size,
    sweep_angle: f32,
    animator: SweepAnimator,
}

impl TimingView {
    pub fn new(attrs: TimingAttributes) -> Result<Self, ConfigError> {
        if attrs.duration_secs == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        let start = attrs
            .start_drawable
            .ok_or(ConfigError::MissingDrawable("start"))?;
        let end = attrs
            .end_drawable
            .ok_or(ConfigError::MissingDrawable("end"))?;

        let start_image = ImageSlot::new(resolve_to_bitmap(start.as_ref()));
        let end_image = ImageSlot::new(resolve_to_bitmap(end.as_ref()));

        let duration = Duration::from_secs(attrs.duration_secs as u64);
        let mut animator = SweepAnimator::new(0.0, FULL_SWEEP, duration, attrs.easing);
        animator.start();

        debug!(
            "TimingView created: duration={:?} start={:?} end={:?}",
            duration,
            start_image.source().dimensions(),
            end_image.source().dimensions()
        );

        Ok(Self {
            duration,
            start_image,
            end_image,
            measured: Size::ZERO,
            size: Size::ZERO,
            sweep_angle: 0.0,
            animator,
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn start_angle(&self) -> f32 {
        START_ANGLE
    }

    pub fn sweep_angle(&self) -> f32 {
        self.sweep_angle
    }

    pub fn animation_state(&self) -> AnimatorState {
        self.animator.state()
    }

    pub fn start_image(&self) -> &ImageSlot {
        &self.start_image
    }

    pub fn end_image(&self) -> &ImageSlot {
        &self.end_image
    }
}

impl View for TimingView {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let size = resolve_size(width, height, self.measured);
        debug!("measure: {}x{} for {:?} / {:?}", size.width, size.height, width, height);
        self.measured = size;
        size
    }

    fn on_size_changed(&mut self, new: Size, old: Size) {
        debug!(
            "size changed: {}x{} (was {}x{})",
            new.width, new.height, old.width, old.height
        );
        self.size = new;
        self.start_image.resize_to(new);
        self.end_image.resize_to(new);
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (w, h) = (self.size.width as usize, self.size.height as usize);
        if let Some(end) = self.end_image.scaled() {
            canvas.draw_bitmap(end, w, h);
        }
        if let Some(start) = self.start_image.scaled() {
            canvas.fill_arc_textured(w, h, START_ANGLE, self.sweep_angle, start);
        }
    }

    fn on_frame(&mut self, now: Instant) -> bool {
        match self.animator.tick(now) {
            Some(value) => {
                self.sweep_angle = value;
                true
            }
            None => false,
        }
    }

    fn on_detached(&mut self) {
        if self.animator.cancel() {
            debug!("Sweep cancelled at {:.1} degrees", self.sweep_angle);
        }
    }
}
