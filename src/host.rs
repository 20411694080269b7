//! Window host: drives a [`View`] from a `winit` event loop and presents it
//! through a `pixels` frame buffer.

use std::time::{Duration, Instant};

use image::RgbaImage;
use log::{debug, info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::canvas::Canvas;
use crate::config::WindowConfig;
use crate::error::HostError;
use crate::measure::{MeasureSpec, Size};
use crate::view::View;

/// Runs a layout pass with exact constraints and reports any size change.
/// Returns the new size.
fn layout<V: View>(view: &mut V, current: Size, width: u32, height: u32) -> Size {
    let size = view.measure(
        MeasureSpec::exact(width as i32),
        MeasureSpec::exact(height as i32),
    );
    if size != current {
        view.on_size_changed(size, current);
    }
    size
}

/// Lays `view` out at `width` x `height` and draws one frame in memory.
pub fn render_offscreen<V: View>(
    view: &mut V,
    width: u32,
    height: u32,
    background: (u8, u8, u8),
) -> RgbaImage {
    let size = layout(view, Size::ZERO, width, height);
    let mut frame = vec![0u8; size.width as usize * size.height as usize * 4];
    let mut canvas = Canvas::new(&mut frame, size.width as usize, size.height as usize);
    canvas.clear(background);
    view.draw(&mut canvas);
    // The buffer is sized from `size` above, so this cannot fail
    RgbaImage::from_raw(size.width, size.height, frame).unwrap_or_default()
}

/// Opens a window and runs `view` until the window is closed.
pub fn run_window<V: View>(view: &mut V, config: &WindowConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(
            config.width as f64,
            config.height as f64,
        ))
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let physical = window.inner_size();
    let surface_texture = SurfaceTexture::new(physical.width, physical.height, &window);
    let mut size = layout(view, Size::ZERO, physical.width, physical.height);
    let mut pixels = Pixels::new(size.width.max(1), size.height.max(1), surface_texture)?;
    info!("Window opened at {}x{}", size.width, size.height);

    let background = config.background;
    let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate);
    let mut last_frame = Instant::now();
    let mut detached = false;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    if !detached {
                        view.on_detached();
                        detached = true;
                    }
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    size = layout(view, size, new_size.width, new_size.height);
                    if size.is_empty() {
                        return;
                    }
                    if let Err(err) = pixels.resize_buffer(size.width, size.height) {
                        warn!("Failed to resize pixel buffer: {}", err);
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        warn!("Failed to resize surface: {}", err);
                    }
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    if size.is_empty() {
                        return;
                    }
                    let frame = pixels.frame_mut();
                    let mut canvas =
                        Canvas::new(frame, size.width as usize, size.height as usize);
                    canvas.clear(background);
                    view.draw(&mut canvas);
                    if let Err(err) = pixels.render() {
                        warn!("Render failed: {}", err);
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    let now = Instant::now();
                    if view.on_frame(now) {
                        window_clone.request_redraw();
                    }
                    last_frame = now;
                }
            }
            Event::LoopExiting => {
                if !detached {
                    view.on_detached();
                    detached = true;
                }
                debug!("Event loop exiting");
            }
            _ => {}
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Records the callbacks a host makes.
    #[derive(Default)]
    struct Probe {
        measured: Size,
        changes: Vec<(Size, Size)>,
        draws: Cell<usize>,
    }

    impl View for Probe {
        fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
            self.measured = Size::new(width.size as u32, height.size as u32);
            self.measured
        }

        fn on_size_changed(&mut self, new: Size, old: Size) {
            self.changes.push((new, old));
        }

        fn draw(&self, _canvas: &mut Canvas) {
            self.draws.set(self.draws.get() + 1);
        }

        fn on_frame(&mut self, _now: Instant) -> bool {
            false
        }

        fn on_detached(&mut self) {}
    }

    #[test]
    fn test_layout_reports_only_real_changes() {
        let mut probe = Probe::default();
        let size = layout(&mut probe, Size::ZERO, 120, 80);
        let same = layout(&mut probe, size, 120, 80);
        assert_eq!(same, Size::new(120, 80));
        assert_eq!(probe.changes, vec![(Size::new(120, 80), Size::ZERO)]);
    }

    #[test]
    fn test_offscreen_clears_and_draws() {
        let mut probe = Probe::default();
        let image = render_offscreen(&mut probe, 8, 6, (10, 20, 30));
        assert_eq!(image.dimensions(), (8, 6));
        assert_eq!(image.get_pixel(7, 5).0, [10, 20, 30, 255]);
        assert_eq!(probe.draws.get(), 1);
    }
}
