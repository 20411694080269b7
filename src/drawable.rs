//! Image sources and their normalization to widget-sized bitmaps.

use std::fmt;
use std::path::Path;

use image::{Rgba, RgbaImage};
use log::{debug, trace};

use crate::error::ConfigError;
use crate::measure::Size;

/// Something the host styling system can hand to the widget as an image.
///
/// Intrinsic dimensions are signed because sources without a natural size
/// report a non-positive value.
pub trait Drawable: fmt::Debug {
    /// The backing bitmap, when the source already is one.
    fn bitmap(&self) -> Option<&RgbaImage> {
        None
    }

    fn intrinsic_width(&self) -> i32;

    fn intrinsic_height(&self) -> i32;

    /// Paints the source over the whole of `target`.
    fn draw(&self, target: &mut RgbaImage);
}

/// A decoded image. May be empty, in which case it rasterizes to nothing.
#[derive(Debug, Clone, Default)]
pub struct BitmapDrawable {
    bitmap: Option<RgbaImage>,
}

impl BitmapDrawable {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self {
            bitmap: Some(bitmap),
        }
    }

    pub fn empty() -> Self {
        Self { bitmap: None }
    }

    /// Decodes an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let bitmap = decoded.to_rgba8();
        debug!(
            "Decoded {} ({}x{})",
            path.display(),
            bitmap.width(),
            bitmap.height()
        );
        Ok(Self::new(bitmap))
    }
}

impl Drawable for BitmapDrawable {
    fn bitmap(&self) -> Option<&RgbaImage> {
        self.bitmap.as_ref()
    }

    fn intrinsic_width(&self) -> i32 {
        self.bitmap.as_ref().map_or(-1, |b| b.width() as i32)
    }

    fn intrinsic_height(&self) -> i32 {
        self.bitmap.as_ref().map_or(-1, |b| b.height() as i32)
    }

    fn draw(&self, target: &mut RgbaImage) {
        if let Some(ref bitmap) = self.bitmap {
            let scaled = rescale(bitmap.clone(), target.width(), target.height());
            target.copy_from_slice(scaled.as_raw());
        }
    }
}

/// A solid color with an optional natural size.
#[derive(Debug, Clone, Copy)]
pub struct ColorDrawable {
    color: Rgba<u8>,
    intrinsic: Option<(u32, u32)>,
}

impl ColorDrawable {
    pub fn new(color: Rgba<u8>) -> Self {
        Self {
            color,
            intrinsic: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.intrinsic = Some((width, height));
        self
    }
}

impl Drawable for ColorDrawable {
    fn intrinsic_width(&self) -> i32 {
        self.intrinsic.map_or(-1, |(w, _)| w as i32)
    }

    fn intrinsic_height(&self) -> i32 {
        self.intrinsic.map_or(-1, |(_, h)| h as i32)
    }

    fn draw(&self, target: &mut RgbaImage) {
        for pixel in target.pixels_mut() {
            *pixel = self.color;
        }
    }
}

/// Turns any source into a concrete bitmap.
///
/// Sources with a bitmap are used as they are. Everything else is rasterized
/// at its intrinsic size, or into a single transparent pixel when it has none.
pub fn resolve_to_bitmap(source: &dyn Drawable) -> RgbaImage {
    if let Some(bitmap) = source.bitmap() {
        return bitmap.clone();
    }

    let (w, h) = (source.intrinsic_width(), source.intrinsic_height());
    let mut bitmap = if w <= 0 || h <= 0 {
        RgbaImage::new(1, 1)
    } else {
        RgbaImage::new(w as u32, h as u32)
    };
    source.draw(&mut bitmap);
    bitmap
}

/// Axis-aligned affine scale from a source bitmap onto a target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub sx: f64,
    pub sy: f64,
}

impl ScaleTransform {
    pub fn between(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Self {
        Self {
            sx: dst_w as f64 / src_w as f64,
            sy: dst_h as f64 / src_h as f64,
        }
    }

    /// Maps a destination point back into source space.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.sx, y / self.sy)
    }
}

/// Produces a `width` x `height` copy of `buffer`, consuming it.
///
/// Sampling is nearest-neighbour at pixel centers, no filtering.
pub fn rescale(buffer: RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = buffer.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    if (src_w, src_h) == (width, height) {
        return buffer;
    }

    let transform = ScaleTransform::between(src_w, src_h, width, height);
    trace!(
        "Rescale {}x{} -> {}x{} (sx={:.4}, sy={:.4})",
        src_w,
        src_h,
        width,
        height,
        transform.sx,
        transform.sy
    );

    RgbaImage::from_fn(width, height, |x, y| {
        let (u, v) = transform.invert(x as f64 + 0.5, y as f64 + 0.5);
        let sx = (u.floor() as u32).min(src_w - 1);
        let sy = (v.floor() as u32).min(src_h - 1);
        *buffer.get_pixel(sx, sy)
    })
}

/// One image owned by the widget: the resolved source and its copy at the
/// current widget size.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    source: RgbaImage,
    scaled: Option<RgbaImage>,
}

impl ImageSlot {
    pub fn new(source: RgbaImage) -> Self {
        Self {
            source,
            scaled: None,
        }
    }

    pub fn source(&self) -> &RgbaImage {
        &self.source
    }

    pub fn scaled(&self) -> Option<&RgbaImage> {
        self.scaled.as_ref()
    }

    /// Replaces the scaled copy. An empty size leaves nothing to draw.
    pub fn resize_to(&mut self, size: Size) {
        self.scaled = if size.is_empty() {
            None
        } else {
            Some(rescale(self.source.clone(), size.width, size.height))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn test_bitmap_used_directly() {
        let source = BitmapDrawable::new(checker(3, 2));
        let bitmap = resolve_to_bitmap(&source);
        assert_eq!(bitmap.dimensions(), (3, 2));
        assert_eq!(bitmap, checker(3, 2));
    }

    #[test]
    fn test_zero_intrinsic_size_gives_one_pixel() {
        let color = Rgba([10, 20, 30, 255]);
        let bitmap = resolve_to_bitmap(&ColorDrawable::new(color));
        assert_eq!(bitmap.dimensions(), (1, 1));
        assert_eq!(*bitmap.get_pixel(0, 0), color);

        let sized_zero = ColorDrawable::new(color).with_size(0, 40);
        assert_eq!(resolve_to_bitmap(&sized_zero).dimensions(), (1, 1));
    }

    #[test]
    fn test_empty_bitmap_drawable_is_transparent_pixel() {
        let bitmap = resolve_to_bitmap(&BitmapDrawable::empty());
        assert_eq!(bitmap.dimensions(), (1, 1));
        assert_eq!(*bitmap.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_color_rasterized_at_intrinsic_size() {
        let color = Rgba([1, 2, 3, 4]);
        let bitmap = resolve_to_bitmap(&ColorDrawable::new(color).with_size(7, 5));
        assert_eq!(bitmap.dimensions(), (7, 5));
        assert!(bitmap.pixels().all(|p| *p == color));
    }

    #[test]
    fn test_rescale_random_targets() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let (w, h) = (rng.random_range(1..300), rng.random_range(1..300));
            let out = rescale(checker(13, 9), w, h);
            assert_eq!(out.dimensions(), (w, h));
        }
    }

    #[test]
    fn test_rescale_upscale_nearest() {
        let out = rescale(checker(2, 2), 4, 4);
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(2, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*out.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_rescale_independent_axes() {
        let transform = ScaleTransform::between(100, 50, 200, 200);
        assert_eq!(transform.sx, 2.0);
        assert_eq!(transform.sy, 4.0);
        assert_eq!(transform.invert(20.0, 20.0), (10.0, 5.0));
    }

    #[test]
    fn test_slot_resizes_from_source() {
        let mut slot = ImageSlot::new(checker(10, 10));
        slot.resize_to(Size::new(3, 3));
        slot.resize_to(Size::new(40, 20));
        let scaled = slot.scaled().map(|b| b.dimensions());
        assert_eq!(scaled, Some((40, 20)));
        assert_eq!(slot.source().dimensions(), (10, 10));

        slot.resize_to(Size::new(0, 20));
        assert!(slot.scaled().is_none());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let err = BitmapDrawable::open("/nonexistent/start.png").unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }
}
