//! Software drawing surface over an RGBA8 frame.

use image::RgbaImage;

/// Drawing target for one frame. `frame` holds `width * height` RGBA pixels,
/// the layout `pixels` hands out.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: (u8, u8, u8)) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.0, color.1, color.2, 0xff]);
        }
    }

    /// RGBA at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Blits `bitmap` over the rectangle `(0, 0)-(width, height)`.
    ///
    /// The bitmap is expected to be pre-scaled; lookups outside it clamp to
    /// the edge.
    pub fn draw_bitmap(&mut self, bitmap: &RgbaImage, width: usize, height: usize) {
        let (bw, bh) = bitmap.dimensions();
        if bw == 0 || bh == 0 {
            return;
        }
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                let texel = bitmap.get_pixel((x as u32).min(bw - 1), (y as u32).min(bh - 1));
                let [r, g, b, a] = texel.0;
                if a > 0 {
                    set_pixel(self.frame, self.width, x, y, r, g, b, a as f32 / 255.0);
                }
            }
        }
    }

    /// Fills the pie sector of the oval inscribed in `(0, 0)-(width, height)`
    /// with colors looked up from `texture` at the same position.
    ///
    /// Angles are in degrees, 0 at three o'clock, positive clockwise. A
    /// negative sweep runs counter-clockwise from `start_angle`.
    pub fn fill_arc_textured(
        &mut self,
        width: usize,
        height: usize,
        start_angle: f32,
        sweep_angle: f32,
        texture: &RgbaImage,
    ) {
        let (tw, th) = texture.dimensions();
        if width == 0 || height == 0 || tw == 0 || th == 0 || sweep_angle == 0.0 {
            return;
        }

        let (mut start, mut sweep) = (start_angle as f64, sweep_angle as f64);
        if sweep < 0.0 {
            start += sweep;
            sweep = -sweep;
        }
        let full = sweep >= 360.0;
        let start = start.rem_euclid(360.0);

        let rx = width as f64 / 2.0;
        let ry = height as f64 / 2.0;
        let edge_scale = rx.min(ry);

        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                let nx = (x as f64 + 0.5 - rx) / rx;
                let ny = (y as f64 + 0.5 - ry) / ry;
                let dist = (nx * nx + ny * ny).sqrt();

                // Coverage across the oval edge, about one pixel wide
                let coverage = ((1.0 - dist) * edge_scale + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                if !full {
                    let angle = ny.atan2(nx).to_degrees().rem_euclid(360.0);
                    if (angle - start).rem_euclid(360.0) > sweep {
                        continue;
                    }
                }

                let texel = texture.get_pixel((x as u32).min(tw - 1), (y as u32).min(th - 1));
                let [r, g, b, a] = texel.0;
                let alpha = (a as f64 / 255.0 * coverage) as f32;
                if alpha > 0.001 {
                    set_pixel(self.frame, self.width, x, y, r, g, b, alpha);
                }
            }
        }
    }
}

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, r: u8, g: u8, b: u8, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let src = [r as f32, g as f32, b as f32, 255.0 * alpha];
        let dst = [
            frame[idx] as f32,
            frame[idx + 1] as f32,
            frame[idx + 2] as f32,
        ];
        let a = src[3] / 255.0;
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}
