//! Drawing primitives on top of an RGB image

use super::font::{glyph, text_width, ADVANCE, GLYPH_WIDTH};
use image::{Rgb, RgbImage};

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
    pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([204, 204, 204]);
}

/// Mix `top` over `bottom` with opacity `alpha`
pub fn blend(bottom: Rgb<u8>, top: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, t: u8| ((1.0 - alpha) * b as f64 + alpha * t as f64).round() as u8;
    Rgb([
        mix(bottom.0[0], top.0[0]),
        mix(bottom.0[1], top.0[1]),
        mix(bottom.0[2], top.0[2]),
    ])
}

/// Image being drawn on; all operations clip to the image bounds
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.img.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill a rectangle, blending with what is already there
    pub fn blend_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>, alpha: f64) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                let (px, py) = (x + dx, y + dy);
                if px < 0 || py < 0 || px as u32 >= self.img.width() || py as u32 >= self.img.height() {
                    continue;
                }
                let below = *self.img.get_pixel(px as u32, py as u32);
                self.img.put_pixel(px as u32, py as u32, blend(below, color, alpha));
            }
        }
    }

    /// Fill an opaque rectangle
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        self.blend_rect(x, y, width, height, color, 1.0);
    }

    /// One-pixel rectangle outline
    pub fn stroke_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i64 - 1;
        let bottom = y + height as i64 - 1;
        self.horizontal_line(y, x, right, color);
        self.horizontal_line(bottom, x, right, color);
        self.vertical_line(x, y, bottom, color);
        self.vertical_line(right, y, bottom, color);
    }

    pub fn horizontal_line(&mut self, y: i64, x1: i64, x2: i64, color: Rgb<u8>) {
        let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
        for x in start..=end {
            self.put(x, y, color);
        }
    }

    pub fn vertical_line(&mut self, x: i64, y1: i64, y2: i64, color: Rgb<u8>) {
        let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.put(x, y, color);
        }
    }

    /// Draw text with its top-left corner at (x, y)
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1) as i64;
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i64 * ADVANCE as i64 * scale;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            self.put(
                                origin + col as i64 * scale + sx,
                                y + row as i64 * scale + sy,
                                color,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Draw text horizontally centred on `center_x`
    pub fn draw_text_centered(&mut self, center_x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let x = center_x - text_width(text, scale) as i64 / 2;
        self.draw_text(x, y, text, scale, color);
    }

    /// Draw text rotated a quarter turn counter-clockwise, reading bottom to
    /// top, centred vertically on `center_y` with its left edge at `x`
    pub fn draw_text_vertical(&mut self, x: i64, center_y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1) as i64;
        let bottom = center_y + text_width(text, scale as u32) as i64 / 2;
        for (i, c) in text.chars().enumerate() {
            let origin = bottom - i as i64 * ADVANCE as i64 * scale;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            self.put(
                                x + row as i64 * scale + sx,
                                origin - col as i64 * scale - sy,
                                color,
                            );
                        }
                    }
                }
            }
        }
    }
}
