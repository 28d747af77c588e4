use crate::domain::model::{Color, Rect};
use crate::utils::error::Result;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// RGB raster the table is drawn onto. All drawing clips at the edges.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background.to_array())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn in_bounds(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        self.in_bounds(x, y).map(|(x, y)| {
            let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
            Color::new(r, g, b)
        })
    }

    pub fn put_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some((x, y)) = self.in_bounds(x, y) {
            self.image.put_pixel(x, y, Rgb(color.to_array()));
        }
    }

    /// Mixes `color` into the existing pixel by `coverage` in `0.0..=1.0`.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        let Some((x, y)) = self.in_bounds(x, y) else {
            return;
        };
        let v = coverage.clamp(0.0, 1.0);
        if v <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x, y);
        for (dst, src) in pixel.0.iter_mut().zip(color.to_array()) {
            let mixed = *dst as f32 * (1.0 - v) + src as f32 * v;
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x_start = rect.x1.max(0);
        let y_start = rect.y1.max(0);
        let x_end = rect.x2.min(self.width() as i64 - 1);
        let y_end = rect.y2.min(self.height() as i64 - 1);
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// One pixel wide border along the inclusive edges of `rect`.
    pub fn outline_rect(&mut self, rect: Rect, color: Color) {
        for x in rect.x1..=rect.x2 {
            self.put_pixel(x, rect.y1, color);
            self.put_pixel(x, rect.y2, color);
        }
        for y in rect.y1..=rect.y2 {
            self.put_pixel(rect.x1, y, color);
            self.put_pixel(rect.x2, y, color);
        }
    }

    pub fn draw_rect(&mut self, rect: Rect, fill: Color, outline: Color) {
        self.fill_rect(rect, fill);
        self.outline_rect(rect, outline);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }
}
