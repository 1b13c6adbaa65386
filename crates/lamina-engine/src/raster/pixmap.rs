use crate::coords::{Rect, Size};

/// Premultiplied RGBA8 pixel buffer, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    size: Size,
    pixels: Vec<[u8; 4]>,
}

impl Pixmap {
    /// Fully transparent pixmap.
    pub fn new(size: Size) -> Self {
        Self { size, pixels: vec![[0; 4]; size.area()] }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Pixel at `(x, y)`; `None` outside the pixmap.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.size.width * 4
    }

    /// Same pixels with red and blue swapped, for BGRA targets.
    pub fn to_bgra(&self) -> Vec<u8> {
        let swapped: Vec<[u8; 4]> = self.pixels.iter().map(|&[r, g, b, a]| [b, g, r, a]).collect();
        bytemuck::cast_slice(&swapped).to_vec()
    }

    /// Integer pixel range covered by `rect`, clamped to the pixmap.
    pub(crate) fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if rect.is_empty() {
            return None;
        }
        let r = rect.round_out();
        let x0 = r.left().max(0.0) as u32;
        let y0 = r.top().max(0.0) as u32;
        let x1 = (r.right().max(0.0) as u32).min(self.size.width);
        let y1 = (r.bottom().max(0.0) as u32).min(self.size.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8; 4]> {
        let i = self.index(x, y)?;
        Some(&mut self.pixels[i])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }
}
