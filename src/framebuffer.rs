//! CPU drawing surface: a plain RGBA8 pixel buffer with the three primitives
//! the renderer needs (clear, alpha-blended line, alpha-blended filled
//! circle). The GPU side treats the buffer as an opaque texture upload.

/// An RGB color with a blend alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when there is nothing to draw into (minimized window).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 bytes, row-major, for texture upload.
    pub fn bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height * 4) as usize, 0);
    }

    /// Repaints the whole surface with an opaque color.
    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = color.a.clamp(0.0, 1.0);
        let blend = |old: u8, new: u8| -> u8 {
            (old as f32 * (1.0 - a) + new as f32 * a).round() as u8
        };
        self.pixels[idx] = blend(self.pixels[idx], color.r);
        self.pixels[idx + 1] = blend(self.pixels[idx + 1], color.g);
        self.pixels[idx + 2] = blend(self.pixels[idx + 2], color.b);
        self.pixels[idx + 3] = 255;
    }

    /// Bresenham line, clipped at the surface bounds.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let (mut x, mut y) = (x0.round() as i32, y0.round() as i32);
        let (x1, y1) = (x1.round() as i32, y1.round() as i32);

        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.blend_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled circle, clipped at the surface bounds.
    ///
    /// The radius is capped at the surface diagonal: anything larger covers
    /// every pixel a clipped fill could touch anyway, and an unbounded radius
    /// would make the bounding-box scan arbitrarily slow.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let diagonal = ((self.width as f64).powi(2) + (self.height as f64).powi(2)).sqrt();
        let radius = radius.min(diagonal);
        let r = radius.ceil() as i32;
        let radius_sq = radius * radius;
        let (icx, icy) = (cx.round() as i32, cy.round() as i32);

        for dy in -r..=r {
            for dx in -r..=r {
                let dist_sq = (dx * dx + dy * dy) as f64;
                if dist_sq <= radius_sq {
                    self.blend_pixel(icx + dx, icy + dy, color);
                }
            }
        }
    }
}
