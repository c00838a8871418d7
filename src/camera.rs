use crate::grid::Grid;
use crate::presenter::Quad;
use crate::presenter::Surface;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A terminal [`Surface`]. Every pixel is one braille dot, so a character holds a 2x4 block of
/// pixels.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the framebuffer
    w: usize,

    /// Height of the framebuffer
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        let cb = vec![false; w * h];

        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));
        let cp = vec![BRAILLE_EMPTY; bw * bh];

        // Each braille character is 3 bytes, and newlines one byte.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self { cb, fb, cp, w, h }
    }

    /// A camera with one pixel per cell of `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.columns())
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on a single pixel of the framebuffer
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Packs the cell buffer into braille characters, one line of text per 4 rows of pixels.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            let (x, y) = self.xy_to(n);
            let hex = Self::get_hex_value(x, y);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += hex;
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    /// Maps a horizontal coordinate in `[-1, 1]` to a pixel boundary in `[0, w]`
    fn to_px(&self, ndc: f32) -> usize {
        let px = ((ndc + 1.0) / 2.0 * self.w as f32).round();

        (px.max(0.0) as usize).min(self.w)
    }

    /// Maps a vertical coordinate in `[-1, 1]` to a pixel boundary in `[0, h]`. The top of the
    /// viewport is the first row of pixels.
    fn to_py(&self, ndc: f32) -> usize {
        let py = ((1.0 - ndc) / 2.0 * self.h as f32).round();

        (py.max(0.0) as usize).min(self.h)
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Surface for Camera {
    fn clear(&mut self) {
        self.reset();
    }

    fn fill(&mut self, quad: &Quad) {
        let (x0, x1) = (self.to_px(quad.min[0]), self.to_px(quad.max[0]));
        let (y0, y1) = (self.to_py(quad.max[1]), self.to_py(quad.min[1]));

        for y in y0..y1 {
            for x in x0..x1 {
                self.draw_pixel(x, y);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Camera;
    use crate::presenter::Quad;
    use crate::presenter::Surface;

    #[test]
    fn empty_render() {
        let mut cam = Camera::new(3, 5);

        // 2 characters wide, 2 lines tall
        assert_eq!(cam.render(), "\u{2800}\u{2800}\n\u{2800}\u{2800}\n");
    }

    #[test]
    fn dots_pack_into_characters() {
        let mut cam = Camera::new(4, 4);
        cam.draw_pixel(0, 0);
        cam.draw_pixel(1, 1);
        cam.draw_pixel(3, 3);

        insta::assert_snapshot!(cam.render(), @"⠑⢀");
    }

    #[test]
    fn fill_flips_vertical_axis() {
        let mut cam = Camera::new(4, 4);

        // cell (1, 0) of a 4x4 grid sits on the bottom row
        cam.fill(&Quad::for_cell(1, 0, 4, 4));

        assert_eq!(cam.render(), "\u{2880}\u{2800}\n");
    }

    #[test]
    fn full_viewport() {
        let mut cam = Camera::new(2, 4);
        cam.fill(&Quad {
            min: [-1.0, -1.0],
            max: [1.0, 1.0],
        });

        assert_eq!(cam.render(), "\u{28FF}\n");

        cam.clear();
        assert_eq!(cam.render(), "\u{2800}\n");
    }
}
