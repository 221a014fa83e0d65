use std::fmt::Write;

use crossterm::style::Color;
use crossterm::style::Stylize;

use crate::CellValue;
use crate::Coord;
use crate::grid::Grid;

/// Upper half block. The foreground paints the top pixel and the background the bottom one, so
/// each character shows two pixels stacked vertically.
const HALF_BLOCK: char = '\u{2580}';

/// Scales a [`Grid`] onto a terminal-sized framebuffer
pub struct Camera {
    /// The pixel buffer, one value per pixel
    pb: Vec<CellValue>,

    /// The frame buffer
    fb: String,

    /// Width of the pixel buffer, in terminal columns
    w: usize,

    /// Height of the pixel buffer. Twice the number of terminal rows.
    h: usize,
}

impl Camera {
    /// A camera covering `cols` by `rows` terminal characters
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = Self::pixel_size(cols, rows);

        Self {
            pb: vec![0; w * h],
            fb: String::new(),
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (w, h) = Self::pixel_size(cols, rows);

        self.w = w;
        self.h = h;
        self.pb = vec![0; w * h];
    }

    /// Stretch `grid` over the whole pixel buffer, nearest cell wins
    pub fn draw(&mut self, grid: &Grid) {
        let (gw, gh) = (grid.width(), grid.height());

        for py in 0..self.h {
            let y = (py * gh / self.h) as Coord;

            for px in 0..self.w {
                let x = (px * gw / self.w) as Coord;

                let i = self.xy_from(px, py);
                self.pb[i] = grid.get(x, y);
            }
        }
    }

    /// The value drawn at pixel `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> CellValue {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        self.pb[self.xy_from(x, y)]
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(0);
    }

    /// Turn the pixel buffer into colored text, one line per pair of pixel rows
    pub fn render(&mut self) -> &str {
        self.fb.clear();

        for row in 0..self.h / 2 {
            if row > 0 {
                self.fb.push('\n');
            }

            for x in 0..self.w {
                let top = Self::shade(self.pb[self.xy_from(x, 2 * row)]);
                let bottom = Self::shade(self.pb[self.xy_from(x, 2 * row + 1)]);

                // Writing into a `String` never fails
                let _ = write!(self.fb, "{}", HALF_BLOCK.with(top).on(bottom));
            }
        }
        self.fb.push('\n');

        &self.fb
    }

    /// Cell values map onto a blue ramp, dead cells are black
    pub fn shade(v: CellValue) -> Color {
        Color::Rgb { r: 0, g: 0, b: v }
    }

    fn pixel_size(cols: u16, rows: u16) -> (usize, usize) {
        (cols.max(1) as usize, 2 * rows.max(1) as usize)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

#[cfg(test)]
mod test {
    use crossterm::style::Color;

    use super::Camera;
    use crate::grid::Grid;

    #[test]
    fn draw_scales_up() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(1, 0, 200);

        // 4x4 pixels
        let mut cam = Camera::new(4, 2);
        cam.draw(&grid);

        for y in 0..4 {
            for x in 0..4 {
                let want = if x >= 2 && y < 2 { 200 } else { 0 };
                assert_eq!(cam.pixel(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn draw_scales_down() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.set(0, 0, 1);
        grid.set(4, 4, 2);

        // 4x4 pixels
        let mut cam = Camera::new(4, 2);
        cam.draw(&grid);

        assert_eq!(cam.pixel(0, 0), 1);
        assert_eq!(cam.pixel(2, 2), 2);
        assert_eq!(cam.pixel(3, 3), 0);
    }

    #[test]
    fn render_has_one_line_per_row() {
        let grid = Grid::new(3, 3).unwrap();
        let mut cam = Camera::new(5, 3);
        cam.draw(&grid);

        let frame = cam.render();

        assert_eq!(frame.lines().count(), 3);
        assert_eq!(frame.matches('\u{2580}').count(), 15);
    }

    #[test]
    fn resize_changes_the_pixel_buffer() {
        let mut cam = Camera::new(4, 2);

        cam.resize(10, 6);

        assert_eq!((cam.width(), cam.height()), (10, 12));
    }

    #[test]
    fn shades_are_blue() {
        assert_eq!(Camera::shade(0), Color::Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(Camera::shade(255), Color::Rgb { r: 0, g: 0, b: 255 });
    }
}
