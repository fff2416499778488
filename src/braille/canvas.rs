/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
#[derive(Clone, Debug)]
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    cells: Vec<u8>, // Bit pattern per char, row-major
}

/// Dot bit for a pixel offset inside its cell, indexed by [y % 4][x % 2]
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
        }
    }

    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Set a pixel at the given coordinates; out-of-range pixels are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        let cx = x / 2;
        let cy = y / 4;
        if cx >= self.width || cy >= self.height {
            return;
        }
        self.cells[cy * self.width + cx] |= DOT_BITS[y % 4][x % 2];
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize);
        }
    }

    /// Set every pixel of row `y` from `x0` to `x1` inclusive, clipped to the canvas
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32) {
        if y < 0 || y as usize >= self.pixel_height() {
            return;
        }
        let start = x0.max(0);
        let end = x1.min(self.pixel_width() as i32 - 1);
        for x in start..=end {
            self.set_pixel(x as usize, y as usize);
        }
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        let cx = x / 2;
        let cy = y / 4;
        cx < self.width && cy < self.height && self.cells[cy * self.width + cx] & DOT_BITS[y % 4][x % 2] != 0
    }

    /// True when no dot is set
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Clear every dot that is set in `mask`
    pub fn subtract(&mut self, mask: &BrailleCanvas) {
        if mask.width != self.width || mask.height != self.height {
            return;
        }
        for (cell, m) in self.cells.iter_mut().zip(&mask.cells) {
            *cell &= !m;
        }
    }

    /// Get a specific row as a string (for line-by-line rendering)
    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
            .collect()
    }

    /// Get all rows as an iterator of strings
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|i| self.row_to_string(i))
    }

    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0);
        assert_eq!(canvas.to_string(), "⠁"); // U+2801
    }

    #[test]
    fn test_all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for y in 0..4 {
            canvas.fill_span(y, 0, 1);
        }
        assert_eq!(canvas.to_string(), "⣿"); // U+28FF (all dots)
    }

    #[test]
    fn test_span_is_clipped() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.fill_span(0, -5, 100);
        canvas.fill_span(9, 0, 3);
        assert_eq!(canvas.to_string(), "⠉⠉");
    }

    #[test]
    fn test_subtract() {
        let mut a = BrailleCanvas::new(1, 1);
        let mut b = BrailleCanvas::new(1, 1);
        a.fill_span(0, 0, 1);
        b.set_pixel(1, 0);
        a.subtract(&b);
        assert!(a.is_set(0, 0));
        assert!(!a.is_set(1, 0));
    }
}
