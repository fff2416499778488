use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a closed outline through already-projected points
pub fn draw_ring(canvas: &mut BrailleCanvas, points: &[(i32, i32)]) {
    if points.len() < 2 {
        return;
    }
    for pair in points.windows(2) {
        draw_line(canvas, pair[0].0, pair[0].1, pair[1].0, pair[1].1);
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    if first != last {
        draw_line(canvas, last.0, last.1, first.0, first.1);
    }
}

/// Scanline fill of projected rings using the even-odd rule.
/// Samples each pixel row at its center, so shared edges between
/// neighbouring regions are not claimed twice.
pub fn fill_rings(canvas: &mut BrailleCanvas, rings: &[Vec<(i32, i32)>]) {
    let (mut min_y, mut max_y) = (i32::MAX, i32::MIN);
    for &(_, y) in rings.iter().flatten() {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y > max_y {
        return;
    }
    let min_y = min_y.max(0);
    let max_y = max_y.min(canvas.pixel_height() as i32 - 1);

    let mut crossings: Vec<f64> = Vec::new();
    for y in min_y..=max_y {
        let scan = y as f64 + 0.5;
        crossings.clear();
        for ring in rings {
            let n = ring.len();
            if n < 3 {
                continue;
            }
            let mut j = n - 1;
            for i in 0..n {
                let (xi, yi) = (ring[i].0 as f64, ring[i].1 as f64);
                let (xj, yj) = (ring[j].0 as f64, ring[j].1 as f64);
                if (yi > scan) != (yj > scan) {
                    crossings.push(xi + (scan - yi) * (xj - xi) / (yj - yi));
                }
                j = i;
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].ceil() as i32;
            let x1 = pair[1].floor() as i32;
            if x0 <= x1 {
                canvas.fill_span(y, x0, x1);
            }
        }
    }
}

/// Draw a point marker (small cross)
pub fn draw_marker(canvas: &mut BrailleCanvas, x: i32, y: i32, size: i32) {
    for i in -size..=size {
        canvas.set_pixel_signed(x + i, y);
        canvas.set_pixel_signed(x, y + i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_ring_closes() {
        let mut canvas = BrailleCanvas::new(4, 2);
        draw_ring(&mut canvas, &[(0, 0), (6, 0), (6, 6)]);
        // closing edge runs back along the diagonal
        assert!(canvas.is_set(3, 3));
    }

    #[test]
    fn test_fill_square() {
        let mut canvas = BrailleCanvas::new(4, 2);
        fill_rings(&mut canvas, &[vec![(0, 0), (8, 0), (8, 8), (0, 8)]]);
        assert!(canvas.is_set(1, 1));
        assert!(canvas.is_set(7, 7));
    }

    #[test]
    fn test_fill_skips_hole() {
        let mut canvas = BrailleCanvas::new(6, 3);
        let outer = vec![(0, 0), (12, 0), (12, 12), (0, 12)];
        let hole = vec![(4, 4), (8, 4), (8, 8), (4, 8)];
        fill_rings(&mut canvas, &[outer, hole]);
        assert!(canvas.is_set(2, 6));
        assert!(!canvas.is_set(6, 6));
        assert!(canvas.is_set(10, 6));
    }
}
