use crate::render::Rgba;

/// One character cell of the terminal frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgba,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: Rgba::BACKGROUND,
    };
}

/// Character-cell raster the terminal front-end draws into
pub struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        CellBuffer {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the buffer, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Iterates rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Writes a cell, clipping anything outside the buffer
    pub fn plot(&mut self, x: isize, y: isize, cell: Cell) {
        if x >= 0 && x < self.width as isize && y >= 0 && y < self.height as isize {
            self.cells[y as usize * self.width + x as usize] = cell;
        }
    }

    /// Clips a segment to the cell grid (Liang–Barsky), so far-off
    /// endpoints never reach the integer walk
    fn clip_segment(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<[f64; 4]> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let x_max = (self.width - 1) as f64;
        let y_max = (self.height - 1) as f64;
        let (dx, dy) = (x1 - x0, y1 - y0);

        let mut t_enter = 0.0;
        let mut t_exit = 1.0;
        for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
            if p == 0.0 {
                // Parallel to this edge: either fully inside or fully out
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t_exit {
                    return None;
                }
                t_enter = f64::max(t_enter, r);
            } else {
                if r < t_enter {
                    return None;
                }
                t_exit = f64::min(t_exit, r);
            }
        }

        Some([
            x0 + t_enter * dx,
            y0 + t_enter * dy,
            x0 + t_exit * dx,
            y0 + t_exit * dy,
        ])
    }

    /// Draws the visible part of a line using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, cell: Cell) {
        let Some([x0, y0, x1, y1]) = self.clip_segment(x0, y0, x1, y1) else {
            return;
        };
        let (mut x, mut y) = (x0.round() as isize, y0.round() as isize);
        let (end_x, end_y) = (x1.round() as isize, y1.round() as isize);

        let dx = (end_x - x).abs();
        let dy = -(end_y - y).abs();
        let step_x = if x < end_x { 1 } else { -1 };
        let step_y = if y < end_y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, cell);
            if x == end_x && y == end_y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Fills an axis-aligned ellipse; separate radii let a world-space
    /// circle stay round on non-square cells
    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, cell: Cell) {
        if rx <= 0.0 || ry <= 0.0 {
            self.plot(cx.round() as isize, cy.round() as isize, cell);
            return;
        }
        // Bounding box, clamped to the buffer
        let min_x = (cx - rx).floor().max(0.0) as isize;
        let max_x = (cx + rx).ceil().min(self.width as f64 - 1.0) as isize;
        let min_y = (cy - ry).floor().max(0.0) as isize;
        let max_y = (cy + ry).ceil().min(self.height as f64 - 1.0) as isize;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let nx = (x as f64 - cx) / rx;
                let ny = (y as f64 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(x, y, cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Cell = Cell {
        glyph: '#',
        color: Rgba::RAY,
    };

    #[test]
    fn horizontal_line_covers_endpoints() {
        let mut buffer = CellBuffer::new(10, 3);
        buffer.draw_line(1.0, 1.0, 8.0, 1.0, INK);
        for x in 1..=8 {
            assert_eq!(buffer.get(x, 1), Some(INK));
        }
        assert_eq!(buffer.get(0, 1), Some(Cell::BLANK));
        assert_eq!(buffer.get(9, 1), Some(Cell::BLANK));
    }

    #[test]
    fn line_is_clipped_to_buffer() {
        let mut buffer = CellBuffer::new(4, 4);
        buffer.draw_line(-10.0, -10.0, 20.0, 20.0, INK);
        for i in 0..4 {
            assert_eq!(buffer.get(i, i), Some(INK));
        }
        assert_eq!(buffer.get(4, 4), None);
    }

    #[test]
    fn ellipse_fills_centre_not_corners() {
        let mut buffer = CellBuffer::new(11, 11);
        buffer.fill_ellipse(5.0, 5.0, 4.0, 4.0, INK);
        assert_eq!(buffer.get(5, 5), Some(INK));
        assert_eq!(buffer.get(1, 5), Some(INK));
        assert_eq!(buffer.get(1, 1), Some(Cell::BLANK));
    }

    #[test]
    fn far_endpoint_is_clipped_before_walking() {
        let mut buffer = CellBuffer::new(200, 50);
        buffer.draw_line(100.0, 25.0, 100.0, -1e20, INK);
        for y in 0..=25 {
            assert_eq!(buffer.get(100, y), Some(INK));
        }
        assert_eq!(buffer.get(100, 26), Some(Cell::BLANK));

        buffer.draw_line(100.0, 30.0, 2.5e8, 30.0, INK);
        for x in 100..200 {
            assert_eq!(buffer.get(x, 30), Some(INK));
        }
        assert_eq!(buffer.get(99, 30), Some(Cell::BLANK));
    }

    #[test]
    fn line_outside_buffer_draws_nothing() {
        let mut buffer = CellBuffer::new(10, 10);
        buffer.draw_line(-5.0, -5.0, -1e12, 3.0, INK);
        buffer.draw_line(20.0, 0.0, 20.0, 1e30, INK);
        buffer.draw_line(f64::NAN, 1.0, 5.0, 5.0, INK);
        assert!(buffer.rows().all(|row| row.iter().all(|c| *c == Cell::BLANK)));
    }

    #[test]
    fn huge_ellipse_covers_buffer() {
        let mut buffer = CellBuffer::new(200, 50);
        buffer.fill_ellipse(100.0, 25.0, 2.0e4, 5.0e3, INK);
        assert!(buffer.rows().all(|row| row.iter().all(|c| *c == INK)));
    }

    #[test]
    fn ellipse_off_buffer_draws_nothing() {
        let mut buffer = CellBuffer::new(10, 10);
        buffer.fill_ellipse(-1e9, 5.0, 3.0, 3.0, INK);
        assert!(buffer.rows().all(|row| row.iter().all(|c| *c == Cell::BLANK)));
    }

    #[test]
    fn resize_clears() {
        let mut buffer = CellBuffer::new(2, 2);
        buffer.fill(INK);
        buffer.resize(3, 1);
        assert_eq!(buffer.rows().count(), 1);
        assert!(buffer.rows().all(|row| row.iter().all(|c| *c == Cell::BLANK)));
    }
}
