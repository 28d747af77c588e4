use crate::core::blend::blend_colors;
use crate::core::canvas::Canvas;
use crate::core::factorize::factorize;
use crate::core::font::LabelFont;
use crate::domain::model::{Cell, Color, PrimeColorTable, Rect, TableLayout};
use crate::utils::error::{Result, TableError};
use crate::utils::validation::validate_table_dimensions;

/// Computes every cell of the table in row-major order.
pub fn compute_cells(layout: &TableLayout, palette: &PrimeColorTable) -> Result<Vec<Cell>> {
    let mut cells = Vec::with_capacity(layout.cell_count());
    for row in 1..=layout.size {
        for col in 1..=layout.size {
            let product = row as u64 * col as u64;
            let factors = factorize(product)?;
            let color = blend_colors(&factors, palette);
            cells.push(Cell {
                row,
                col,
                product,
                factors,
                color,
                text_color: color.text_contrast(),
            });
        }
    }
    Ok(cells)
}

/// Draws cells, axis labels and the legend onto a fresh canvas.
pub struct TableRenderer<'a> {
    layout: TableLayout,
    palette: &'a PrimeColorTable,
    font: LabelFont,
}

impl<'a> TableRenderer<'a> {
    pub fn new(layout: TableLayout, palette: &'a PrimeColorTable, font: LabelFont) -> Self {
        Self {
            layout,
            palette,
            font,
        }
    }

    pub fn render(&self, cells: &[Cell]) -> Result<Canvas> {
        let expected = self.layout.cell_count();
        if cells.len() != expected {
            return Err(TableError::RenderError {
                message: format!("expected {} cells, got {}", expected, cells.len()),
            });
        }

        validate_table_dimensions(self.layout.size, self.layout.cell_size)?;
        let mut canvas = Canvas::new(self.layout.width(), self.layout.height(), Color::WHITE);
        for cell in cells {
            self.draw_cell(&mut canvas, cell);
        }
        self.draw_legend(&mut canvas);
        Ok(canvas)
    }

    fn draw_cell(&self, canvas: &mut Canvas, cell: &Cell) {
        let rect = self.layout.cell_rect(cell.row, cell.col);
        let size = self.layout.cell_size as i64;
        canvas.draw_rect(rect, cell.color, Color::GRAY);

        let label = cell.label();
        let bounds = self.font.measure(&label);
        let text_x = rect.x1 + (size - bounds.width()).div_euclid(2);
        let text_y = rect.y1 + (size - bounds.height()).div_euclid(2);
        self.font.draw(canvas, text_x, text_y, &label, cell.text_color);

        let margin = TableLayout::PADDING as i64 / 2;
        if cell.col == 1 {
            let label = cell.row.to_string();
            self.font.draw(canvas, margin, rect.y1 + size / 2, &label, Color::BLACK);
        }
        if cell.row == 1 {
            let label = cell.col.to_string();
            self.font.draw(canvas, rect.x1 + size / 2, margin, &label, Color::BLACK);
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas) {
        let (mut x, y) = self.layout.legend_origin();
        for (prime, color) in self.palette.entries() {
            let swatch = Rect {
                x1: x,
                y1: y,
                x2: x + TableLayout::LEGEND_SWATCH,
                y2: y + TableLayout::LEGEND_SWATCH,
            };
            canvas.draw_rect(swatch, *color, Color::GRAY);
            let label = format!("Prime {}", prime);
            self.font
                .draw(canvas, x + TableLayout::LEGEND_TEXT_GAP, y, &label, Color::BLACK);
            x += TableLayout::LEGEND_ADVANCE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::font::BitmapFont;

    fn renderer(layout: TableLayout, palette: &PrimeColorTable) -> TableRenderer<'_> {
        TableRenderer::new(layout, palette, LabelFont::Builtin(BitmapFont))
    }

    #[test]
    fn test_compute_cells_row_major() {
        let layout = TableLayout::new(3, 30);
        let cells = compute_cells(&layout, &PrimeColorTable::standard()).unwrap();
        assert_eq!(cells.len(), 9);
        assert_eq!((cells[0].row, cells[0].col, cells[0].product), (1, 1, 1));
        assert_eq!((cells[5].row, cells[5].col, cells[5].product), (2, 3, 6));
        assert_eq!(cells[0].color, Color::WHITE);
        assert_eq!(cells[0].text_color, Color::BLACK);
    }

    #[test]
    fn test_render_rejects_wrong_cell_count() {
        let palette = PrimeColorTable::standard();
        let err = renderer(TableLayout::new(2, 30), &palette)
            .render(&[])
            .unwrap_err();
        assert!(matches!(err, TableError::RenderError { .. }));
    }

    #[test]
    fn test_render_refuses_oversized_canvas() {
        let palette = PrimeColorTable::standard();
        let layout = TableLayout::new(1, 100_000);
        let cells = compute_cells(&layout, &palette).unwrap();
        let err = renderer(layout, &palette).render(&cells).unwrap_err();
        assert!(matches!(err, TableError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_render_single_cell() {
        let palette = PrimeColorTable::standard();
        let layout = TableLayout::new(1, 30);
        let cells = compute_cells(&layout, &palette).unwrap();
        let canvas = renderer(layout, &palette).render(&cells).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (130, 130));
        // border and interior of the only cell
        assert_eq!(canvas.pixel(50, 50), Some(Color::GRAY));
        assert_eq!(canvas.pixel(80, 80), Some(Color::GRAY));
        assert_eq!(canvas.pixel(52, 52), Some(Color::WHITE));
        // label "1" is 5x7, centred at (50 + 12, 50 + 11); its top pixel sits at column 2
        assert_eq!(canvas.pixel(64, 61), Some(Color::BLACK));
        // row label "1" at (25, 65), column label "1" at (65, 25)
        assert_eq!(canvas.pixel(27, 65), Some(Color::BLACK));
        assert_eq!(canvas.pixel(67, 25), Some(Color::BLACK));
        // the legend starts below the grid; later entries run past the narrow canvas
        assert_eq!(canvas.pixel(57, 107), Some(Color::new(255, 0, 0)));
    }

    #[test]
    fn test_render_legend_swatches() {
        let palette = PrimeColorTable::standard();
        let layout = TableLayout::new(10, 30);
        let cells = compute_cells(&layout, &palette).unwrap();
        let canvas = renderer(layout, &palette).render(&cells).unwrap();

        let (x0, y0) = layout.legend_origin();
        assert_eq!((x0, y0), (50, 370));
        for (i, (_, color)) in palette.entries().iter().enumerate() {
            let x = x0 + i as i64 * TableLayout::LEGEND_ADVANCE;
            assert_eq!(canvas.pixel(x, y0), Some(Color::GRAY));
            assert_eq!(canvas.pixel(x + 7, y0 + 7), Some(*color));
            assert_eq!(canvas.pixel(x + 15, y0 + 15), Some(Color::GRAY));
        }
    }

    #[test]
    fn test_render_legend_labels() {
        let palette = PrimeColorTable::standard();
        let layout = TableLayout::new(10, 30);
        let cells = compute_cells(&layout, &palette).unwrap();
        let canvas = renderer(layout, &palette).render(&cells).unwrap();

        let (x0, y) = layout.legend_origin();
        for (i, (prime, _)) in palette.entries().iter().enumerate() {
            let x = x0 + i as i64 * TableLayout::LEGEND_ADVANCE + TableLayout::LEGEND_TEXT_GAP;
            let label = format!("Prime {}", prime);
            let bounds = BitmapFont.measure(&label);

            let mut expected = Canvas::new(layout.width(), layout.height(), Color::WHITE);
            BitmapFont.draw(&mut expected, x, y, &label, Color::BLACK);

            let mut ink = 0;
            for py in y..y + bounds.bottom {
                for px in x..x + bounds.right {
                    let actual = canvas.pixel(px, py);
                    assert_eq!(actual, expected.pixel(px, py), "{} at ({}, {})", label, px, py);
                    if actual == Some(Color::BLACK) {
                        ink += 1;
                    }
                }
            }
            assert!(ink > 0, "{} left no ink", label);
        }
    }

    #[test]
    fn test_render_cell_colors() {
        let palette = PrimeColorTable::standard();
        let layout = TableLayout::new(10, 30);
        let cells = compute_cells(&layout, &palette).unwrap();
        let canvas = renderer(layout, &palette).render(&cells).unwrap();

        // corner pixels inside the border are never covered by the centred label
        let inside = |row: u32, col: u32| {
            let rect = layout.cell_rect(row, col);
            canvas.pixel(rect.x1 + 2, rect.y1 + 2)
        };
        assert_eq!(inside(7, 7), Some(Color::new(255, 255, 0)));
        assert_eq!(inside(2, 3), Some(Color::new(127, 0, 127)));
        assert_eq!(inside(1, 1), Some(Color::WHITE));
    }
}
