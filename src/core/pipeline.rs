use crate::core::canvas::Canvas;
use crate::core::font::LabelFont;
use crate::core::renderer::{compute_cells, TableRenderer};
use crate::core::{Cell, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{PrimeColorTable, TableLayout};
use crate::utils::error::Result;

/// Output file written relative to the storage root.
pub const OUTPUT_FILE: &str = "multiplication_table.png";

/// Line printed to stdout after a successful run.
pub fn confirmation_message() -> String {
    format!("Image saved as '{}'", OUTPUT_FILE)
}

pub struct TablePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    palette: PrimeColorTable,
}

impl<S: Storage, C: ConfigProvider> TablePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_palette(storage, config, PrimeColorTable::standard())
    }

    pub fn with_palette(storage: S, config: C, palette: PrimeColorTable) -> Self {
        Self {
            storage,
            config,
            palette,
        }
    }

    pub fn layout(&self) -> TableLayout {
        TableLayout::new(self.config.size(), self.config.cell_size())
    }

    pub fn palette(&self) -> &PrimeColorTable {
        &self.palette
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for TablePipeline<S, C> {
    fn compute_cells(&self) -> Result<Vec<Cell>> {
        let layout = self.layout();
        tracing::debug!(
            "Computing {}x{} table with {}px cells",
            layout.size,
            layout.size,
            layout.cell_size
        );
        compute_cells(&layout, &self.palette)
    }

    fn render(&self, cells: &[Cell]) -> Result<Canvas> {
        let font = LabelFont::preferred();
        if font.is_builtin() {
            tracing::debug!("Rendering labels with the built-in font");
        }
        let renderer = TableRenderer::new(self.layout(), &self.palette, font);
        let canvas = renderer.render(cells)?;
        tracing::debug!("Canvas size: {}x{}", canvas.width(), canvas.height());
        Ok(canvas)
    }

    fn persist(&self, canvas: Canvas) -> Result<String> {
        let png = canvas.encode_png()?;
        tracing::debug!("Encoded {} bytes of PNG", png.len());
        self.storage.write_file(OUTPUT_FILE, &png)
    }
}
