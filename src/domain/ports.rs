use crate::core::canvas::Canvas;
use crate::domain::model::Cell;
use crate::utils::error::Result;

pub trait Storage {
    /// Writes `data` to `path`, replacing any existing file. Returns the full
    /// path written.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn size(&self) -> u32;
    fn cell_size(&self) -> u32;
}

pub trait Pipeline {
    fn compute_cells(&self) -> Result<Vec<Cell>>;
    fn render(&self, cells: &[Cell]) -> Result<Canvas>;
    fn persist(&self, canvas: Canvas) -> Result<String>;
}
