use crate::domain::model::TableLayout;
use crate::utils::error::{Result, TableError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const MAX_TABLE_SIZE: u32 = 200;
pub const MAX_CELL_SIZE: u32 = 200;
/// Upper bound on the RGB canvas buffer (256 MiB).
pub const MAX_CANVAS_BYTES: u64 = 256 * 1024 * 1024;

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TableError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks the two rendering knobs and the size of the canvas they imply.
pub fn validate_table_dimensions(size: u32, cell_size: u32) -> Result<()> {
    validate_range("size", size, 1, MAX_TABLE_SIZE)?;
    validate_range("cell_size", cell_size, 1, MAX_CELL_SIZE)?;
    validate_canvas_bytes(size, cell_size)
}

/// Canvas width and height computed without overflow.
pub fn canvas_dimensions(size: u32, cell_size: u32) -> (u64, u64) {
    let grid = size as u64 * cell_size as u64;
    (
        grid + (TableLayout::PADDING + TableLayout::RIGHT_MARGIN) as u64,
        grid + (TableLayout::PADDING + TableLayout::TITLE_BAND) as u64,
    )
}

pub fn validate_canvas_bytes(size: u32, cell_size: u32) -> Result<()> {
    let (width, height) = canvas_dimensions(size, cell_size);
    let bytes = width.saturating_mul(height).saturating_mul(3);
    if bytes > MAX_CANVAS_BYTES {
        return Err(TableError::InvalidConfigValueError {
            field: "size x cell_size".to_string(),
            value: format!("{} x {}", size, cell_size),
            reason: format!(
                "Canvas of {}x{} needs {} bytes, limit is {}",
                width, height, bytes, MAX_CANVAS_BYTES
            ),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(TableError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Valid levels: {}", valid_levels.join(", ")),
        });
    }
    Ok(())
}
