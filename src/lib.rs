//! Multiplication table rendered as a PNG, with each cell colored by the
//! prime factorization of its product.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    blend::blend_colors,
    canvas::Canvas,
    engine::TableEngine,
    factorize::factorize,
    font::LabelFont,
    pipeline::{confirmation_message, TablePipeline, OUTPUT_FILE},
    renderer::{compute_cells, TableRenderer},
};
pub use crate::domain::model::{Cell, Color, Factorization, PrimeColorTable, TableLayout};
pub use crate::utils::error::{Result, TableError};
