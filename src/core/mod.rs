pub mod blend;
pub mod canvas;
pub mod engine;
pub mod factorize;
pub mod font;
pub mod pipeline;
pub mod renderer;

pub use crate::domain::model::{Cell, Color, Factorization, PrimeColorTable, TableLayout};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
