//! Trackpop ML - Rust библиотека подготовки данных и оценки популярности

pub mod config;
pub mod error;
pub mod preprocessing;
pub mod scoring;
pub mod table;
pub mod types;

pub use config::{CleaningConfig, Params, PrepareConfig};
pub use error::{PipelineError, Result};
pub use table::{ColumnType, Table, Value};
pub use types::*;

// Re-export для удобства
pub use preprocessing::prepare::TARGET_COLUMN;
pub use scoring::predict_popularity;
