/// Модуль подготовки данных

pub mod classification;
pub mod cleaning;
pub mod encoding;
pub mod normalization;
pub mod persist;
pub mod prepare;
pub mod split;

pub use classification::{classify, ColumnClassification};
pub use cleaning::CleaningReport;
pub use encoding::FittedEncoder;
pub use normalization::{FittedScaler, ScalerMethod};
pub use persist::Metadata;
pub use split::{train_test_split, SplitData};
