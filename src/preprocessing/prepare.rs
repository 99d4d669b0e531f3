//! Этап подготовки данных: классификация, нормализация, кодирование,
//! разбиение и сохранение

use crate::config::PrepareConfig;
use crate::error::Result;
use crate::preprocessing::classification::classify;
use crate::preprocessing::encoding::{self, FittedEncoder};
use crate::preprocessing::normalization::{self, COLUMNS_TO_NORMALIZE};
use crate::preprocessing::persist::{self, Metadata};
use crate::preprocessing::split::train_test_split;
use crate::table::Table;

/// Целевая переменная для предсказания
pub const TARGET_COLUMN: &str = "popularity";

pub fn run(config: &PrepareConfig) -> Result<Metadata> {
    let mut table = Table::read_csv(&config.input_path)?;
    let original_shape = table.shape();
    tracing::info!(
        rows = original_shape.0,
        cols = original_shape.1,
        path = %config.input_path.display(),
        "cleaned dataset loaded"
    );

    let classification = classify(&table, TARGET_COLUMN);
    tracing::info!(
        categorical = classification.categorical.len(),
        numeric = classification.numeric.len(),
        "columns classified"
    );

    let scalers = normalization::normalize(&mut table, &COLUMNS_TO_NORMALIZE)?;
    let encoders = encoding::encode(&mut table, &classification.categorical);
    let encoded_shape = table.shape();

    let split = train_test_split(&table, TARGET_COLUMN, config.split, config.seed)?;

    let mut low_cardinality_encoded = Vec::new();
    let mut high_cardinality_encoded = Vec::new();
    for (column, encoder) in &encoders {
        match encoder {
            FittedEncoder::OneHot { .. } => low_cardinality_encoded.push(column.clone()),
            FittedEncoder::Label { .. } => high_cardinality_encoded.push(column.clone()),
        }
    }

    let metadata = Metadata {
        original_shape,
        encoded_shape,
        target_column: TARGET_COLUMN.to_string(),
        numeric_columns: classification.numeric,
        categorical_columns: classification.categorical,
        low_cardinality_encoded,
        high_cardinality_encoded,
        train_size: split.x_train.n_rows(),
        test_size: split.x_test.n_rows(),
        test_split_ratio: config.split,
        random_seed: config.seed,
        feature_count: split.x_train.n_cols(),
        encoding_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    persist::persist(
        &split,
        &encoders,
        &scalers,
        &metadata,
        &config.output_path_train,
        &config.output_path_test,
    )?;

    Ok(metadata)
}
