//! Сохранение артефактов подготовки данных

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::preprocessing::encoding::FittedEncoder;
use crate::preprocessing::normalization::FittedScaler;
use crate::preprocessing::split::SplitData;

pub const X_TRAIN_FILE: &str = "X_train.csv";
pub const Y_TRAIN_FILE: &str = "y_train.csv";
pub const X_TEST_FILE: &str = "X_test.csv";
pub const Y_TEST_FILE: &str = "y_test.csv";
pub const ENCODERS_FILE: &str = "encoders.json";
pub const SCALERS_FILE: &str = "scalers.json";
pub const METADATA_FILE: &str = "metadata.yaml";

/// Сводка подготовки данных, сохраняется рядом с артефактами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub original_shape: (usize, usize),
    pub encoded_shape: (usize, usize),
    pub target_column: String,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub low_cardinality_encoded: Vec<String>,
    pub high_cardinality_encoded: Vec<String>,
    pub train_size: usize,
    pub test_size: usize,
    pub test_split_ratio: f64,
    pub random_seed: u64,
    pub feature_count: usize,
    pub encoding_date: String,
}

/// Запись всех выходных файлов этапа подготовки. Каталоги создаются при
/// необходимости; существующие файлы перезаписываются без проверки.
pub fn persist(
    split: &SplitData,
    encoders: &BTreeMap<String, FittedEncoder>,
    scalers: &BTreeMap<String, FittedScaler>,
    metadata: &Metadata,
    train_dir: &Path,
    test_dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(train_dir).map_err(|e| PipelineError::write(train_dir, e))?;
    std::fs::create_dir_all(test_dir).map_err(|e| PipelineError::write(test_dir, e))?;

    split.x_train.write_csv(train_dir.join(X_TRAIN_FILE))?;
    split.y_train.write_csv(train_dir.join(Y_TRAIN_FILE))?;
    split.x_test.write_csv(test_dir.join(X_TEST_FILE))?;
    split.y_test.write_csv(test_dir.join(Y_TEST_FILE))?;

    write_json(&train_dir.join(ENCODERS_FILE), encoders)?;
    write_json(&train_dir.join(SCALERS_FILE), scalers)?;

    let metadata_path = train_dir.join(METADATA_FILE);
    let file =
        File::create(&metadata_path).map_err(|e| PipelineError::write(&metadata_path, e))?;
    serde_yaml::to_writer(file, metadata)?;

    tracing::info!(
        train_dir = %train_dir.display(),
        test_dir = %test_dir.display(),
        "prepared datasets and artifacts saved"
    );
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| PipelineError::write(path, e))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
