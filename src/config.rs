//! Конфигурация этапов пайплайна (params.yaml)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    pub cleaning: CleaningConfig,
    pub prepare: PrepareConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleaningConfig {
    pub input_path: PathBuf,
    /// Каталог, в который пишется dataset_cleaned.csv
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrepareConfig {
    pub input_path: PathBuf,
    pub output_path_train: PathBuf,
    pub output_path_test: PathBuf,
    /// Доля тестовой выборки, строго в (0, 1)
    pub split: f64,
    pub seed: u64,
}

impl Params {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::MissingInput(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let params: Params = serde_yaml::from_str(&raw)?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        if !(self.prepare.split > 0.0 && self.prepare.split < 1.0) {
            return Err(PipelineError::Config(format!(
                "prepare.split must be in (0, 1), got {}",
                self.prepare.split
            )));
        }
        Ok(())
    }
}
