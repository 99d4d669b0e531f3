//! Нормализация числовых колонок

use std::collections::BTreeMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::table::Table;

/// Колонки, подлежащие нормализации
pub const COLUMNS_TO_NORMALIZE: [&str; 3] = ["duration_ms", "loudness", "tempo"];

/// Порог доли выбросов (в процентах) для выбора робастного скейлера
const OUTLIER_PCT_THRESHOLD: f64 = 5.0;
/// Порог отношения max/min для выбора стандартного скейлера
const RANGE_RATIO_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerMethod {
    Robust,
    Standard,
    MinMax,
}

/// Обученный скейлер с параметрами, достаточными для повторения
/// преобразования на новых данных
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FittedScaler {
    Robust { median: f64, iqr: f64 },
    Standard { mean: f64, std: f64 },
    MinMax { min: f64, max: f64 },
}

impl FittedScaler {
    pub fn method(&self) -> ScalerMethod {
        match self {
            FittedScaler::Robust { .. } => ScalerMethod::Robust,
            FittedScaler::Standard { .. } => ScalerMethod::Standard,
            FittedScaler::MinMax { .. } => ScalerMethod::MinMax,
        }
    }

    pub fn transform(&self, v: f64) -> f64 {
        match self {
            FittedScaler::Robust { median, iqr } => (v - median) / iqr,
            FittedScaler::Standard { mean, std } => (v - mean) / std,
            FittedScaler::MinMax { min, max } => (v - min) / (max - min),
        }
    }
}

/// Квантиль с линейной интерполяцией (конвенция numpy)
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

/// Статистика колонки, от которой зависит выбор метода
#[derive(Debug, Clone, Copy)]
pub struct ColumnStats {
    pub outlier_pct: f64,
    pub range_ratio: f64,
}

pub fn column_stats(values: &[f64]) -> ColumnStats {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;
    let outliers = values.iter().filter(|&&v| v < lower || v > upper).count();
    let outlier_pct = outliers as f64 / values.len() as f64 * 100.0;

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    // При min <= 0 отношение не определено, считаем бесконечным
    let range_ratio = if min > 0.0 { max / min } else { f64::INFINITY };

    ColumnStats {
        outlier_pct,
        range_ratio,
    }
}

/// Эвристический выбор метода нормализации по статистике колонки
pub fn select_method(stats: ColumnStats) -> ScalerMethod {
    if stats.outlier_pct > OUTLIER_PCT_THRESHOLD {
        ScalerMethod::Robust
    } else if stats.range_ratio > RANGE_RATIO_THRESHOLD {
        ScalerMethod::Standard
    } else {
        ScalerMethod::MinMax
    }
}

/// Обучение скейлера на значениях колонки
pub fn fit(column: &str, values: &[f64], method: ScalerMethod) -> Result<FittedScaler> {
    match method {
        ScalerMethod::Robust => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let median = quantile(&sorted, 0.5);
            let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
            if iqr == 0.0 {
                return Err(PipelineError::DegenerateColumn(column.to_string()));
            }
            Ok(FittedScaler::Robust { median, iqr })
        }
        ScalerMethod::Standard => {
            let arr = Array1::from_vec(values.to_vec());
            let mean = arr.mean().unwrap_or(0.0);
            // ddof = 0, как в sklearn StandardScaler
            let std = arr.std(0.0);
            if std == 0.0 {
                return Err(PipelineError::DegenerateColumn(column.to_string()));
            }
            Ok(FittedScaler::Standard { mean, std })
        }
        ScalerMethod::MinMax => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if max == min {
                return Err(PipelineError::DegenerateColumn(column.to_string()));
            }
            Ok(FittedScaler::MinMax { min, max })
        }
    }
}

/// Нормализация колонок на месте. Скейлеры обучаются на полной таблице
/// до разбиения train/test; обученные параметры возвращаются для сохранения.
pub fn normalize(table: &mut Table, columns: &[&str]) -> Result<BTreeMap<String, FittedScaler>> {
    let mut scalers = BTreeMap::new();

    for &column in columns {
        let Some(values) = table.column_f64(column) else {
            tracing::warn!(column, "normalize column not found or not numeric, skipping");
            continue;
        };
        if values.is_empty() {
            tracing::warn!(column, "normalize column is empty, skipping");
            continue;
        }

        let stats = column_stats(&values);
        let method = select_method(stats);
        tracing::info!(
            column,
            method = ?method,
            outlier_pct = stats.outlier_pct,
            range_ratio = stats.range_ratio,
            "normalization method selected"
        );

        let scaler = fit(column, &values, method)?;
        let scaled: Vec<f64> = values.iter().map(|&v| scaler.transform(v)).collect();
        table.set_column_f64(column, &scaled);
        scalers.insert(column.to_string(), scaler);
    }

    Ok(scalers)
}
