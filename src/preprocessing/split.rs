//! Разбиение на обучающую и тестовую выборки

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{PipelineError, Result};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct SplitData {
    pub x_train: Table,
    pub y_train: Table,
    pub x_test: Table,
    pub y_test: Table,
}

/// Детерминированное случайное разбиение строк. Размер тестовой выборки
/// ceil(f * n), как в sklearn; первые n_test перемешанных индексов — тест,
/// остальные — обучение.
pub fn train_test_split(
    table: &Table,
    target: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData> {
    if table.column_index(target).is_none() {
        return Err(PipelineError::UnknownTarget(target.to_string()));
    }

    let n = table.n_rows();
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test >= n {
        return Err(PipelineError::Config(format!(
            "test fraction {} leaves no training rows for {} rows",
            test_fraction, n
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let (test_idx, train_idx) = indices.split_at(n_test);

    let mut x_train = table.subset(train_idx);
    let mut x_test = table.subset(test_idx);

    let (ty, y_train_values) = x_train
        .remove_column(target)
        .ok_or_else(|| PipelineError::UnknownTarget(target.to_string()))?;
    let (_, y_test_values) = x_test
        .remove_column(target)
        .ok_or_else(|| PipelineError::UnknownTarget(target.to_string()))?;

    tracing::info!(
        train = x_train.n_rows(),
        test = x_test.n_rows(),
        seed,
        "train/test split completed"
    );

    Ok(SplitData {
        y_train: Table::single_column(target.to_string(), ty, y_train_values),
        y_test: Table::single_column(target.to_string(), ty, y_test_values),
        x_train,
        x_test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnType, Value};

    fn sample_table(n: usize) -> Table {
        Table::new(
            vec!["id".to_string(), "popularity".to_string()],
            vec![ColumnType::Int, ColumnType::Int],
            (0..n)
                .map(|i| vec![Value::Int(i as i64), Value::Int((i % 100) as i64)])
                .collect(),
        )
    }

    fn ids(table: &Table) -> Vec<i64> {
        let idx = table.column_index("id").unwrap();
        (0..table.n_rows())
            .map(|row| match table.value(row, idx) {
                Value::Int(v) => *v,
                other => panic!("unexpected id {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let split = train_test_split(&sample_table(100), "popularity", 0.2, 42).unwrap();
        assert_eq!(split.x_test.n_rows(), 20);
        assert_eq!(split.x_train.n_rows(), 80);
        assert_eq!(split.y_test.n_rows(), 20);
        assert_eq!(split.y_train.n_rows(), 80);
    }

    #[test]
    fn test_split_size_rounds_up() {
        // ceil(0.25 * 10) = 3
        let split = train_test_split(&sample_table(10), "popularity", 0.25, 42).unwrap();
        assert_eq!(split.x_test.n_rows(), 3);
        assert_eq!(split.x_train.n_rows(), 7);
    }

    #[test]
    fn test_split_disjoint_and_exhaustive() {
        let table = sample_table(100);
        let split = train_test_split(&table, "popularity", 0.3, 7).unwrap();

        let mut all = ids(&split.x_train);
        all.extend(ids(&split.x_test));
        all.sort();
        all.dedup();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_deterministic() {
        let table = sample_table(100);
        let a = train_test_split(&table, "popularity", 0.2, 42).unwrap();
        let b = train_test_split(&table, "popularity", 0.2, 42).unwrap();

        assert_eq!(a.x_train.rows(), b.x_train.rows());
        assert_eq!(a.x_test.rows(), b.x_test.rows());
        assert_eq!(a.y_test.rows(), b.y_test.rows());
    }

    #[test]
    fn test_different_seed_different_split() {
        let table = sample_table(100);
        let a = train_test_split(&table, "popularity", 0.2, 42).unwrap();
        let b = train_test_split(&table, "popularity", 0.2, 43).unwrap();
        assert_ne!(ids(&a.x_test), ids(&b.x_test));
    }

    #[test]
    fn test_fraction_leaving_no_train_rows_rejected() {
        // ceil(0.95 * 10) = 10: обучающая выборка была бы пустой
        let err = train_test_split(&sample_table(10), "popularity", 0.95, 42).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = train_test_split(&sample_table(0), "popularity", 0.2, 42).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_target_separated() {
        let split = train_test_split(&sample_table(10), "popularity", 0.2, 1).unwrap();
        assert!(split.x_train.column_index("popularity").is_none());
        assert_eq!(split.y_train.columns(), &["popularity".to_string()]);
    }

    #[test]
    fn test_unknown_target() {
        let err = train_test_split(&sample_table(10), "nope", 0.2, 1).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownTarget(_)));
    }
}
