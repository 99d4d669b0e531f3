//! Классификация колонок на категориальные и числовые

use crate::table::Table;

/// Числовые по типу, но категориальные по смыслу колонки
pub const CATEGORICAL_OVERRIDES: [&str; 3] = ["key", "mode", "time_signature"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClassification {
    pub categorical: Vec<String>,
    pub numeric: Vec<String>,
}

/// Разбиение всех колонок, кроме целевой, на два непересекающихся набора.
/// Зависит только от имени колонки и типа хранения, не от значений.
pub fn classify(table: &Table, target: &str) -> ColumnClassification {
    let mut categorical = Vec::new();
    let mut numeric = Vec::new();

    for name in table.columns() {
        if name == target {
            continue;
        }
        let is_text = table
            .column_type(name)
            .map(|ty| ty.is_text())
            .unwrap_or(false);
        if is_text || CATEGORICAL_OVERRIDES.contains(&name.as_str()) {
            categorical.push(name.clone());
        } else {
            numeric.push(name.clone());
        }
    }

    ColumnClassification {
        categorical,
        numeric,
    }
}
