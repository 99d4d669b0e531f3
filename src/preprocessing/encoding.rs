//! Кодирование категориальных колонок

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::{ColumnType, Table, Value};

/// Максимальная кардинальность для one-hot кодирования
pub const MAX_ONE_HOT_CARDINALITY: usize = 10;

/// Обученный кодировщик категориальной колонки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum FittedEncoder {
    /// One-hot: полный список категорий (первая — опорная, без
    /// индикаторной колонки) и имена созданных колонок
    OneHot {
        categories: Vec<String>,
        columns: Vec<String>,
    },
    /// Label: классы в порядке сортировки, код = позиция
    Label { classes: Vec<String> },
}

impl FittedEncoder {
    /// Код класса для label-кодировщика
    pub fn code(&self, value: &str) -> Option<usize> {
        match self {
            FittedEncoder::Label { classes } => classes.iter().position(|c| c == value),
            FittedEncoder::OneHot { .. } => None,
        }
    }
}

/// Сортировка категорий: числовая для целочисленных колонок (порядок
/// pandas get_dummies), лексикографическая для остальных
fn sort_categories(mut categories: Vec<String>, ty: ColumnType) -> Vec<String> {
    if ty == ColumnType::Int {
        categories.sort_by_key(|c| c.parse::<i64>().unwrap_or(i64::MAX));
    } else {
        categories.sort();
    }
    categories
}

/// Кодирование всех категориальных колонок на месте по кардинальности:
/// one-hot при <= 10 уникальных значений, иначе label
pub fn encode(table: &mut Table, categorical: &[String]) -> BTreeMap<String, FittedEncoder> {
    let mut encoders = BTreeMap::new();

    for column in categorical {
        let Some(ty) = table.column_type(column) else {
            tracing::warn!(column = %column, "categorical column not found, skipping");
            continue;
        };
        let distinct = table.distinct_strings(column);
        let cardinality = distinct.len();
        if cardinality == 0 {
            tracing::warn!(column = %column, "categorical column has no values, skipping");
            continue;
        }

        let encoder = if cardinality <= MAX_ONE_HOT_CARDINALITY {
            let fitted = encode_one_hot(table, column, sort_categories(distinct, ty));
            tracing::info!(
                column = %column,
                cardinality,
                dummies = fitted_columns_len(&fitted),
                "one-hot encoding applied"
            );
            fitted
        } else {
            // LabelEncoder поверх строковой формы: лексикографический порядок
            let mut classes = distinct;
            classes.sort();
            encode_label(table, column, &classes);
            tracing::info!(column = %column, cardinality, "label encoding applied");
            FittedEncoder::Label { classes }
        };

        encoders.insert(column.clone(), encoder);
    }

    encoders
}

fn fitted_columns_len(encoder: &FittedEncoder) -> usize {
    match encoder {
        FittedEncoder::OneHot { columns, .. } => columns.len(),
        FittedEncoder::Label { .. } => 0,
    }
}

/// One-hot: индикаторная колонка на каждую категорию, кроме опорной
/// (первой по сортировке); исходная колонка удаляется
fn encode_one_hot(table: &mut Table, column: &str, categories: Vec<String>) -> FittedEncoder {
    let idx = table
        .column_index(column)
        .expect("column existence checked by caller");

    let kept = &categories[1..];
    let mut indicator_names = Vec::with_capacity(kept.len());
    let mut indicators: Vec<Vec<Value>> = vec![Vec::with_capacity(table.n_rows()); kept.len()];

    for row in 0..table.n_rows() {
        let cell = table.value(row, idx).to_string();
        for (k, category) in kept.iter().enumerate() {
            indicators[k].push(Value::Bool(&cell == category));
        }
    }

    table.remove_column(column);
    for (category, values) in kept.iter().zip(indicators) {
        let name = format!("{}_{}", column, category);
        table.push_column(name.clone(), ColumnType::Bool, values);
        indicator_names.push(name);
    }

    FittedEncoder::OneHot {
        categories,
        columns: indicator_names,
    }
}

/// Label: замена значений их кодами на месте
fn encode_label(table: &mut Table, column: &str, classes: &[String]) {
    let idx = table
        .column_index(column)
        .expect("column existence checked by caller");

    let codes: Vec<Value> = (0..table.n_rows())
        .map(|row| {
            let cell = table.value(row, idx).to_string();
            let code = classes
                .iter()
                .position(|c| *c == cell)
                .expect("classes built from this column");
            Value::Int(code as i64)
        })
        .collect();

    table.set_column(column, ColumnType::Int, codes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_key_and_genre(n_genres: usize) -> Table {
        let mut rows = Vec::new();
        for i in 0..20 {
            rows.push(vec![
                Value::Int((i % 3) as i64 * 2), // key: 0, 2, 4
                Value::Str(format!("genre{:02}", i % n_genres)),
                Value::Float(i as f64),
            ]);
        }
        Table::new(
            vec![
                "key".to_string(),
                "track_genre".to_string(),
                "tempo".to_string(),
            ],
            vec![ColumnType::Int, ColumnType::Text, ColumnType::Float],
            rows,
        )
    }

    #[test]
    fn test_one_hot_column_count() {
        let mut table = table_with_key_and_genre(3);
        let encoders = encode(
            &mut table,
            &["key".to_string(), "track_genre".to_string()],
        );

        // Кардинальность 3 -> 2 индикаторные колонки
        let FittedEncoder::OneHot { categories, columns } = &encoders["key"] else {
            panic!("expected one-hot for key");
        };
        assert_eq!(categories, &["0", "2", "4"]);
        assert_eq!(columns, &["key_2", "key_4"]);
        assert!(table.column_index("key").is_none());
        assert_eq!(table.column_type("key_2"), Some(ColumnType::Bool));
    }

    #[test]
    fn test_one_hot_at_most_one_indicator_per_row() {
        let mut table = table_with_key_and_genre(3);
        let encoders = encode(&mut table, &["key".to_string()]);
        let FittedEncoder::OneHot { columns, .. } = &encoders["key"] else {
            panic!("expected one-hot");
        };

        for row in 0..table.n_rows() {
            let set: usize = columns
                .iter()
                .map(|c| {
                    let idx = table.column_index(c).unwrap();
                    matches!(table.value(row, idx), Value::Bool(true)) as usize
                })
                .sum();
            assert!(set <= 1);
        }
    }

    #[test]
    fn test_one_hot_reference_category_all_zero() {
        let mut table = table_with_key_and_genre(3);
        let encoders = encode(&mut table, &["key".to_string()]);
        let FittedEncoder::OneHot { columns, .. } = &encoders["key"] else {
            panic!("expected one-hot");
        };

        // Строки с key = 0 (опорная категория) не имеют ни одного индикатора
        let k2 = table.column_index(&columns[0]).unwrap();
        let k4 = table.column_index(&columns[1]).unwrap();
        for row in (0..table.n_rows()).step_by(3) {
            assert_eq!(table.value(row, k2), &Value::Bool(false));
            assert_eq!(table.value(row, k4), &Value::Bool(false));
        }
    }

    #[test]
    fn test_label_encoding_bijection() {
        // 12 жанров -> label encoding
        let mut table = table_with_key_and_genre(12);
        let encoders = encode(&mut table, &["track_genre".to_string()]);

        let FittedEncoder::Label { classes } = &encoders["track_genre"] else {
            panic!("expected label encoding");
        };
        assert_eq!(classes.len(), 12);
        let mut sorted = classes.clone();
        sorted.sort();
        assert_eq!(classes, &sorted);

        // Колонка заменена кодами 0..11 на месте
        assert_eq!(table.column_type("track_genre"), Some(ColumnType::Int));
        let idx = table.column_index("track_genre").unwrap();
        let mut seen: Vec<i64> = (0..table.n_rows())
            .map(|row| match table.value(row, idx) {
                Value::Int(v) => *v,
                other => panic!("expected code, got {:?}", other),
            })
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_label_replay_on_new_data() {
        let mut table = table_with_key_and_genre(12);
        let encoders = encode(&mut table, &["track_genre".to_string()]);
        let encoder = &encoders["track_genre"];

        assert_eq!(encoder.code("genre00"), Some(0));
        assert_eq!(encoder.code("genre11"), Some(11));
        assert_eq!(encoder.code("unseen"), None);
    }

    #[test]
    fn test_numeric_categories_sorted_numerically() {
        let rows = vec![
            vec![Value::Int(10)],
            vec![Value::Int(2)],
            vec![Value::Int(0)],
        ];
        let mut table = Table::new(
            vec!["key".to_string()],
            vec![ColumnType::Int],
            rows,
        );
        let encoders = encode(&mut table, &["key".to_string()]);
        let FittedEncoder::OneHot { categories, .. } = &encoders["key"] else {
            panic!("expected one-hot");
        };
        // Числовой порядок, не лексикографический
        assert_eq!(categories, &["0", "2", "10"]);
    }

    #[test]
    fn test_encoders_serialize_tagged() {
        let encoder = FittedEncoder::Label {
            classes: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_string(&encoder).unwrap();
        assert!(json.contains("\"encoding\":\"label\""));
        let back: FittedEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, encoder);
    }
}
