//! Табличное представление данных и CSV ввод-вывод

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Тип хранения колонки, выводится из данных при загрузке
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    pub fn is_text(self) -> bool {
        self == ColumnType::Text
    }
}

/// Значение ячейки
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            // Стиль pandas, чтобы выход читался обратно как Bool
            Value::Bool(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            Value::Str(v) => write!(f, "{}", v),
            Value::Missing => Ok(()),
        }
    }
}

/// Упорядоченная таблица: имена колонок, типы и строки значений
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    types: Vec<ColumnType>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, types: Vec<ColumnType>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert_eq!(columns.len(), types.len());
        Self {
            columns,
            types,
            rows,
        }
    }

    /// Таблица из одной колонки (для векторов целевой переменной)
    pub fn single_column(name: String, ty: ColumnType, values: Vec<Value>) -> Self {
        Self {
            columns: vec![name],
            types: vec![ty],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    /// Загрузка CSV с выводом типов колонок
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::MissingInput(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            raw_rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        let types = infer_types(columns.len(), &raw_rows);
        let rows = raw_rows
            .into_iter()
            .map(|raw| {
                raw.into_iter()
                    .zip(types.iter())
                    .map(|(cell, ty)| parse_cell(&cell, *ty))
                    .collect()
            })
            .collect();

        Ok(Self {
            columns,
            types,
            rows,
        })
    }

    /// Запись CSV без индексной колонки
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::write(path, e))?;
        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| PipelineError::write(path, e))?;
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column_index(name).map(|i| self.types[i])
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    /// Удаление точных дубликатов строк, первая из одинаковых остаётся
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<RowKey>> = HashSet::with_capacity(before);
        self.rows
            .retain(|row| seen.insert(row.iter().map(RowKey::from).collect()));
        before - self.rows.len()
    }

    /// Удаление строк с хотя бы одним пропущенным значением
    pub fn drop_missing(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().any(Value::is_missing));
        before - self.rows.len()
    }

    pub fn count_missing(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|v| v.is_missing()).count())
            .sum()
    }

    /// Удаление колонок по именам; возвращает (удалённые, не найденные)
    pub fn drop_columns(&mut self, names: &[&str]) -> (Vec<String>, Vec<String>) {
        let mut dropped = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            if self.remove_column(name).is_some() {
                dropped.push((*name).to_string());
            } else {
                missing.push((*name).to_string());
            }
        }
        (dropped, missing)
    }

    /// Извлечение колонки и удаление её из таблицы
    pub fn remove_column(&mut self, name: &str) -> Option<(ColumnType, Vec<Value>)> {
        let idx = self.column_index(name)?;
        self.columns.remove(idx);
        let ty = self.types.remove(idx);
        let values = self.rows.iter_mut().map(|row| row.remove(idx)).collect();
        Some((ty, values))
    }

    /// Добавление колонки в конец таблицы
    pub fn push_column(&mut self, name: String, ty: ColumnType, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name);
        self.types.push(ty);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Замена значений колонки на месте с обновлением типа
    pub fn set_column(&mut self, name: &str, ty: ColumnType, values: Vec<Value>) {
        if let Some(idx) = self.column_index(name) {
            debug_assert_eq!(values.len(), self.rows.len());
            self.types[idx] = ty;
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[idx] = value;
            }
        }
    }

    /// Числовая колонка как Vec<f64>; None для текстовых колонок
    pub fn column_f64(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        self.rows.iter().map(|row| row[idx].as_f64()).collect()
    }

    /// Замена значений числовой колонки (тип становится Float)
    pub fn set_column_f64(&mut self, name: &str, values: &[f64]) {
        if let Some(idx) = self.column_index(name) {
            debug_assert_eq!(values.len(), self.rows.len());
            self.types[idx] = ColumnType::Float;
            for (row, v) in self.rows.iter_mut().zip(values) {
                row[idx] = Value::Float(*v);
            }
        }
    }

    /// Уникальные значения колонки в порядке появления (строковая форма)
    pub fn distinct_strings(&self, name: &str) -> Vec<String> {
        let Some(idx) = self.column_index(name) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for row in &self.rows {
            if row[idx].is_missing() {
                continue;
            }
            let s = row[idx].to_string();
            if seen.insert(s.clone()) {
                distinct.push(s);
            }
        }
        distinct
    }

    /// Новая таблица из подмножества строк в заданном порядке
    pub fn subset(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            types: self.types.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Структурный ключ значения для поиска дубликатов
#[derive(Hash, PartialEq, Eq)]
enum RowKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
    Missing,
}

impl From<&Value> for RowKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(v) => RowKey::Int(*v),
            // 0.0 и -0.0 считаются равными, как в pandas drop_duplicates
            Value::Float(v) => RowKey::Float(if *v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }),
            Value::Bool(v) => RowKey::Bool(*v),
            Value::Str(v) => RowKey::Str(v.clone()),
            Value::Missing => RowKey::Missing,
        }
    }
}

/// Маркеры пропусков в стиле pandas read_csv
fn is_na(cell: &str) -> bool {
    matches!(cell, "" | "NaN" | "nan" | "NA" | "N/A" | "null" | "NULL")
}

fn infer_types(n_cols: usize, rows: &[Vec<String>]) -> Vec<ColumnType> {
    (0..n_cols)
        .map(|col| {
            let mut any = false;
            let mut all_int = true;
            let mut all_float = true;
            let mut all_bool = true;
            for row in rows {
                let cell = row[col].trim();
                if is_na(cell) {
                    continue;
                }
                any = true;
                if all_int && cell.parse::<i64>().is_err() {
                    all_int = false;
                }
                if all_float && cell.parse::<f64>().is_err() {
                    all_float = false;
                }
                if all_bool && !matches!(cell, "true" | "false" | "True" | "False") {
                    all_bool = false;
                }
            }
            if !any {
                ColumnType::Text
            } else if all_int {
                ColumnType::Int
            } else if all_float {
                ColumnType::Float
            } else if all_bool {
                ColumnType::Bool
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

fn parse_cell(cell: &str, ty: ColumnType) -> Value {
    let cell = cell.trim();
    if is_na(cell) {
        return Value::Missing;
    }
    match ty {
        ColumnType::Int => cell
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or(Value::Missing),
        ColumnType::Float => match cell.parse::<f64>() {
            // NaN — пропуск, не число
            Ok(v) if v.is_nan() => Value::Missing,
            Ok(v) => Value::Float(v),
            Err(_) => Value::Missing,
        },
        ColumnType::Bool => Value::Bool(matches!(cell, "true" | "True")),
        ColumnType::Text => Value::Str(cell.to_string()),
    }
}
