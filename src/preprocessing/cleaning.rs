//! Очистка исходного набора данных

use crate::config::CleaningConfig;
use crate::error::Result;
use crate::table::Table;

/// Идентифицирующие и свободнотекстовые колонки, исключаемые из набора
pub const ID_COLUMNS: [&str; 5] = ["index", "track_id", "artists", "album_name", "track_name"];

/// Имя файла очищенного набора внутри выходного каталога
pub const CLEANED_FILE_NAME: &str = "dataset_cleaned.csv";

#[derive(Debug, Clone)]
pub struct CleaningReport {
    pub original_rows: usize,
    pub final_rows: usize,
    pub duplicates_removed: usize,
    pub null_rows_removed: usize,
    pub columns_dropped: Vec<String>,
    pub columns_not_found: Vec<String>,
}

/// Очистка таблицы: дубликаты, пропуски, идентифицирующие колонки
pub fn clean(mut table: Table) -> (Table, CleaningReport) {
    let original_rows = table.n_rows();

    let duplicates_removed = table.dedup();
    tracing::info!(removed = duplicates_removed, "duplicate rows removed");

    let null_rows_removed = table.drop_missing();
    tracing::info!(removed = null_rows_removed, "rows with missing values removed");

    let (columns_dropped, columns_not_found) = table.drop_columns(&ID_COLUMNS);
    for name in &columns_not_found {
        tracing::warn!(column = %name, "configured drop column not found, skipping");
    }

    let report = CleaningReport {
        original_rows,
        final_rows: table.n_rows(),
        duplicates_removed,
        null_rows_removed,
        columns_dropped,
        columns_not_found,
    };
    (table, report)
}

/// Этап очистки целиком: чтение входа, очистка, запись результата
pub fn run(config: &CleaningConfig) -> Result<CleaningReport> {
    let table = Table::read_csv(&config.input_path)?;
    tracing::info!(
        rows = table.n_rows(),
        cols = table.n_cols(),
        path = %config.input_path.display(),
        "dataset loaded"
    );

    let (table, report) = clean(table);

    std::fs::create_dir_all(&config.output_path)
        .map_err(|e| crate::error::PipelineError::write(&config.output_path, e))?;
    let output = config.output_path.join(CLEANED_FILE_NAME);
    table.write_csv(&output)?;

    tracing::info!(
        rows = report.final_rows,
        cols = table.n_cols(),
        path = %output.display(),
        "cleaned dataset saved"
    );
    Ok(report)
}
