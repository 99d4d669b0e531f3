/// Этап очистки исходного набора данных

use anyhow::Context;

use trackpop_ml::config::Params;
use trackpop_ml::preprocessing::cleaning;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let params_path = std::env::args().nth(1).unwrap_or_else(|| "params.yaml".to_string());
    let params = Params::from_file(&params_path)
        .with_context(|| format!("failed to load {}", params_path))?;

    let report = cleaning::run(&params.cleaning)?;
    tracing::info!(
        original = report.original_rows,
        retained = report.final_rows,
        duplicates = report.duplicates_removed,
        nulls = report.null_rows_removed,
        "data cleaning completed"
    );
    Ok(())
}
