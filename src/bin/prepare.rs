/// Этап подготовки данных для обучения моделей

use anyhow::Context;

use trackpop_ml::config::Params;
use trackpop_ml::preprocessing::prepare;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let params_path = std::env::args().nth(1).unwrap_or_else(|| "params.yaml".to_string());
    let params = Params::from_file(&params_path)
        .with_context(|| format!("failed to load {}", params_path))?;

    let metadata = prepare::run(&params.prepare)?;
    tracing::info!(
        train = metadata.train_size,
        test = metadata.test_size,
        features = metadata.feature_count,
        seed = metadata.random_seed,
        "data preparation completed"
    );
    Ok(())
}
