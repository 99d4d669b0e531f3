//! Оценка популярности трека по шести аудио-признакам

use crate::types::SongFeatures;

const W_DANCEABILITY: f64 = 0.35;
const W_ENERGY: f64 = 0.25;
const W_VALENCE: f64 = 0.20;
const W_ACOUSTICNESS: f64 = 0.10;
const W_INSTRUMENTALNESS: f64 = 0.07;
const W_TEMPO: f64 = 0.03;

/// Взвешенная сумма признаков, обрезанная до [0, 1].
/// Акустичность и инструментальность входят дополнением до единицы,
/// темп приводится к [0, 1] по шкале (tempo - 50) / 150.
pub fn predict_popularity(features: &SongFeatures) -> f64 {
    let score = features.danceability * W_DANCEABILITY
        + features.energy * W_ENERGY
        + features.valence * W_VALENCE
        + (1.0 - features.acousticness) * W_ACOUSTICNESS
        + (1.0 - features.instrumentalness) * W_INSTRUMENTALNESS
        + (features.tempo - 50.0) / 150.0 * W_TEMPO;

    score.clamp(0.0, 1.0)
}
