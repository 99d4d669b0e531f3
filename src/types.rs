/// Типы данных для API оценки популярности

use serde::{Deserialize, Serialize};

/// Шесть аудио-признаков трека
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub valence: f64,
    pub tempo: f64,
}

/// Оценка популярности в диапазоне [0, 1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub score: f64,
}
