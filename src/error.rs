use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Champion {0} is missing from the champion catalog")]
    UnknownChampion(i64),

    #[error("Team {0} is missing from the team directory")]
    UnknownTeam(String),

    #[error("No performances found for division {0}")]
    EmptyDivision(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
