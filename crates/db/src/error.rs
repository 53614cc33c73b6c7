use journey_core::error::CoreError;

/// Error type for multi-statement repository operations (wrap, apply) that
/// can fail on both domain rules and the store itself.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
