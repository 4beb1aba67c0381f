/// Rejected configuration values.
///
/// None of these abort the engine: a pass that hits one logs it and falls back to a safe
/// default (no buffering, or a 1px item height).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("buffer scale must be a finite, non-negative number (got {0})")]
    InvalidBufferScale(f32),
    #[error("item height must be greater than zero")]
    ZeroItemHeight,
}
