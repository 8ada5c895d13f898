use thiserror_no_std::Error;

/// Rejected poller configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("{name} is not a valid number")]
    InvalidNumber { name: &'static str },
    #[error("tick period must be non-zero")]
    ZeroTick,
    #[error("long-press threshold must be at least one tick")]
    ZeroLongPress,
    #[error("blink sequence must have at least one step")]
    ZeroBlinkSteps,
}
