use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    ZeroStartingHealth,
    SprintSlowerThanWalk { multiplier: f32 },
    TickRateOutOfRange { hz: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::ZeroStartingHealth => write!(f, "starting health must be at least 1"),
            Self::SprintSlowerThanWalk { multiplier } => write!(
                f,
                "sprint multiplier must be at least 1.0, got {multiplier}"
            ),
            Self::TickRateOutOfRange { hz, max } => {
                write!(f, "tick rate out of range: {hz} (allowed 1..={max})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
