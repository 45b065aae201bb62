use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactivityTier {
    HighlyElevated,
    Elevated,
    NotElevated,
}

/// How a not-elevated value is rendered in tables and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierDisplay {
    #[default]
    Numeric,
    /// Not-elevated spots show the lower threshold instead of a number.
    Threshold,
}

pub fn tier_order() -> &'static [ReactivityTier] {
    &[
        ReactivityTier::HighlyElevated,
        ReactivityTier::Elevated,
        ReactivityTier::NotElevated,
    ]
}

impl ReactivityTier {
    pub fn label(self) -> &'static str {
        match self {
            ReactivityTier::HighlyElevated => "Highly elevated",
            ReactivityTier::Elevated => "Elevated",
            ReactivityTier::NotElevated => "Not elevated",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ReactivityTier::HighlyElevated => "highly_elevated",
            ReactivityTier::Elevated => "elevated",
            ReactivityTier::NotElevated => "not_elevated",
        }
    }

    pub fn classify(normalized: f64, elevated_min: f64, highly_elevated_min: f64) -> Self {
        if normalized >= highly_elevated_min {
            ReactivityTier::HighlyElevated
        } else if normalized >= elevated_min {
            ReactivityTier::Elevated
        } else {
            ReactivityTier::NotElevated
        }
    }
}

pub fn format_normalized(
    value: f64,
    tier: ReactivityTier,
    elevated_min: f64,
    display: TierDisplay,
) -> String {
    match (display, tier) {
        (TierDisplay::Threshold, ReactivityTier::NotElevated) => format!("< {elevated_min}"),
        _ => format!("{value:.2}"),
    }
}
