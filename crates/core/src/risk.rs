//! Fire-risk classification.
//!
//! Pure logic -- no store or network access. The caller fetches the latest
//! reading and (optionally) the one before it and passes them in. The rule
//! ladder is checked most-severe first and the first matching rule wins.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reading::Reading;

/// Temperature above which a lone reading is always HIGH.
pub const BASELINE_HIGH_TEMPERATURE: f64 = 60.0;
/// Temperature above which a dry lone reading is HIGH.
pub const BASELINE_DRY_HIGH_TEMPERATURE: f64 = 50.0;
/// Humidity below which a hot lone reading counts as dry.
pub const BASELINE_DRY_HUMIDITY: f64 = 30.0;
/// Temperature above which a lone reading is MEDIUM.
pub const BASELINE_MEDIUM_TEMPERATURE: f64 = 45.0;
/// Humidity below which a lone reading is MEDIUM.
pub const BASELINE_MEDIUM_HUMIDITY: f64 = 40.0;

/// Rise since the previous reading (inclusive) that is HIGH.
pub const RISE_HIGH_DELTA: f64 = 5.0;
/// Rise since the previous reading (inclusive) that is MEDIUM.
pub const RISE_MEDIUM_DELTA: f64 = 2.0;
/// Temperature above which a steady reading is still MEDIUM.
pub const EXTREME_TEMPERATURE: f64 = 55.0;
/// Humidity below which a steady reading is still MEDIUM.
pub const EXTREME_HUMIDITY: f64 = 25.0;

pub const MSG_IMMEDIATE_RISK: &str = "Immediate fire risk detected!";
pub const MSG_POTENTIAL_RISK: &str = "Potential fire risk";
pub const MSG_NORMAL: &str = "Normal conditions";
pub const MSG_EXTREME_CONDITIONS: &str = "Extreme conditions may indicate fire risk";
pub const MSG_UNDETERMINED: &str = "Unable to determine risk level due to error";

/// Categorical fire-risk level.
///
/// `Low < Medium < High` by severity. `Unknown` means the level could not be
/// determined and has no ordering relative to the other levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    /// Numeric severity, `None` for [`RiskLevel::Unknown`].
    pub fn severity(self) -> Option<u8> {
        match self {
            RiskLevel::Low => Some(0),
            RiskLevel::Medium => Some(1),
            RiskLevel::High => Some(2),
            RiskLevel::Unknown => None,
        }
    }

    /// Whether this level warrants triggering the actuator.
    pub fn is_elevated(self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

impl PartialOrd for RiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match (self.severity(), other.severity()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk level with its human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub risk: RiskLevel,
    pub message: String,
}

impl Assessment {
    fn new(risk: RiskLevel, message: impl Into<String>) -> Self {
        Self {
            risk,
            message: message.into(),
        }
    }

    /// Assessment used when the history needed for classification could not
    /// be loaded.
    pub fn undetermined() -> Self {
        Self::new(RiskLevel::Unknown, MSG_UNDETERMINED)
    }
}

/// Classify the fire risk of `current`, optionally relative to the reading
/// stored immediately before it.
///
/// Total: every input produces an assessment. Only a rise in temperature is
/// considered by the trend rules; a falling temperature never escalates.
pub fn classify(current: &Reading, previous: Option<&Reading>) -> Assessment {
    match previous {
        None => classify_baseline(current),
        Some(previous) => classify_trend(current, previous),
    }
}

fn classify_baseline(current: &Reading) -> Assessment {
    let t = current.temperature;
    let h = current.humidity;

    if t > BASELINE_HIGH_TEMPERATURE
        || (t > BASELINE_DRY_HIGH_TEMPERATURE && h < BASELINE_DRY_HUMIDITY)
    {
        Assessment::new(RiskLevel::High, MSG_IMMEDIATE_RISK)
    } else if t > BASELINE_MEDIUM_TEMPERATURE || h < BASELINE_MEDIUM_HUMIDITY {
        Assessment::new(RiskLevel::Medium, MSG_POTENTIAL_RISK)
    } else {
        Assessment::new(RiskLevel::Low, MSG_NORMAL)
    }
}

fn classify_trend(current: &Reading, previous: &Reading) -> Assessment {
    let delta = current.temperature - previous.temperature;

    if delta >= RISE_HIGH_DELTA {
        Assessment::new(
            RiskLevel::High,
            format!("Sudden temperature rise of {}°", format_delta(delta)),
        )
    } else if delta >= RISE_MEDIUM_DELTA {
        Assessment::new(
            RiskLevel::Medium,
            format!("Temperature increased by {}°", format_delta(delta)),
        )
    } else if current.temperature > EXTREME_TEMPERATURE || current.humidity < EXTREME_HUMIDITY {
        Assessment::new(RiskLevel::Medium, MSG_EXTREME_CONDITIONS)
    } else {
        Assessment::new(
            RiskLevel::Low,
            format!("{MSG_NORMAL}. Temperature change: {}°", format_delta(delta)),
        )
    }
}

/// Render a temperature delta with one fractional digit.
///
/// Ties round away from zero and the sign is kept (`-1.25` -> `"-1.3"`).
pub fn format_delta(delta: f64) -> String {
    let rounded = (delta * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
