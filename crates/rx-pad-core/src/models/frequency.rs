//! Dosing frequency codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Shorthand dosing-schedule code.
///
/// The wire forms are the clinical abbreviations as prescribers type them
/// (`Stat`, `od`, `bd`, ...); [`FrequencyCode::description`] supplies the
/// human-readable text rendered as a tooltip next to each dropdown option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FrequencyCode {
    /// Single immediate dose
    #[serde(rename = "Stat")]
    Stat,
    /// Once daily
    #[serde(rename = "od")]
    Od,
    /// At bedtime
    #[serde(rename = "hs")]
    Hs,
    /// Twice daily
    #[serde(rename = "bd")]
    Bd,
    /// Three times daily
    #[serde(rename = "tid")]
    Tid,
    /// Four times daily
    #[serde(rename = "qid")]
    Qid,
    /// Every four hours
    #[serde(rename = "q4h")]
    Q4h,
    /// Every other day
    #[serde(rename = "qod")]
    Qod,
    /// Once weekly
    #[serde(rename = "qwk")]
    Qwk,
}

impl FrequencyCode {
    /// All codes, in dropdown display order.
    pub const ALL: [FrequencyCode; 9] = [
        FrequencyCode::Stat,
        FrequencyCode::Od,
        FrequencyCode::Hs,
        FrequencyCode::Bd,
        FrequencyCode::Tid,
        FrequencyCode::Qid,
        FrequencyCode::Q4h,
        FrequencyCode::Qod,
        FrequencyCode::Qwk,
    ];

    /// Wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyCode::Stat => "Stat",
            FrequencyCode::Od => "od",
            FrequencyCode::Hs => "hs",
            FrequencyCode::Bd => "bd",
            FrequencyCode::Tid => "tid",
            FrequencyCode::Qid => "qid",
            FrequencyCode::Q4h => "q4h",
            FrequencyCode::Qod => "qod",
            FrequencyCode::Qwk => "qwk",
        }
    }

    /// Human-readable dosing description for tooltip rendering.
    pub fn description(&self) -> &'static str {
        match self {
            FrequencyCode::Stat => "Immediately",
            FrequencyCode::Od => "once daily",
            FrequencyCode::Hs => "Night only",
            FrequencyCode::Bd => "Twice daily",
            FrequencyCode::Tid => "8th hourly",
            FrequencyCode::Qid => "6th hourly",
            FrequencyCode::Q4h => "4th hourly",
            FrequencyCode::Qod => "Alternate day",
            FrequencyCode::Qwk => "Once a week",
        }
    }
}

impl fmt::Display for FrequencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrequencyCode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stat" => Ok(FrequencyCode::Stat),
            "od" => Ok(FrequencyCode::Od),
            "hs" => Ok(FrequencyCode::Hs),
            "bd" => Ok(FrequencyCode::Bd),
            "tid" => Ok(FrequencyCode::Tid),
            "qid" => Ok(FrequencyCode::Qid),
            "q4h" => Ok(FrequencyCode::Q4h),
            "qod" => Ok(FrequencyCode::Qod),
            "qwk" => Ok(FrequencyCode::Qwk),
            _ => Err(UnknownVariant::new("frequency code", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_wire_form() {
        for code in FrequencyCode::ALL {
            assert_eq!(code.as_str().parse::<FrequencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(FrequencyCode::Stat.description(), "Immediately");
        assert_eq!(FrequencyCode::Od.description(), "once daily");
        assert_eq!(FrequencyCode::Bd.description(), "Twice daily");
        assert_eq!(FrequencyCode::Qwk.description(), "Once a week");
    }

    #[test]
    fn test_serde_uses_wire_form() {
        assert_eq!(serde_json::to_string(&FrequencyCode::Stat).unwrap(), "\"Stat\"");
        assert_eq!(serde_json::to_string(&FrequencyCode::Bd).unwrap(), "\"bd\"");
        let back: FrequencyCode = serde_json::from_str("\"q4h\"").unwrap();
        assert_eq!(back, FrequencyCode::Q4h);
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("q6h".parse::<FrequencyCode>().is_err());
    }
}
