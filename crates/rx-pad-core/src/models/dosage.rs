//! Typed dosage: amount plus unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Dosage unit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DoseUnit {
    /// Milligrams
    #[default]
    #[serde(rename = "mg")]
    Mg,
    /// Grams
    #[serde(rename = "g")]
    G,
    /// Millilitres
    #[serde(rename = "ml")]
    Ml,
    /// Drops
    #[serde(rename = "drops")]
    Drops,
    /// Ampules
    #[serde(rename = "ampule")]
    Ampule,
    /// Teaspoons
    #[serde(rename = "tsp")]
    Tsp,
}

impl DoseUnit {
    /// All units, in dropdown display order.
    pub const ALL: [DoseUnit; 6] = [
        DoseUnit::Mg,
        DoseUnit::G,
        DoseUnit::Ml,
        DoseUnit::Drops,
        DoseUnit::Ampule,
        DoseUnit::Tsp,
    ];

    /// Wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::Mg => "mg",
            DoseUnit::G => "g",
            DoseUnit::Ml => "ml",
            DoseUnit::Drops => "drops",
            DoseUnit::Ampule => "ampule",
            DoseUnit::Tsp => "tsp",
        }
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoseUnit {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mg" => Ok(DoseUnit::Mg),
            "g" => Ok(DoseUnit::G),
            "ml" => Ok(DoseUnit::Ml),
            "drops" => Ok(DoseUnit::Drops),
            "ampule" => Ok(DoseUnit::Ampule),
            "tsp" => Ok(DoseUnit::Tsp),
            _ => Err(UnknownVariant::new("dose unit", s)),
        }
    }
}

/// A dosage: numeric amount plus unit.
///
/// Amount and unit are stored as separate typed fields; the delimited display
/// string (`"500 mg"`) is produced by the [`fmt::Display`] impl and never
/// parsed back inside the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dosage {
    /// Magnitude, always finite and non-negative
    pub amount: f64,
    /// Unit of measure
    pub unit: DoseUnit,
}

impl Dosage {
    /// Create a dosage. Negative or non-finite amounts collapse to zero.
    pub fn new(amount: f64, unit: DoseUnit) -> Self {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        Self { amount, unit }
    }

    /// Same amount, different unit.
    pub fn with_unit(self, unit: DoseUnit) -> Self {
        Self { unit, ..self }
    }
}

impl Default for Dosage {
    /// The historical default: `0 mg`.
    fn default() -> Self {
        Self {
            amount: 0.0,
            unit: DoseUnit::Mg,
        }
    }
}

impl fmt::Display for Dosage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}
