//! Interop with the historical prescription wire shape.
//!
//! Earlier deployments stored the frequency code in a field named `dosage`
//! and packed amount and unit into a single `dosage_new` string
//! (`"500 mg"`). This module converts between that layout and the typed
//! model, sanitizing the artifacts legacy data can carry (missing composite
//! strings, negative or unparseable magnitudes, unknown unit tokens).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Dosage, DoseUnit, FrequencyCode, PrescriptionRecord, Route};

/// A prescription in the historical field layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LegacyPrescription {
    pub medicine: Option<String>,
    pub route: Option<String>,
    /// Historically repurposed to hold the frequency code
    pub dosage: Option<String>,
    /// Composite `"<amount> <unit>"` string
    pub dosage_new: Option<String>,
    pub days: Option<f64>,
    pub notes: Option<String>,
}

impl LegacyPrescription {
    /// Convert into the typed model.
    ///
    /// Unrecognized route, frequency, or unit tokens fall back to the field
    /// defaults rather than failing: legacy stores are migrated as-is, and
    /// strict rejection applies to live edits only.
    pub fn into_record(self) -> PrescriptionRecord {
        let mut record = PrescriptionRecord::new();
        record.medicine = self.medicine.unwrap_or_default();
        record.route = self
            .route
            .as_deref()
            .and_then(|s| Route::from_str(s).ok());
        record.frequency = self
            .dosage
            .as_deref()
            .and_then(|s| FrequencyCode::from_str(s).ok());
        record.dosage = parse_composite_dosage(self.dosage_new.as_deref());
        record.days = sanitize_days(self.days);
        record.notes = self.notes.unwrap_or_default();
        record
    }
}

impl From<LegacyPrescription> for PrescriptionRecord {
    fn from(legacy: LegacyPrescription) -> Self {
        legacy.into_record()
    }
}

impl PrescriptionRecord {
    /// Export into the historical field layout.
    ///
    /// Cleared route and frequency become empty strings, matching what the
    /// previous implementation wrote.
    pub fn to_legacy(&self) -> LegacyPrescription {
        LegacyPrescription {
            medicine: Some(self.medicine.clone()),
            route: Some(self.route.map(|r| r.to_string()).unwrap_or_default()),
            dosage: Some(self.frequency.map(|f| f.to_string()).unwrap_or_default()),
            dosage_new: Some(self.dosage.to_string()),
            days: Some(f64::from(self.days)),
            notes: Some(self.notes.clone()),
        }
    }
}

/// Parse a legacy `"<amount> <unit>"` composite.
///
/// An empty or missing composite yields the historical `0 mg` default, as
/// does any magnitude token that fails to parse to a finite number.
fn parse_composite_dosage(raw: Option<&str>) -> Dosage {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Dosage::default(),
    };

    let mut tokens = raw.splitn(2, ' ');
    let amount = tokens
        .next()
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|a| a.is_finite())
        .unwrap_or(0.0);
    let unit = tokens
        .next()
        .and_then(|t| DoseUnit::from_str(t).ok())
        .unwrap_or_default();

    Dosage::new(amount, unit)
}

/// Clamp a legacy day count to a whole, non-negative number.
fn sanitize_days(days: Option<f64>) -> u32 {
    match days {
        Some(d) if d.is_finite() && d > 0.0 => d.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}
