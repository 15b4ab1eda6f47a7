//! Prescription record model.

use serde::{Deserialize, Serialize};

use super::{Dosage, FrequencyCode, Route};

/// One entry in a prescription list.
///
/// Records carry a stable synthetic id generated at creation; list position
/// is display order only and shifts when earlier entries are removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionRecord {
    /// Stable record id (UUID), generated locally
    pub id: String,
    /// Medicine name, free text; the vocabulary only filters suggestions
    pub medicine: String,
    /// Route of administration
    pub route: Option<Route>,
    /// Dosing frequency
    pub frequency: Option<FrequencyCode>,
    /// Dosage amount and unit
    pub dosage: Dosage,
    /// Treatment duration in days
    pub days: u32,
    /// Free-text notes
    pub notes: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl PrescriptionRecord {
    /// Create an empty record with a fresh id: no medicine, no route, no
    /// frequency, `0 mg`, zero days, empty notes.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            medicine: String::new(),
            route: None,
            frequency: None,
            dosage: Dosage::default(),
            days: 0,
            notes: String::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// True when no field has been filled in yet.
    pub fn is_blank(&self) -> bool {
        self.medicine.is_empty()
            && self.route.is_none()
            && self.frequency.is_none()
            && self.dosage == Dosage::default()
            && self.days == 0
            && self.notes.is_empty()
    }
}

impl Default for PrescriptionRecord {
    fn default() -> Self {
        Self::new()
    }
}
