//! Prescription list editing.
//!
//! The editor owns the ordered record list and applies exactly one
//! synchronous edit per host input event. Records are addressed by their
//! stable id; list position is display order only and shifts when earlier
//! entries are removed.

use thiserror::Error;
use tracing::debug;

use crate::models::{DoseUnit, FrequencyCode, PrescriptionRecord, Route};

/// Editor errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("no record with id: {0}")]
    UnknownRecord(String),

    #[error("invalid numeric input: {0:?}")]
    InvalidNumber(String),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Stateful editor for an ordered prescription list.
///
/// The active record (the one whose field currently holds input focus) is
/// tracked for highlight styling only; it is not part of the record data.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionEditor {
    records: Vec<PrescriptionRecord>,
    active: Option<String>,
}

impl PrescriptionEditor {
    /// Create an editor with an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor seeded with existing records.
    pub fn with_records(records: Vec<PrescriptionRecord>) -> Self {
        Self {
            records,
            active: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current records, in display order.
    pub fn records(&self) -> &[PrescriptionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&PrescriptionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Zero-based list position of a record.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// One-based display number of a record.
    pub fn display_number(&self, id: &str) -> Option<usize> {
        self.position_of(id).map(|pos| pos + 1)
    }

    /// Display heading for a record, e.g. `"Prescription No. 1"`.
    pub fn display_heading(&self, id: &str) -> Option<String> {
        self.display_number(id)
            .map(|n| format!("Prescription No. {}", n))
    }

    // =========================================================================
    // List operations
    // =========================================================================

    /// Append one empty record; returns its id.
    pub fn append(&mut self) -> String {
        let record = PrescriptionRecord::new();
        let id = record.id.clone();
        debug!(id = %id, position = self.records.len(), "appending prescription record");
        self.records.push(record);
        id
    }

    /// Remove a record; later records shift down one display position.
    pub fn remove(&mut self, id: &str) -> EditorResult<PrescriptionRecord> {
        let position = self
            .position_of(id)
            .ok_or_else(|| EditorError::UnknownRecord(id.to_string()))?;
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        debug!(id = %id, position, "removing prescription record");
        Ok(self.records.remove(position))
    }

    /// Replace every editable field of a record. The stored id and creation
    /// timestamp are preserved: identity is not editable.
    pub fn replace(&mut self, id: &str, record: PrescriptionRecord) -> EditorResult<()> {
        self.edit(id, |slot| {
            slot.medicine = record.medicine;
            slot.route = record.route;
            slot.frequency = record.frequency;
            slot.dosage = record.dosage;
            slot.days = record.days;
            slot.notes = record.notes;
        })
    }

    // =========================================================================
    // Field operations
    // =========================================================================

    /// Set the medicine name verbatim. The vocabulary only filters
    /// suggestions; nothing is enforced at write time.
    pub fn set_medicine(&mut self, id: &str, medicine: &str) -> EditorResult<()> {
        let medicine = medicine.to_string();
        self.edit(id, |r| r.medicine = medicine)
    }

    /// Set or clear the route.
    pub fn set_route(&mut self, id: &str, route: Option<Route>) -> EditorResult<()> {
        self.edit(id, |r| r.route = route)
    }

    /// Set or clear the dosing frequency.
    pub fn set_frequency(&mut self, id: &str, frequency: Option<FrequencyCode>) -> EditorResult<()> {
        self.edit(id, |r| r.frequency = frequency)
    }

    /// Change the dosage unit, keeping the amount.
    pub fn set_dosage_unit(&mut self, id: &str, unit: DoseUnit) -> EditorResult<()> {
        self.edit(id, |r| r.dosage.unit = unit)
    }

    /// Set the dosage amount from raw field input.
    ///
    /// Input that does not parse to a finite number is rejected and the
    /// stored value is untouched; negative values clamp to zero.
    pub fn set_dosage_amount(&mut self, id: &str, raw: &str) -> EditorResult<()> {
        let amount = parse_amount(raw)?;
        self.edit(id, |r| r.dosage.amount = amount)
    }

    /// Set the treatment duration from raw field input.
    ///
    /// Input that does not parse to an integer is rejected; negative values
    /// clamp to zero.
    pub fn set_days(&mut self, id: &str, raw: &str) -> EditorResult<()> {
        let days = parse_days(raw)?;
        self.edit(id, |r| r.days = days)
    }

    /// Set the notes text verbatim.
    pub fn set_notes(&mut self, id: &str, notes: &str) -> EditorResult<()> {
        let notes = notes.to_string();
        self.edit(id, |r| r.notes = notes)
    }

    // =========================================================================
    // Focus tracking
    // =========================================================================

    /// Mark a record as holding input focus.
    pub fn focus(&mut self, id: &str) -> EditorResult<()> {
        if self.position_of(id).is_none() {
            return Err(EditorError::UnknownRecord(id.to_string()));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Clear the focus highlight.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Id of the record currently holding focus, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// True when the given record holds focus.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn record_mut(&mut self, id: &str) -> EditorResult<&mut PrescriptionRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EditorError::UnknownRecord(id.to_string()))
    }

    fn edit(&mut self, id: &str, apply: impl FnOnce(&mut PrescriptionRecord)) -> EditorResult<()> {
        let record = self.record_mut(id)?;
        apply(record);
        record.touch();
        Ok(())
    }
}

/// Parse a dosage amount from raw field input.
fn parse_amount(raw: &str) -> EditorResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| EditorError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(EditorError::InvalidNumber(raw.to_string()));
    }
    Ok(value.max(0.0))
}

/// Parse a day count from raw field input.
fn parse_days(raw: &str) -> EditorResult<u32> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| EditorError::InvalidNumber(raw.to_string()))?;
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}
