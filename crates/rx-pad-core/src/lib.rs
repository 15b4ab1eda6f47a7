//! Rx-Pad Core Library
//!
//! Embeddable prescription-entry core for clinical UIs.
//!
//! # Architecture
//!
//! ```text
//! Host UI (autocomplete field, dropdowns, tooltip renderer)
//!      │ input events                        ▲ full-list snapshots
//!      ▼                                     │
//! ┌─────────────────────────────────────────────────────────┐
//! │                 PrescriptionPad (FFI)                   │
//! │                                                         │
//! │   PrescriptionEditor ── ordered records, stable ids     │
//! │   MedicineVocabulary ── bundled name list, search       │
//! │   SuggestionSession  ── stale-response guard            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Every edit is synchronous and total.** The host forwards one input
//! event at a time and re-reads the whole record list afterwards; no edit
//! can leave the list half-updated.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PrescriptionRecord, Dosage, Route, FrequencyCode)
//! - [`editor`]: Ordered-list editing keyed by stable record ids
//! - [`suggest`]: Medicine vocabulary search with staleness-guarded lookups

pub mod editor;
pub mod models;
pub mod suggest;

// Re-export commonly used types
pub use editor::{EditorError, PrescriptionEditor};
pub use models::{
    Dosage, DoseUnit, FrequencyCode, LegacyPrescription, PrescriptionRecord, Route,
};
pub use suggest::{MedicineVocabulary, QueryTicket, SuggestionSession, SuggestionSource};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::str::FromStr;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum RxPadError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Vocabulary error: {0}")]
    VocabularyError(String),
}

impl From<EditorError> for RxPadError {
    fn from(e: EditorError) -> Self {
        match e {
            EditorError::UnknownRecord(_) => RxPadError::NotFound(e.to_string()),
            EditorError::InvalidNumber(_) => RxPadError::InvalidInput(e.to_string()),
        }
    }
}

impl From<suggest::SuggestError> for RxPadError {
    fn from(e: suggest::SuggestError) -> Self {
        RxPadError::VocabularyError(e.to_string())
    }
}

impl From<models::UnknownVariant> for RxPadError {
    fn from(e: models::UnknownVariant) -> Self {
        RxPadError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for RxPadError {
    fn from(e: serde_json::Error) -> Self {
        RxPadError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RxPadError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        RxPadError::InvalidInput(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a pad with an empty prescription list.
#[uniffi::export]
pub fn new_prescription_pad() -> Result<Arc<PrescriptionPad>, RxPadError> {
    PrescriptionPad::with_editor(PrescriptionEditor::new())
}

/// Create a pad seeded with host-held records.
#[uniffi::export]
pub fn load_prescription_pad(
    records: Vec<FfiPrescriptionRecord>,
) -> Result<Arc<PrescriptionPad>, RxPadError> {
    let records = records
        .into_iter()
        .map(PrescriptionRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    PrescriptionPad::with_editor(PrescriptionEditor::with_records(records))
}

/// Create a pad from prescriptions stored in the historical JSON shape.
#[uniffi::export]
pub fn import_legacy_prescriptions(json: String) -> Result<Arc<PrescriptionPad>, RxPadError> {
    let legacy: Vec<LegacyPrescription> = serde_json::from_str(&json)?;
    let records = legacy.into_iter().map(PrescriptionRecord::from).collect();
    PrescriptionPad::with_editor(PrescriptionEditor::with_records(records))
}

// =========================================================================
// Static Option Lists (dropdown data for the host widgets)
// =========================================================================

/// Route options for the route dropdown.
#[uniffi::export]
pub fn route_options() -> Vec<String> {
    Route::ALL.iter().map(|r| r.to_string()).collect()
}

/// Dose unit options for the unit dropdown.
#[uniffi::export]
pub fn unit_options() -> Vec<String> {
    DoseUnit::ALL.iter().map(|u| u.to_string()).collect()
}

/// Frequency options with their tooltip descriptions.
#[uniffi::export]
pub fn frequency_options() -> Vec<FfiFrequencyOption> {
    FrequencyCode::ALL
        .iter()
        .map(|f| FfiFrequencyOption {
            code: f.to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe prescription pad wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PrescriptionPad {
    editor: Mutex<PrescriptionEditor>,
    vocabulary: MedicineVocabulary,
    suggestions: Mutex<SuggestionSession>,
}

impl PrescriptionPad {
    fn with_editor(editor: PrescriptionEditor) -> Result<Arc<Self>, RxPadError> {
        let vocabulary = MedicineVocabulary::bundled()?;
        Ok(Arc::new(Self {
            editor: Mutex::new(editor),
            vocabulary,
            suggestions: Mutex::new(SuggestionSession::new()),
        }))
    }
}

#[uniffi::export]
impl PrescriptionPad {
    // =========================================================================
    // Record List
    // =========================================================================

    /// Current record list, in display order. Hosts re-read this after each
    /// edit; the returned snapshot is the entire list, never a delta.
    pub fn records(&self) -> Result<Vec<FfiPrescriptionRecord>, RxPadError> {
        let editor = self.editor.lock()?;
        Ok(editor.records().iter().cloned().map(Into::into).collect())
    }

    pub fn record_count(&self) -> Result<u32, RxPadError> {
        let editor = self.editor.lock()?;
        Ok(editor.len() as u32)
    }

    /// Append one empty record; returns its id.
    pub fn append_record(&self) -> Result<String, RxPadError> {
        let mut editor = self.editor.lock()?;
        Ok(editor.append())
    }

    /// Remove a record; later records shift down one display position.
    pub fn remove_record(&self, id: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.remove(&id)?;
        Ok(())
    }

    /// Display heading for a record, e.g. `"Prescription No. 1"`.
    pub fn display_heading(&self, id: String) -> Result<Option<String>, RxPadError> {
        let editor = self.editor.lock()?;
        Ok(editor.display_heading(&id))
    }

    // =========================================================================
    // Field Edits
    // =========================================================================

    pub fn set_medicine(&self, id: String, medicine: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.set_medicine(&id, &medicine)?;
        Ok(())
    }

    /// Set the route; `None` or an empty string clears it.
    pub fn set_route(&self, id: String, route: Option<String>) -> Result<(), RxPadError> {
        let route = parse_optional(route.as_deref(), Route::from_str)?;
        let mut editor = self.editor.lock()?;
        editor.set_route(&id, route)?;
        Ok(())
    }

    /// Set the dosing frequency; `None` or an empty string clears it.
    pub fn set_frequency(&self, id: String, frequency: Option<String>) -> Result<(), RxPadError> {
        let frequency = parse_optional(frequency.as_deref(), FrequencyCode::from_str)?;
        let mut editor = self.editor.lock()?;
        editor.set_frequency(&id, frequency)?;
        Ok(())
    }

    /// Change the dosage unit, keeping the amount.
    pub fn set_dosage_unit(&self, id: String, unit: String) -> Result<(), RxPadError> {
        let unit = DoseUnit::from_str(&unit)?;
        let mut editor = self.editor.lock()?;
        editor.set_dosage_unit(&id, unit)?;
        Ok(())
    }

    /// Set the dosage amount from raw field input. Invalid input is
    /// rejected; negative values clamp to zero.
    pub fn set_dosage_amount(&self, id: String, raw: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.set_dosage_amount(&id, &raw)?;
        Ok(())
    }

    /// Set the treatment duration from raw field input. Invalid input is
    /// rejected; negative values clamp to zero.
    pub fn set_days(&self, id: String, raw: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.set_days(&id, &raw)?;
        Ok(())
    }

    pub fn set_notes(&self, id: String, notes: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.set_notes(&id, &notes)?;
        Ok(())
    }

    // =========================================================================
    // Focus Tracking
    // =========================================================================

    /// Mark a record as holding input focus (highlight styling only).
    pub fn focus(&self, id: String) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.focus(&id)?;
        Ok(())
    }

    /// Clear the focus highlight.
    pub fn blur(&self) -> Result<(), RxPadError> {
        let mut editor = self.editor.lock()?;
        editor.blur();
        Ok(())
    }

    /// Id of the record currently holding focus, if any.
    pub fn active_record_id(&self) -> Result<Option<String>, RxPadError> {
        let editor = self.editor.lock()?;
        Ok(editor.active_id().map(String::from))
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Synchronous suggestion lookup against the bundled vocabulary.
    pub fn suggest_medicines(&self, query: String, limit: u32) -> Result<Vec<String>, RxPadError> {
        let mut session = self.suggestions.lock()?;
        Ok(session.resolve(&self.vocabulary, &query, limit as usize)?)
    }

    /// Issue a ticket for an asynchronous lookup, superseding earlier
    /// tickets. The host completes it with [`Self::complete_suggestion_query`].
    pub fn begin_suggestion_query(&self, query: String) -> Result<u64, RxPadError> {
        let mut session = self.suggestions.lock()?;
        Ok(session.begin(&query).seq)
    }

    /// Complete an asynchronous lookup. Returns `false` when the ticket was
    /// superseded and the response was discarded.
    pub fn complete_suggestion_query(
        &self,
        seq: u64,
        results: Vec<String>,
    ) -> Result<bool, RxPadError> {
        let mut session = self.suggestions.lock()?;
        Ok(session.complete(seq, results))
    }

    /// Results of the newest completed lookup.
    pub fn current_suggestions(&self) -> Result<Vec<String>, RxPadError> {
        let session = self.suggestions.lock()?;
        Ok(session.current().to_vec())
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Export the list as JSON in the historical field layout.
    pub fn export_legacy_json(&self) -> Result<String, RxPadError> {
        let editor = self.editor.lock()?;
        let legacy: Vec<LegacyPrescription> =
            editor.records().iter().map(|r| r.to_legacy()).collect();
        Ok(serde_json::to_string(&legacy)?)
    }
}

/// Parse an optional wire value; empty strings count as cleared.
fn parse_optional<T, E: Into<RxPadError>>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<Option<T>, RxPadError> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(s) => parse(s).map(Some).map_err(Into::into),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe frequency option: dropdown entry plus tooltip text.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFrequencyOption {
    pub code: String,
    pub description: String,
}

/// FFI-safe prescription record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescriptionRecord {
    pub id: String,
    pub medicine: String,
    pub route: Option<String>,
    pub frequency: Option<String>,
    pub dosage_amount: f64,
    pub dosage_unit: String,
    /// Pre-formatted `"<amount> <unit>"` display string
    pub dosage_display: String,
    pub days: u32,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PrescriptionRecord> for FfiPrescriptionRecord {
    fn from(record: PrescriptionRecord) -> Self {
        Self {
            id: record.id,
            medicine: record.medicine,
            route: record.route.map(|r| r.to_string()),
            frequency: record.frequency.map(|f| f.to_string()),
            dosage_amount: record.dosage.amount,
            dosage_unit: record.dosage.unit.to_string(),
            dosage_display: record.dosage.to_string(),
            days: record.days,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl TryFrom<FfiPrescriptionRecord> for PrescriptionRecord {
    type Error = RxPadError;

    fn try_from(record: FfiPrescriptionRecord) -> Result<Self, Self::Error> {
        let route = parse_optional(record.route.as_deref(), Route::from_str)?;
        let frequency = parse_optional(record.frequency.as_deref(), FrequencyCode::from_str)?;
        let unit = DoseUnit::from_str(&record.dosage_unit)?;

        let mut result = PrescriptionRecord::new();
        if !record.id.is_empty() {
            result.id = record.id;
        }
        if !record.created_at.is_empty() {
            result.created_at = record.created_at;
        }
        if !record.updated_at.is_empty() {
            result.updated_at = record.updated_at;
        }
        result.medicine = record.medicine;
        result.route = route;
        result.frequency = frequency;
        result.dosage = Dosage::new(record.dosage_amount, unit);
        result.days = record.days;
        result.notes = record.notes;
        Ok(result)
    }
}
