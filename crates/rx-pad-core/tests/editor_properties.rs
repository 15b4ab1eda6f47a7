//! Property tests for prescription list editing.

use proptest::prelude::*;

use rx_pad_core::editor::PrescriptionEditor;
use rx_pad_core::models::{DoseUnit, FrequencyCode, Route};
use rx_pad_core::suggest::{MedicineVocabulary, SuggestionSession};

/// One editing step against an arbitrary list position.
#[derive(Debug, Clone)]
enum Op {
    Append,
    Remove(usize),
    SetMedicine(usize, String),
    SetRoute(usize, Option<usize>),
    SetFrequency(usize, Option<usize>),
    SetAmount(usize, f64),
    SetUnit(usize, usize),
    SetDays(usize, i64),
    SetNotes(usize, String),
    Focus(usize),
    Blur,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Append),
        1 => any::<usize>().prop_map(Op::Remove),
        2 => (any::<usize>(), "[A-Za-z ]{0,16}").prop_map(|(i, s)| Op::SetMedicine(i, s)),
        1 => (any::<usize>(), proptest::option::of(0usize..Route::ALL.len()))
            .prop_map(|(i, r)| Op::SetRoute(i, r)),
        1 => (any::<usize>(), proptest::option::of(0usize..FrequencyCode::ALL.len()))
            .prop_map(|(i, f)| Op::SetFrequency(i, f)),
        2 => (any::<usize>(), -1000.0f64..1000.0).prop_map(|(i, a)| Op::SetAmount(i, a)),
        1 => (any::<usize>(), 0usize..DoseUnit::ALL.len()).prop_map(|(i, u)| Op::SetUnit(i, u)),
        2 => (any::<usize>(), -400i64..400).prop_map(|(i, d)| Op::SetDays(i, d)),
        1 => (any::<usize>(), "[A-Za-z ]{0,16}").prop_map(|(i, s)| Op::SetNotes(i, s)),
        1 => any::<usize>().prop_map(Op::Focus),
        1 => Just(Op::Blur),
    ]
}

/// Pick the id at a wrapped position, if the list is non-empty.
fn id_at(editor: &PrescriptionEditor, i: usize) -> Option<String> {
    if editor.is_empty() {
        None
    } else {
        Some(editor.records()[i % editor.len()].id.clone())
    }
}

proptest! {
    /// Count, numbering, uniqueness, and clamping invariants hold after
    /// every step of any operation sequence.
    #[test]
    fn list_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut editor = PrescriptionEditor::new();
        let mut expected_len = 0usize;

        for op in ops {
            match op {
                Op::Append => {
                    editor.append();
                    expected_len += 1;
                }
                Op::Remove(i) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.remove(&id).unwrap();
                        expected_len -= 1;
                    }
                }
                Op::SetMedicine(i, s) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_medicine(&id, &s).unwrap();
                    }
                }
                Op::SetRoute(i, r) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_route(&id, r.map(|r| Route::ALL[r])).unwrap();
                    }
                }
                Op::SetFrequency(i, f) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor
                            .set_frequency(&id, f.map(|f| FrequencyCode::ALL[f]))
                            .unwrap();
                    }
                }
                Op::SetAmount(i, a) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_dosage_amount(&id, &format!("{}", a)).unwrap();
                    }
                }
                Op::SetUnit(i, u) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_dosage_unit(&id, DoseUnit::ALL[u]).unwrap();
                    }
                }
                Op::SetDays(i, d) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_days(&id, &d.to_string()).unwrap();
                    }
                }
                Op::SetNotes(i, s) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.set_notes(&id, &s).unwrap();
                    }
                }
                Op::Focus(i) => {
                    if let Some(id) = id_at(&editor, i) {
                        editor.focus(&id).unwrap();
                    }
                }
                Op::Blur => editor.blur(),
            }

            prop_assert_eq!(editor.len(), expected_len);

            let mut seen = std::collections::HashSet::new();
            for (pos, record) in editor.records().iter().enumerate() {
                prop_assert_eq!(editor.display_number(&record.id), Some(pos + 1));
                prop_assert!(record.dosage.amount >= 0.0);
                prop_assert!(record.dosage.amount.is_finite());
                prop_assert!(seen.insert(record.id.clone()), "duplicate record id");
            }

            if let Some(active) = editor.active_id() {
                prop_assert!(editor.position_of(active).is_some());
            }
        }
    }

    /// Appending never disturbs existing records.
    #[test]
    fn append_preserves_existing_records(
        medicines in prop::collection::vec("[A-Za-z]{1,12}", 1..8)
    ) {
        let mut editor = PrescriptionEditor::new();
        for medicine in &medicines {
            let id = editor.append();
            editor.set_medicine(&id, medicine).unwrap();
        }
        let before = editor.records().to_vec();

        editor.append();

        prop_assert_eq!(&editor.records()[..before.len()], before.as_slice());
        prop_assert!(editor.records().last().unwrap().is_blank());
    }

    /// Removal drops exactly the addressed record and shifts the tail.
    #[test]
    fn remove_shifts_tail_by_one(
        n in 1usize..8,
        k_seed in any::<usize>()
    ) {
        let mut editor = PrescriptionEditor::new();
        for _ in 0..n {
            editor.append();
        }
        let before = editor.records().to_vec();
        let k = k_seed % n;

        editor.remove(&before[k].id).unwrap();

        prop_assert_eq!(editor.len(), n - 1);
        for (j, record) in editor.records().iter().enumerate() {
            let expected = if j < k { &before[j] } else { &before[j + 1] };
            prop_assert_eq!(record, expected);
        }
    }

    /// Negative numeric input always lands on zero, never below.
    #[test]
    fn negative_input_clamps_to_zero(amount in -1.0e9f64..0.0, days in i64::MIN..0) {
        let mut editor = PrescriptionEditor::new();
        let id = editor.append();

        editor.set_dosage_amount(&id, &format!("{}", amount)).unwrap();
        editor.set_days(&id, &days.to_string()).unwrap();

        let record = editor.get(&id).unwrap();
        prop_assert_eq!(record.dosage.amount, 0.0);
        prop_assert_eq!(record.days, 0);
    }

    /// A unit change never alters the stored amount.
    #[test]
    fn unit_change_keeps_amount(amount in 0.0f64..1.0e6, u in 0usize..DoseUnit::ALL.len()) {
        let mut editor = PrescriptionEditor::new();
        let id = editor.append();
        editor.set_dosage_amount(&id, &format!("{}", amount)).unwrap();

        editor.set_dosage_unit(&id, DoseUnit::ALL[u]).unwrap();

        let record = editor.get(&id).unwrap();
        prop_assert_eq!(record.dosage.amount, amount);
        prop_assert_eq!(record.dosage.unit, DoseUnit::ALL[u]);
    }

    /// Every vocabulary search hit contains the query, case-insensitively.
    #[test]
    fn search_hits_contain_query(query in "[a-z]{1,6}") {
        let vocabulary = MedicineVocabulary::bundled().unwrap();
        for hit in vocabulary.search(&query, 50) {
            prop_assert!(hit.to_lowercase().contains(&query));
        }
    }

    /// Whatever the completion order, the session never exposes results of a
    /// superseded query.
    #[test]
    fn session_never_keeps_stale_results(complete_old_first in any::<bool>()) {
        let mut session = SuggestionSession::new();
        let old = session.begin("p");
        let new = session.begin("pa");

        let old_results = vec!["Pantoprazole".to_string()];
        let new_results = vec!["Paracetamol".to_string()];

        if complete_old_first {
            session.complete(old.seq, old_results.clone());
            session.complete(new.seq, new_results.clone());
        } else {
            session.complete(new.seq, new_results.clone());
            session.complete(old.seq, old_results);
        }

        prop_assert_eq!(session.current(), new_results.as_slice());
    }
}
