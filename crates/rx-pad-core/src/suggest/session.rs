//! Staleness guard for suggestion lookups.
//!
//! Each keystroke issues a ticket with a monotonically increasing sequence
//! number. A completion is installed only when it belongs to the most
//! recently issued ticket; responses for superseded tickets are discarded,
//! so an out-of-order arrival can never overwrite newer results.

use tracing::debug;

use super::{SuggestResult, SuggestionSource};

/// Ticket identifying one suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    /// Sequence number; higher supersedes lower
    pub seq: u64,
    /// The query text the ticket was issued for
    pub query: String,
}

/// Tracks in-flight suggestion lookups and the newest completed results.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSession {
    next_seq: u64,
    latest_seq: Option<u64>,
    completed_seq: Option<u64>,
    current: Vec<String>,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new lookup, superseding all earlier tickets.
    pub fn begin(&mut self, query: &str) -> QueryTicket {
        self.next_seq += 1;
        self.latest_seq = Some(self.next_seq);
        QueryTicket {
            seq: self.next_seq,
            query: query.to_string(),
        }
    }

    /// Install results for a completed lookup.
    ///
    /// Returns `false` and keeps the existing results when the ticket is not
    /// the most recently issued one.
    pub fn complete(&mut self, seq: u64, results: Vec<String>) -> bool {
        if self.latest_seq != Some(seq) {
            debug!(seq, latest = ?self.latest_seq, "discarding stale suggestion response");
            return false;
        }
        self.completed_seq = Some(seq);
        self.current = results;
        true
    }

    /// Results of the newest completed lookup.
    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// True when the newest ticket has completed (or none was issued).
    pub fn is_settled(&self) -> bool {
        self.latest_seq == self.completed_seq
    }

    /// Synchronous path: issue a ticket and complete it from `source` in one
    /// step.
    pub fn resolve<S: SuggestionSource>(
        &mut self,
        source: &S,
        query: &str,
        limit: usize,
    ) -> SuggestResult<Vec<String>> {
        let ticket = self.begin(query);
        let results = source.fetch(query, limit)?;
        self.complete(ticket.seq, results.clone());
        Ok(results)
    }

    /// Drop results and invalidate outstanding tickets (e.g. on field blur).
    pub fn clear(&mut self) {
        self.latest_seq = None;
        self.completed_seq = None;
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::MedicineVocabulary;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_latest_completion_accepted() {
        let mut session = SuggestionSession::new();
        let ticket = session.begin("para");
        assert!(session.complete(ticket.seq, names(&["Paracetamol"])));
        assert_eq!(session.current(), names(&["Paracetamol"]).as_slice());
        assert!(session.is_settled());
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut session = SuggestionSession::new();
        let old = session.begin("p");
        let new = session.begin("pa");

        // The older response arrives late and must not win
        assert!(!session.complete(old.seq, names(&["Pantoprazole"])));
        assert!(session.current().is_empty());
        assert!(!session.is_settled());

        assert!(session.complete(new.seq, names(&["Paracetamol"])));
        assert_eq!(session.current(), names(&["Paracetamol"]).as_slice());
    }

    #[test]
    fn test_out_of_order_arrival_keeps_newer_results() {
        let mut session = SuggestionSession::new();
        let old = session.begin("c");
        let new = session.begin("ce");

        assert!(session.complete(new.seq, names(&["Cetirizine"])));
        assert!(!session.complete(old.seq, names(&["Cefixime", "Cetirizine"])));
        assert_eq!(session.current(), names(&["Cetirizine"]).as_slice());
    }

    #[test]
    fn test_clear_invalidates_outstanding_tickets() {
        let mut session = SuggestionSession::new();
        let ticket = session.begin("para");
        session.clear();

        assert!(!session.complete(ticket.seq, names(&["Paracetamol"])));
        assert!(session.current().is_empty());
    }

    #[test]
    fn test_resolve_synchronous_path() {
        let vocabulary = MedicineVocabulary::from_names(names(&["Paracetamol", "Tramadol"]));
        let mut session = SuggestionSession::new();

        let results = session.resolve(&vocabulary, "para", 10).unwrap();
        assert_eq!(results, names(&["Paracetamol"]));
        assert_eq!(session.current(), results.as_slice());
        assert!(session.is_settled());
    }

    #[test]
    fn test_tickets_carry_query_text() {
        let mut session = SuggestionSession::new();
        let ticket = session.begin("ibu");
        assert_eq!(ticket.query, "ibu");
        assert_eq!(ticket.seq, 1);
        assert_eq!(session.begin("ibup").seq, 2);
    }
}
