use std::collections::HashMap;

use crate::api::{ApiError, PageResponse, RequestRow, RequestStatus};

/// Rejection justifications typed into rows on the current page, by request id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RejectionDrafts(HashMap<i64, String>);

impl RejectionDrafts {
    pub fn get(&self, id: i64) -> &str {
        self.0.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, id: i64, text: String) {
        self.0.insert(id, text);
    }

    pub fn remove(&mut self, id: i64) {
        self.0.remove(&id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The draft for `id` if it has any non-whitespace content. Returned untrimmed.
    pub fn justification(&self, id: i64) -> Option<&str> {
        self.0
            .get(&id)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Identifies one issued list fetch. Only the most recent ticket's result is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub status: RequestStatus,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchResult {
    Applied,
    Failed,
    /// A newer fetch was issued while this one was in flight.
    Superseded,
}

/// Everything the purchase request list renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingState {
    pub status: RequestStatus,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub rows: Vec<RequestRow>,
    pub loading: bool,
    pub error: Option<String>,
    pub drafts: RejectionDrafts,
    latest: u64,
}

impl ListingState {
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.latest,
            status: self.status,
            page,
        }
    }

    /// Switch filter. Pagination always restarts at the first page.
    pub fn select_status(&mut self, status: RequestStatus) -> FetchTicket {
        self.status = status;
        self.current_page = 0;
        self.begin_fetch(0)
    }

    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageResponse, ApiError>,
    ) -> FetchResult {
        if ticket.seq != self.latest {
            return FetchResult::Superseded;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.total_pages = page.total_pages;
                self.total_items = page.total_items;
                self.current_page = ticket.page;
                self.drafts.clear();
                FetchResult::Applied
            }
            Err(e) => {
                self.rows.clear();
                self.error = Some(e.to_string());
                FetchResult::Failed
            }
        }
    }

    pub fn set_error(&mut self, error: &ApiError) {
        self.error = Some(error.to_string());
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    /// Never goes below the first page, even for a click on a stale button.
    pub fn previous_page(&self) -> u32 {
        self.current_page.saturating_sub(1)
    }

    pub fn next_page(&self) -> u32 {
        self.current_page.saturating_add(1)
    }

    pub fn page_label(&self) -> String {
        format!("{}/{}", self.current_page + 1, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64) -> RequestRow {
        RequestRow {
            id,
            text: format!("Talep {}", id),
            registered_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn page(ids: &[i64], current: u32, total_pages: u32) -> PageResponse {
        PageResponse {
            rows: ids.iter().copied().map(row).collect(),
            current_page: current,
            total_pages,
            total_items: ids.len() as u64,
        }
    }

    #[test]
    fn test_select_status_resets_page() {
        let mut state = ListingState {
            current_page: 4,
            total_pages: 6,
            ..Default::default()
        };
        let ticket = state.select_status(RequestStatus::Rejected);
        assert_eq!(ticket.page, 0);
        assert_eq!(ticket.status, RequestStatus::Rejected);
        assert_eq!(state.current_page, 0);
        assert!(state.loading);
    }

    #[test]
    fn test_successful_fetch_clears_drafts() {
        let mut state = ListingState::default();
        state.drafts.set(1, "eksik".into());
        state.drafts.set(2, "pahalı".into());

        let ticket = state.begin_fetch(1);
        let result = state.finish_fetch(&ticket, Ok(page(&[3, 4], 1, 3)));

        assert_eq!(result, FetchResult::Applied);
        assert!(state.drafts.is_empty());
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_pages, 3);
        assert!(!state.loading);
    }

    #[test]
    fn test_failed_fetch_keeps_page_and_clears_rows() {
        let mut state = ListingState::default();
        let ticket = state.begin_fetch(1);
        state.finish_fetch(&ticket, Ok(page(&[1, 2], 1, 3)));

        let ticket = state.begin_fetch(2);
        let result = state.finish_fetch(&ticket, Err(ApiError::Fetch { status: Some(500) }));

        assert_eq!(result, FetchResult::Failed);
        assert!(state.rows.is_empty());
        assert_eq!(state.current_page, 1);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Veriler alınamadı"));
    }

    #[test]
    fn test_new_fetch_clears_previous_error() {
        let mut state = ListingState::default();
        state.set_error(&ApiError::Validation);
        state.begin_fetch(0);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ListingState::default();
        let slow = state.begin_fetch(0);
        let fast = state.select_status(RequestStatus::Approved);

        assert_eq!(state.finish_fetch(&fast, Ok(page(&[7], 0, 1))), FetchResult::Applied);
        assert_eq!(
            state.finish_fetch(&slow, Ok(page(&[1, 2, 3], 0, 1))),
            FetchResult::Superseded
        );
        assert_eq!(state.rows, vec![row(7)]);
        assert!(!state.loading);
    }

    #[test]
    fn test_loading_stays_until_latest_fetch_finishes() {
        let mut state = ListingState::default();
        let first = state.begin_fetch(0);
        let second = state.begin_fetch(1);

        state.finish_fetch(&first, Ok(page(&[1], 0, 2)));
        assert!(state.loading);
        state.finish_fetch(&second, Ok(page(&[2], 1, 2)));
        assert!(!state.loading);
    }

    #[test]
    fn test_draft_edits_are_isolated() {
        let mut drafts = RejectionDrafts::default();
        drafts.set(1, "birinci".into());
        drafts.set(2, "ikinci".into());
        drafts.set(1, "değişti".into());
        assert_eq!(drafts.get(1), "değişti");
        assert_eq!(drafts.get(2), "ikinci");
        assert_eq!(drafts.get(3), "");

        drafts.remove(1);
        assert_eq!(drafts.get(1), "");
        assert_eq!(drafts.get(2), "ikinci");
    }

    #[test]
    fn test_justification_requires_content() {
        let mut drafts = RejectionDrafts::default();
        drafts.set(1, "   \t".into());
        drafts.set(2, " Bütçe yetersiz ".into());
        assert_eq!(drafts.justification(1), None);
        assert_eq!(drafts.justification(2), Some(" Bütçe yetersiz "));
        assert_eq!(drafts.justification(3), None);
    }

    #[test]
    fn test_pagination_controls() {
        let mut state = ListingState::default();
        let ticket = state.begin_fetch(0);
        state.finish_fetch(&ticket, Ok(page(&[5], 0, 2)));
        assert!(!state.has_previous());
        assert!(state.has_next());
        assert_eq!(state.page_label(), "1/2");

        let ticket = state.begin_fetch(1);
        state.finish_fetch(&ticket, Ok(page(&[6], 1, 2)));
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn test_previous_page_stops_at_first() {
        let mut state = ListingState::default();
        assert_eq!(state.previous_page(), 0);
        assert_eq!(state.next_page(), 1);

        state.current_page = 3;
        assert_eq!(state.previous_page(), 2);
        assert_eq!(state.next_page(), 4);
    }

    #[test]
    fn test_empty_result_has_no_navigation() {
        let mut state = ListingState::default();
        let ticket = state.begin_fetch(0);
        state.finish_fetch(&ticket, Ok(page(&[], 0, 0)));
        assert!(!state.has_previous());
        assert!(!state.has_next());
        assert!(state.rows.is_empty());
    }
}
