use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{ApiError, ApprovalApi, RequestStatus};
use crate::listing::{FetchResult, FetchTicket, ListingState};
use crate::session::Session;

pub const CONFIRM_PROMPT: &str = "İşlem ERP'ye kaydedilecek. Devam etmek istiyor musunuz?";

/// Somewhere the listing state lives. Both methods return `None` once the
/// owning page has been torn down.
pub trait StateHandle: Clone + 'static {
    fn read_state<R>(&self, f: impl FnOnce(&ListingState) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut ListingState) -> R) -> Option<R>;
}

impl StateHandle for RwSignal<ListingState> {
    fn read_state<R>(&self, f: impl FnOnce(&ListingState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut ListingState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Asks the user to confirm a mutating action.
#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    Superseded,
    Unauthenticated,
    Detached,
}

impl From<FetchResult> for LoadOutcome {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Applied => Self::Loaded,
            FetchResult::Failed => Self::Failed,
            FetchResult::Superseded => Self::Superseded,
        }
    }
}

impl LoadOutcome {
    pub fn needs_login(self) -> bool {
        self == Self::Unauthenticated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The mutation succeeded; carries the result of the follow-up refetch.
    Completed(LoadOutcome),
    Declined,
    Invalid,
    Failed,
    Unavailable,
    Unauthenticated,
    Detached,
}

impl ActionOutcome {
    pub fn needs_login(self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::Completed(load) => load.needs_login(),
            _ => false,
        }
    }
}

/// Drives the purchase request list: fetching pages and running row actions
/// against the approval service.
pub struct ApprovalController<A, H> {
    api: Arc<A>,
    session: Session,
    state: H,
    page_size: u32,
}

impl<A, H: Clone> Clone for ApprovalController<A, H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            state: self.state.clone(),
            page_size: self.page_size,
        }
    }
}

impl<A: ApprovalApi, H: StateHandle> ApprovalController<A, H> {
    pub fn new(api: A, session: Session, state: H, page_size: u32) -> Self {
        Self {
            api: Arc::new(api),
            session,
            state,
            page_size,
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    /// Fetch `page` under the current filter.
    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        let Some(token) = self.session.token() else {
            return LoadOutcome::Unauthenticated;
        };
        let Some(ticket) = self.state.update_state(|s| s.begin_fetch(page)) else {
            return LoadOutcome::Detached;
        };
        self.run_fetch(&token, ticket).await
    }

    /// Change the filter and fetch its first page.
    pub async fn select_status(&self, status: RequestStatus) -> LoadOutcome {
        let Some(token) = self.session.token() else {
            return LoadOutcome::Unauthenticated;
        };
        let Some(ticket) = self.state.update_state(|s| s.select_status(status)) else {
            return LoadOutcome::Detached;
        };
        self.run_fetch(&token, ticket).await
    }

    async fn run_fetch(&self, token: &str, ticket: FetchTicket) -> LoadOutcome {
        let result = self
            .api
            .list_requests(token, ticket.status, ticket.page, self.page_size)
            .await;
        self.state
            .update_state(|s| s.finish_fetch(&ticket, result))
            .map(LoadOutcome::from)
            .unwrap_or(LoadOutcome::Detached)
    }

    pub fn edit_draft(&self, id: i64, text: String) {
        self.state.update_state(|s| s.drafts.set(id, text));
    }

    pub async fn approve(&self, id: i64, confirm: &impl Confirm) -> ActionOutcome {
        let Some((page, status)) = self.state.read_state(|s| (s.current_page, s.status)) else {
            return ActionOutcome::Detached;
        };
        if !status.allows_actions() {
            return ActionOutcome::Unavailable;
        }
        if !confirm.confirm(CONFIRM_PROMPT).await {
            return ActionOutcome::Declined;
        }
        let Some(token) = self.session.token() else {
            return ActionOutcome::Unauthenticated;
        };

        log::info!("Approving request {}", id);
        match self.api.approve(&token, id).await {
            Ok(()) => ActionOutcome::Completed(self.load_page(page).await),
            Err(e) => self.fail(&e),
        }
    }

    pub async fn reject(&self, id: i64, confirm: &impl Confirm) -> ActionOutcome {
        let Some((page, status, justification)) = self.state.read_state(|s| {
            (
                s.current_page,
                s.status,
                s.drafts.justification(id).map(str::to_string),
            )
        }) else {
            return ActionOutcome::Detached;
        };
        if !status.allows_actions() {
            return ActionOutcome::Unavailable;
        }
        let Some(justification) = justification else {
            self.state.update_state(|s| s.set_error(&ApiError::Validation));
            return ActionOutcome::Invalid;
        };
        if !confirm.confirm(CONFIRM_PROMPT).await {
            return ActionOutcome::Declined;
        }
        let Some(token) = self.session.token() else {
            return ActionOutcome::Unauthenticated;
        };

        log::info!("Rejecting request {}", id);
        match self.api.reject(&token, id, &justification).await {
            Ok(()) => {
                self.state.update_state(|s| s.drafts.remove(id));
                ActionOutcome::Completed(self.load_page(page).await)
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&self, error: &ApiError) -> ActionOutcome {
        log::warn!("Action failed: {}", error);
        match self.state.update_state(|s| s.set_error(error)) {
            Some(()) => ActionOutcome::Failed,
            None => ActionOutcome::Detached,
        }
    }
}
