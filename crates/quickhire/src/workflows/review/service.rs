use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use super::aggregate::{aggregate, DiversityReport};
use super::classify::{experience_tier, salary_of};
use super::domain::{Candidate, CandidateId};
use super::extraction::{ExtractionError, FilterExtractor};
use super::filter::{apply, paginate, FilterSpec};
use super::search::SearchPipeline;
use super::status::{StatusBoard, StatusCounts};
use super::store::CandidateStore;

/// Controller owning all mutable review state: the status board, the
/// committed filter specification, the current page, and the search input
/// pipeline. Consumers read through the views below; nothing else holds
/// session state.
///
/// There is one logical writer (the request handler driving a recruiter's
/// actions); the mutex exists so the service can sit behind an `Arc` in an
/// HTTP server, not to coordinate concurrent writers.
pub struct ReviewService<X> {
    store: CandidateStore,
    extractor: Arc<X>,
    session: Mutex<ReviewSession>,
    extraction_in_flight: AtomicBool,
}

#[derive(Debug)]
struct ReviewSession {
    board: StatusBoard,
    spec: FilterSpec,
    page: usize,
    search: SearchPipeline,
}

impl ReviewSession {
    fn new(search: SearchPipeline) -> Self {
        Self {
            board: StatusBoard::new(),
            spec: FilterSpec::default(),
            page: 1,
            search,
        }
    }

    fn commit_search(&mut self, text: String) {
        if self.spec.search != text {
            self.spec.search = text;
            self.page = 1;
        }
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("unknown candidate id: {0}")]
    UnknownCandidate(CandidateId),
    #[error("an extraction request is already in flight")]
    ExtractionBusy,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl<X> ReviewService<X>
where
    X: FilterExtractor,
{
    pub fn new(store: CandidateStore, extractor: Arc<X>) -> Self {
        Self::with_search_pipeline(store, extractor, SearchPipeline::default())
    }

    pub fn with_quiet_period(
        store: CandidateStore,
        extractor: Arc<X>,
        quiet_period: Duration,
    ) -> Self {
        Self::with_search_pipeline(store, extractor, SearchPipeline::new(quiet_period))
    }

    fn with_search_pipeline(
        store: CandidateStore,
        extractor: Arc<X>,
        search: SearchPipeline,
    ) -> Self {
        info!(candidates = store.len(), "candidate store loaded");
        Self {
            store,
            extractor,
            session: Mutex::new(ReviewSession::new(search)),
            extraction_in_flight: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Evaluate the committed spec and return the requested page. Pending
    /// search input whose quiet period has elapsed is committed first.
    pub fn browse(&self, now: DateTime<Utc>) -> BrowseView {
        let mut session = self.lock_session();
        if let Some(text) = session.search.commit_due(now) {
            session.commit_search(text);
        }

        let filtered = apply(self.store.candidates(), &session.spec, &session.board);
        let page = paginate(&filtered, session.page);

        BrowseView {
            candidates: page
                .items
                .iter()
                .map(|candidate| CandidateView::build(candidate, &session.board))
                .collect(),
            page: page.number,
            total_pages: page.total_pages,
            total_matches: page.total_matches,
            total_candidates: self.store.len(),
            counts: session.board.counts(),
        }
    }

    pub fn filters(&self) -> FilterSpec {
        self.lock_session().spec.clone()
    }

    /// Replace the committed spec. The page resets to 1 so a shrunk result
    /// set cannot leave the session pointing past its end.
    pub fn set_filters(&self, spec: FilterSpec) {
        let mut session = self.lock_session();
        session.spec = spec;
        session.page = 1;
    }

    /// Restore the initial empty spec, clear pending search input, and
    /// return to page 1.
    pub fn reset_filters(&self) {
        let mut session = self.lock_session();
        session.spec = FilterSpec::default();
        session.page = 1;
        session.search.flush();
    }

    pub fn set_page(&self, page: usize) {
        self.lock_session().page = page.max(1);
    }

    /// Stage a keystroke's worth of search input; it commits after the quiet
    /// period, on the next `browse`.
    pub fn type_search(&self, text: impl Into<String>, now: DateTime<Utc>) {
        self.lock_session().search.submit(text, now);
    }

    /// Commit a search term immediately (explicit submit).
    pub fn search_now(&self, text: impl Into<String>, now: DateTime<Utc>) {
        let mut session = self.lock_session();
        session.search.submit(text, now);
        if let Some(text) = session.search.flush() {
            session.commit_search(text);
        }
    }

    pub fn add_to_shortlist(&self, id: &CandidateId) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::add_to_shortlist)
    }

    pub fn remove_from_shortlist(
        &self,
        id: &CandidateId,
    ) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::remove_from_shortlist)
    }

    pub fn add_to_final_selection(
        &self,
        id: &CandidateId,
    ) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::add_to_final_selection)
    }

    pub fn remove_from_final_selection(
        &self,
        id: &CandidateId,
    ) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::remove_from_final_selection)
    }

    pub fn add_to_rejected(&self, id: &CandidateId) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::add_to_rejected)
    }

    pub fn remove_from_rejected(
        &self,
        id: &CandidateId,
    ) -> Result<StatusView, ReviewServiceError> {
        self.transition(id, StatusBoard::remove_from_rejected)
    }

    /// Upsert the selection rationale for a candidate. No status
    /// precondition beyond the id belonging to the loaded collection.
    pub fn set_selection_reason(
        &self,
        id: &CandidateId,
        reason: impl Into<String>,
    ) -> Result<StatusView, ReviewServiceError> {
        self.require_known(id)?;
        let mut session = self.lock_session();
        session.board.set_reason(id, reason);
        Ok(StatusView::build(id, &session.board))
    }

    pub fn status_of(&self, id: &CandidateId) -> Result<StatusView, ReviewServiceError> {
        self.require_known(id)?;
        let session = self.lock_session();
        Ok(StatusView::build(id, &session.board))
    }

    pub fn shortlist_view(&self) -> Vec<CandidateView> {
        let session = self.lock_session();
        self.collection_view(session.board.shortlist(), &session.board)
    }

    pub fn rejected_view(&self) -> Vec<CandidateView> {
        let session = self.lock_session();
        self.collection_view(session.board.rejected(), &session.board)
    }

    pub fn selection_view(&self) -> Vec<SelectionView> {
        let session = self.lock_session();
        session
            .board
            .final_selection()
            .iter()
            .filter_map(|id| self.store.find(id))
            .map(|candidate| SelectionView {
                candidate: CandidateView::build(candidate, &session.board),
                reason: session.board.reason(&candidate.id).map(str::to_string),
            })
            .collect()
    }

    /// Diversity report over the final selection; `None` when nothing is
    /// selected yet.
    pub fn diversity(&self) -> Option<DiversityReport> {
        let session = self.lock_session();
        let selection = session
            .board
            .final_selection()
            .iter()
            .filter_map(|id| self.store.find(id));
        aggregate(selection)
    }

    pub fn counts(&self) -> StatusCounts {
        self.lock_session().board.counts()
    }

    pub fn facets(&self) -> FacetsView {
        FacetsView {
            locations: self.store.distinct_locations().to_vec(),
            skills: self.store.distinct_skills().to_vec(),
        }
    }

    /// Derive filter criteria from a free-text prompt via the extraction
    /// collaborator and merge them into the committed spec.
    ///
    /// Only one extraction may be outstanding at a time; the explicit busy
    /// flag rejects duplicate submissions because the collaborator offers no
    /// request correlation or cancellation. Filters are merged only after a
    /// fully successful, fully parsed response; any failure leaves the spec
    /// untouched.
    pub async fn extract_filters(&self, prompt: &str) -> Result<FilterSpec, ReviewServiceError> {
        if self.extraction_in_flight.swap(true, Ordering::AcqRel) {
            return Err(ReviewServiceError::ExtractionBusy);
        }

        let result = self.extractor.extract(prompt).await;
        self.extraction_in_flight.store(false, Ordering::Release);

        let extracted = result?;
        let mut session = self.lock_session();
        extracted.apply_to(&mut session.spec);
        session.page = 1;
        Ok(session.spec.clone())
    }

    fn transition(
        &self,
        id: &CandidateId,
        operation: fn(&mut StatusBoard, &CandidateId),
    ) -> Result<StatusView, ReviewServiceError> {
        self.require_known(id)?;
        let mut session = self.lock_session();
        operation(&mut session.board, id);
        Ok(StatusView::build(id, &session.board))
    }

    fn require_known(&self, id: &CandidateId) -> Result<(), ReviewServiceError> {
        if self.store.find(id).is_none() {
            return Err(ReviewServiceError::UnknownCandidate(id.clone()));
        }
        Ok(())
    }

    fn collection_view(&self, ids: &[CandidateId], board: &StatusBoard) -> Vec<CandidateView> {
        ids.iter()
            .filter_map(|id| self.store.find(id))
            .map(|candidate| CandidateView::build(candidate, board))
            .collect()
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, ReviewSession> {
        self.session.lock().expect("session mutex poisoned")
    }
}

/// A candidate decorated with its derived facts for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub name: String,
    pub location: String,
    pub email: String,
    pub skills: Vec<String>,
    pub work_availability: Vec<String>,
    pub status: &'static str,
    pub experience_tier: &'static str,
    pub salary_expectation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_education: Option<String>,
}

impl CandidateView {
    fn build(candidate: &Candidate, board: &StatusBoard) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            location: candidate.location.clone(),
            email: candidate.email.clone(),
            skills: candidate.skills.clone(),
            work_availability: candidate.work_availability.clone(),
            status: board.status_of(&candidate.id).label(),
            experience_tier: experience_tier(candidate).label(),
            salary_expectation: salary_of(candidate),
            highest_education: candidate.highest_education().map(str::to_string),
        }
    }
}

/// One page of browse results plus session totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseView {
    pub candidates: Vec<CandidateView>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub total_candidates: usize,
    pub counts: StatusCounts,
}

/// A finally-selected candidate with its rationale, when one has been set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub candidate: CandidateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a status transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub id: CandidateId,
    pub status: &'static str,
    pub counts: StatusCounts,
}

impl StatusView {
    fn build(id: &CandidateId, board: &StatusBoard) -> Self {
        Self {
            id: id.clone(),
            status: board.status_of(id).label(),
            counts: board.counts(),
        }
    }
}

/// Distinct filterable values derived from the loaded collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetsView {
    pub locations: Vec<String>,
    pub skills: Vec<String>,
}
