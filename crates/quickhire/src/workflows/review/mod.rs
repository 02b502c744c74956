//! Candidate review: store, classification rules, filter engine, status
//! machine, diversity aggregation, and the AI filter-extraction collaborator.

pub mod aggregate;
pub mod classify;
pub mod domain;
pub mod extraction;
pub mod filter;
pub mod router;
pub mod search;
pub mod service;
pub mod status;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, DimensionCount, DiversityReport};
pub use classify::{experience_tier, salary_of, ExperienceTier, SalaryBand, SalaryRange};
pub use domain::{
    Candidate, CandidateId, CandidateRecord, CandidateStatus, DegreeRecord, Education,
    EducationLevel, SalaryExpectation, StatusFilter, WorkExperience,
};
pub use extraction::{ExtractedFilters, ExtractionError, FilterExtractor, GeminiExtractor};
pub use filter::{apply, paginate, FilterSpec, Page, PAGE_SIZE};
pub use router::review_router;
pub use search::{SearchPipeline, DEFAULT_QUIET_MS};
pub use service::{
    BrowseView, CandidateView, FacetsView, ReviewService, ReviewServiceError, SelectionView,
    StatusView,
};
pub use status::{StatusBoard, StatusCounts};
pub use store::{CandidateStore, DatasetError};
