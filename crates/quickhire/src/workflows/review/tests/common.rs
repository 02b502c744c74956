use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::review::domain::{
    CandidateId, CandidateRecord, Education, SalaryExpectation, WorkExperience,
};
use crate::workflows::review::extraction::{ExtractedFilters, ExtractionError, FilterExtractor};
use crate::workflows::review::router::review_router;
use crate::workflows::review::service::ReviewService;
use crate::workflows::review::store::CandidateStore;

pub(super) fn record(
    name: &str,
    location: &str,
    skills: &[&str],
    experience_count: usize,
    salary: Option<&str>,
) -> CandidateRecord {
    CandidateRecord {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0100".to_string(),
        location: location.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        education: None,
        work_experiences: (0..experience_count)
            .map(|index| WorkExperience {
                company: format!("Company {index}"),
                role_name: "Engineer".to_string(),
            })
            .collect(),
        annual_salary_expectation: salary.map(|value| SalaryExpectation {
            full_time: Some(value.to_string()),
            part_time: None,
        }),
        work_availability: vec!["full-time".to_string()],
    }
}

pub(super) fn with_education(mut record: CandidateRecord, level: &str) -> CandidateRecord {
    record.education = Some(Education {
        highest_level: Some(level.to_string()),
        degrees: Vec::new(),
    });
    record
}

pub(super) fn with_availability(
    mut record: CandidateRecord,
    availability: &[&str],
) -> CandidateRecord {
    record.work_availability = availability.iter().map(|value| value.to_string()).collect();
    record
}

/// Five candidates spanning every tier, plus an all-fields-absent record.
pub(super) fn sample_records() -> Vec<CandidateRecord> {
    vec![
        with_education(
            record(
                "Alice Chen",
                "New York",
                &["React", "JavaScript"],
                5,
                Some("$120,000"),
            ),
            "Master's Degree",
        ),
        with_availability(
            with_education(
                record("Bob Osei", "San Francisco", &["Go", "Rust"], 2, Some("$95,000")),
                "Bachelor's Degree",
            ),
            &["full-time", "part-time"],
        ),
        with_availability(
            with_education(
                record("Carol Diaz", "New York", &["Python"], 1, Some("$45,000")),
                "PhD",
            ),
            &["part-time"],
        ),
        CandidateRecord::default(),
        with_education(
            record(
                "Erin Walsh",
                "Austin",
                &["React", "Go"],
                7,
                Some("$250,000"),
            ),
            "High School",
        ),
    ]
}

pub(super) fn build_store() -> CandidateStore {
    CandidateStore::load(sample_records()).expect("sample dataset loads")
}

pub(super) fn id_at(store: &CandidateStore, index: usize) -> CandidateId {
    store.candidates()[index].id.clone()
}

pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Scripted extractor so service and router tests never touch the network.
#[derive(Default)]
pub(super) struct StubExtractor {
    next: Mutex<Option<Result<ExtractedFilters, ExtractionError>>>,
}

impl StubExtractor {
    pub(super) fn returning(result: Result<ExtractedFilters, ExtractionError>) -> Self {
        Self {
            next: Mutex::new(Some(result)),
        }
    }
}

#[async_trait]
impl FilterExtractor for StubExtractor {
    async fn extract(&self, _prompt: &str) -> Result<ExtractedFilters, ExtractionError> {
        self.next
            .lock()
            .expect("stub mutex poisoned")
            .take()
            .unwrap_or_else(|| Ok(ExtractedFilters::default()))
    }
}

pub(super) fn build_service() -> ReviewService<StubExtractor> {
    ReviewService::new(build_store(), Arc::new(StubExtractor::default()))
}

pub(super) fn build_service_with(extractor: StubExtractor) -> ReviewService<StubExtractor> {
    ReviewService::new(build_store(), Arc::new(extractor))
}

pub(super) fn review_router_with_service(
    service: ReviewService<StubExtractor>,
) -> (axum::Router, Arc<ReviewService<StubExtractor>>) {
    let service = Arc::new(service);
    (review_router(service.clone()), service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
