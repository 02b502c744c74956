use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use quickhire::config::AiConfig;
use quickhire::workflows::review::{
    CandidateStore, ExperienceTier, ExtractionError, FilterSpec, GeminiExtractor, ReviewService,
    ReviewServiceError, SalaryBand,
};

const DATASET: &str = r#"[
    {
        "name": "Priya Raman",
        "email": "priya@example.com",
        "location": "New York",
        "skills": ["React", "TypeScript"],
        "education": { "highest_level": "Master's Degree" },
        "work_experiences": [
            { "company": "A" }, { "company": "B" }, { "company": "C" },
            { "company": "D" }, { "company": "E" }
        ],
        "annual_salary_expectation": { "full-time": "$145,000" },
        "work_availability": ["full-time"]
    },
    {
        "name": "Jonas Weber",
        "email": "jonas@example.com",
        "location": "Berlin",
        "skills": ["Rust", "Go"],
        "education": { "highest_level": "Bachelor's Degree" },
        "work_experiences": [{ "company": "A" }, { "company": "B" }],
        "annual_salary_expectation": { "full-time": "$110,000" },
        "work_availability": ["full-time", "part-time"]
    },
    {
        "name": "Mei Lin",
        "email": "mei@example.com",
        "location": "New York",
        "skills": ["Python", "React"],
        "work_experiences": [{ "company": "A" }],
        "annual_salary_expectation": { "full-time": "$85,000" },
        "work_availability": ["part-time"]
    },
    {
        "name": "Sam Ortiz",
        "email": "sam@example.com",
        "location": "Austin",
        "skills": [],
        "work_experiences": [],
        "work_availability": []
    }
]"#;

fn build_service() -> ReviewService<GeminiExtractor> {
    let store = CandidateStore::from_json_slice(DATASET.as_bytes()).expect("dataset loads");
    let extractor = Arc::new(GeminiExtractor::new(&AiConfig::disabled()));
    ReviewService::new(store, extractor)
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn full_review_session_from_dataset_to_diversity_report() {
    let service = build_service();

    // Facets reflect the loaded dataset.
    let facets = service.facets();
    assert_eq!(facets.locations, ["Austin", "Berlin", "New York"]);

    // A recruiter types a search; it commits after the quiet period.
    service.type_search("react", now());
    let view = service.browse(now() + Duration::milliseconds(250));
    assert_eq!(view.total_matches, 2);

    // Narrow further by salary band.
    let mut spec = service.filters();
    spec.salary_expectation = Some(SalaryBand::From100kTo150k);
    service.set_filters(spec);
    let view = service.browse(now() + Duration::seconds(1));
    assert_eq!(view.total_matches, 1);
    assert_eq!(view.candidates[0].name, "Priya Raman");

    // Move candidates through the pipeline.
    let ids: Vec<_> = service
        .store()
        .candidates()
        .iter()
        .map(|candidate| candidate.id.clone())
        .collect();

    service.add_to_final_selection(&ids[0]).expect("priya known");
    service
        .set_selection_reason(&ids[0], "led the strongest system design round")
        .expect("priya known");
    service.add_to_final_selection(&ids[2]).expect("mei known");
    service.add_to_shortlist(&ids[1]).expect("jonas known");
    service.add_to_rejected(&ids[3]).expect("sam known");

    let counts = service.counts();
    assert_eq!(counts.selected, 2);
    assert_eq!(counts.shortlisted, 3);
    assert_eq!(counts.rejected, 1);

    // The diversity report reflects only the final selection.
    let report = service.diversity().expect("report builds");
    assert_eq!(report.locations[0].value, "New York");
    assert_eq!(report.locations[0].count, 2);
    assert_eq!(report.top_skills[0].value, "React");
    assert_eq!(report.top_skills[0].count, 2);
    assert_eq!(report.education_levels.len(), 1, "absent education excluded");

    // Rejecting a selected candidate cascades everywhere.
    service.add_to_rejected(&ids[0]).expect("priya known");
    let selection = service.selection_view();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].candidate.name, "Mei Lin");

    // Reset and confirm the original order returns.
    service.reset_filters();
    let view = service.browse(now() + Duration::seconds(2));
    assert_eq!(view.total_matches, 4);
    assert_eq!(view.candidates[0].name, "Priya Raman");
    assert_eq!(view.candidates[0].status, "rejected");
}

#[test]
fn zero_experience_candidate_counts_as_junior_everywhere() {
    let service = build_service();
    let sam = service.store().candidates()[3].id.clone();

    service.set_filters(FilterSpec {
        experience_level: Some(ExperienceTier::Junior),
        ..FilterSpec::default()
    });
    let view = service.browse(now());
    assert!(view.candidates.iter().any(|candidate| candidate.id == sam));

    service.add_to_final_selection(&sam).expect("sam known");
    let report = service.diversity().expect("report builds");
    assert_eq!(report.experience_levels[0].value, "Junior");
    assert!(report.top_skills.is_empty());
}

#[tokio::test]
async fn extraction_without_a_credential_fails_cleanly() {
    let service = build_service();

    match service.extract_filters("senior rust engineers").await {
        Err(ReviewServiceError::Extraction(ExtractionError::MissingApiKey)) => {}
        other => panic!("expected missing key error, got {other:?}"),
    }

    // No partial filter application on failure.
    assert!(service.filters().is_empty());
}
