use serde::{Deserialize, Serialize};

use super::classify::{experience_tier, salary_of, ExperienceTier, SalaryBand};
use super::domain::{Candidate, EducationLevel, StatusFilter};
use super::status::StatusBoard;

/// Number of candidates per result page.
pub const PAGE_SIZE: usize = 15;

/// The simultaneously-applied filter constraints. Empty/absent fields impose
/// no constraint from their dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub search: String,
    pub locations: Vec<String>,
    pub skills: Vec<String>,
    #[serde(rename = "educationLevel")]
    pub education_level: Option<EducationLevel>,
    #[serde(rename = "experienceLevel")]
    pub experience_level: Option<ExperienceTier>,
    #[serde(rename = "salaryExpectation")]
    pub salary_expectation: Option<SalaryBand>,
    #[serde(rename = "workAvailability")]
    pub work_availability: Option<String>,
    pub status: Option<StatusFilter>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Evaluate the spec against the collection: a stable predicate over the
/// original order, pure in the collection, the spec, and the status board.
pub fn apply<'a>(
    candidates: &'a [Candidate],
    spec: &FilterSpec,
    statuses: &StatusBoard,
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| matches(candidate, spec, statuses))
        .collect()
}

fn matches(candidate: &Candidate, spec: &FilterSpec, statuses: &StatusBoard) -> bool {
    matches_search(candidate, &spec.search)
        && matches_locations(candidate, &spec.locations)
        && matches_skills(candidate, &spec.skills)
        && matches_education(candidate, spec.education_level)
        && matches_experience(candidate, spec.experience_level)
        && matches_salary(candidate, spec.salary_expectation)
        && matches_availability(candidate, spec.work_availability.as_deref())
        && matches_status(candidate, spec.status, statuses)
}

/// Case-insensitive substring match against name, location, email, or any
/// skill.
fn matches_search(candidate: &Candidate, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    candidate.name.to_lowercase().contains(&needle)
        || candidate.location.to_lowercase().contains(&needle)
        || candidate.email.to_lowercase().contains(&needle)
        || candidate
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&needle))
}

fn matches_locations(candidate: &Candidate, locations: &[String]) -> bool {
    locations.is_empty() || locations.iter().any(|location| *location == candidate.location)
}

/// At least one requested skill present in the candidate's skill list.
fn matches_skills(candidate: &Candidate, skills: &[String]) -> bool {
    skills.is_empty()
        || skills
            .iter()
            .any(|skill| candidate.skills.iter().any(|owned| owned == skill))
}

fn matches_education(candidate: &Candidate, level: Option<EducationLevel>) -> bool {
    match level {
        None => true,
        Some(level) => candidate.highest_education() == Some(level.label()),
    }
}

fn matches_experience(candidate: &Candidate, tier: Option<ExperienceTier>) -> bool {
    match tier {
        None => true,
        Some(tier) => experience_tier(candidate) == tier,
    }
}

fn matches_salary(candidate: &Candidate, band: Option<SalaryBand>) -> bool {
    match band {
        None => true,
        Some(band) => band.range().contains(salary_of(candidate)),
    }
}

fn matches_availability(candidate: &Candidate, availability: Option<&str>) -> bool {
    match availability {
        None => true,
        Some(value) => candidate
            .work_availability
            .iter()
            .any(|owned| owned == value),
    }
}

fn matches_status(
    candidate: &Candidate,
    filter: Option<StatusFilter>,
    statuses: &StatusBoard,
) -> bool {
    match filter {
        None => true,
        Some(filter) => statuses.matches_filter(filter, &candidate.id),
    }
}

/// One page of filtered results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Candidate>,
    pub number: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Slice the filtered sequence into 1-based pages of [`PAGE_SIZE`]. Pages
/// past the end come back with an empty item list rather than an error;
/// callers reset to page 1 whenever the spec changes.
pub fn paginate<'a>(filtered: &[&'a Candidate], number: usize) -> Page<'a> {
    let number = number.max(1);
    let total_matches = filtered.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE);

    let start = (number - 1).saturating_mul(PAGE_SIZE);
    let items = if start >= total_matches {
        Vec::new()
    } else {
        filtered[start..(start + PAGE_SIZE).min(total_matches)].to_vec()
    };

    Page {
        items,
        number,
        total_pages,
        total_matches,
    }
}
