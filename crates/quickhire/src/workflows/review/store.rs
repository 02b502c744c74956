use std::collections::HashMap;

use chrono::Utc;

use super::domain::{Candidate, CandidateId, CandidateRecord};

/// Failure to obtain a usable candidate dataset. Fatal to the initial load;
/// callers surface an empty-state view rather than crash.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("no candidates data found")]
    Empty,
    #[error("candidate dataset is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The immutable loaded candidate collection plus the lookup sets derived
/// from it. The collection never changes after load, so the distinct value
/// sets are computed once.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
    by_id: HashMap<CandidateId, usize>,
    locations: Vec<String>,
    skills: Vec<String>,
}

impl CandidateStore {
    /// Assigns each record a per-session unique id (load timestamp, source
    /// email, monotonic index) and derives the lookup sets.
    pub fn load(records: Vec<CandidateRecord>) -> Result<Self, DatasetError> {
        let stamp = Utc::now().timestamp_millis();
        Self::load_stamped(records, stamp)
    }

    /// Parse a JSON array of candidate records and load it.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, DatasetError> {
        let records: Vec<CandidateRecord> = serde_json::from_slice(data)?;
        Self::load(records)
    }

    fn load_stamped(records: Vec<CandidateRecord>, stamp: i64) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let candidates: Vec<Candidate> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let id = CandidateId(format!("{stamp}-{}-{index:04}", record.email));
                Candidate::from_record(id, record)
            })
            .collect();

        let by_id = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| (candidate.id.clone(), index))
            .collect();

        let locations = distinct_sorted(candidates.iter().map(|c| c.location.as_str()));
        let skills = distinct_sorted(
            candidates
                .iter()
                .flat_map(|c| c.skills.iter().map(String::as_str)),
        );

        Ok(Self {
            candidates,
            by_id,
            locations,
            skills,
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn find(&self, id: &CandidateId) -> Option<&Candidate> {
        self.by_id.get(id).map(|&index| &self.candidates[index])
    }

    /// Sorted, de-duplicated, blank-filtered location values.
    pub fn distinct_locations(&self) -> &[String] {
        &self.locations
    }

    /// Sorted, de-duplicated, blank-filtered skill values.
    pub fn distinct_skills(&self) -> &[String] {
        &self.skills
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = values
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    distinct.sort();
    distinct.dedup();
    distinct
}
