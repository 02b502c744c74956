use std::collections::HashMap;

use serde::Serialize;

use super::classify::experience_tier;
use super::domain::Candidate;

/// Only the most frequent skills are reported.
const TOP_SKILLS_LIMIT: usize = 10;

/// Raw frequency distributions over the final selection. Counts only, no
/// normalization; each dimension is sorted by descending count with ties in
/// first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiversityReport {
    pub locations: Vec<DimensionCount>,
    pub experience_levels: Vec<DimensionCount>,
    pub education_levels: Vec<DimensionCount>,
    pub top_skills: Vec<DimensionCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCount {
    pub value: String,
    pub count: usize,
}

/// Reduce the final selection to its diversity report. `None` when the
/// selection is empty (the empty-state view, not a zeroed report).
pub fn aggregate<'a, I>(selection: I) -> Option<DiversityReport>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut locations = FrequencyTable::default();
    let mut experience_levels = FrequencyTable::default();
    let mut education_levels = FrequencyTable::default();
    let mut skills = FrequencyTable::default();
    let mut seen_any = false;

    for candidate in selection {
        seen_any = true;

        if !candidate.location.is_empty() {
            locations.record(&candidate.location);
        }

        experience_levels.record(experience_tier(candidate).label());

        if let Some(level) = candidate.highest_education() {
            education_levels.record(level);
        }

        for skill in &candidate.skills {
            skills.record(skill);
        }
    }

    if !seen_any {
        return None;
    }

    let mut top_skills = skills.into_sorted();
    top_skills.truncate(TOP_SKILLS_LIMIT);

    Some(DiversityReport {
        locations: locations.into_sorted(),
        experience_levels: experience_levels.into_sorted(),
        education_levels: education_levels.into_sorted(),
        top_skills,
    })
}

/// Frequency counter that remembers first-encounter order so the stable
/// descending sort keeps ties in scan order.
#[derive(Debug, Default)]
struct FrequencyTable {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    fn record(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.order.push(value.to_string());
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    fn into_sorted(self) -> Vec<DimensionCount> {
        let FrequencyTable { order, counts } = self;
        let mut entries: Vec<DimensionCount> = order
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                DimensionCount { value, count }
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}
