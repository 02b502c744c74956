//! Centralized classification rules.
//!
//! Experience tier and salary parsing feed three call sites (filtering,
//! display views, aggregation); keeping the derivations here guarantees they
//! can never disagree.

use serde::{Deserialize, Serialize};

use super::domain::Candidate;

const SENIOR_MIN_EXPERIENCES: usize = 5;
const MID_LEVEL_MIN_EXPERIENCES: usize = 2;

/// Derived seniority label from the work-experience count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceTier {
    #[serde(rename = "Junior")]
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
}

impl ExperienceTier {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceTier::Junior => "Junior",
            ExperienceTier::MidLevel => "Mid-level",
            ExperienceTier::Senior => "Senior",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Junior" => Some(Self::Junior),
            "Mid-level" => Some(Self::MidLevel),
            "Senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

/// Tier thresholds: 5+ experiences Senior, 2..=4 Mid-level, otherwise Junior.
/// Total over every candidate, including an empty experience list.
pub fn experience_tier(candidate: &Candidate) -> ExperienceTier {
    let count = candidate.work_experiences.len();
    if count >= SENIOR_MIN_EXPERIENCES {
        ExperienceTier::Senior
    } else if count >= MID_LEVEL_MIN_EXPERIENCES {
        ExperienceTier::MidLevel
    } else {
        ExperienceTier::Junior
    }
}

/// Annual full-time salary expectation in whole dollars.
///
/// The source strings are currency-formatted ("$117,931"); everything that is
/// not a digit is stripped before parsing. Absent or unparseable values fall
/// back to 0 rather than erroring.
pub fn salary_of(candidate: &Candidate) -> u64 {
    let Some(raw) = candidate
        .annual_salary_expectation
        .as_ref()
        .and_then(|expectation| expectation.full_time.as_deref())
    else {
        return 0;
    };

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Inclusive salary range; `max == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl SalaryRange {
    pub fn contains(&self, salary: u64) -> bool {
        salary >= self.min && self.max.map_or(true, |max| salary <= max)
    }
}

/// The six fixed salary-expectation bands offered by the filter UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalaryBand {
    #[serde(rename = "$0 - $50k")]
    UpTo50k,
    #[serde(rename = "$50k - $100k")]
    From50kTo100k,
    #[serde(rename = "$100k - $150k")]
    From100kTo150k,
    #[serde(rename = "$150k - $200k")]
    From150kTo200k,
    #[serde(rename = "$200k - $250k")]
    From200kTo250k,
    #[serde(rename = "$250k+")]
    Above250k,
}

impl SalaryBand {
    pub const fn label(self) -> &'static str {
        match self {
            SalaryBand::UpTo50k => "$0 - $50k",
            SalaryBand::From50kTo100k => "$50k - $100k",
            SalaryBand::From100kTo150k => "$100k - $150k",
            SalaryBand::From150kTo200k => "$150k - $200k",
            SalaryBand::From200kTo250k => "$200k - $250k",
            SalaryBand::Above250k => "$250k+",
        }
    }

    /// Unknown labels yield `None`: the salary dimension then imposes no
    /// constraint (an absent band always matches, never "matches nothing").
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "$0 - $50k" => Some(Self::UpTo50k),
            "$50k - $100k" => Some(Self::From50kTo100k),
            "$100k - $150k" => Some(Self::From100kTo150k),
            "$150k - $200k" => Some(Self::From150kTo200k),
            "$200k - $250k" => Some(Self::From200kTo250k),
            "$250k+" => Some(Self::Above250k),
            _ => None,
        }
    }

    pub const fn range(self) -> SalaryRange {
        match self {
            SalaryBand::UpTo50k => SalaryRange {
                min: 0,
                max: Some(50_000),
            },
            SalaryBand::From50kTo100k => SalaryRange {
                min: 50_000,
                max: Some(100_000),
            },
            SalaryBand::From100kTo150k => SalaryRange {
                min: 100_000,
                max: Some(150_000),
            },
            SalaryBand::From150kTo200k => SalaryRange {
                min: 150_000,
                max: Some(200_000),
            },
            SalaryBand::From200kTo250k => SalaryRange {
                min: 200_000,
                max: Some(250_000),
            },
            SalaryBand::Above250k => SalaryRange {
                min: 250_000,
                max: None,
            },
        }
    }
}
