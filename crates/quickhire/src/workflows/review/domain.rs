use serde::{Deserialize, Serialize};

/// Identifier wrapper for loaded candidates. Assigned once at load time and
/// stable for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate as it appears in the source dataset, before an id is assigned.
///
/// Every field is optional in the source data; absent fields deserialize to
/// their empty form so that downstream classification stays total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default)]
    pub annual_salary_expectation: Option<SalaryExpectation>,
    #[serde(default)]
    pub work_availability: Vec<String>,
}

/// A loaded candidate. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub skills: Vec<String>,
    pub education: Option<Education>,
    pub work_experiences: Vec<WorkExperience>,
    pub annual_salary_expectation: Option<SalaryExpectation>,
    pub work_availability: Vec<String>,
}

impl Candidate {
    pub fn from_record(id: CandidateId, record: CandidateRecord) -> Self {
        Self {
            id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            location: record.location,
            skills: record.skills,
            education: record.education,
            work_experiences: record.work_experiences,
            annual_salary_expectation: record.annual_salary_expectation,
            work_availability: record.work_availability,
        }
    }

    /// Highest attained education level, when the dataset carries one.
    pub fn highest_education(&self) -> Option<&str> {
        self.education
            .as_ref()
            .and_then(|education| education.highest_level.as_deref())
            .filter(|level| !level.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub highest_level: Option<String>,
    #[serde(default)]
    pub degrees: Vec<DegreeRecord>,
}

/// Display-only degree detail; never filtered on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegreeRecord {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

/// A single work-experience entry. Only the count of entries feeds the
/// experience tier; the content is display-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default, rename = "roleName")]
    pub role_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryExpectation {
    #[serde(default, rename = "full-time")]
    pub full_time: Option<String>,
    #[serde(default, rename = "part-time")]
    pub part_time: Option<String>,
}

/// Derived, mutually exclusive review status. Never stored; computed from
/// collection membership with rejected > selected > shortlisted > available
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Available,
    Shortlisted,
    Selected,
    Rejected,
}

impl CandidateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Available => "available",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Selected => "selected",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

/// Fixed education-level vocabulary used by the filter specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's Degree")]
    Bachelors,
    #[serde(rename = "Master's Degree")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelors => "Bachelor's Degree",
            EducationLevel::Masters => "Master's Degree",
            EducationLevel::Phd => "PhD",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "High School" => Some(Self::HighSchool),
            "Bachelor's Degree" => Some(Self::Bachelors),
            "Master's Degree" => Some(Self::Masters),
            "PhD" => Some(Self::Phd),
            _ => None,
        }
    }
}

/// Status dimension of the filter specification. A closed vocabulary: only
/// the three stored collections can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[serde(rename = "Final Selected")]
    FinalSelected,
    #[serde(rename = "Shortlisted")]
    Shortlisted,
    #[serde(rename = "Rejected")]
    Rejected,
}

impl StatusFilter {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Final Selected" => Some(Self::FinalSelected),
            "Shortlisted" => Some(Self::Shortlisted),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}
