use std::collections::HashMap;

use serde::Serialize;

use super::domain::{CandidateId, CandidateStatus, StatusFilter};

/// Owner of the three status collections and the selection-reason map.
///
/// Collections preserve insertion order (append at the end, removal keeps the
/// relative order of the rest), are unique by id, and every transition is
/// idempotent. The derived status of a candidate is never stored; it is
/// computed on demand from membership, in precedence order.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    shortlist: Vec<CandidateId>,
    final_selection: Vec<CandidateId>,
    rejected: Vec<CandidateId>,
    reasons: HashMap<CandidateId, String>,
}

/// Precedence for the derived status when a candidate appears in several
/// collections. Checked in order; first membership wins.
const STATUS_PRECEDENCE: [CandidateStatus; 3] = [
    CandidateStatus::Rejected,
    CandidateStatus::Selected,
    CandidateStatus::Shortlisted,
];

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert into the shortlist. Leaves the other collections alone.
    pub fn add_to_shortlist(&mut self, id: &CandidateId) {
        insert_unique(&mut self.shortlist, id);
    }

    /// Remove from the shortlist. Cascades: a candidate cannot stay finally
    /// selected without being shortlisted, so the final selection entry and
    /// its reason go too.
    pub fn remove_from_shortlist(&mut self, id: &CandidateId) {
        remove(&mut self.shortlist, id);
        remove(&mut self.final_selection, id);
        self.reasons.remove(id);
    }

    /// Insert into the final selection. Cascades: final selection implies
    /// shortlisting, so the candidate is shortlisted as well if absent.
    pub fn add_to_final_selection(&mut self, id: &CandidateId) {
        insert_unique(&mut self.final_selection, id);
        insert_unique(&mut self.shortlist, id);
    }

    /// Remove from the final selection and drop the reason entry. Shortlist
    /// membership is untouched.
    pub fn remove_from_final_selection(&mut self, id: &CandidateId) {
        remove(&mut self.final_selection, id);
        self.reasons.remove(id);
    }

    /// Insert into the rejected collection. Rejection is exclusive with every
    /// other status: shortlist and final selection membership and the reason
    /// entry are all removed.
    pub fn add_to_rejected(&mut self, id: &CandidateId) {
        insert_unique(&mut self.rejected, id);
        remove(&mut self.shortlist, id);
        remove(&mut self.final_selection, id);
        self.reasons.remove(id);
    }

    /// Remove from the rejected collection only. The candidate returns to
    /// available; prior shortlist or selection membership is not restored.
    pub fn remove_from_rejected(&mut self, id: &CandidateId) {
        remove(&mut self.rejected, id);
    }

    /// Upsert the selection reason for a candidate.
    ///
    /// Deliberately permissive: there is no status precondition here. Callers
    /// normally invoke this for finally-selected candidates, and the entry is
    /// destroyed whenever the candidate leaves the final selection by any
    /// path, so a reason set outside that context does not outlive the next
    /// cascade.
    pub fn set_reason(&mut self, id: &CandidateId, reason: impl Into<String>) {
        self.reasons.insert(id.clone(), reason.into());
    }

    pub fn reason(&self, id: &CandidateId) -> Option<&str> {
        self.reasons.get(id).map(String::as_str)
    }

    /// Derived status, first match in precedence order.
    pub fn status_of(&self, id: &CandidateId) -> CandidateStatus {
        for status in STATUS_PRECEDENCE {
            if self.collection(status).iter().any(|member| member == id) {
                return status;
            }
        }
        CandidateStatus::Available
    }

    /// Membership check for the status dimension of a filter.
    pub fn matches_filter(&self, filter: StatusFilter, id: &CandidateId) -> bool {
        let collection = match filter {
            StatusFilter::FinalSelected => &self.final_selection,
            StatusFilter::Shortlisted => &self.shortlist,
            StatusFilter::Rejected => &self.rejected,
        };
        collection.iter().any(|member| member == id)
    }

    pub fn shortlist(&self) -> &[CandidateId] {
        &self.shortlist
    }

    pub fn final_selection(&self) -> &[CandidateId] {
        &self.final_selection
    }

    pub fn rejected(&self) -> &[CandidateId] {
        &self.rejected
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            shortlisted: self.shortlist.len(),
            selected: self.final_selection.len(),
            rejected: self.rejected.len(),
        }
    }

    fn collection(&self, status: CandidateStatus) -> &[CandidateId] {
        match status {
            CandidateStatus::Rejected => &self.rejected,
            CandidateStatus::Selected => &self.final_selection,
            CandidateStatus::Shortlisted => &self.shortlist,
            CandidateStatus::Available => &[],
        }
    }
}

/// Collection totals for headers and dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub shortlisted: usize,
    pub selected: usize,
    pub rejected: usize,
}

fn insert_unique(collection: &mut Vec<CandidateId>, id: &CandidateId) {
    if !collection.iter().any(|member| member == id) {
        collection.push(id.clone());
    }
}

fn remove(collection: &mut Vec<CandidateId>, id: &CandidateId) {
    collection.retain(|member| member != id);
}
