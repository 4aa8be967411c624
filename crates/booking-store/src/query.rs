use chrono::NaiveDate;

use crate::{ExperienceId, Slot};

/// Builder for constructing slot queries.
///
/// Results are always ordered by `(date, time)` ascending; the filters
/// narrow which slots qualify and `limit` truncates the ordered sequence.
#[derive(Debug, Clone, Default)]
pub struct SlotQuery {
    /// Filter by owning experience.
    pub experience_id: Option<ExperienceId>,

    /// Filter to slots on or after this date (inclusive).
    pub from_date: Option<NaiveDate>,

    /// Filter to slots with at least this many available spots.
    pub min_available: Option<u32>,

    /// Maximum number of slots to return.
    pub limit: Option<usize>,
}

impl SlotQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for bookable slots of an experience from `today` onwards.
    pub fn upcoming(experience_id: ExperienceId, today: NaiveDate) -> Self {
        Self {
            experience_id: Some(experience_id),
            from_date: Some(today),
            min_available: Some(1),
            limit: None,
        }
    }

    /// Filters by experience.
    pub fn experience_id(mut self, id: ExperienceId) -> Self {
        self.experience_id = Some(id);
        self
    }

    /// Filters to slots on or after this date.
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    /// Filters to slots with at least `spots` available.
    pub fn min_available(mut self, spots: u32) -> Self {
        self.min_available = Some(spots);
        self
    }

    /// Limits the number of slots returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if the slot passes every filter (ignores `limit`).
    pub fn matches(&self, slot: &Slot) -> bool {
        if let Some(id) = self.experience_id
            && slot.experience_id != id
        {
            return false;
        }
        if let Some(from) = self.from_date
            && slot.date < from
        {
            return false;
        }
        if let Some(min) = self.min_available
            && slot.available_spots < min
        {
            return false;
        }
        true
    }
}
