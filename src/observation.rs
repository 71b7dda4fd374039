//! Daily temperature observations and the date ranges they are scraped over.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// One calendar day's temperature summary. `None` means "not measured".
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}

impl Observation {
    /// True when at least one of the three temperatures was measured.
    pub fn has_measurement(&self) -> bool {
        self.min_temp.is_some() || self.max_temp.is_some() || self.avg_temp.is_some()
    }
}

/// Observations from one acquisition run, keyed by date.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObservationSet {
    observations: BTreeMap<NaiveDate, Observation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an observation, replacing any earlier one for the same date.
    pub fn insert(&mut self, observation: Observation) {
        self.observations.insert(observation.date, observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.values()
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut set = ObservationSet::new();
        for observation in iter {
            set.insert(observation);
        }
        set
    }
}

/// Inclusive date interval to acquire in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScrapeRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        ScrapeRange {
            start_date,
            end_date,
        }
    }

    /// A range whose start lies after its end covers nothing; running it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }
}

// -- Tests -------------------------------------------------------------------
