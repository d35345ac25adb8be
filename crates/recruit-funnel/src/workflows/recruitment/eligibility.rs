use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use super::domain::{EligibleStore, EligibleStores, OPEN_STATUS};
use super::gateway::Row;
use super::records::{StoreRosterEntry, StoreStatusEntry};

/// Store name to open date, where a later roster row replaces an earlier one.
#[derive(Debug, Default, Clone)]
pub struct OpenDateIndex {
    dates: HashMap<String, NaiveDateTime>,
}

impl OpenDateIndex {
    /// Inserts `date` for `name`, returning the date it replaced.
    pub fn insert_or_overwrite(
        &mut self,
        name: impl Into<String>,
        date: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        self.dates.insert(name.into(), date)
    }

    pub fn get(&self, name: &str) -> Option<NaiveDateTime> {
        self.dates.get(name).copied()
    }

    pub fn from_roster(entries: &[StoreRosterEntry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            if let (Some(name), Some(date)) = (&entry.name, entry.open_date) {
                index.insert_or_overwrite(name.as_str(), date);
            }
        }
        index
    }
}

/// Names whose registry status is exactly `OPEN`.
pub fn open_store_names(entries: &[StoreStatusEntry]) -> HashSet<&str> {
    entries
        .iter()
        .filter(|entry| entry.status.as_deref() == Some(OPEN_STATUS))
        .filter_map(|entry| entry.name.as_deref())
        .collect()
}

/// Cross-references the store roster with the status registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreEligibilityResolver;

impl StoreEligibilityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Eligible stores from the raw roster and registry tables (header rows included).
    pub fn resolve(&self, store_rows: &[Row], store_info_rows: &[Row]) -> EligibleStores {
        let roster = StoreRosterEntry::from_rows(store_rows);
        let statuses = StoreStatusEntry::from_rows(store_info_rows);
        self.resolve_records(&roster, &statuses)
    }

    pub fn resolve_records(
        &self,
        roster: &[StoreRosterEntry],
        statuses: &[StoreStatusEntry],
    ) -> EligibleStores {
        let open_dates = OpenDateIndex::from_roster(roster);

        open_store_names(statuses)
            .into_iter()
            .filter_map(|name| {
                open_dates
                    .get(name)
                    .map(|date| (name.to_string(), EligibleStore::new(name, date)))
            })
            .collect()
    }
}
