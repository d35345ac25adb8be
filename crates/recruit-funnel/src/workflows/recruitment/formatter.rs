use std::cmp::Ordering;

use chrono::NaiveDateTime;

use super::domain::{EligibleStores, OutputRow};
use super::gateway::{CellValue, Row};

pub const DATE_FORMAT: &str = "%Y/%m/%d";
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Orders store names: case-insensitive first, lowercase ahead of uppercase on a
/// fold tie, then raw code point order.
pub fn compare_store_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| {
            left.chars()
                .zip(right.chars())
                .map(|(l, r)| case_rank(l).cmp(&case_rank(r)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| left.cmp(right))
}

fn case_rank(ch: char) -> u8 {
    if ch.is_uppercase() {
        1
    } else {
        0
    }
}

/// Sorted output rows for every eligible store, all stamped with `generated_at`.
pub fn format_rows(stores: &EligibleStores, generated_at: NaiveDateTime) -> Vec<OutputRow> {
    let mut ordered: Vec<_> = stores.values().collect();
    ordered.sort_by(|left, right| {
        left.open_date
            .cmp(&right.open_date)
            .then_with(|| compare_store_names(&left.name, &right.name))
    });

    ordered
        .into_iter()
        .map(|store| OutputRow {
            generated_at,
            store_name: store.name.clone(),
            open_date: store.open_date,
            metrics: store.metrics,
        })
        .collect()
}

impl OutputRow {
    /// Cells in output-table column order.
    pub fn to_cells(&self) -> Row {
        let metrics = &self.metrics;
        vec![
            CellValue::Text(self.generated_at.format(TIMESTAMP_FORMAT).to_string()),
            CellValue::Text(self.store_name.clone()),
            CellValue::Text(self.open_date.format(DATE_FORMAT).to_string()),
            metrics.applied.into(),
            metrics.in_process.into(),
            metrics.rejected.into(),
            metrics.declined.into(),
            metrics.offer.into(),
            metrics.joined.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruitment::domain::{EligibleStore, Metrics};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn stores(entries: &[(&str, NaiveDateTime)]) -> EligibleStores {
        entries
            .iter()
            .map(|(name, date)| (name.to_string(), EligibleStore::new(*name, *date)))
            .collect()
    }

    #[test]
    fn sorts_by_open_date_then_name() {
        let stores = stores(&[
            ("Ueno", at(2024, 1, 10, 0, 0)),
            ("Shibuya", at(2024, 1, 10, 0, 0)),
            ("Akihabara", at(2024, 3, 1, 0, 0)),
            ("Meguro", at(2023, 12, 1, 0, 0)),
        ]);

        let names: Vec<_> = format_rows(&stores, at(2024, 2, 1, 9, 0))
            .into_iter()
            .map(|row| row.store_name)
            .collect();
        assert_eq!(names, vec!["Meguro", "Shibuya", "Ueno", "Akihabara"]);
    }

    #[test]
    fn every_row_shares_the_generation_timestamp() {
        let stores = stores(&[("Ueno", at(2024, 1, 10, 0, 0)), ("Shibuya", at(2024, 1, 2, 0, 0))]);
        let stamp = at(2024, 2, 1, 9, 5);
        assert!(format_rows(&stores, stamp)
            .iter()
            .all(|row| row.generated_at == stamp));
    }

    #[test]
    fn name_collation_folds_case_with_lowercase_first() {
        assert_eq!(compare_store_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_store_names("ueno", "Ueno"), Ordering::Less);
        assert_eq!(compare_store_names("Ueno", "Ueno"), Ordering::Equal);
        assert_eq!(compare_store_names("渋谷", "上野"), "渋谷".cmp("上野"));
    }

    #[test]
    fn cells_render_dates_and_counters() {
        let row = OutputRow {
            generated_at: at(2024, 2, 1, 9, 5),
            store_name: "Shibuya".to_string(),
            open_date: at(2024, 1, 10, 0, 0),
            metrics: Metrics {
                applied: 3,
                in_process: 1,
                rejected: 0,
                declined: 0,
                offer: 1,
                joined: 1,
            },
        };

        assert_eq!(
            row.to_cells(),
            vec![
                CellValue::text("2024/02/01 09:05"),
                CellValue::text("Shibuya"),
                CellValue::text("2024/01/10"),
                CellValue::Number(3.0),
                CellValue::Number(1.0),
                CellValue::Number(0.0),
                CellValue::Number(0.0),
                CellValue::Number(1.0),
                CellValue::Number(1.0),
            ]
        );
    }
}
