use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Predicates: one optional constraint per column, combined with AND
// ---------------------------------------------------------------------------

/// What an empty date value means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDatePolicy {
    /// No restriction on Date.
    #[default]
    Unrestricted,
    /// Only rows whose Date is absent.
    AbsentOnly,
}

/// The user's current selection. `Predicates::default()` restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicates {
    /// Exact date match. Rows with an absent date never match.
    pub date: Option<NaiveDate>,
    /// Applies when `date` is `None`.
    pub empty_date: EmptyDatePolicy,
    /// Case-insensitive substring of Item Description; blank = no restriction.
    pub description: String,
    /// Set membership; an empty set means "all".
    pub categories: BTreeSet<String>,
    pub uoms: BTreeSet<String>,
    pub vendors: BTreeSet<String>,
    /// Inclusive ranges; `None` = no restriction.
    pub quantity: Option<RangeInclusive<i64>>,
    pub price: Option<RangeInclusive<i64>>,
}

impl Predicates {
    /// Predicates whose ranges span the observed bounds of `table`, so that
    /// leaving them untouched filters nothing out.
    pub fn for_table(table: &Table) -> Self {
        let summary = table.summary();
        Predicates {
            quantity: summary.quantity_bounds.map(|(lo, hi)| lo..=hi),
            price: summary.price_bounds.map(|(lo, hi)| lo..=hi),
            ..Predicates::default()
        }
    }

    /// Whether a single row passes every active predicate.
    pub fn matches(&self, row: &Row) -> bool {
        Compiled::new(self).matches(row)
    }
}

/// Predicates with the search query pre-normalised, built once per pass.
struct Compiled<'a> {
    predicates: &'a Predicates,
    needle: Option<String>,
}

impl<'a> Compiled<'a> {
    fn new(predicates: &'a Predicates) -> Self {
        let query = predicates.description.trim();
        Compiled {
            predicates,
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches(&self, row: &Row) -> bool {
        let p = self.predicates;

        let date_ok = match (p.date, p.empty_date) {
            (Some(wanted), _) => row.date == Some(wanted),
            (None, EmptyDatePolicy::Unrestricted) => true,
            (None, EmptyDatePolicy::AbsentOnly) => row.date.is_none(),
        };
        if !date_ok {
            return false;
        }

        if let Some(needle) = &self.needle {
            if !row.description.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        in_set(&p.categories, &row.category)
            && in_set(&p.uoms, &row.uom)
            && in_set(&p.vendors, &row.vendor)
            && in_range(&p.quantity, row.quantity)
            && in_range(&p.price, row.price)
    }
}

fn in_set(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn in_range(range: &Option<RangeInclusive<i64>>, value: i64) -> bool {
    range.as_ref().map_or(true, |r| r.contains(&value))
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows of `table` passing all `predicates`, in their original order.
pub fn filter(table: &Table, predicates: &Predicates) -> Table {
    let compiled = Compiled::new(predicates);
    let rows: Vec<Row> = table
        .rows()
        .iter()
        .filter(|row| compiled.matches(row))
        .cloned()
        .collect();
    log::debug!("Filter kept {} of {} rows", rows.len(), table.len());
    Table::new(rows)
}
