use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use inventory_dashboard::data::{
    filter, load_with_report, Column, LoadReport, Predicates, Source, Table,
};
use inventory_dashboard::Config;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Last successfully loaded table (None until a load succeeds).
    pub table: Option<Table>,

    /// Current filter selections.
    pub predicates: Predicates,

    /// Rows passing the current predicates.
    pub visible: Table,

    /// Date picker value; only applied while `date_filter_on`.
    pub picked_date: NaiveDate,
    pub date_filter_on: bool,

    pub category_colors: Option<ColorMap>,

    /// Encoded logo image, if one is configured and could be read.
    pub logo: Option<Arc<[u8]>>,

    /// Error from the last load attempt, shown in the top bar.
    pub status_message: Option<String>,

    /// Non-fatal problems from the last successful table load.
    pub warnings: Vec<String>,

    /// Set when the configured logo could not be read on the last attempt.
    pub logo_warning: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let predicates = Predicates {
            empty_date: config.filters.empty_date,
            ..Predicates::default()
        };
        Self {
            config,
            table: None,
            predicates,
            visible: Table::default(),
            picked_date: chrono::Local::now().date_naive(),
            date_filter_on: false,
            category_colors: None,
            logo: None,
            status_message: None,
            warnings: Vec::new(),
            logo_warning: None,
        }
    }

    /// Load the table from the configured source, then the logo.
    pub fn load_configured(&mut self) {
        let location = self.config.source.data.clone();
        self.load_location(&location);
        self.load_logo();
    }

    /// Load a table from a path or URL. On failure the previous table stays.
    pub fn load_location(&mut self, location: &str) {
        let options = self.config.source.load_options();
        let result = Source::parse(location).and_then(|src| load_with_report(&src, &options));
        match result {
            Ok((table, report)) => self.set_table(table, report),
            Err(e) => {
                log::error!("Failed to load {location}: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn load_logo(&mut self) {
        self.logo_warning = None;
        let Some(location) = self.config.source.logo.clone() else {
            return;
        };
        let timeout = self.config.source.load_options().timeout;
        match Source::parse(&location).and_then(|src| src.fetch(timeout)) {
            Ok(bytes) => self.logo = Some(bytes.into()),
            Err(e) => {
                log::warn!("Logo not available: {e}");
                self.logo = None;
                self.logo_warning = Some(format!("Logo not available: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and reset every control to "show all".
    pub fn set_table(&mut self, table: Table, report: LoadReport) {
        self.warnings.clear();
        if !report.malformed_dates.is_empty() {
            self.warnings.push(format!(
                "{} row(s) have an invalid Date",
                report.malformed_dates.len()
            ));
        }
        if report.dates_disabled && !table.is_empty() {
            self.warnings
                .push("No valid dates found; date filter disabled".to_string());
        }

        if let Some(latest) = table.summary().dates.iter().next_back() {
            self.picked_date = *latest;
        }
        self.category_colors = Some(ColorMap::new(&table.summary().categories));
        self.predicates = self.fresh_predicates(&table);
        self.date_filter_on = false;
        self.visible = table.clone();
        self.table = Some(table);
        self.status_message = None;
    }

    fn fresh_predicates(&self, table: &Table) -> Predicates {
        Predicates {
            empty_date: self.config.filters.empty_date,
            ..Predicates::for_table(table)
        }
    }

    /// Whether the date control can be used for the current table.
    pub fn dates_available(&self) -> bool {
        self.table
            .as_ref()
            .is_some_and(|t| t.summary().has_dates())
    }

    /// Recompute `visible` after a control change.
    pub fn refilter(&mut self) {
        self.predicates.date = (self.date_filter_on && self.dates_available())
            .then_some(self.picked_date);
        if let Some(table) = &self.table {
            self.visible = filter(table, &self.predicates);
        }
    }

    pub fn reset_filters(&mut self) {
        if let Some(table) = &self.table {
            self.predicates = self.fresh_predicates(table);
        }
        self.date_filter_on = false;
        self.refilter();
    }

    fn choices_mut(&mut self, column: Column) -> Option<&mut BTreeSet<String>> {
        match column {
            Column::Category => Some(&mut self.predicates.categories),
            Column::Uom => Some(&mut self.predicates.uoms),
            Column::Vendor => Some(&mut self.predicates.vendors),
            _ => None,
        }
    }

    /// Toggle a single value in a multi-select column.
    pub fn toggle_choice(&mut self, column: Column, value: &str) {
        if let Some(selected) = self.choices_mut(column) {
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
            self.refilter();
        }
    }

    /// Clear a multi-select column back to "all".
    pub fn clear_choices(&mut self, column: Column) {
        if let Some(selected) = self.choices_mut(column) {
            selected.clear();
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use inventory_dashboard::data::Row;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> Table {
        let row = |date, vendor: &str, quantity| Row {
            date,
            description: "Rice".into(),
            category: "Grocery".into(),
            quantity,
            uom: "KG".into(),
            price: 100,
            vendor: vendor.into(),
        };
        Table::new(vec![
            row(Some(ymd(2025, 1, 4)), "Acme", 10),
            row(None, "Acme", 500),
            row(Some(ymd(2025, 1, 6)), "Beta", 1200),
        ])
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(Config::default());
        state.set_table(table(), LoadReport::default());
        state
    }

    #[test]
    fn set_table_seeds_ranges_and_shows_everything() {
        let state = loaded();
        assert_eq!(state.predicates.quantity, Some(10..=1200));
        assert_eq!(state.predicates.price, Some(100..=100));
        assert_eq!(state.visible.len(), 3);
        assert_eq!(state.picked_date, ymd(2025, 1, 6));
    }

    #[test]
    fn toggling_vendor_refilters() {
        let mut state = loaded();
        state.toggle_choice(Column::Vendor, "Beta");
        assert_eq!(state.visible.len(), 1);
        state.toggle_choice(Column::Vendor, "Beta");
        assert_eq!(state.visible.len(), 3);
        state.toggle_choice(Column::Quantity, "10");
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn date_filter_only_applies_when_enabled() {
        let mut state = loaded();
        state.picked_date = ymd(2025, 1, 4);
        state.refilter();
        assert_eq!(state.visible.len(), 3);

        state.date_filter_on = true;
        state.refilter();
        assert_eq!(state.visible.len(), 1);

        state.reset_filters();
        assert!(!state.date_filter_on);
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn date_filter_ignored_without_dates() {
        let mut state = AppState::new(Config::default());
        let report = LoadReport {
            dates_disabled: true,
            ..LoadReport::default()
        };
        let mut rows = table().rows().to_vec();
        rows.iter_mut().for_each(|r| r.date = None);
        state.set_table(Table::new(rows), report);
        assert!(!state.dates_available());
        assert_eq!(state.warnings.len(), 1);

        state.date_filter_on = true;
        state.refilter();
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let mut state = loaded();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xlsx");
        state.load_location(&missing.to_string_lossy());
        assert!(state.status_message.is_some());
        assert_eq!(state.table.as_ref().map(Table::len), Some(3));
    }

    #[test]
    fn loads_csv_from_disk() {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "Date,Item Description,Category,Quantity,UOM,Price,Vendor").unwrap();
        writeln!(tmp, "2025-01-04,Rice,Grocery,10,KG,100,Acme").unwrap();
        writeln!(tmp, "oops,Oil,Grocery,5,L,300,Beta").unwrap();

        let mut state = AppState::new(Config::default());
        state.load_location(&tmp.path().to_string_lossy());
        assert!(state.status_message.is_none());
        assert_eq!(state.visible.len(), 2);
        assert_eq!(state.warnings, vec!["1 row(s) have an invalid Date".to_string()]);
    }

    #[test]
    fn missing_logo_is_a_warning() {
        let mut config = Config::default();
        config.source.logo = Some("/no/such/LOGO.PNG".into());
        let mut state = AppState::new(config);
        state.load_logo();
        assert!(state.logo.is_none());
        assert!(state.logo_warning.is_some());
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn repeated_failed_reloads_keep_one_logo_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.source.data = dir.path().join("missing.xlsx").to_string_lossy().into_owned();
        config.source.logo = Some(dir.path().join("LOGO.PNG").to_string_lossy().into_owned());
        let mut state = AppState::new(config);

        state.load_configured();
        state.load_configured();
        assert!(state.status_message.is_some());
        assert!(state.logo_warning.is_some());
        assert!(state.warnings.is_empty());

        std::fs::write(dir.path().join("LOGO.PNG"), b"png bytes").unwrap();
        state.load_logo();
        assert!(state.logo_warning.is_none());
        assert!(state.logo.is_some());
    }
}
