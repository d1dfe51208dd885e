use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Cell – a single raw value as read from the source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell produced by the format readers, before any
/// column coercion happens.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Empty cells and whitespace-only text both count as missing.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s.trim()),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed inventory schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Date,
    ItemDescription,
    Category,
    Quantity,
    Uom,
    Price,
    Vendor,
}

impl Column {
    /// Every required column, in canonical order.
    pub const ALL: [Column; 7] = [
        Column::Date,
        Column::ItemDescription,
        Column::Category,
        Column::Quantity,
        Column::Uom,
        Column::Price,
        Column::Vendor,
    ];

    /// Header name as it appears in the spreadsheet.
    pub fn name(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::ItemDescription => "Item Description",
            Column::Category => "Category",
            Column::Quantity => "Quantity",
            Column::Uom => "UOM",
            Column::Price => "Price",
            Column::Vendor => "Vendor",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Row – one inventory record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// `None` when the source value was missing or could not be parsed.
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: String,
    pub quantity: i64,
    pub uom: String,
    pub price: i64,
    pub vendor: String,
}

impl Row {
    /// Display text for one column of this row.
    pub fn display(&self, column: Column) -> String {
        match column {
            Column::Date => self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Column::ItemDescription => self.description.clone(),
            Column::Category => self.category.clone(),
            Column::Quantity => self.quantity.to_string(),
            Column::Uom => self.uom.clone(),
            Column::Price => self.price.to_string(),
            Column::Vendor => self.vendor.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary – values observed across a table, used to seed the controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Unique values in order of first appearance.
    pub categories: Vec<String>,
    pub uoms: Vec<String>,
    pub vendors: Vec<String>,
    /// Observed inclusive bounds; `None` for an empty table.
    pub quantity_bounds: Option<(i64, i64)>,
    pub price_bounds: Option<(i64, i64)>,
    /// Distinct dates that are present.
    pub dates: BTreeSet<NaiveDate>,
}

impl Summary {
    fn from_rows(rows: &[Row]) -> Self {
        let mut summary = Summary::default();
        let mut seen_categories = BTreeSet::new();
        let mut seen_uoms = BTreeSet::new();
        let mut seen_vendors = BTreeSet::new();

        for row in rows {
            if seen_categories.insert(row.category.as_str()) {
                summary.categories.push(row.category.clone());
            }
            if seen_uoms.insert(row.uom.as_str()) {
                summary.uoms.push(row.uom.clone());
            }
            if seen_vendors.insert(row.vendor.as_str()) {
                summary.vendors.push(row.vendor.clone());
            }
            summary.quantity_bounds = widen(summary.quantity_bounds, row.quantity);
            summary.price_bounds = widen(summary.price_bounds, row.price);
            if let Some(date) = row.date {
                summary.dates.insert(date);
            }
        }
        summary
    }

    /// Whether any row carries a date. When false, date filtering is degraded.
    pub fn has_dates(&self) -> bool {
        !self.dates.is_empty()
    }
}

fn widen(bounds: Option<(i64, i64)>, value: i64) -> Option<(i64, i64)> {
    match bounds {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded inventory
// ---------------------------------------------------------------------------

/// An ordered, immutable sequence of rows with a pre-computed summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    summary: Summary,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        let summary = Summary::from_rows(&rows);
        Table { rows, summary }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
