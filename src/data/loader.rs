use std::io::Cursor;
use std::time::Duration;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt8Type,
};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::dates::{from_excel_serial, parse_date_text};
use super::error::LoadError;
use super::model::{Cell, Column, Row, Table};
use super::source::{Format, Source};

pub const DEFAULT_SHEET: &str = "Inventory";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Worksheet to read from workbook sources. Ignored for other formats.
    pub sheet: String,
    /// HTTP timeout; `None` keeps the client's default.
    pub timeout: Option<Duration>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            timeout: None,
        }
    }
}

/// Non-fatal observations made while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 1-based data row numbers whose Date could not be parsed.
    pub malformed_dates: Vec<usize>,
    /// Rows with every cell empty, dropped before coercion.
    pub blank_rows_skipped: usize,
    /// No row has a usable date, so the date filter cannot select anything.
    pub dates_disabled: bool,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and validate an inventory table.
pub fn load(source: &Source, options: &LoadOptions) -> Result<Table, LoadError> {
    load_with_report(source, options).map(|(table, _)| table)
}

/// Like [`load`], also returning what was degraded along the way.
pub fn load_with_report(
    source: &Source,
    options: &LoadOptions,
) -> Result<(Table, LoadReport), LoadError> {
    let bytes = source.fetch(options.timeout)?;
    let (table, report) = load_bytes(bytes, Format::detect(source), options, &source.to_string())?;
    log::info!("Loaded {} inventory rows from {source}", table.len());
    Ok((table, report))
}

/// Parse already-fetched bytes. `location` only labels errors.
pub fn load_bytes(
    bytes: Vec<u8>,
    format: Format,
    options: &LoadOptions,
    location: &str,
) -> Result<(Table, LoadReport), LoadError> {
    let raw = match format {
        Format::Workbook => read_workbook(bytes, &options.sheet, location)?,
        Format::Csv => read_csv(&bytes, location)?,
        Format::Json => read_json(&bytes, location)?,
        Format::Parquet => read_parquet(bytes, location)?,
    };
    build_table(raw)
}

// ---------------------------------------------------------------------------
// Raw sheet: header row + untyped cells, common to every format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Positions of the required columns within a [`RawSheet`].
struct Layout {
    date: usize,
    description: usize,
    category: usize,
    quantity: usize,
    uom: usize,
    price: usize,
    vendor: usize,
}

impl Layout {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let mut missing = Vec::new();
        let mut find = |column: Column| {
            let pos = headers.iter().position(|h| h.trim() == column.name());
            if pos.is_none() {
                missing.push(column.name().to_string());
            }
            pos.unwrap_or(0)
        };

        let layout = Layout {
            date: find(Column::Date),
            description: find(Column::ItemDescription),
            category: find(Column::Category),
            quantity: find(Column::Quantity),
            uom: find(Column::Uom),
            price: find(Column::Price),
            vendor: find(Column::Vendor),
        };

        if missing.is_empty() {
            Ok(layout)
        } else {
            Err(LoadError::SchemaInvalid { missing })
        }
    }
}

static EMPTY: Cell = Cell::Empty;

fn cell_at(cells: &[Cell], idx: usize) -> &Cell {
    cells.get(idx).unwrap_or(&EMPTY)
}

/// Validate the schema, fill defaults and coerce every row.
pub fn build_table(raw: RawSheet) -> Result<(Table, LoadReport), LoadError> {
    let layout = Layout::resolve(&raw.headers)?;
    let mut report = LoadReport::default();
    let mut rows = Vec::with_capacity(raw.rows.len());

    for (i, cells) in raw.rows.iter().enumerate() {
        if cells.iter().all(Cell::is_blank) {
            report.blank_rows_skipped += 1;
            continue;
        }
        let row_no = i + 1;

        let date_cell = cell_at(cells, layout.date);
        let date = coerce_date(date_cell);
        if date.is_none() && !date_cell.is_blank() {
            log::debug!("Row {row_no}: unparseable date '{date_cell}'");
            report.malformed_dates.push(row_no);
        }

        rows.push(Row {
            date,
            description: text_or(cell_at(cells, layout.description), ""),
            category: text_or(cell_at(cells, layout.category), "Unknown"),
            quantity: integer_or_zero(cell_at(cells, layout.quantity)),
            uom: text_or(cell_at(cells, layout.uom), "N/A"),
            price: integer_or_zero(cell_at(cells, layout.price)),
            vendor: text_or(cell_at(cells, layout.vendor), "Unknown"),
        });
    }

    let table = Table::new(rows);
    report.dates_disabled = !table.summary().has_dates();

    if !report.malformed_dates.is_empty() {
        log::warn!(
            "{} row(s) have an unparseable Date and will not match a date filter",
            report.malformed_dates.len()
        );
    }
    if report.blank_rows_skipped > 0 {
        log::warn!("Skipped {} blank row(s)", report.blank_rows_skipped);
    }
    if report.dates_disabled && !table.is_empty() {
        log::warn!("No row has a valid Date; date filtering is disabled");
    }

    Ok((table, report))
}

fn text_or(cell: &Cell, default: &str) -> String {
    if cell.is_blank() {
        default.to_string()
    } else {
        cell.to_string()
    }
}

fn integer_or_zero(cell: &Cell) -> i64 {
    match cell {
        Cell::Integer(i) => *i,
        Cell::Float(f) if f.is_finite() => f.trunc() as i64,
        Cell::Text(s) => parse_integer_text(s).unwrap_or(0),
        _ => 0,
    }
}

fn parse_integer_text(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn coerce_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => parse_date_text(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Workbook reader (xlsx / xlsm / xlsb / xls / ods)
// ---------------------------------------------------------------------------

fn read_workbook(bytes: Vec<u8>, sheet: &str, location: &str) -> Result<RawSheet, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| LoadError::unavailable(location, e.to_string()))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(LoadError::unavailable(
            location,
            format!("worksheet '{sheet}' not found (available: {})", names.join(", ")),
        ));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| LoadError::unavailable(location, e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|c| workbook_cell(c).to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        // `as_datetime` honours the workbook's 1900/1904 date system.
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date())
            .or_else(|| from_excel_serial(dt.as_f64()))
            .map(Cell::Date)
            .unwrap_or(Cell::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_date_text(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(bytes: &[u8], location: &str) -> Result<RawSheet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| LoadError::unavailable(location, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::unavailable(location, e))?;
        rows.push(record.iter().map(guess_cell).collect());
    }

    Ok(RawSheet { headers, rows })
}

fn guess_cell(s: &str) -> Cell {
    let t = s.trim();
    if t.is_empty() {
        return Cell::Empty;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = t.parse::<f64>() {
        if f.is_finite() {
            return Cell::Float(f);
        }
    }
    Cell::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`:
///
/// ```json
/// [{ "Date": "2025-01-04", "Item Description": "Rice", "Quantity": 40, ... }]
/// ```
fn read_json(bytes: &[u8], location: &str) -> Result<RawSheet, LoadError> {
    let root: JsonValue =
        serde_json::from_slice(bytes).map_err(|e| LoadError::unavailable(location, e))?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::unavailable(location, "expected a top-level JSON array"))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| {
            LoadError::unavailable(location, format!("record {i} is not a JSON object"))
        })?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    Ok(RawSheet { headers, rows })
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Empty,
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by Pandas (`df.to_parquet()`) and Polars.
fn read_parquet(bytes: Vec<u8>, location: &str) -> Result<RawSheet, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes::Bytes::from(bytes))
        .map_err(|e| LoadError::unavailable(location, e))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| LoadError::unavailable(location, e))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| LoadError::unavailable(location, e))?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| arrow_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawSheet { headers, rows })
}

fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        DataType::Int8 => Cell::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => Cell::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => Cell::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Cell::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => Cell::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => Cell::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::Float32 => Cell::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map(Cell::Date)
            .unwrap_or(Cell::Empty),
        DataType::Date64 => col
            .as_primitive::<Date64Type>()
            .value_as_date(row)
            .map(Cell::Date)
            .unwrap_or(Cell::Empty),
        // Timestamps, decimals, etc. go through their display form.
        _ => arrow::util::display::array_value_to_string(col, row)
            .map(Cell::Text)
            .unwrap_or(Cell::Empty),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Date,Item Description,Category,Quantity,UOM,Price,Vendor";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn load_csv_text(text: &str) -> Result<(Table, LoadReport), LoadError> {
        load_bytes(
            text.as_bytes().to_vec(),
            Format::Csv,
            &LoadOptions::default(),
            "test.csv",
        )
    }

    enum W {
        S(&'static str),
        N(f64),
        Blank,
    }

    fn workbook_bytes(sheet: &str, header: &[&str], rows: &[Vec<W>]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name(sheet).unwrap();
        for (c, h) in header.iter().enumerate() {
            ws.write_string(0, c as u16, *h).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32 + 1, c as u16);
                match cell {
                    W::S(s) => {
                        ws.write_string(r, c, *s).unwrap();
                    }
                    W::N(n) => {
                        ws.write_number(r, c, *n).unwrap();
                    }
                    W::Blank => {}
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    const ALL: [&str; 7] = [
        "Date",
        "Item Description",
        "Category",
        "Quantity",
        "UOM",
        "Price",
        "Vendor",
    ];

    #[test]
    fn csv_missing_vendor_is_schema_invalid() {
        let err = load_csv_text("Date,Item Description,Category,Quantity,UOM,Price\n").unwrap_err();
        match err {
            LoadError::SchemaInvalid { missing } => assert_eq!(missing, vec!["Vendor"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_invalid_lists_all_missing_in_order() {
        let err = load_csv_text("Vendor,Item Description,Quantity\n").unwrap_err();
        match err {
            LoadError::SchemaInvalid { missing } => {
                assert_eq!(missing, vec!["Date", "Category", "UOM", "Price"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_quantity_and_na_price_become_zero() {
        let text = format!("{HEADER}\n2025-01-04,Rice,Grocery,,KG,N/A,Acme\n");
        let (table, _) = load_csv_text(&text).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.quantity, 0);
        assert_eq!(row.price, 0);
    }

    #[test]
    fn garbage_date_is_absent_and_reported() {
        let text = format!(
            "{HEADER}\nyesterday-ish,Rice,Grocery,4,KG,100,Acme\n2025-01-04,Oil,Grocery,2,L,300,Beta\n"
        );
        let (table, report) = load_csv_text(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].date, None);
        assert_eq!(table.rows()[1].date, Some(ymd(2025, 1, 4)));
        assert_eq!(report.malformed_dates, vec![1]);
        assert!(!report.dates_disabled);
    }

    #[test]
    fn all_dates_absent_disables_date_filtering() {
        let text = format!("{HEADER}\n??,Rice,Grocery,4,KG,100,Acme\n,Oil,Grocery,2,L,300,Beta\n");
        let (table, report) = load_csv_text(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert!(report.dates_disabled);
        assert_eq!(report.malformed_dates, vec![1]);
    }

    #[test]
    fn defaults_fill_missing_text() {
        let text = format!("{HEADER}\n2025-01-04,Rice,, 3 ,  ,12.9,\n");
        let (table, _) = load_csv_text(&text).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.category, "Unknown");
        assert_eq!(row.uom, "N/A");
        assert_eq!(row.vendor, "Unknown");
        assert_eq!(row.quantity, 3);
        assert_eq!(row.price, 12);
    }

    #[test]
    fn short_and_blank_rows() {
        let text = format!("{HEADER}\n,,,,,,\n2025-01-04,Rice\n");
        let (table, report) = load_csv_text(&text).unwrap();
        assert_eq!(report.blank_rows_skipped, 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].vendor, "Unknown");
        assert_eq!(table.rows()[0].quantity, 0);
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let text = "Vendor,Price,UOM,Quantity,Category,Item Description,Date,Notes\n\
                    Acme,10,KG,5,Grocery,Rice,2025-01-04,fresh\n";
        let (table, _) = load_csv_text(text).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.vendor, "Acme");
        assert_eq!(row.description, "Rice");
        assert_eq!(row.price, 10);
    }

    #[test]
    fn workbook_is_read_from_named_sheet() {
        let bytes = workbook_bytes(
            "Inventory",
            &ALL,
            &[
                vec![
                    W::S("2025-02-01"),
                    W::S("Milk"),
                    W::S("Dairy"),
                    W::N(12.0),
                    W::S("L"),
                    W::N(250.0),
                    W::S("Acme"),
                ],
                vec![
                    W::S("garbage"),
                    W::S("Eggs"),
                    W::Blank,
                    W::S(""),
                    W::Blank,
                    W::S("N/A"),
                    W::S("Beta"),
                ],
            ],
        );
        let (table, report) =
            load_bytes(bytes, Format::Workbook, &LoadOptions::default(), "stock.xlsx").unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.date, Some(ymd(2025, 2, 1)));
        assert_eq!(first.quantity, 12);
        assert_eq!(first.price, 250);

        let second = &table.rows()[1];
        assert_eq!(second.date, None);
        assert_eq!(second.category, "Unknown");
        assert_eq!(second.uom, "N/A");
        assert_eq!(second.quantity, 0);
        assert_eq!(second.price, 0);
        assert_eq!(report.malformed_dates, vec![2]);
    }

    #[test]
    fn workbook_date_cells_follow_date_system() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let serial = |is_1904| ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, is_1904);

        let cell_1900 = Data::DateTime(serial(false));
        assert_eq!(workbook_cell(&cell_1900), Cell::Date(ymd(2024, 1, 1)));

        // Serial 0 in the 1904 system is 1904-01-01, 1462 days after the 1900 epoch.
        let cell_1904 = Data::DateTime(serial(true));
        let expected = from_excel_serial(45292.0 + 1462.0).map(Cell::Date);
        assert_eq!(Some(workbook_cell(&cell_1904)), expected);
        assert_ne!(workbook_cell(&cell_1904), workbook_cell(&cell_1900));
    }

    #[test]
    fn workbook_without_sheet_is_source_unavailable() {
        let bytes = workbook_bytes("Sheet1", &ALL, &[]);
        let err = load_bytes(bytes, Format::Workbook, &LoadOptions::default(), "stock.xlsx")
            .unwrap_err();
        match err {
            LoadError::SourceUnavailable { source, .. } => {
                assert!(source.to_string().contains("Inventory"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn workbook_missing_vendor_is_schema_invalid() {
        let bytes = workbook_bytes("Inventory", &ALL[..6], &[]);
        let err = load_bytes(bytes, Format::Workbook, &LoadOptions::default(), "stock.xlsx")
            .unwrap_err();
        assert!(matches!(err, LoadError::SchemaInvalid { ref missing } if missing == &["Vendor"]));
    }

    #[test]
    fn corrupt_workbook_is_source_unavailable() {
        let err = load_bytes(
            b"definitely not a zip".to_vec(),
            Format::Workbook,
            &LoadOptions::default(),
            "stock.xlsx",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn json_records() {
        let text = r#"[
            {"Date": "2025-01-04", "Item Description": "Rice", "Category": "Grocery",
             "Quantity": 40, "UOM": "KG", "Price": 99.5, "Vendor": "Acme"},
            {"Date": null, "Item Description": "Salt", "Category": null,
             "Quantity": "x", "UOM": "KG", "Price": 10, "Vendor": "Beta"}
        ]"#;
        let (table, _) = load_bytes(
            text.as_bytes().to_vec(),
            Format::Json,
            &LoadOptions::default(),
            "stock.json",
        )
        .unwrap();
        assert_eq!(table.rows()[0].price, 99);
        assert_eq!(table.rows()[1].date, None);
        assert_eq!(table.rows()[1].category, "Unknown");
        assert_eq!(table.rows()[1].quantity, 0);
    }

    #[test]
    fn json_must_be_an_array() {
        let err = load_bytes(
            b"{\"Date\": 1}".to_vec(),
            Format::Json,
            &LoadOptions::default(),
            "stock.json",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }

    #[test]
    fn parquet_columns() {
        let schema = Arc::new(Schema::new(
            ALL.iter()
                .map(|name| match *name {
                    "Date" => Field::new(*name, DataType::Date32, true),
                    "Quantity" | "Price" => Field::new(*name, DataType::Int64, true),
                    _ => Field::new(*name, DataType::Utf8, true),
                })
                .collect::<Vec<_>>(),
        ));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(vec![Some(20000), None])),
                Arc::new(StringArray::from(vec![Some("Rice"), Some("Salt")])),
                Arc::new(StringArray::from(vec![Some("Grocery"), None])),
                Arc::new(Int64Array::from(vec![Some(7), None])),
                Arc::new(StringArray::from(vec![Some("KG"), Some("KG")])),
                Arc::new(Int64Array::from(vec![Some(120), Some(30)])),
                Arc::new(StringArray::from(vec![Some("Acme"), Some("Beta")])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(Vec::new(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        let bytes = writer.into_inner().unwrap();

        let (table, report) =
            load_bytes(bytes, Format::Parquet, &LoadOptions::default(), "stock.parquet").unwrap();
        let epoch = ymd(1970, 1, 1);
        assert_eq!(
            table.rows()[0].date,
            epoch.checked_add_days(chrono::Days::new(20000))
        );
        assert_eq!(table.rows()[0].quantity, 7);
        assert_eq!(table.rows()[1].quantity, 0);
        assert_eq!(table.rows()[1].category, "Unknown");
        assert!(report.malformed_dates.is_empty());
    }

    #[test]
    fn load_reads_local_csv_file() {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        writeln!(tmp, "2025-01-04,Rice,Grocery,10,KG,100,Acme").unwrap();
        writeln!(tmp, "2025-01-05,Oil,Grocery,500,L,300,Acme").unwrap();
        writeln!(tmp, "2025-01-06,Salt,Grocery,1200,KG,20,Beta").unwrap();

        let source = Source::Path(tmp.path().to_path_buf());
        let table = load(&source, &LoadOptions::default()).unwrap();
        let quantities: Vec<i64> = table.rows().iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![10, 500, 1200]);
    }

    #[test]
    fn load_of_missing_file_is_source_unavailable() {
        let source = Source::Path("/definitely/not/here/stock.xlsx".into());
        let err = load(&source, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }
}
