//! Writes a deterministic sample inventory as `.xlsx`, `.csv` and `.parquet`.
//!
//! A few rows carry deliberately messy cells (blank quantity, `N/A` price,
//! unparseable date) so the loader's fallbacks are visible in the dashboard.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Date32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Days, NaiveDate};
use clap::Parser;
use inventory_dashboard::data::Column;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::{Format, Workbook};

#[derive(Parser)]
#[command(about = "Generate sample inventory files")]
struct Args {
    /// Output directory
    #[arg(default_value = ".")]
    out_dir: PathBuf,
    /// Number of rows
    #[arg(long, default_value_t = 120)]
    rows: usize,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

/// (item, category, uom, base price)
const ITEMS: &[(&str, &str, &str, i64)] = &[
    ("Basmati Rice", "Grocery", "KG", 380),
    ("Wheat Flour", "Grocery", "KG", 140),
    ("Cooking Oil", "Grocery", "L", 560),
    ("White Sugar", "Grocery", "KG", 160),
    ("Fresh Milk", "Dairy", "L", 220),
    ("Yogurt", "Dairy", "KG", 260),
    ("Eggs", "Poultry", "DOZEN", 390),
    ("Chicken", "Poultry", "KG", 720),
    ("Red Chilli Powder", "Spices", "KG", 1800),
    ("Dish Soap", "Cleaning", "PCS", 300),
    ("Floor Cleaner", "Cleaning", "L", 650),
];

const VENDORS: &[&str] = &["Al-Madina Traders", "Metro Cash & Carry", "Nooriabad Dairy", "City Wholesale"];

/// One generated record; `None` cells are written blank.
struct Record {
    date: Option<NaiveDate>,
    garbage_date: bool,
    item: &'static str,
    category: Option<&'static str>,
    quantity: Option<i64>,
    uom: &'static str,
    price: Option<i64>,
    vendor: &'static str,
}

fn generate(n: usize) -> Vec<Record> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();

    (0..n)
        .map(|i| {
            let &(item, category, uom, base) = rng.pick(ITEMS);
            let qty = 1 + rng.below(60) as i64 * 5;
            let price = base * qty + rng.below(500) as i64;
            Record {
                date: start.checked_add_days(Days::new(rng.below(45))),
                garbage_date: i % 37 == 5,
                item,
                category: (i % 29 != 7).then_some(category),
                quantity: (i % 31 != 3).then_some(qty),
                uom,
                price: (i % 41 != 11).then_some(price),
                vendor: *rng.pick(VENDORS),
            }
        })
        .collect()
}

fn excel_serial(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (date - epoch).num_days() as f64
}

fn write_xlsx(records: &[Record], path: &PathBuf) -> Result<()> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let ws = workbook.add_worksheet();
    ws.set_name("Inventory")?;

    for (c, column) in Column::ALL.iter().enumerate() {
        ws.write_string(0, c as u16, column.name())?;
    }
    for (i, rec) in records.iter().enumerate() {
        let r = i as u32 + 1;
        match (rec.garbage_date, rec.date) {
            (true, _) => {
                ws.write_string(r, 0, "TBD")?;
            }
            (false, Some(date)) => {
                ws.write_number_with_format(r, 0, excel_serial(date), &date_format)?;
            }
            (false, None) => {}
        }
        ws.write_string(r, 1, rec.item)?;
        if let Some(category) = rec.category {
            ws.write_string(r, 2, category)?;
        }
        if let Some(qty) = rec.quantity {
            ws.write_number(r, 3, qty as f64)?;
        }
        ws.write_string(r, 4, rec.uom)?;
        match rec.price {
            Some(price) => ws.write_number(r, 5, price as f64)?,
            None => ws.write_string(r, 5, "N/A")?,
        };
        ws.write_string(r, 6, rec.vendor)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_csv(records: &[Record], path: &PathBuf) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(Column::ALL.iter().map(|c| c.name()))?;
    for rec in records {
        let date = match (rec.garbage_date, rec.date) {
            (true, _) => "TBD".to_string(),
            (false, Some(d)) => d.format("%Y-%m-%d").to_string(),
            (false, None) => String::new(),
        };
        writer.write_record([
            date,
            rec.item.to_string(),
            rec.category.unwrap_or_default().to_string(),
            rec.quantity.map(|q| q.to_string()).unwrap_or_default(),
            rec.uom.to_string(),
            rec.price.map_or_else(|| "N/A".to_string(), |p| p.to_string()),
            rec.vendor.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(records: &[Record], path: &PathBuf) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let strings = |f: fn(&Record) -> Option<&'static str>| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(
        Column::ALL
            .iter()
            .map(|c| match c {
                Column::Date => Field::new(c.name(), DataType::Date32, true),
                Column::Quantity | Column::Price => Field::new(c.name(), DataType::Int64, true),
                _ => Field::new(c.name(), DataType::Utf8, true),
            })
            .collect::<Vec<_>>(),
    ));

    let dates: Date32Array = records
        .iter()
        .map(|r| {
            r.date
                .filter(|_| !r.garbage_date)
                .map(|d| (d - epoch).num_days() as i32)
        })
        .collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(dates),
            strings(|r| Some(r.item)),
            strings(|r| r.category),
            Arc::new(records.iter().map(|r| r.quantity).collect::<Int64Array>()),
            strings(|r| Some(r.uom)),
            Arc::new(records.iter().map(|r| r.price).collect::<Int64Array>()),
            strings(|r| Some(r.vendor)),
        ],
    )?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)?;
    let records = generate(args.rows);

    let xlsx = args.out_dir.join("sample_inventory.xlsx");
    let csv = args.out_dir.join("sample_inventory.csv");
    let parquet = args.out_dir.join("sample_inventory.parquet");
    write_xlsx(&records, &xlsx)?;
    write_csv(&records, &csv)?;
    write_parquet(&records, &parquet)?;

    println!(
        "Wrote {} inventory rows to {}, {} and {}",
        records.len(),
        xlsx.display(),
        csv.display(),
        parquet.display()
    );
    Ok(())
}
