//! FILENAME: persistence/src/csv_reader.rs
//! CSV loader for the sales dataset.
//!
//! Parsing is strict by design: a permissive "coerce whatever is there"
//! load would let malformed values flow into downstream arithmetic, so
//! every date and numeric field is validated here and the first bad value
//! aborts the load with a typed error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use engine::{Record, RecordStore};
use log::info;

use crate::error::{FormatError, LoadError};

/// Required columns, in no particular order. Missing any of them is a
/// load-time failure.
const REQUIRED_COLUMNS: [&str; 9] = [
    "Transaction_ID",
    "Date",
    "Store_Region",
    "Category",
    "Customer_Type",
    "Promo_Applied",
    "Payment_Method",
    "Unit_Price",
    "Quantity",
];

/// Dates arrive as month/day/year text, unpadded accepted ("3/1/2025").
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Column positions resolved from the header row.
struct ColumnMap {
    transaction_id: usize,
    date: usize,
    region: usize,
    category: usize,
    customer_type: usize,
    promo: usize,
    payment_method: usize,
    unit_price: usize,
    quantity: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(ColumnMap {
            transaction_id: find(REQUIRED_COLUMNS[0])?,
            date: find(REQUIRED_COLUMNS[1])?,
            region: find(REQUIRED_COLUMNS[2])?,
            category: find(REQUIRED_COLUMNS[3])?,
            customer_type: find(REQUIRED_COLUMNS[4])?,
            promo: find(REQUIRED_COLUMNS[5])?,
            payment_method: find(REQUIRED_COLUMNS[6])?,
            unit_price: find(REQUIRED_COLUMNS[7])?,
            quantity: find(REQUIRED_COLUMNS[8])?,
        })
    }
}

/// Loads the sales dataset from a CSV file.
pub fn load_csv(path: &Path) -> Result<RecordStore, LoadError> {
    let file = File::open(path)?;
    let store = load_csv_from_reader(BufReader::new(file))?;
    info!("Loaded {} records from {}", store.len(), path.display());
    Ok(store)
}

/// Loads the sales dataset from any reader producing CSV text with a
/// header row. Row numbers in errors count the header as row 1.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<RecordStore, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = index + 2;
        records.push(parse_record(&row, &columns, row_number)?);
    }

    Ok(RecordStore::new(records))
}

/// Converts one CSV row into a `Record`, validating date and numeric
/// fields.
fn parse_record(
    row: &csv::StringRecord,
    columns: &ColumnMap,
    row_number: usize,
) -> Result<Record, FormatError> {
    // The reader is non-flexible: ragged rows fail before reaching here,
    // so every resolved column index is in bounds.
    let field = |index: usize| row[index].trim();

    let date_text = field(columns.date);
    let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|_| {
        FormatError::InvalidDate {
            row: row_number,
            value: date_text.to_string(),
        }
    })?;

    let unit_price = parse_price(field(columns.unit_price), row_number)?;
    let quantity = parse_quantity(field(columns.quantity), row_number)?;

    Ok(Record::new(
        field(columns.transaction_id).to_string(),
        date,
        field(columns.region).to_string(),
        field(columns.category).to_string(),
        field(columns.customer_type).to_string(),
        field(columns.promo).to_string(),
        field(columns.payment_method).to_string(),
        unit_price,
        quantity,
    ))
}

fn parse_price(value: &str, row: usize) -> Result<f64, FormatError> {
    let price: f64 = value.parse().map_err(|_| FormatError::InvalidNumber {
        row,
        column: "Unit_Price",
        value: value.to_string(),
    })?;

    if !price.is_finite() {
        return Err(FormatError::InvalidNumber {
            row,
            column: "Unit_Price",
            value: value.to_string(),
        });
    }
    if price < 0.0 {
        return Err(FormatError::NegativeValue {
            row,
            column: "Unit_Price",
            value: price,
        });
    }

    Ok(price)
}

fn parse_quantity(value: &str, row: usize) -> Result<u32, FormatError> {
    let quantity: i64 = value.parse().map_err(|_| FormatError::InvalidNumber {
        row,
        column: "Quantity",
        value: value.to_string(),
    })?;

    if quantity < 0 {
        return Err(FormatError::NegativeValue {
            row,
            column: "Quantity",
            value: quantity as f64,
        });
    }

    u32::try_from(quantity).map_err(|_| FormatError::InvalidNumber {
        row,
        column: "Quantity",
        value: value.to_string(),
    })
}
