use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rand::Rng;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{primary_specialty, Dataset, Record, SizeCategory, UNKNOWN};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const COL_ORGANIZATION: &str = "Hospital/Organization";
pub const COL_LOCATION: &str = "Location";
pub const COL_SIZE: &str = "Size Category";
pub const COL_SPECIALTIES: &str = "Specialties";
pub const COL_BEDS: &str = "Estimated Beds";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";

/// Source columns in the order [`RawRow`] stores them.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_ORGANIZATION,
    COL_LOCATION,
    COL_SIZE,
    COL_SPECIALTIES,
    COL_BEDS,
    COL_LATITUDE,
    COL_LONGITUDE,
];

/// A source cell before normalisation.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

/// One source row, cells indexed like [`REQUIRED_COLUMNS`].
type RawRow = [Cell; 7];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the hospital table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required column names
/// * `.json`    – `[{ "Hospital/Organization": ..., "Location": ..., ... }, ...]`
/// * `.parquet` – one column per required name, strings or numbers
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => load_reader_csv(open()?)?,
        "json" => load_reader_json(open()?)?,
        "parquet" | "pq" => load_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} hospitals from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row normalisation
// ---------------------------------------------------------------------------

/// Normalise every row or fail on the first bad one.
fn build_dataset(rows: Vec<RawRow>) -> Result<Dataset, LoadError> {
    let mut rng = rand::rng();
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| normalize_row(i + 1, row, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::new(records))
}

fn normalize_row<R: Rng>(
    row_no: usize,
    row: RawRow,
    rng: &mut R,
) -> Result<Record, LoadError> {
    let [org, loc, size, specialties, beds, lat, lon] = row;

    let size_text = text_cell(size);
    let size = SizeCategory::parse(size_text.as_deref()).map_err(|bad| {
        LoadError::malformed(row_no, COL_SIZE, format!("unrecognised size category '{bad}'"))
    })?;

    let specialties = text_cell(specialties);
    let primary = primary_specialty(specialties.as_deref());

    Ok(Record {
        organization: text_cell(org).unwrap_or_else(|| UNKNOWN.to_string()),
        location: text_cell(loc).unwrap_or_else(|| UNKNOWN.to_string()),
        size,
        specialties,
        primary_specialty: primary,
        beds: bed_count(number_cell(beds, row_no, COL_BEDS)?, row_no)?,
        latitude: number_cell(lat, row_no, COL_LATITUDE)?,
        longitude: number_cell(lon, row_no, COL_LONGITUDE)?,
        initial: rng.random_range(b'A'..=b'Z') as char,
    })
}

/// Trimmed text, `None` when blank.
fn text_cell(cell: Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Cell::Number(n) => Some(n.to_string()),
        Cell::Null => None,
    }
}

/// Finite float, `None` when blank.
fn number_cell(cell: Cell, row_no: usize, column: &str) -> Result<Option<f64>, LoadError> {
    let value = match cell {
        Cell::Null => return Ok(None),
        Cell::Number(n) => n,
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }
            s.parse::<f64>().map_err(|_| {
                LoadError::malformed(row_no, column, format!("'{s}' is not a number"))
            })?
        }
    };
    // Pandas writes missing numbers as NaN.
    if value.is_nan() {
        return Ok(None);
    }
    if !value.is_finite() {
        return Err(LoadError::malformed(row_no, column, "value is not finite"));
    }
    Ok(Some(value))
}

fn bed_count(value: Option<f64>, row_no: usize) -> Result<Option<u32>, LoadError> {
    let Some(v) = value else {
        return Ok(None);
    };
    if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(LoadError::malformed(
            row_no,
            COL_BEDS,
            format!("{v} is not a whole, non-negative bed count"),
        ));
    }
    Ok(Some(v as u32))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV source with a header row. Extra columns are ignored.
pub fn load_reader_csv<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let mut indices = [0usize; 7];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    }
    log::debug!("CSV column positions: {indices:?}");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = indices.map(|idx| match record.get(idx) {
            Some(s) if !s.is_empty() => Cell::Text(s.to_string()),
            _ => Cell::Null,
        });
        rows.push(row);
    }

    build_dataset(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Hospital/Organization": "Mercy General", "Location": "Sacramento, CA",
///     "Size Category": "Large", "Specialties": "Cardiology, Neurology",
///     "Estimated Beds": 342, "Latitude": 38.57, "Longitude": -121.47 },
///   ...
/// ]
/// ```
///
/// Column presence is checked against the first object; later objects may
/// omit keys, which reads as null.
pub fn load_reader_json<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let items = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(0, "<root>", "expected a top-level JSON array"))?;

    if let Some(first) = items.first().and_then(|v| v.as_object()) {
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !first.contains_key(**c)) {
            return Err(LoadError::MissingColumn(missing.to_string()));
        }
    }

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| LoadError::malformed(i + 1, "<row>", "row is not a JSON object"))?;
        let row: RawRow = REQUIRED_COLUMNS.map(|col| json_cell(obj.get(col)));
        rows.push(row);
    }

    build_dataset(rows)
}

fn json_cell(val: Option<&JsonValue>) -> Cell {
    match val {
        None | Some(JsonValue::Null) => Cell::Null,
        Some(JsonValue::String(s)) => Cell::Text(s.clone()),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        Some(other) => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Reads files written by Pandas (`df.to_parquet()`) and by the
/// `generate_sample` binary. Dictionary-encoded and view string columns are
/// cast to plain `Utf8` before cells are read.
fn load_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Resolve columns from the file schema so empty files are checked too.
    let schema = builder.schema().clone();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = schema
            .index_of(name)
            .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    }

    let reader = builder.build()?;
    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let columns = indices
            .iter()
            .map(|&idx| plain_strings(batch.column(idx)))
            .collect::<Result<Vec<ArrayRef>, LoadError>>()?;

        for row in 0..batch.num_rows() {
            let row_no = rows.len() + 1;
            let mut cells = Vec::with_capacity(columns.len());
            for (col, name) in columns.iter().zip(REQUIRED_COLUMNS) {
                cells.push(arrow_cell(col, row, row_no, name)?);
            }
            let row: RawRow = cells
                .try_into()
                .map_err(|_| LoadError::malformed(row_no, "<row>", "wrong column count"))?;
            rows.push(row);
        }
    }

    build_dataset(rows)
}

fn plain_strings(col: &ArrayRef) -> Result<ArrayRef, LoadError> {
    match col.data_type() {
        DataType::Utf8View => Ok(cast(col, &DataType::Utf8)?),
        DataType::Dictionary(_, value)
            if matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            Ok(cast(col, &DataType::Utf8)?)
        }
        _ => Ok(col.clone()),
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize, row_no: usize, name: &str) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        other => {
            return Err(LoadError::malformed(
                row_no,
                name,
                format!("unsupported column type {other:?}"),
            ))
        }
    };
    Ok(cell)
}
