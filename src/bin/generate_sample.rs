use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use hospital_insights::data::loader::{
    COL_BEDS, COL_LATITUDE, COL_LOCATION, COL_LONGITUDE, COL_ORGANIZATION, COL_SIZE,
    COL_SPECIALTIES, REQUIRED_COLUMNS,
};
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// (city, latitude, longitude)
const CITIES: [(&str, f64, f64); 12] = [
    ("Boston, MA", 42.36, -71.06),
    ("New York, NY", 40.71, -74.01),
    ("Philadelphia, PA", 39.95, -75.17),
    ("Atlanta, GA", 33.75, -84.39),
    ("Miami, FL", 25.76, -80.19),
    ("Chicago, IL", 41.88, -87.63),
    ("Houston, TX", 29.76, -95.37),
    ("Austin, TX", 30.27, -97.74),
    ("Denver, CO", 39.74, -104.99),
    ("Phoenix, AZ", 33.45, -112.07),
    ("Seattle, WA", 47.61, -122.33),
    ("Sacramento, CA", 38.58, -121.49),
];

const SPECIALTIES: [&str; 10] = [
    "Cardiology",
    "Oncology",
    "Pediatrics",
    "Orthopedics",
    "Neurology",
    "Emergency Medicine",
    "Obstetrics",
    "Psychiatry",
    "Rehabilitation",
    "General Surgery",
];

const PREFIXES: [&str; 10] = [
    "St. Mary's",
    "Mercy",
    "Riverside",
    "Lakeview",
    "Sunrise",
    "Providence",
    "Hillcrest",
    "Good Samaritan",
    "Memorial",
    "Valley",
];

const SUFFIXES: [&str; 4] = ["Hospital", "Medical Center", "Regional Hospital", "Health"];

/// One generated row; `None` marks a deliberately missing cell.
struct Row {
    organization: String,
    location: String,
    size: Option<&'static str>,
    specialties: Option<String>,
    beds: Option<i64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

fn generate_row(rng: &mut StdRng) -> Row {
    let (city, lat, lon) = *CITIES.choose(rng).expect("cities is non-empty");
    let beds: i64 = rng.random_range(15..=900);
    let size = match beds {
        0..=99 => "Small",
        100..=299 => "Medium",
        _ => "Large",
    };

    let n_specialties = rng.random_range(1..=3);
    let specialties: Vec<&str> = SPECIALTIES
        .choose_multiple(rng, n_specialties)
        .copied()
        .collect();

    let organization = format!(
        "{} {}",
        PREFIXES.choose(rng).expect("prefixes is non-empty"),
        SUFFIXES.choose(rng).expect("suffixes is non-empty"),
    );

    // Roughly one row in ten loses each optional field.
    let keep = |rng: &mut StdRng| rng.random_bool(0.9);
    let has_coordinates = keep(rng);
    Row {
        organization,
        location: city.to_string(),
        size: keep(rng).then_some(size),
        specialties: keep(rng).then(|| specialties.join(", ")),
        beds: keep(rng).then_some(beds),
        latitude: has_coordinates.then(|| lat + rng.random_range(-0.3..0.3)),
        longitude: has_coordinates.then(|| lon + rng.random_range(-0.3..0.3)),
    }
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for row in rows {
        writer.write_record([
            row.organization.clone(),
            row.location.clone(),
            row.size.unwrap_or_default().to_string(),
            row.specialties.clone().unwrap_or_default(),
            row.beds.map(|b| b.to_string()).unwrap_or_default(),
            row.latitude.map(|v| format!("{v:.4}")).unwrap_or_default(),
            row.longitude.map(|v| format!("{v:.4}")).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_ORGANIZATION, DataType::Utf8, false),
        Field::new(COL_LOCATION, DataType::Utf8, false),
        Field::new(COL_SIZE, DataType::Utf8, true),
        Field::new(COL_SPECIALTIES, DataType::Utf8, true),
        Field::new(COL_BEDS, DataType::Int64, true),
        Field::new(COL_LATITUDE, DataType::Float64, true),
        Field::new(COL_LONGITUDE, DataType::Float64, true),
    ]));

    let organizations = rows.iter().map(|r| r.organization.as_str());
    let locations = rows.iter().map(|r| r.location.as_str());
    let sizes: Vec<Option<&str>> = rows.iter().map(|r| r.size).collect();
    let specialties: Vec<Option<&str>> = rows.iter().map(|r| r.specialties.as_deref()).collect();
    let beds: Vec<Option<i64>> = rows.iter().map(|r| r.beds).collect();
    let latitudes: Vec<Option<f64>> = rows.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<Option<f64>> = rows.iter().map(|r| r.longitude).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(organizations)),
        Arc::new(StringArray::from_iter_values(locations)),
        Arc::new(StringArray::from(sizes)),
        Arc::new(StringArray::from(specialties)),
        Arc::new(Int64Array::from(beds)),
        Arc::new(Float64Array::from(latitudes)),
        Arc::new(Float64Array::from(longitudes)),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let rows: Vec<Row> = (0..250).map(|_| generate_row(&mut rng)).collect();

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;

    let csv_path = out_dir.join("hospitals.csv");
    write_csv(&csv_path, &rows)?;
    let parquet_path = out_dir.join("hospitals.parquet");
    write_parquet(&parquet_path, &rows)?;

    println!(
        "Wrote {} hospitals to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
