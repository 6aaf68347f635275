use std::io::Write;

use super::error::ExportError;
use super::model::Record;
use super::table::TableColumn;

/// Write rows as CSV with every table column, header first.
pub fn write_csv<'a, W: Write>(
    records: impl IntoIterator<Item = &'a Record>,
    writer: W,
) -> Result<usize, ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(TableColumn::ALL.map(TableColumn::title))?;

    let mut rows = 0;
    for r in records {
        out.write_record(TableColumn::ALL.map(|c| c.display(r)))?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader_csv;
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, SizeCategory};

    #[test]
    fn test_write_csv() {
        let mut with_coords = record(
            "Mercy",
            "Sacramento, CA",
            SizeCategory::Large,
            Some("Cardiology, ER"),
            Some(300),
        );
        with_coords.latitude = Some(38.5);
        with_coords.longitude = Some(-121.25);
        let hillside = record("Hillside", "Austin, TX", SizeCategory::Unknown, None, None);
        let rows = vec![with_coords, hillside];

        let mut buf = Vec::new();
        assert_eq!(write_csv(&rows, &mut buf).unwrap(), 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Hospital/Organization,Location,Size Category,Specialties,Primary Specialty,Estimated Beds,Latitude,Longitude"
        );
        assert_eq!(
            lines[1],
            "Mercy,\"Sacramento, CA\",Large,\"Cardiology, ER\",Cardiology,300,38.5,-121.25"
        );
        assert_eq!(lines[2], "Hillside,\"Austin, TX\",Unknown,,Unknown,,,");
    }

    #[test]
    fn test_exported_csv_loads_back() {
        let ds = Dataset::new(vec![
            record("A", "X", SizeCategory::Small, Some("ER"), Some(10)),
            record("B", "Y", SizeCategory::Medium, None, None),
        ]);
        let mut buf = Vec::new();
        write_csv(ds.iter(), &mut buf).unwrap();

        let loaded = load_reader_csv(buf.as_slice()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.records()[0].beds, Some(10));
        assert_eq!(loaded.records()[1].size, SizeCategory::Medium);
        assert_eq!(loaded.records()[1].primary_specialty, "Unknown");
    }
}
