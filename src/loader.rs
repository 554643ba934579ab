// CSV dataset loading
use crate::model::{Dataset, LoadError, PriceRecord};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Loads `Model,Year,Type,Transmission,Price_USD` rows from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let dataset = read_csv(file)?;
    info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Reads price records from any CSV source, validating each row.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<PriceRecord>().enumerate() {
        let record = result?;
        // Header is row 1.
        validate(&record, i + 2)?;
        records.push(record);
    }
    Ok(Dataset::new(records))
}

fn validate(record: &PriceRecord, row: usize) -> Result<(), LoadError> {
    if record.model.is_empty() {
        return Err(LoadError::InvalidRecord {
            row,
            reason: "empty model".into(),
        });
    }
    if !record.price_usd.is_finite() || record.price_usd < 0.0 {
        return Err(LoadError::InvalidRecord {
            row,
            reason: format!("invalid price {}", record.price_usd),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordType, Transmission};
    use std::io::Write;

    const HEADER: &str = "Model,Year,Type,Transmission,Price_USD\n";

    #[test]
    fn test_read_valid_rows() {
        let data = format!(
            "{}X3,2023,Actual,Automatic,41000\n X5 , 2026 , Forecast , Manual , 72000.5 \n",
            HEADER
        );
        let dataset = read_csv(data.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.records()[0],
            PriceRecord::new("X3", 2023, RecordType::Actual, Transmission::Automatic, 41000.0)
        );
        assert_eq!(dataset.records()[1].model, "X5");
        assert_eq!(dataset.records()[1].record_type, RecordType::Forecast);
        assert_eq!(dataset.records()[1].price_usd, 72000.5);
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let dataset = read_csv(HEADER.as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_negative_price_is_rejected_with_row() {
        let data = format!("{}X3,2023,Actual,Automatic,100\nX3,2024,Actual,Automatic,-5\n", HEADER);
        match read_csv(data.as_bytes()) {
            Err(LoadError::InvalidRecord { row, .. }) => assert_eq!(row, 3),
            other => panic!("expected invalid record, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let data = format!("{},2023,Actual,Automatic,100\n", HEADER);
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(LoadError::InvalidRecord { row: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_type_is_csv_error() {
        let data = format!("{}X3,2023,Estimate,Automatic,100\n", HEADER);
        assert!(matches!(read_csv(data.as_bytes()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}i4,2024,Actual,Automatic,52000", HEADER).unwrap();

        let dataset = load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].model, "i4");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_csv(dir.path().join("missing.csv"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
