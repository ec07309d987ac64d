// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Loads the iris table from a delimiter-separated text file
// using the csv crate.
//
// Expected layout:
//   sepal.length,sepal.width,petal.length,petal.width,variety
//   5.1,3.5,1.4,.2,Setosa
//   ...
//
//   - a header row naming the five columns (names are not checked)
//   - four numeric feature columns
//   - the label in the last column, one of the Species names
//
// Any bad row aborts the whole load. There is no "skip and
// warn" mode: a dataset with holes would silently bias the split.

use std::{fs::File, io::Read, path::PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::{
    sample::{Sample, FEATURE_COUNT},
    species::Species,
    traits::SampleSource,
};
use crate::error::{ClassifierError, Result};

/// Four features plus the label column
const COLUMN_COUNT: usize = FEATURE_COUNT + 1;

/// Loads samples from a CSV-like file on disk.
pub struct CsvSampleLoader {
    path:      PathBuf,
    delimiter: u8,
}

impl CsvSampleLoader {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self { path: path.into(), delimiter }
    }
}

impl SampleSource for CsvSampleLoader {
    fn load_all(&self) -> Result<Vec<Sample>> {
        let file = File::open(&self.path).map_err(|source| ClassifierError::DatasetIo {
            path: self.path.clone(),
            source,
        })?;

        let samples = parse_samples(file, self.delimiter)?;
        tracing::info!("Loaded {} samples from '{}'", samples.len(), self.path.display());
        Ok(samples)
    }
}

/// Parse samples from any reader. The first row must be a header.
pub fn parse_samples<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Sample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ClassifierError::data_format(1, e.to_string()))?
        .clone();
    if headers.len() != COLUMN_COUNT {
        return Err(ClassifierError::data_format(
            1,
            format!("expected {COLUMN_COUNT} columns in header, found {}", headers.len()),
        ));
    }
    tracing::debug!("Dataset columns: {:?}", headers.iter().collect::<Vec<_>>());

    let mut samples = Vec::new();
    for record in reader.records() {
        // csv rejects rows whose field count differs from the header
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            ClassifierError::data_format(line, e.to_string())
        })?;
        samples.push(parse_record(&record, &headers)?);
    }

    if samples.is_empty() {
        return Err(ClassifierError::data_format(1, "dataset contains no samples"));
    }
    Ok(samples)
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Sample> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    let mut features = [0.0f32; FEATURE_COUNT];
    for (i, slot) in features.iter_mut().enumerate() {
        let raw = record.get(i).unwrap_or_default();
        let value: f32 = raw.parse().map_err(|_| {
            ClassifierError::data_format(
                line,
                format!("column '{}' is not numeric: '{raw}'", &headers[i]),
            )
        })?;
        if !value.is_finite() {
            return Err(ClassifierError::data_format(
                line,
                format!("column '{}' is not a finite number: '{raw}'", &headers[i]),
            ));
        }
        *slot = value;
    }

    let label = record.get(FEATURE_COUNT).unwrap_or_default();
    let species = Species::from_label(label).ok_or_else(|| {
        ClassifierError::data_format(line, format!("unknown label '{label}'"))
    })?;

    Ok(Sample::new(features, species))
}
