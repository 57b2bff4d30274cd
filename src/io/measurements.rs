use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;

use anyhow::{
    bail,
    Context as AnyhowContext,
};
use log::{
    debug,
    info,
};
use serde::Deserialize;

use crate::data_structs::StudyMeasurement;

/// One line of a delimited measurement table.
///
/// Column names follow the midpoint queries (`pub, v, sem, n, std`); the
/// long field names are accepted too. Reports that did not measure the
/// quantity usually leave the value columns empty, so everything but the
/// label is optional here.
#[derive(Debug, Deserialize)]
struct MeasurementRecord {
    #[serde(alias = "pub", alias = "name")]
    label:              String,
    #[serde(alias = "v")]
    mean:               Option<f64>,
    #[serde(alias = "sem")]
    standard_error:     Option<f64>,
    #[serde(alias = "n")]
    sample_size:        Option<i64>,
    #[serde(alias = "std")]
    standard_deviation: Option<f64>,
}

impl MeasurementRecord {
    fn try_into_measurement(
        self,
        line: usize,
    ) -> anyhow::Result<StudyMeasurement> {
        let sample_size = self.sample_size.unwrap_or(0);
        if sample_size == 0 {
            return Ok(StudyMeasurement::new(
                self.label,
                self.mean.unwrap_or(f64::NAN),
                self.standard_error.unwrap_or(f64::NAN),
                0,
                self.standard_deviation.unwrap_or(f64::NAN),
            ));
        }
        match (self.mean, self.standard_error, self.standard_deviation) {
            (Some(mean), Some(sem), Some(std)) => {
                Ok(StudyMeasurement::new(self.label, mean, sem, sample_size, std))
            },
            _ => {
                bail!(
                    "Record {} ({}): sample size {} but missing mean, sem or std",
                    line,
                    self.label,
                    sample_size
                )
            },
        }
    }
}

/// Reads measurement rows from delimited text with a header line.
pub fn read_measurements<R: Read>(
    reader: R,
    delimiter: u8,
) -> anyhow::Result<Vec<StudyMeasurement>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = csv_reader
        .deserialize::<MeasurementRecord>()
        .enumerate()
        .map(|(i, record)| {
            record
                .with_context(|| format!("Failed to parse record {}", i + 1))?
                .try_into_measurement(i + 1)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    debug!("Read {} measurement rows", rows.len());
    Ok(rows)
}

/// Reads a measurement table from a file. Files ending in `.tsv` or `.tab`
/// are tab separated, anything else comma separated.
pub fn read_measurements_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StudyMeasurement>> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let rows = read_measurements(BufReader::new(file), delimiter)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
