use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context as AnyhowContext;
use itertools::Itertools;
use log::{
    debug,
    info,
};
use ndarray::{
    Array1,
    ArrayView1,
};
use serde::Serialize;

use crate::data_structs::{
    AggregateResult,
    AggregateSummary,
};

/// Column-oriented table of the presentation curves of an
/// [`AggregateResult`]: `x`, `sum`, `gauss`, then one column per study
/// (named `"{index}-{label}"`) when per-study curves were kept.
///
/// All columns have the same length and row `i` of every column refers to
/// the same presentation point.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    header:  Vec<String>,
    columns: Vec<Array1<f64>>,
}

impl ExportTable {
    pub(crate) fn from_result(result: &AggregateResult) -> Self {
        let mut header = vec!["x".to_string(), "sum".to_string(), "gauss".to_string()];
        let mut columns = vec![
            result.combined().x().to_owned(),
            result.combined().density().to_owned(),
            result.fitted().density().to_owned(),
        ];
        for study in result.studies().unwrap_or_default() {
            header.push(study.key.to_string());
            columns.push(study.density.clone());
        }
        debug_assert!(columns.iter().map(|c| c.len()).all_equal());
        Self { header, columns }
    }

    pub fn header(&self) -> &[String] { &self.header }

    pub fn n_columns(&self) -> usize { self.columns.len() }

    pub fn n_rows(&self) -> usize { self.columns.first().map_or(0, |c| c.len()) }

    pub fn column(
        &self,
        name: &str,
    ) -> Option<ArrayView1<'_, f64>> {
        self.header
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].view())
    }

    /// Values of row `i`, in header order.
    pub fn row(
        &self,
        i: usize,
    ) -> Option<Vec<f64>> {
        if i >= self.n_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| c[i]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.n_rows()).map(|i| self.columns.iter().map(|c| c[i]).collect())
    }

    /// Writes the table as comma separated text with a header line.
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
    ) -> anyhow::Result<()> {
        self.write_delimited(writer, b',')
    }

    pub fn write_delimited<W: Write>(
        &self,
        writer: W,
        delimiter: u8,
    ) -> anyhow::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        csv_writer
            .write_record(&self.header)
            .context("Failed to write header")?;
        for row in self.rows() {
            csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        csv_writer.flush()?;
        debug!(
            "Wrote {} rows x {} columns",
            self.n_rows(),
            self.n_columns()
        );
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_csv(file)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote pooled density to {}", path.display());
        Ok(())
    }
}

#[derive(Serialize)]
struct NamedSummary<'a> {
    name:    &'a str,
    reports: usize,
    cells:   u64,
    mean:    f64,
    stddev:  f64,
    lo:      f64,
    hi:      f64,
    p:       f64,
}

/// Writes one summary line per named result:
/// `name, reports, cells, mean, stddev, lo, hi, p`.
pub fn write_summaries<'a, W, N, I>(
    writer: W,
    results: I,
) -> anyhow::Result<()>
where
    W: Write,
    N: AsRef<str> + 'a,
    I: IntoIterator<Item = (N, &'a AggregateResult)>, {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (name, result) in results {
        let AggregateSummary {
            reports,
            cells,
            mean,
            stddev,
            lo,
            hi,
            p,
        } = result.summary();
        csv_writer
            .serialize(NamedSummary {
                name: name.as_ref(),
                reports,
                cells,
                mean,
                stddev,
                lo,
                hi,
                p,
            })
            .with_context(|| format!("Failed to write summary {}", name.as_ref()))?;
    }
    csv_writer.flush()?;
    Ok(())
}
