//! Result sink
//!
//! Output is a two-column table (`NAME`, `PRICE`): each consumed update is
//! echoed, followed by the portfolio values it produced.

use super::prices::PriceUpdate;
use crate::hot_path::Valuation;
use crate::{Result, SimError};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column names of the output table
pub const OUTPUT_HEADER: [&str; 2] = ["NAME", "PRICE"];

/// Destination for echoed updates and computed valuations
pub trait ValuationSink {
    fn write_header(&mut self) -> Result<()>;

    fn write_update(&mut self, update: &PriceUpdate) -> Result<()>;

    fn write_valuation(&mut self, valuation: &Valuation) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shortest text that parses back to the same value, always with a decimal
/// point or exponent (`2000.0`, `0.1`, `1e21`)
#[inline]
pub fn format_value(value: f64) -> String {
    format!("{value:?}")
}

/// CSV-backed sink
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| SimError::Io(e.into_error()))
    }
}

impl CsvSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> ValuationSink for CsvSink<W> {
    fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(OUTPUT_HEADER)?;
        Ok(())
    }

    fn write_update(&mut self, update: &PriceUpdate) -> Result<()> {
        self.writer
            .write_record([update.name.as_str(), update.raw_price.as_str()])?;
        Ok(())
    }

    fn write_valuation(&mut self, valuation: &Valuation) -> Result<()> {
        let value = format_value(valuation.value);
        self.writer
            .write_record([valuation.name.as_str(), value.as_str()])?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every output row in memory
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySink {
    rows: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<(String, String)> {
        self.rows
    }
}

impl ValuationSink for MemorySink {
    fn write_header(&mut self) -> Result<()> {
        self.rows
            .push((OUTPUT_HEADER[0].to_string(), OUTPUT_HEADER[1].to_string()));
        Ok(())
    }

    fn write_update(&mut self, update: &PriceUpdate) -> Result<()> {
        self.rows
            .push((update.name.clone(), update.raw_price.clone()));
        Ok(())
    }

    fn write_valuation(&mut self, valuation: &Valuation) -> Result<()> {
        self.rows
            .push((valuation.name.clone(), format_value(valuation.value)));
        Ok(())
    }
}
