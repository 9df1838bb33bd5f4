//! Price update source
//!
//! CSV rows of `(asset_name, price)`. The first row is a header and is
//! skipped. Updates are handed out in fixed-size chunks to bound memory on the
//! reading side; chunking never changes what the engine sees or emits.

use super::definition::line_of;
use super::sink::format_value;
use crate::{Result, SimError};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One observed market price
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub name: String,
    pub price: f64,
    /// Price text exactly as read, echoed to the sink
    pub raw_price: String,
}

impl PriceUpdate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            raw_price: format_value(price),
        }
    }

    /// Parse the price column, failing fast on non-numeric input
    pub fn parse(name: &str, raw_price: &str, line: u64) -> Result<Self> {
        let price = raw_price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| SimError::Parse {
                line,
                field: "price",
                value: raw_price.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            price,
            raw_price: raw_price.to_string(),
        })
    }
}

/// Streams individual `PriceUpdate`s out of a CSV source
pub struct PriceReader<R> {
    records: StringRecordsIntoIter<R>,
}

impl<R: Read> PriceReader<R> {
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { records }
    }
}

impl PriceReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> Iterator for PriceReader<R> {
    type Item = Result<PriceUpdate>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        let name = row.get(0).unwrap_or("");
        let raw = row.get(1).unwrap_or("");
        Some(PriceUpdate::parse(name, raw, line_of(&row)))
    }
}

/// Groups a fallible stream into batches of at most `size` items
///
/// An error ends the stream, but only after the items read before it have
/// been handed out, so batch size has no effect on how far processing gets.
pub struct Chunked<I> {
    inner: I,
    size: usize,
    pending_error: Option<SimError>,
    finished: bool,
}

impl<I> Chunked<I> {
    pub fn new(inner: I, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SimError::Config("chunk size must be at least 1".into()));
        }
        Ok(Self {
            inner,
            size,
            pending_error: None,
            finished: false,
        })
    }
}

impl<I, T> Iterator for Chunked<I>
where
    I: Iterator<Item = Result<T>>,
{
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(e));
        }
        if self.finished {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.size);
        while chunk.len() < self.size {
            match self.inner.next() {
                Some(Ok(item)) => chunk.push(item),
                Some(Err(e)) if chunk.is_empty() => {
                    self.finished = true;
                    return Some(Err(e));
                }
                Some(Err(e)) => {
                    self.pending_error = Some(e);
                    break;
                }
                None => {
                    self.finished = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}

/// Chunked price stream over a CSV source
pub type PriceChunks<R> = Chunked<PriceReader<R>>;

pub fn price_chunks<R: Read>(reader: R, chunk_size: usize) -> Result<PriceChunks<R>> {
    Chunked::new(PriceReader::new(reader), chunk_size)
}

pub fn price_chunks_from_path(
    path: impl AsRef<Path>,
    chunk_size: usize,
) -> Result<PriceChunks<File>> {
    Chunked::new(PriceReader::from_path(path)?, chunk_size)
}
