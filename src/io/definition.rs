//! Hierarchy definition source
//!
//! Row-oriented CSV: column 0 is a name, column 1 a share count. An empty or
//! missing share count marks a portfolio header; the literal `NAME` row is a
//! table header and is skipped.

use crate::core::{DefinitionRecord, Hierarchy, HierarchyBuilder};
use crate::{Result, SimError};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Token in the name column that marks the table header row
pub const HEADER_TOKEN: &str = "NAME";

/// Streams `DefinitionRecord`s out of a CSV source
pub struct DefinitionReader<R> {
    records: StringRecordsIntoIter<R>,
}

impl<R: Read> DefinitionReader<R> {
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { records }
    }
}

impl DefinitionReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> Iterator for DefinitionReader<R> {
    type Item = Result<DefinitionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = match self.records.next()? {
                Ok(row) => row,
                Err(e) => return Some(Err(e.into())),
            };
            match parse_definition_row(&row) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Interpret one definition row
///
/// Returns `Ok(None)` for the table header and for rows without a name.
pub fn parse_definition_row(row: &StringRecord) -> Result<Option<DefinitionRecord>> {
    let name = row.get(0).unwrap_or("");
    if name.is_empty() || name == HEADER_TOKEN {
        return Ok(None);
    }

    match row.get(1).unwrap_or("") {
        "" => Ok(Some(DefinitionRecord::header(name))),
        raw => {
            let shares = raw.trim().parse::<i64>().map_err(|_| SimError::Parse {
                line: line_of(row),
                field: "share count",
                value: raw.to_string(),
            })?;
            Ok(Some(DefinitionRecord::child(name, shares)))
        }
    }
}

/// Build a hierarchy from any definition source
pub fn load_hierarchy<I>(records: I) -> Result<Hierarchy>
where
    I: IntoIterator<Item = Result<DefinitionRecord>>,
{
    let mut builder = HierarchyBuilder::new();
    for record in records {
        builder.push(record?)?;
    }
    builder.finish()
}

pub fn load_hierarchy_from_path(path: impl AsRef<Path>) -> Result<Hierarchy> {
    let path = path.as_ref();
    let hierarchy = load_hierarchy(DefinitionReader::from_path(path)?)?;
    tracing::info!(
        target: "io",
        path = %path.display(),
        nodes = hierarchy.len(),
        "Loaded hierarchy definition"
    );
    Ok(hierarchy)
}

pub(crate) fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "NAME,SHARES\nParent,\nChild1,100\nChild2,200\nParent2,\nChild3,300";

    fn read_all(input: &str) -> Result<Vec<DefinitionRecord>> {
        DefinitionReader::new(input.as_bytes()).collect()
    }

    #[test]
    fn test_read_sample() {
        let records = read_all(SAMPLE).unwrap();
        assert_eq!(
            records,
            vec![
                DefinitionRecord::header("Parent"),
                DefinitionRecord::child("Child1", 100),
                DefinitionRecord::child("Child2", 200),
                DefinitionRecord::header("Parent2"),
                DefinitionRecord::child("Child3", 300),
            ]
        );
    }

    #[test]
    fn test_header_without_trailing_comma() {
        let records = read_all("Parent\nChild1,5\n").unwrap();
        assert_eq!(
            records,
            vec![
                DefinitionRecord::header("Parent"),
                DefinitionRecord::child("Child1", 5)
            ]
        );
    }

    #[test]
    fn test_header_token_is_case_sensitive() {
        let records = read_all("name,\nChild,1\n").unwrap();
        assert_eq!(records[0], DefinitionRecord::header("name"));
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let records = read_all("Parent,\n,7\nChild,1\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_bad_share_count() {
        let err = read_all("Parent,\nChild1,lots\n").unwrap_err();
        match err {
            SimError::Parse { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "share count");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_share_count_is_a_short_position() {
        let records = read_all("Parent,\nShort,-100\nLong,200\n").unwrap();
        assert_eq!(records[1], DefinitionRecord::child("Short", -100));
        assert_eq!(records[2], DefinitionRecord::child("Long", 200));
    }

    #[test]
    fn test_name_column_is_taken_verbatim() {
        let records = read_all(" NAME,\nChild1, 100 \n").unwrap();
        assert_eq!(
            records,
            vec![
                DefinitionRecord::header(" NAME"),
                DefinitionRecord::child("Child1", 100)
            ]
        );
    }

    #[test]
    fn test_load_hierarchy() {
        let h = load_hierarchy(DefinitionReader::new(SAMPLE.as_bytes())).unwrap();
        assert_eq!(h.parent_of("Child3").unwrap().name(), "Parent2");
        assert_eq!(h.children_of("Parent").unwrap().len(), 2);
    }

    #[test]
    fn test_load_rejects_child_before_header() {
        let err = load_hierarchy(DefinitionReader::new("NAME,SHARES\nChild1,100\n".as_bytes()))
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
