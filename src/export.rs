use crate::config::ExportPaths;
use crate::error::KlResult;
use csv::{QuoteStyle, WriterBuilder};
use std::path::PathBuf;
use tracing::info;

/// A block of delimited rows produced at the end of one scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub name: &'static str,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn new(name: &'static str, header: Option<&[&str]>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name,
            header: header.map(|h| h.iter().map(|s| s.to_string()).collect()),
            rows,
        }
    }
}

/// Capability to persist a table of rows.
pub trait RowSink {
    fn accept(&mut self, table: ExportTable) -> KlResult<()>;
}

/// Writes a table to a delimited file, overwriting it.
pub struct CsvSink {
    path: PathBuf,
    delimiter: u8,
    quote_style: QuoteStyle,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
            quote_style: QuoteStyle::Never,
        }
    }

    /// Quotes with `|` only where a field needs it.
    pub fn with_minimal_quoting(mut self) -> Self {
        self.quote_style = QuoteStyle::Necessary;
        self
    }
}

impl RowSink for CsvSink {
    fn accept(&mut self, table: ExportTable) -> KlResult<()> {
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(b'|')
            .quote_style(self.quote_style)
            .flexible(true)
            .from_path(&self.path)?;

        if let Some(header) = &table.header {
            wtr.write_record(header)?;
        }
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;

        info!(
            "Exported {} ({} rows) to file: {}",
            table.name,
            table.rows.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps tables in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub tables: Vec<ExportTable>,
}

impl RowSink for MemorySink {
    fn accept(&mut self, table: ExportTable) -> KlResult<()> {
        self.tables.push(table);
        Ok(())
    }
}

/// Optional sinks for every export of a selection run.
#[derive(Default)]
pub struct ExportSinks {
    pub keylists: Option<Box<dyn RowSink>>,
    pub key_scores: Option<Box<dyn RowSink>>,
    pub keypair_scores: Option<Box<dyn RowSink>>,
    pub keylist_scores: Option<Box<dyn RowSink>>,
    pub keylist_keypair_scores: Option<Box<dyn RowSink>>,
    pub cumulative: Option<Box<dyn RowSink>>,
}

impl ExportSinks {
    pub fn none() -> Self {
        Self::default()
    }

    /// File sinks for every path that was given.
    pub fn from_paths(paths: &ExportPaths) -> Self {
        fn csv(path: &Option<PathBuf>, delimiter: u8) -> Option<Box<dyn RowSink>> {
            path.as_ref()
                .map(|p| Box::new(CsvSink::new(p, delimiter)) as Box<dyn RowSink>)
        }

        Self {
            keylists: paths.out_keylists.as_ref().map(|p| {
                Box::new(CsvSink::new(p, b',').with_minimal_quoting()) as Box<dyn RowSink>
            }),
            key_scores: csv(&paths.out_key_scores, b','),
            keypair_scores: csv(&paths.out_keypair_scores, b','),
            keylist_scores: csv(&paths.out_keylist_scores, b';'),
            keylist_keypair_scores: csv(&paths.out_keylist_keypair_scores, b';'),
            cumulative: csv(&paths.out_cumulative, b';'),
        }
    }
}

/// Sends `table` to `sink` if one is present. The table is built lazily.
pub fn emit<F>(sink: &mut Option<Box<dyn RowSink>>, build: F) -> KlResult<()>
where
    F: FnOnce() -> ExportTable,
{
    match sink {
        Some(s) => s.accept(build()),
        None => Ok(()),
    }
}
