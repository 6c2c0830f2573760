use super::{MetricRecord, MetricStore};
use crate::error::{KeylistError, KlResult};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub const COL_KEY: &str = "key";
pub const COL_TRAFFIC: &str = "traffic";
pub const COL_IPHONE_DIFF: &str = "iphone_diff";
pub const COL_IPHONE_APPS: &str = "iphone_apps";
pub const COL_IPAD_DIFF: &str = "ipad_diff";
pub const COL_IPAD_APPS: &str = "ipad_apps";

struct ColumnMap {
    key: usize,
    traffic: usize,
    iphone_diff: usize,
    iphone_apps: usize,
    ipad_diff: usize,
    ipad_apps: usize,
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> KlResult<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| KeylistError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            key: find(COL_KEY)?,
            traffic: find(COL_TRAFFIC)?,
            iphone_diff: find(COL_IPHONE_DIFF)?,
            iphone_apps: find(COL_IPHONE_APPS)?,
            ipad_diff: find(COL_IPAD_DIFF)?,
            ipad_apps: find(COL_IPAD_APPS)?,
        })
    }
}

/// Loads a metric table from disk.
///
/// A file that cannot be opened or read yields an empty store; the caller
/// decides whether "no keywords" is terminal. Malformed content is an error.
pub fn load_metric_store<P: AsRef<Path>>(path: P) -> KlResult<MetricStore> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Could not open metric file '{}': {}", path.display(), e);
            return Ok(MetricStore::new());
        }
    };
    debug!("Loading metrics from: {}", path.display());

    match load_metric_store_from_reader(file) {
        Err(e) if is_read_failure(&e) => {
            warn!("Could not read metric file '{}': {}", path.display(), e);
            Ok(MetricStore::new())
        }
        result => result,
    }
}

fn is_read_failure(err: &KeylistError) -> bool {
    match err {
        KeylistError::Io(_) => true,
        KeylistError::Csv(e) => matches!(e.kind(), csv::ErrorKind::Io(_)),
        _ => false,
    }
}

pub fn load_metric_store_from_reader<R: Read>(reader: R) -> KlResult<MetricStore> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'|')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_header(rdr.headers()?)?;
    let mut store = MetricStore::new();
    let mut duplicates = 0;

    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = rec
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let number = |col: usize, name: &str| -> KlResult<f64> {
            let raw = rec.get(col).unwrap_or("").trim();
            raw.parse::<f64>()
                .map_err(|_| KeylistError::MalformedRecord {
                    row,
                    column: name.to_string(),
                    value: raw.to_string(),
                })
        };

        let key = rec.get(columns.key).unwrap_or("").to_string();
        let record = MetricRecord::new(
            key,
            number(columns.traffic, COL_TRAFFIC)?,
            number(columns.iphone_diff, COL_IPHONE_DIFF)?,
            number(columns.iphone_apps, COL_IPHONE_APPS)?,
            number(columns.ipad_diff, COL_IPAD_DIFF)?,
            number(columns.ipad_apps, COL_IPAD_APPS)?,
        );

        let key = record.key.clone();
        if !store.insert(record) {
            duplicates += 1;
            warn!("[Row {}] Duplicate key '{}' ignored", row, key);
        }
    }

    debug!(
        "   -> Loaded {} records ({} duplicates skipped).",
        store.len(),
        duplicates
    );

    Ok(store)
}
