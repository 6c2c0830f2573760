pub mod loader;

use std::collections::HashMap;

pub use self::loader::{load_metric_store, load_metric_store_from_reader};

/// Metrics of a single keyword (or keyword-pair phrase).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub key: String,
    pub traffic: f64,
    pub iphone_difficulty: f64,
    pub iphone_apps: f64,
    pub ipad_difficulty: f64,
    pub ipad_apps: f64,
    pub avg_difficulty: f64,
    pub avg_apps: f64,
    pub key_length: usize,
    /// Written once by the keyword scorer.
    pub score: Option<f64>,
}

impl MetricRecord {
    pub fn new(
        key: impl Into<String>,
        traffic: f64,
        iphone_difficulty: f64,
        iphone_apps: f64,
        ipad_difficulty: f64,
        ipad_apps: f64,
    ) -> Self {
        let key = key.into();
        let key_length = key.chars().count();
        Self {
            key,
            traffic,
            iphone_difficulty,
            iphone_apps,
            ipad_difficulty,
            ipad_apps,
            avg_difficulty: 0.5 * (iphone_difficulty + ipad_difficulty),
            avg_apps: 0.5 * (iphone_apps + ipad_apps),
            key_length,
            score: None,
        }
    }
}

/// Keyword metrics in input row order, indexed by key.
#[derive(Debug, Clone, Default)]
pub struct MetricStore {
    records: Vec<MetricRecord>,
    index: HashMap<String, usize>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record. Returns `false` and leaves the store untouched when
    /// the key is already present.
    pub fn insert(&mut self, record: MetricRecord) -> bool {
        if self.index.contains_key(&record.key) {
            return false;
        }
        self.index.insert(record.key.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MetricRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn score_of(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|r| r.score)
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key.clone()).collect()
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [MetricRecord] {
        &mut self.records
    }
}

impl FromIterator<MetricRecord> for MetricStore {
    fn from_iter<I: IntoIterator<Item = MetricRecord>>(iter: I) -> Self {
        let mut store = MetricStore::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}
