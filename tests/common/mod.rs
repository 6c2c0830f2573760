#![allow(dead_code)]

use keylist::metrics::{load_metric_store_from_reader, MetricRecord, MetricStore};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

pub const HEADER: &str = "key,traffic,iphone_diff,iphone_apps,ipad_diff,ipad_apps";

/// Builder for a metric row to keep tests readable.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    key: String,
    traffic: f64,
    diff: f64,
    apps: f64,
}

impl RowBuilder {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            traffic: 5.0,
            diff: 5.0,
            apps: 1000.0,
        }
    }

    pub fn traffic(mut self, traffic: f64) -> Self {
        self.traffic = traffic;
        self
    }

    pub fn diff(mut self, diff: f64) -> Self {
        self.diff = diff;
        self
    }

    pub fn apps(mut self, apps: f64) -> Self {
        self.apps = apps;
        self
    }

    pub fn line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.key, self.traffic, self.diff, self.apps, self.diff, self.apps
        )
    }

    pub fn record(&self) -> MetricRecord {
        MetricRecord::new(
            self.key.clone(),
            self.traffic,
            self.diff,
            self.apps,
            self.diff,
            self.apps,
        )
    }
}

pub fn csv_text(rows: &[RowBuilder]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for r in rows {
        out.push_str(&r.line());
        out.push('\n');
    }
    out
}

pub fn store(rows: &[RowBuilder]) -> MetricStore {
    load_metric_store_from_reader(Cursor::new(csv_text(rows))).expect("metric load failed")
}

pub fn write_metrics(dir: &Path, name: &str, rows: &[RowBuilder]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", csv_text(rows)).unwrap();
    path
}

pub fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Keyword rows plus every ordered pair phrase between them.
pub fn pair_rows(names: &[&str], traffic: f64) -> Vec<RowBuilder> {
    let mut rows = Vec::new();
    for a in names {
        for b in names {
            if a != b {
                rows.push(RowBuilder::new(&format!("{} {}", a, b)).traffic(traffic));
            }
        }
    }
    rows
}
