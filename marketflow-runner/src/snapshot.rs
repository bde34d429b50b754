//! Snapshot evaluation: raw provider payloads in, indicator records out.
//!
//! A snapshot is a JSON object mapping symbol → chart payload (the shape of
//! the cached `data.json` and of a batch fetch response). Each symbol is
//! parsed and assembled independently on the rayon pool; the results are
//! collected into ordered maps so a report never depends on scheduling.

use crate::breadth::Breadth;
use crate::config::MonitorConfig;
use crate::universe::Universe;
use marketflow_core::{parse_chart_payload, IndicatorRecord, PayloadError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot must be a JSON object keyed by symbol")]
    NotAnObject,
}

/// Raw payloads keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    payloads: BTreeMap<String, Value>,
}

impl Snapshot {
    pub fn new(payloads: BTreeMap<String, Value>) -> Self {
        Self { payloads }
    }

    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(Self {
                payloads: map.into_iter().collect(),
            }),
            _ => Err(SnapshotError::NotAnObject),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Value> {
        self.payloads.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.payloads.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// BLAKE3 over the canonical (key-sorted) JSON encoding.
    pub fn dataset_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (symbol, payload) in &self.payloads {
            hasher.update(symbol.as_bytes());
            hasher.update(&[0]);
            hasher.update(payload.to_string().as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Why a symbol has no record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The snapshot has no payload for the symbol.
    Missing,
    /// The payload could not be turned into a series.
    Malformed { reason: String },
    /// The series is shorter than the record minimum.
    InsufficientHistory { candles: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Outcome of evaluating one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReport {
    pub dataset_hash: String,
    /// One entry per universe symbol plus any extra symbols in the snapshot.
    pub records: BTreeMap<String, Option<IndicatorRecord>>,
    /// Parsed series length for every symbol whose payload was well formed,
    /// or whose record was retained by [`merge`].
    pub series_lengths: BTreeMap<String, usize>,
    pub skipped: Vec<SkippedSymbol>,
}

impl SnapshotReport {
    pub fn record(&self, symbol: &str) -> Option<&IndicatorRecord> {
        self.records.get(symbol).and_then(Option::as_ref)
    }

    /// Number of symbols with a record.
    pub fn evaluated(&self) -> usize {
        self.records.values().filter(|r| r.is_some()).count()
    }

    /// Breadth over the configured section.
    pub fn breadth(&self, config: &MonitorConfig) -> Option<Breadth> {
        let section = config.universe.section(&config.breadth.section)?;
        Breadth::for_section(&self.records, section, &config.breadth)
    }
}

struct SymbolOutcome {
    record: Option<IndicatorRecord>,
    candles: Option<usize>,
    skip: Option<SkipReason>,
}

fn evaluate_symbol(symbol: &str, payload: Option<&Value>) -> SymbolOutcome {
    let Some(payload) = payload else {
        tracing::debug!(symbol, "no payload in snapshot");
        return SymbolOutcome {
            record: None,
            candles: None,
            skip: Some(SkipReason::Missing),
        };
    };

    let series = match parse_chart_payload(payload) {
        Ok(series) => series,
        Err(err) => {
            log_payload_error(symbol, &err);
            return SymbolOutcome {
                record: None,
                candles: None,
                skip: Some(SkipReason::Malformed {
                    reason: err.to_string(),
                }),
            };
        }
    };

    let candles = series.len();
    match IndicatorRecord::compute(&series) {
        Some(record) => SymbolOutcome {
            record: Some(record),
            candles: Some(candles),
            skip: None,
        },
        None => {
            tracing::debug!(symbol, candles, "insufficient history for a record");
            SymbolOutcome {
                record: None,
                candles: Some(candles),
                skip: Some(SkipReason::InsufficientHistory { candles }),
            }
        }
    }
}

fn log_payload_error(symbol: &str, err: &PayloadError) {
    match err {
        // Expected for delisted or temporarily failing symbols.
        PayloadError::Provider { .. } | PayloadError::ProviderRejected(_) => {
            tracing::debug!(symbol, error = %err, "provider reported no data")
        }
        _ => tracing::warn!(symbol, error = %err, "discarding malformed payload"),
    }
}

/// Evaluate every universe symbol (and any extra snapshot symbol) in parallel.
pub fn evaluate_snapshot(snapshot: &Snapshot, universe: &Universe) -> SnapshotReport {
    let symbols: BTreeSet<&str> = universe
        .all_symbols()
        .into_iter()
        .chain(snapshot.symbols())
        .collect();

    let outcomes: Vec<(&str, SymbolOutcome)> = symbols
        .into_par_iter()
        .map(|symbol| (symbol, evaluate_symbol(symbol, snapshot.get(symbol))))
        .collect();

    let mut records = BTreeMap::new();
    let mut series_lengths = BTreeMap::new();
    let mut skipped = Vec::new();

    for (symbol, outcome) in outcomes {
        records.insert(symbol.to_string(), outcome.record);
        if let Some(n) = outcome.candles {
            series_lengths.insert(symbol.to_string(), n);
        }
        if let Some(reason) = outcome.skip {
            skipped.push(SkippedSymbol {
                symbol: symbol.to_string(),
                reason,
            });
        }
    }

    let report = SnapshotReport {
        dataset_hash: snapshot.dataset_hash(),
        records,
        series_lengths,
        skipped,
    };

    tracing::info!(
        symbols = report.records.len(),
        evaluated = report.evaluated(),
        skipped = report.skipped.len(),
        "snapshot evaluated"
    );

    report
}

/// Combine a fresh report with the previous one.
///
/// A symbol that produced no record in `next` keeps its record from
/// `previous`, so a failed refresh never blanks a row that had data. A
/// retained symbol leaves `skipped` and takes its prior series length, so
/// the merged report stays consistent with its records.
pub fn merge(previous: &SnapshotReport, mut next: SnapshotReport) -> SnapshotReport {
    let mut retained = BTreeSet::new();

    for (symbol, record) in next.records.iter_mut() {
        if record.is_none() {
            if let Some(prior) = previous.record(symbol) {
                tracing::debug!(symbol = symbol.as_str(), "retaining previous record");
                *record = Some(*prior);
                retained.insert(symbol.clone());
            }
        }
    }
    for (symbol, record) in &previous.records {
        if record.is_some() && !next.records.contains_key(symbol) {
            next.records.insert(symbol.clone(), *record);
            retained.insert(symbol.clone());
        }
    }

    for symbol in &retained {
        match previous.series_lengths.get(symbol) {
            Some(&n) => next.series_lengths.insert(symbol.clone(), n),
            None => next.series_lengths.remove(symbol),
        };
    }
    next.skipped.retain(|s| !retained.contains(&s.symbol));
    next
}
