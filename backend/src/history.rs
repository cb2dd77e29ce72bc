// Trip history: durable append-only store and the monthly cost aggregation

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use tokio::sync::Mutex;

use crate::models::{HistoryEntry, MonthlyAggregate};

/// Fixed key under which the whole history sequence is stored.
pub const HISTORY_KEY: &str = "trip_history";

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history storage error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt history data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Flat ordered sequence of saved trips, persisted as JSON text.
pub struct HistoryStore {
    path: PathBuf,
    /// Serializes read-then-write cycles.
    lock: Mutex<()>,
}

impl HistoryStore {
    /// Opens the store inside `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns HistoryError if the directory cannot be created
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{HISTORY_KEY}.json"));
        tracing::info!("trip history stored at {}", path.display());
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full history in insertion order. A missing file is an empty history.
    pub async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Appends `entry` and returns it as stored
    pub async fn append(&self, entry: HistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.push(entry.clone());
        self.write(&entries).await?;

        tracing::info!(
            "Trip saved to history: {} -> {} (ID: {}, {} entries)",
            entry.origin_name,
            entry.destination_name,
            entry.id,
            entries.len()
        );
        Ok(entry)
    }

    pub async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        self.write(&[]).await?;
        tracing::info!("Trip history cleared");
        Ok(())
    }

    async fn read(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes through a temp file so a crash never leaves half a document.
    async fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Sums trip costs per calendar month, oldest month first.
pub fn monthly_aggregates(entries: &[HistoryEntry]) -> Vec<MonthlyAggregate> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for entry in entries {
        let key = (entry.timestamp.year(), entry.timestamp.month());
        *totals.entry(key).or_insert(0.0) += entry.cost;
    }

    totals
        .into_iter()
        .filter_map(|((year, month), total_cost)| {
            let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyAggregate {
                label: first_day.format("%b %Y").to_string(),
                total_cost,
            })
        })
        .collect()
}
