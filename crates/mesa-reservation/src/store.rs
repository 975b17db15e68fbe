// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only reservation storage.
//!
//! The ledger talks to storage through [`ReservationStore`]. The production
//! backend is a CSV file shared with the restaurant's spreadsheet tooling;
//! tests use the in-memory backend.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mesa_core::MesaError;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::types::{RECORDED_AT_FORMAT, ReservationRecord, slot_occupancy};

/// Exclusive hold on a store, released on drop.
///
/// Backends without cross-process sharing hand out an empty lock.
#[derive(Debug, Default)]
pub struct StoreLock {
    file: Option<File>,
}

impl StoreLock {
    pub fn unlocked() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take()
            && let Err(e) = file.unlock()
        {
            warn!(error = %e, "failed to release reservation store lock");
        }
    }
}

/// Durable, append-only collection of reservation records.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Every record, in append order.
    async fn records(&self) -> Result<Vec<ReservationRecord>, MesaError>;

    /// Append one record. Existing records are never rewritten.
    async fn append(&self, record: &ReservationRecord) -> Result<(), MesaError>;

    /// Tables held in one slot. An empty store holds none.
    async fn occupancy(&self, date: &str, time: &str) -> Result<u32, MesaError> {
        let records = self.records().await?;
        Ok(slot_occupancy(&records, date, time))
    }

    /// Take an exclusive lock spanning an occupancy read and an append.
    async fn lock(&self) -> Result<StoreLock, MesaError> {
        Ok(StoreLock::unlocked())
    }
}

/// One CSV row, with the column names the restaurant's spreadsheet uses.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Hora")]
    time: String,
    #[serde(rename = "Nome")]
    name: String,
    #[serde(rename = "Pessoas")]
    party_size: u32,
    #[serde(rename = "Mesas")]
    tables_used: u32,
    #[serde(rename = "Data_Registo")]
    recorded_at: String,
}

impl From<&ReservationRecord> for CsvRow {
    fn from(record: &ReservationRecord) -> Self {
        Self {
            date: record.date.clone(),
            time: record.time.clone(),
            name: record.name.clone(),
            party_size: record.party_size,
            tables_used: record.tables_used,
            recorded_at: record.recorded_at.format(RECORDED_AT_FORMAT).to_string(),
        }
    }
}

impl CsvRow {
    fn into_record(self) -> Result<ReservationRecord, chrono::ParseError> {
        let recorded_at = NaiveDateTime::parse_from_str(&self.recorded_at, RECORDED_AT_FORMAT)?;
        Ok(ReservationRecord {
            date: self.date,
            time: self.time,
            name: self.name,
            party_size: self.party_size,
            tables_used: self.tables_used,
            recorded_at,
        })
    }
}

/// CSV-backed store with a sibling `<file>.lock` for cross-process commits.
#[derive(Debug, Clone)]
pub struct CsvReservationStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl CsvReservationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

#[async_trait]
impl ReservationStore for CsvReservationStore {
    async fn records(&self) -> Result<Vec<ReservationRecord>, MesaError> {
        let path = self.path.clone();
        blocking(move || read_rows(&path)).await
    }

    async fn append(&self, record: &ReservationRecord) -> Result<(), MesaError> {
        let path = self.path.clone();
        let row = CsvRow::from(record);
        blocking(move || append_row(&path, &row)).await?;
        debug!(path = %self.path.display(), "reservation row appended");
        Ok(())
    }

    async fn lock(&self) -> Result<StoreLock, MesaError> {
        let lock_path = self.lock_path.clone();
        blocking(move || {
            let file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&lock_path)
                .map_err(|e| {
                    MesaError::storage(format!("cannot open {}", lock_path.display()), e)
                })?;
            file.lock().map_err(|e| {
                MesaError::storage(format!("cannot lock {}", lock_path.display()), e)
            })?;
            Ok(StoreLock { file: Some(file) })
        })
        .await
    }
}

async fn blocking<T, F>(f: F) -> Result<T, MesaError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, MesaError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MesaError::Internal(format!("reservation store task failed: {e}")))?
}

fn read_rows(path: &Path) -> Result<Vec<ReservationRecord>, MesaError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| MesaError::storage(format!("cannot read {}", path.display()), e))?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let corrupt = |reason: String| MesaError::Storage {
            message: format!("corrupt row at {}:{line}: {reason}", path.display()),
            source: None,
        };
        let row = row.map_err(|e| corrupt(e.to_string()))?;
        records.push(row.into_record().map_err(|e| corrupt(e.to_string()))?);
    }
    Ok(records)
}

fn append_row(path: &Path, row: &CsvRow) -> Result<(), MesaError> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| MesaError::storage(format!("cannot open {}", path.display()), e))?;
    let len = file
        .metadata()
        .map_err(|e| MesaError::storage(format!("cannot stat {}", path.display()), e))?
        .len();

    // Spreadsheet tools may save the last row without a line terminator.
    if len > 0 {
        terminate_last_line(&mut file)
            .map_err(|e| MesaError::storage(format!("cannot write {}", path.display()), e))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(len == 0)
        .from_writer(file);
    writer
        .serialize(row)
        .map_err(|e| MesaError::storage(format!("cannot write {}", path.display()), e))?;
    writer
        .flush()
        .map_err(|e| MesaError::storage(format!("cannot flush {}", path.display()), e))
}

fn terminate_last_line(file: &mut File) -> std::io::Result<()> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// Volatile store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryReservationStore {
    records: Mutex<Vec<ReservationRecord>>,
}

impl MemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ReservationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationStore {
    async fn records(&self) -> Result<Vec<ReservationRecord>, MesaError> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, record: &ReservationRecord) -> Result<(), MesaError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
