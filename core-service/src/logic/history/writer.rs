use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;

use super::record::DecisionRecord;
use crate::constants::HISTORY_MAX_FILE_BYTES;

const FILE_PREFIX: &str = "decisions-";
const FILE_EXT: &str = "jsonl";

/// Append-only JSONL store for finished decisions
pub struct HistoryWriter {
    file: Mutex<Option<File>>,
    base_dir: PathBuf,
    max_file_bytes: u64,
}

impl HistoryWriter {
    pub fn new(base_dir: PathBuf) -> io::Result<Self> {
        Self::with_max_size(base_dir, HISTORY_MAX_FILE_BYTES)
    }

    pub fn with_max_size(base_dir: PathBuf, max_file_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            file: Mutex::new(None),
            base_dir,
            max_file_bytes: max_file_bytes.max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Append one record, rotating when the current file is full
    pub fn append(&self, record: &DecisionRecord) -> io::Result<()> {
        let mut guard = self.file.lock();

        // Reopen the latest file on first use, unless it's already full
        if guard.is_none() {
            let reopened = match self.find_latest_file()? {
                Some(path) => {
                    let f = OpenOptions::new().append(true).open(&path)?;
                    (f.metadata()?.len() < self.max_file_bytes).then_some(f)
                }
                None => None,
            };
            *guard = Some(match reopened {
                Some(f) => f,
                None => self.create_new_file()?,
            });
        }

        let full = match guard.as_ref() {
            Some(f) => f.metadata()?.len() >= self.max_file_bytes,
            None => false,
        };
        if full {
            log::debug!("History file full, rotating");
            *guard = Some(self.create_new_file()?);
        }

        if let Some(file) = guard.as_mut() {
            let json = serde_json::to_string(record)?;
            writeln!(file, "{}", json)?;
        }

        Ok(())
    }

    /// Most recent records, newest first. Unparseable lines are skipped.
    pub fn read_recent(&self, limit: usize) -> io::Result<Vec<DecisionRecord>> {
        let mut out = Vec::new();
        if limit == 0 {
            return Ok(out);
        }

        for path in self.list_files()?.into_iter().rev() {
            let mut records = read_file(&path)?;
            while let Some(record) = records.pop() {
                out.push(record);
                if out.len() == limit {
                    return Ok(out);
                }
            }
        }
        Ok(out)
    }

    /// (file count, total bytes, latest file name)
    pub fn stats(&self) -> io::Result<(usize, u64, Option<String>)> {
        let files = self.list_files()?;
        let mut size = 0u64;
        for path in &files {
            size += fs::metadata(path)?.len();
        }
        let latest = files
            .last()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string);
        Ok((files.len(), size, latest))
    }

    fn create_new_file(&self) -> io::Result<File> {
        // timestamp format: YYYY-MM-DD-HHMMSS
        let stamp = Utc::now().format("%Y-%m-%d-%H%M%S").to_string();
        let mut path = self.base_dir.join(format!("{}{}.{}", FILE_PREFIX, stamp, FILE_EXT));

        // Same second: `_NNN` sorts after the plain name
        let mut seq = 1;
        while path.exists() {
            path = self
                .base_dir
                .join(format!("{}{}_{:03}.{}", FILE_PREFIX, stamp, seq, FILE_EXT));
            seq += 1;
        }

        log::debug!("Opening history file {}", path.display());
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// History files sorted oldest first (timestamped names sort in order)
    fn list_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut files = fs::read_dir(&self.base_dir)?
            .filter_map(|res| res.ok())
            .map(|e| e.path())
            .filter(|p| is_history_file(p))
            .collect::<Vec<_>>();
        files.sort();
        Ok(files)
    }

    fn find_latest_file(&self) -> io::Result<Option<PathBuf>> {
        Ok(self.list_files()?.pop())
    }
}

fn is_history_file(path: &Path) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(FILE_PREFIX));
    name_ok && path.extension().is_some_and(|e| e == FILE_EXT)
}

fn read_file(path: &Path) -> io::Result<Vec<DecisionRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<DecisionRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping {}:{}: {}", path.display(), line_no + 1, e),
        }
    }
    Ok(records)
}
