use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::task;
use tracing::debug;

/// The parts of a stat result the listing renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub mode: u32,
    pub inode: u64,
}

impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        Self {
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            mode: mode_bits(metadata),
            inode: inode(metadata),
        }
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    let base = if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    if metadata.is_dir() { base | 0o111 } else { base }
}

#[cfg(unix)]
fn inode(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn inode(_metadata: &Metadata) -> u64 {
    0
}

/// One named entry of a directory. `stat` is `None` when the entry could not
/// be stat'ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub stat: Option<FileStat>,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, stat: FileStat) -> Self {
        Self {
            name: name.into(),
            stat: Some(stat),
        }
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stat: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.stat.as_ref().is_some_and(|s| s.is_dir)
    }
}

/// Directory contents split into the three display groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBuckets {
    pub failed: Vec<DirEntry>,
    pub directories: Vec<DirEntry>,
    pub files: Vec<DirEntry>,
}

impl EntryBuckets {
    pub fn len(&self) -> usize {
        self.failed.len() + self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, entry: DirEntry) {
        match &entry.stat {
            None => self.failed.push(entry),
            Some(stat) if stat.is_dir => self.directories.push(entry),
            Some(_) => self.files.push(entry),
        }
    }
}

/// Stat every name inside `dir` and bucket the results.
///
/// Symlinks are followed, so a dangling link lands in `failed`. Input order
/// is preserved within each bucket. Every name ends up in exactly one
/// bucket.
pub async fn classify(dir: PathBuf, names: Vec<String>) -> EntryBuckets {
    let fallback = names.clone();
    match task::spawn_blocking(move || classify_blocking(&dir, names)).await {
        Ok(buckets) => buckets,
        Err(e) => {
            debug!(error = %e, "classification task failed");
            EntryBuckets {
                failed: fallback.into_iter().map(DirEntry::failed).collect(),
                ..Default::default()
            }
        }
    }
}

fn classify_blocking(dir: &Path, names: Vec<String>) -> EntryBuckets {
    let mut buckets = EntryBuckets::default();

    for name in names {
        let entry = match fs::metadata(dir.join(&name)) {
            Ok(metadata) => DirEntry::new(name, FileStat::from(&metadata)),
            Err(e) => {
                debug!(name = %name, error = %e, "stat failed for directory entry");
                DirEntry::failed(name)
            }
        };
        buckets.push(entry);
    }

    buckets
}
