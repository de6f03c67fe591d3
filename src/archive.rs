//! Archive packing for pruned dependency trees
//!
//! Packs a pruned class tree into a deflate-compressed jar. Entries are
//! written in sorted walk order with directory entries ahead of their
//! contents, so two runs over the same tree produce the same entry list.

use crate::error::ArchiveError;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Entry counts from one archive write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub file_entries: usize,
    pub directory_entries: usize,
}

impl ArchiveSummary {
    pub fn total_entries(&self) -> usize {
        self.file_entries + self.directory_entries
    }
}

/// Packs the tree under `source_dir` into a fresh archive at `archive_path`
pub fn write_archive(source_dir: &Path, archive_path: &Path) -> Result<ArchiveSummary, ArchiveError> {
    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
    }
    let file = File::create(archive_path).map_err(|e| ArchiveError::io(archive_path, e))?;
    let mut writer = ZipWriter::new(file);
    let mut summary = ArchiveSummary::default();

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry =
            entry.map_err(|e| ArchiveError::write_failed(archive_path, e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| ArchiveError::write_failed(archive_path, e.to_string()))?;
        let name = entry_name(relative);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(entry_timestamp(entry.path()));
        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| ArchiveError::write_failed(archive_path, e.to_string()))?;
            summary.directory_entries += 1;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| ArchiveError::write_failed(archive_path, e.to_string()))?;
            let mut source = File::open(entry.path()).map_err(|e| ArchiveError::io(entry.path(), e))?;
            io::copy(&mut source, &mut writer).map_err(|e| ArchiveError::io(entry.path(), e))?;
            summary.file_entries += 1;
        }
    }

    writer
        .finish()
        .map_err(|e| ArchiveError::write_failed(archive_path, e.to_string()))?;
    Ok(summary)
}

/// Entry names of an archive, in stored order
pub fn list_entries(archive_path: &Path) -> Result<Vec<String>, ArchiveError> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::io(archive_path, e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ArchiveError::read_failed(archive_path, e.to_string()))?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| ArchiveError::read_failed(archive_path, e.to_string()))?;
        entries.push(entry.name().to_string());
    }
    Ok(entries)
}

// Archive entry names always use forward slashes
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Modification time of a source path as a container timestamp, falling
/// back to the container epoch when the mtime is unreadable or out of range
fn entry_timestamp(path: &Path) -> zip::DateTime {
    let Ok(modified) = fs::metadata(path).and_then(|metadata| metadata.modified()) else {
        return zip::DateTime::default();
    };
    let local: DateTime<Local> = modified.into();
    let Ok(year) = u16::try_from(local.year()) else {
        return zip::DateTime::default();
    };
    zip::DateTime::from_date_and_time(
        year,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .unwrap_or_default()
}
