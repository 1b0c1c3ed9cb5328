//! The browse column — one directory listing with pointer, marks and
//! scroll state.  This is the "active column" collaborator the status
//! line reads each frame.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::entry::Entry;

/// A single directory column.
#[derive(Debug)]
pub struct Column {
    pub path: PathBuf,
    /// `None` until the listing has been loaded (or when it failed to).
    pub files: Option<Vec<Entry>>,
    /// Index of the pointed-at entry.
    pub pointed: usize,
    /// First visible row.
    pub offset: usize,
    /// Ids of marked entries.
    pub marked: HashSet<u64>,
    /// Recursive size of everything below `path`; filled in by a
    /// background task, so it starts absent.
    pub disk_usage: Option<u64>,
    /// Free space on the filesystem holding `path`.
    pub free_space: Option<u64>,
    /// Path the free-space measurement is taken at.
    pub mount_path: PathBuf,
}

impl Column {
    pub fn new(path: PathBuf) -> Self {
        Self {
            mount_path: path.clone(),
            path,
            files: None,
            pointed: 0,
            offset: 0,
            marked: HashSet::new(),
            disk_usage: None,
            free_space: None,
        }
    }

    /// (Re)read the directory listing.  Directories sort before files,
    /// each group alphabetically, case-insensitive.  A failed read leaves
    /// `files` absent — the status line then shows an empty right part.
    pub fn load(&mut self, show_hidden: bool) {
        self.pointed = 0;
        self.offset = 0;
        self.marked.clear();
        self.disk_usage = None;
        // statvfs on any path inside a filesystem reports that filesystem,
        // so the directory itself stands in for its mount point.
        self.mount_path = self.path.clone();
        self.free_space = free_space_at(&self.mount_path);

        let reader = match std::fs::read_dir(&self.path) {
            Ok(reader) => reader,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "listing failed");
                self.files = None;
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut plain = Vec::new();
        for dir_entry in reader.flatten() {
            let entry = Entry::from_path(&dir_entry.path());
            if !show_hidden && entry.name.starts_with('.') {
                continue;
            }
            if entry.is_dir() {
                dirs.push(entry);
            } else {
                plain.push(entry);
            }
        }
        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        plain.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        dirs.extend(plain);
        self.files = Some(dirs);
    }

    pub fn len(&self) -> usize {
        self.files.as_ref().map_or(0, Vec::len)
    }

    pub fn pointed_entry(&self) -> Option<&Entry> {
        self.files.as_ref()?.get(self.pointed)
    }

    pub fn move_pointer(&mut self, delta: isize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let new = self.pointed as isize + delta;
        self.pointed = new.clamp(0, len as isize - 1) as usize;
    }

    pub fn point_to_end(&mut self) {
        self.pointed = self.len().saturating_sub(1);
    }

    /// Keep the pointed row inside a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.pointed < self.offset {
            self.offset = self.pointed;
        } else if self.pointed >= self.offset + height {
            self.offset = self.pointed - height + 1;
        }
    }

    /// Toggle the mark on the pointed entry.
    pub fn toggle_mark(&mut self) {
        if let Some(id) = self.pointed_entry().map(|e| e.id) {
            if !self.marked.insert(id) {
                self.marked.remove(&id);
            }
        }
    }

    pub fn is_marked(&self, id: u64) -> bool {
        self.marked.contains(&id)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    pub fn all_marked(&self) -> bool {
        self.len() > 0 && self.marked.len() == self.len()
    }

    /// Summed size of marked plain files.  Directories and specials are
    /// excluded — their sizes are not additive here.
    pub fn marked_file_bytes(&self) -> u64 {
        let Some(files) = &self.files else { return 0 };
        files
            .iter()
            .filter(|e| self.marked.contains(&e.id) && e.is_file())
            .filter_map(|e| e.stat.as_ref().map(|s| s.size))
            .fold(0u64, u64::saturating_add)
    }
}

#[cfg(unix)]
fn free_space_at(path: &Path) -> Option<u64> {
    let stat = nix::sys::statvfs::statvfs(path).ok()?;
    Some((stat.blocks_available() as u64).saturating_mul(stat.fragment_size() as u64))
}

#[cfg(not(unix))]
fn free_space_at(_path: &Path) -> Option<u64> {
    None
}
