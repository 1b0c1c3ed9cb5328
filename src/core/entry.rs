//! The file object model the status line composes from.
//!
//! An [`Entry`] is one directory listing item plus the slice of stat data
//! the UI cares about.  Metadata that could not be read is simply absent
//! (`stat: None`) — never an error the caller has to handle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use humansize::{format_size, FormatSizeOptions, BINARY};

/// Entry ids are handed out once per loaded object and never reused, so
/// comparing ids is an identity comparison, not a content comparison.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Compact byte formatting for the status line (`"1.2KiB"`, no space).
pub fn human_size(bytes: u64) -> String {
    let opts = FormatSizeOptions::from(BINARY).space_after_value(false);
    format_size(bytes, opts)
}

/// Stat-derived fields, captured once at load time.
#[derive(Debug, Clone)]
pub struct EntryStat {
    pub mtime: SystemTime,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub mode: u32,
    pub is_dir: bool,
    pub is_file: bool,
}

impl EntryStat {
    #[cfg(unix)]
    fn from_metadata(meta: &fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            mtime: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.len(),
            mode: meta.mode(),
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
        }
    }

    #[cfg(not(unix))]
    fn from_metadata(meta: &fs::Metadata) -> Self {
        Self {
            mtime: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            nlink: 1,
            uid: 0,
            gid: 0,
            size: meta.len(),
            mode: 0,
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
        }
    }
}

/// One listing item.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: u64,
    pub name: String,
    pub path: PathBuf,
    pub stat: Option<EntryStat>,
    pub is_link: bool,
    pub link_target: Option<PathBuf>,
    /// For symlinks: whether the target currently resolves.
    pub link_exists: bool,
}

impl Entry {
    /// Read an entry from disk.  Never fails — unreadable metadata leaves
    /// `stat` empty and the composer skips the affected parts.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let link_meta = fs::symlink_metadata(path).ok();
        let is_link = link_meta
            .as_ref()
            .map_or(false, |m| m.file_type().is_symlink());

        // Follow the link for display stats; fall back to the link's own
        // stat when the target is gone.
        let followed = fs::metadata(path).ok();
        let link_exists = is_link && followed.is_some();
        let stat = followed
            .as_ref()
            .or(link_meta.as_ref())
            .map(EntryStat::from_metadata);

        let link_target = if is_link { fs::read_link(path).ok() } else { None };

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name,
            path: path.to_path_buf(),
            stat,
            is_link,
            link_target,
            link_exists,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.stat.as_ref().map_or(false, |s| s.is_dir)
    }

    pub fn is_file(&self) -> bool {
        self.stat.as_ref().map_or(false, |s| s.is_file)
    }

    /// `ls -l` style mode string, e.g. `"-rw-r--r--"`.
    pub fn permissions(&self) -> Option<String> {
        let stat = self.stat.as_ref()?;
        let type_ch = if self.is_link {
            'l'
        } else if stat.is_dir {
            'd'
        } else {
            '-'
        };
        let mut s = String::with_capacity(10);
        s.push(type_ch);
        for shift in [6u32, 3, 0] {
            let bits = (stat.mode >> shift) & 0o7;
            s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        Some(s)
    }

    /// Size/type info shown in the left part of the status line when the
    /// option is enabled: the byte size for plain files, a `/` marker for
    /// directories.  Carries its own leading space.
    pub fn infostring(&self) -> Option<String> {
        let stat = self.stat.as_ref()?;
        if stat.is_file {
            Some(format!(" {}", human_size(stat.size)))
        } else if stat.is_dir {
            Some(" /".to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_stat(mode: u32) -> EntryStat {
        EntryStat {
            mtime: SystemTime::UNIX_EPOCH,
            nlink: 1,
            uid: 1000,
            gid: 1000,
            size: 0,
            mode,
            is_dir: false,
            is_file: true,
        }
    }

    fn entry_with_mode(mode: u32) -> Entry {
        Entry {
            id: 1,
            name: "f".into(),
            path: PathBuf::from("f"),
            stat: Some(fake_stat(mode)),
            is_link: false,
            link_target: None,
            link_exists: false,
        }
    }

    #[test]
    fn permission_string_renders_triplets() {
        assert_eq!(entry_with_mode(0o644).permissions().unwrap(), "-rw-r--r--");
        assert_eq!(entry_with_mode(0o755).permissions().unwrap(), "-rwxr-xr-x");
        assert_eq!(entry_with_mode(0o000).permissions().unwrap(), "----------");
    }

    #[test]
    fn missing_stat_means_no_permissions() {
        let entry = Entry {
            id: 2,
            name: "gone".into(),
            path: PathBuf::from("gone"),
            stat: None,
            is_link: false,
            link_target: None,
            link_exists: false,
        };
        assert!(entry.permissions().is_none());
        assert!(entry.infostring().is_none());
    }

    #[test]
    fn infostring_shows_size_for_plain_files() {
        let mut entry = entry_with_mode(0o644);
        if let Some(stat) = entry.stat.as_mut() {
            stat.size = 2048;
        }
        assert_eq!(entry.infostring().unwrap(), " 2KiB");
    }

    #[test]
    fn infostring_marks_directories() {
        let mut entry = entry_with_mode(0o755);
        if let Some(stat) = entry.stat.as_mut() {
            stat.is_file = false;
            stat.is_dir = true;
        }
        assert_eq!(entry.infostring().unwrap(), " /");
    }

    #[test]
    fn infostring_skips_special_files() {
        // Sockets, fifos and the like are neither file nor directory.
        let mut entry = entry_with_mode(0o644);
        if let Some(stat) = entry.stat.as_mut() {
            stat.is_file = false;
        }
        assert!(entry.infostring().is_none());
    }

    #[test]
    fn ids_are_unique_per_load() {
        let dir = std::env::temp_dir();
        let a = Entry::from_path(&dir);
        let b = Entry::from_path(&dir);
        // Same path, different objects — identity differs.
        assert_ne!(a.id, b.id);
    }
}
