//! Owner/group name memoization.
//!
//! Numeric uids/gids are resolved to names once and remembered for the
//! rest of the process — passwd/group entries are assumed stable.  A
//! failed lookup is cached as the numeric id rendered as text, so
//! repeated failures cost one hash probe, not one passwd scan.
//!
//! Multiple status-bar instances may share a single cache by reference
//! (`Rc<RefCell<NameCache>>`); nothing here is thread-aware.

use std::collections::HashMap;

/// Memoized uid → user name and gid → group name maps.
#[derive(Debug, Default)]
pub struct NameCache {
    owners: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved user name for `uid`, or the numeric id as text.
    pub fn owner(&mut self, uid: u32) -> String {
        self.owners
            .entry(uid)
            .or_insert_with(|| resolve_user(uid))
            .clone()
    }

    /// Resolved group name for `gid`, or the numeric id as text.
    pub fn group(&mut self, gid: u32) -> String {
        self.groups
            .entry(gid)
            .or_insert_with(|| resolve_group(gid))
            .clone()
    }
}

#[cfg(unix)]
fn resolve_user(uid: u32) -> String {
    match nix::unistd::User::from_uid(nix::unistd::Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        _ => uid.to_string(),
    }
}

#[cfg(unix)]
fn resolve_group(gid: u32) -> String {
    match nix::unistd::Group::from_gid(nix::unistd::Gid::from_raw(gid)) {
        Ok(Some(group)) => group.name,
        _ => gid.to_string(),
    }
}

#[cfg(not(unix))]
fn resolve_user(uid: u32) -> String {
    uid.to_string()
}

#[cfg(not(unix))]
fn resolve_group(gid: u32) -> String {
    gid.to_string()
}
