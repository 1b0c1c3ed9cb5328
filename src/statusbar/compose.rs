//! Content composition — the `ls -l`-style left part and the
//! directory/marks/scroll summary on the right.
//!
//! Missing collaborator data is a normal outcome: no stat means an empty
//! left part, no listing means an empty right part.  Nothing in here
//! errors out.

use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::core::entry::human_size;

use super::bar::{Bar, FragmentStyle, Side};
use super::names::NameCache;
use super::StatusContext;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Build both sides of the bar from the current frame's inputs.
pub fn compose(bar: &mut Bar, ctx: &StatusContext, names: &mut NameCache) {
    left_part(&mut bar.left, ctx, names);
    right_part(&mut bar.right, ctx);
}

fn left_part(left: &mut Side, ctx: &StatusContext, names: &mut NameCache) {
    let Some(target) = ctx.file else { return };
    let Some(stat) = target.stat.as_ref() else { return };
    let Some(perms) = target.permissions() else { return };

    let ownership = if ctx.euid == stat.uid {
        FragmentStyle::Good
    } else {
        FragmentStyle::Bad
    };
    left.add(perms, ownership);
    left.add_space();
    left.add(stat.nlink.to_string(), FragmentStyle::Plain);
    left.add_space();
    left.add(names.owner(stat.uid), FragmentStyle::Plain);
    left.add_space();
    left.add(names.group(stat.gid), FragmentStyle::Plain);

    if target.is_link {
        let how = if target.link_exists {
            FragmentStyle::Good
        } else {
            FragmentStyle::Bad
        };
        let dest = target
            .link_target
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        left.add(format!(" -> {dest}"), how);
        // Nothing follows a link target.
        return;
    }

    if ctx.display_size {
        if let Some(info) = target.infostring() {
            left.add(info, FragmentStyle::Plain);
        }
    }
    left.add_space();
    left.add(format_mtime(stat.mtime), FragmentStyle::Plain);
}

fn format_mtime(mtime: SystemTime) -> String {
    DateTime::<Local>::from(mtime).format(TIME_FORMAT).to_string()
}

fn right_part(right: &mut Side, ctx: &StatusContext) {
    let Some(column) = ctx.column else { return };
    let Some(files) = column.files.as_ref() else { return };

    let marked = column.marked_count();
    if marked > 0 {
        if column.all_marked() {
            right.add(human_or_pending(column.disk_usage), FragmentStyle::Plain);
        } else {
            right.add(human_size(column.marked_file_bytes()), FragmentStyle::Plain);
        }
        right.add(format!(" / {marked}"), FragmentStyle::Plain);
    } else {
        right.add(human_or_pending(column.disk_usage), FragmentStyle::Plain);
        right.add(", ", FragmentStyle::Space);
        right.add(human_or_pending(column.free_space), FragmentStyle::Plain);
    }
    right.add("  ", FragmentStyle::Space);

    let max_scroll = files.len() as isize - ctx.height as isize;
    if marked > 0 {
        // There are marks somewhere, possibly scrolled out of view.
        right.add("Mrk", FragmentStyle::Marked);
    } else if max_scroll <= 0 {
        right.add("All", FragmentStyle::Scroll);
    } else if column.offset == 0 {
        right.add("Top", FragmentStyle::Scroll);
    } else if column.offset as isize >= max_scroll {
        right.add("Bot", FragmentStyle::Scroll);
    } else {
        let pct = 100.0 * column.offset as f64 / max_scroll as f64;
        right.add(format!("{pct:.0}%"), FragmentStyle::Scroll);
    }
}

fn human_or_pending(bytes: Option<u64>) -> String {
    bytes.map(human_size).unwrap_or_else(|| "...".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::column::Column;
    use crate::core::entry::{Entry, EntryStat};
    use crate::statusbar::bar::Fragment;
    use std::path::PathBuf;
    use std::time::Instant;

    // Ids high enough that name resolution always falls back to numbers,
    // keeping the expected owner/group text environment-independent.
    const UID: u32 = 4_294_000_100;
    const GID: u32 = 4_294_000_200;

    fn file_entry(id: u64, size: u64) -> Entry {
        Entry {
            id,
            name: format!("f{id}"),
            path: PathBuf::from(format!("f{id}")),
            stat: Some(EntryStat {
                mtime: SystemTime::UNIX_EPOCH,
                nlink: 2,
                uid: UID,
                gid: GID,
                size,
                mode: 0o644,
                is_dir: false,
                is_file: true,
            }),
            is_link: false,
            link_target: None,
            link_exists: false,
        }
    }

    fn column_of(sizes: &[u64]) -> Column {
        let mut column = Column::new(PathBuf::from("/tmp/x"));
        column.files = Some(
            sizes
                .iter()
                .enumerate()
                .map(|(i, &s)| file_entry(i as u64 + 1, s))
                .collect(),
        );
        column
    }

    fn ctx<'a>(file: Option<&'a Entry>, column: Option<&'a Column>, height: usize) -> StatusContext<'a> {
        StatusContext {
            file,
            column,
            height,
            display_size: false,
            euid: UID,
            width: 200,
            now: Instant::now(),
        }
    }

    fn composed(ctx: &StatusContext) -> Vec<Fragment> {
        let mut bar = Bar::new();
        let mut names = NameCache::new();
        compose(&mut bar, ctx, &mut names);
        bar.combine()
    }

    fn texts(fragments: &[Fragment]) -> Vec<String> {
        fragments.iter().map(|f| f.text.clone()).collect()
    }

    #[test]
    fn left_part_order_and_ownership_style() {
        let entry = file_entry(1, 5);
        let out = composed(&ctx(Some(&entry), None, 10));
        // The mtime renders in local time; derive the expectation the same way.
        let epoch = format_mtime(SystemTime::UNIX_EPOCH);
        let expected = vec![
            "-rw-r--r--".to_string(),
            " ".to_string(),
            "2".to_string(),
            " ".to_string(),
            UID.to_string(),
            " ".to_string(),
            GID.to_string(),
            " ".to_string(),
            epoch,
        ];
        assert_eq!(texts(&out), expected);
        // Process owns the file.
        assert_eq!(out[0].style, FragmentStyle::Good);
        // Separators are spacers, same as on the right side.
        for frag in out.iter().filter(|f| f.text == " ") {
            assert_eq!(frag.style, FragmentStyle::Space);
        }
    }

    #[test]
    fn foreign_file_perms_are_bad() {
        let entry = file_entry(1, 5);
        let mut c = ctx(Some(&entry), None, 10);
        c.euid = 0;
        let out = composed(&c);
        assert_eq!(out[0].style, FragmentStyle::Bad);
    }

    #[test]
    fn missing_stat_yields_empty_left() {
        let mut entry = file_entry(1, 5);
        entry.stat = None;
        let out = composed(&ctx(Some(&entry), None, 10));
        assert!(out.is_empty());
    }

    #[test]
    fn symlink_ends_the_left_part() {
        let mut entry = file_entry(1, 5);
        entry.is_link = true;
        entry.link_target = Some(PathBuf::from("/etc/hosts"));
        entry.link_exists = true;
        let out = composed(&ctx(Some(&entry), None, 10));
        let last = out.last().unwrap();
        assert_eq!(last.text, " -> /etc/hosts");
        assert_eq!(last.style, FragmentStyle::Good);
    }

    #[test]
    fn broken_symlink_is_bad() {
        let mut entry = file_entry(1, 5);
        entry.is_link = true;
        entry.link_target = Some(PathBuf::from("gone"));
        entry.link_exists = false;
        let out = composed(&ctx(Some(&entry), None, 10));
        assert_eq!(out.last().unwrap().style, FragmentStyle::Bad);
    }

    #[test]
    fn infostring_respects_the_setting() {
        let entry = file_entry(1, 2048);
        let mut c = ctx(Some(&entry), None, 10);
        c.display_size = true;
        let out = composed(&c);
        assert!(texts(&out).contains(&" 2KiB".to_string()));

        c.display_size = false;
        let out = composed(&c);
        assert!(!texts(&out).contains(&" 2KiB".to_string()));
    }

    #[test]
    fn directory_infostring_shows_marker() {
        let mut entry = file_entry(1, 0);
        if let Some(stat) = entry.stat.as_mut() {
            stat.is_file = false;
            stat.is_dir = true;
        }
        let mut c = ctx(Some(&entry), None, 10);
        c.display_size = true;
        let out = composed(&c);
        assert!(texts(&out).contains(&" /".to_string()));
    }

    #[test]
    fn unloaded_listing_yields_empty_right() {
        let column = Column::new(PathBuf::from("/nope"));
        let out = composed(&ctx(None, Some(&column), 10));
        assert!(out.is_empty());
    }

    #[test]
    fn marked_subset_shows_file_sum_and_count() {
        let mut column = column_of(&[10, 20, 30, 40, 50]);
        column.marked.extend([1, 2, 3]);
        let out = composed(&ctx(None, Some(&column), 10));
        let t = texts(&out);
        assert_eq!(t[0], "60B");
        assert_eq!(t[1], " / 3");
        assert_eq!(t.last().unwrap(), "Mrk");
    }

    #[test]
    fn all_marked_shows_disk_usage_instead() {
        let mut column = column_of(&[10, 20, 30, 40, 50]);
        column.marked.extend([1, 2, 3, 4, 5]);
        column.disk_usage = Some(4096);
        let out = composed(&ctx(None, Some(&column), 10));
        let t = texts(&out);
        assert_eq!(t[0], "4KiB");
        assert_eq!(t[1], " / 5");
    }

    #[test]
    fn unmarked_shows_du_and_free_space() {
        let mut column = column_of(&[1, 2]);
        column.disk_usage = Some(1024);
        column.free_space = Some(2048);
        let out = composed(&ctx(None, Some(&column), 10));
        let t = texts(&out);
        assert_eq!(&t[..3], &["1KiB".to_string(), ", ".to_string(), "2KiB".to_string()]);
    }

    #[test]
    fn pending_disk_usage_renders_placeholder() {
        let column = column_of(&[1]);
        let out = composed(&ctx(None, Some(&column), 10));
        assert_eq!(texts(&out)[0], "...");
    }

    #[test]
    fn scroll_indicator_boundaries() {
        // 50 items in a 50-row viewport: everything visible.
        let column = column_of(&vec![1; 50]);
        let out = composed(&ctx(None, Some(&column), 50));
        assert_eq!(out.last().unwrap().text, "All");

        // 20 items, 10 rows: max_scroll = 10.
        let mut column = column_of(&vec![1; 20]);
        let c = ctx(None, Some(&column), 10);
        assert_eq!(composed(&c).last().unwrap().text, "Top");

        column.offset = 10;
        assert_eq!(
            composed(&ctx(None, Some(&column), 10)).last().unwrap().text,
            "Bot"
        );

        column.offset = 5;
        assert_eq!(
            composed(&ctx(None, Some(&column), 10)).last().unwrap().text,
            "50%"
        );
    }
}
