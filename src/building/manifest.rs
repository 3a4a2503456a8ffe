use std::fs;
use std::io::{self, Write};
use std::path::Path;

use filetime::FileTime;
use walkdir::WalkDir;

use crate::errors::Result;
use crate::fs_op::path::slash_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// One entry of a generated tree, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
    pub mtime: i64,
    /// File bytes; `None` for anything that is not a regular file.
    pub contents: Option<Vec<u8>>,
}

/// Snapshot every entry below `root` (the root itself excluded), sorted by
/// path. Two snapshots compare equal only when paths, kinds, contents and
/// modification times all match.
pub fn snapshot(root: &Path) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let meta = entry.metadata().map_err(io::Error::from)?;
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let contents = match kind {
            EntryKind::File => Some(fs::read(entry.path())?),
            _ => None,
        };
        entries.push(TreeEntry {
            path: slash_path(rel),
            kind,
            mtime: FileTime::from_last_modification_time(&meta).unix_seconds(),
            contents,
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Write one relative path per line for every file under `root`.
pub fn write_manifest<W: Write>(root: &Path, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for entry in snapshot(root)? {
        if entry.kind == EntryKind::File {
            writeln!(out, "{}", entry.path)?;
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn lists_files_sorted() {
        let td = tempdir().unwrap();
        fs::create_dir_all(td.path().join("b")).unwrap();
        fs::write(td.path().join("b/z.txt"), b"z").unwrap();
        fs::write(td.path().join("a.txt"), b"a").unwrap();

        let snap = snapshot(td.path()).unwrap();
        let paths: Vec<_> = snap.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a.txt", "b", "b/z.txt"]);
        assert_eq!(snap[0].contents.as_deref(), Some(&b"a"[..]));
        assert_eq!(snap[1].kind, EntryKind::Dir);

        let mut out = Vec::new();
        assert_eq!(write_manifest(td.path(), &mut out).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "a.txt\nb/z.txt\n");
    }
}
