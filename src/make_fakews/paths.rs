use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Make a command-line path absolute: a leading `~` becomes the home
/// directory and relative paths are joined onto the current directory.
/// The path does not have to exist.
pub fn absolutize(input: &Path) -> PathBuf {
    let text = input.to_string_lossy();
    if text.starts_with('~') {
        if let Some(p) = expand_tilde(&text) {
            return p;
        }
    }
    if input.is_absolute() {
        return input.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(input),
        Err(_) => input.to_path_buf(),
    }
}

// `None` when neither HOME nor USERPROFILE is set.
fn expand_tilde(input: &str) -> Option<PathBuf> {
    let home = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE"))?;
    let rest = input.trim_start_matches('~');
    let mut p = PathBuf::from(home);
    let trimmed = rest.trim_start_matches(['/', '\\']);
    if !trimmed.is_empty() {
        p.push(trimmed);
    }
    Some(p)
}

/// A not-yet-existing directory under the OS temp dir, unique per process
/// and call.
pub fn unique_temp_root() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    env::temp_dir().join(format!("fakews_{}_{}", std::process::id(), nanos))
}
