// Cache path utilities.
// Constructs filesystem paths for stored word rows and the log file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the default cache directory (~/.cache/pocketdict on Linux).
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pocketdict").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one JSON row per headword.
pub fn words_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("words")
}

/// Path to the row for a headword.
pub fn word_path(cache_dir: &Path, headword: &str) -> PathBuf {
    words_dir(cache_dir).join(format!("{}.json", encode_name(headword)))
}

/// Path to the application log file.
pub fn log_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("pocketdict.log")
}

/// Encode a name for use as a filename.
/// Keeps ASCII lowercase letters, digits and `-`; every other byte becomes `%XX`,
/// so distinct names always map to distinct files.
fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
