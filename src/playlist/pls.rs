//! PLS version 2
//!
//! <https://en.wikipedia.org/wiki/PLS_(file_format)>

use super::PlaylistEntry;

pub fn write(entries: &[PlaylistEntry]) -> String {
    let mut out = String::from("[playlist]\n");
    for (index, entry) in entries.iter().enumerate() {
        let n = index + 1;
        out.push_str(&format!("File{n}={}\n", entry.url));
        out.push_str(&format!("Title{n}={}\n", entry.title));
    }
    out.push_str(&format!("NumberOfEntries={}\n", entries.len()));
    // no newline after the last line
    out.push_str("Version=2");
    out
}
