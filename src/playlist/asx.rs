//! Windows Media ASX 3.0

use quick_xml::escape::escape;

use super::PlaylistEntry;

const PLAYLIST_TITLE: &str = "Music";

pub fn write(entries: &[PlaylistEntry]) -> String {
    let mut out = String::from(r#"<asx version="3.0">"#);
    out.push('\n');
    out.push_str(&format!("<title>{PLAYLIST_TITLE}</title>\n"));
    for entry in entries {
        out.push_str("<entry>");
        out.push_str(&format!("<title>{}</title>", escape(entry.title)));
        out.push_str(&format!(r#"<ref href="{}"/>"#, escape(&entry.url)));
        out.push_str("</entry>\n");
    }
    out.push_str("</asx>");
    out
}
