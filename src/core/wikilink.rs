use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // [[target]], [[target#heading]], [[target^block]] or [[target|display]]
    static ref WIKILINK_RE: Regex = Regex::new(r"\[\[([\w .\-/]+)(?:[#^|].*)?\]\]").unwrap();
}

/// Yields the raw target of every wikilink in `content`, in order of appearance.
///
/// Anchors, block references and display aliases are stripped. A suffix runs
/// to the last `]]` on its line, so anything after it on that line is ignored.
pub fn wikilink_targets(content: &str) -> impl Iterator<Item = &str> + '_ {
    WIKILINK_RE
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Turns `\r\n` and lone `\r` line endings into `\n` so a link suffix never
/// runs across an old-style line break.
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

pub fn extract_wikilinks(content: &str) -> Vec<String> {
    wikilink_targets(content).map(str::to_string).collect()
}
