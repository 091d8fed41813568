use once_cell::sync::Lazy;
use regex::Regex;

// Emoticons, misc symbols & pictographs, transport & map symbols,
// regional indicators, dingbats, circled M, enclosed alphanumeric and
// ideographic supplements.
static PICTOGRAPHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2702}-\x{27B0}",
        r"\x{24C2}",
        r"\x{1F170}-\x{1F251}",
        "]+",
    ))
    .unwrap()
});

/// Remove pictograph and symbol code points from `text`
pub fn strip_pictographs(text: &str) -> String {
    PICTOGRAPHS.replace_all(text, "").into_owned()
}
