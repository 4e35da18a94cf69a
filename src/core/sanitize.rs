// src/core/sanitize.rs

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Filesystem-safe stem for a team's export file.
/// Falls back to `team_<n>` when nothing usable is left.
pub fn sanitize_team_filename(name: &str, n: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' { if !(last_us && ch == '_') { out.push(ch); } last_us = ch == '_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { format!("team_{}", n) } else { out }
}

/// Split `"<home> - <away>"` on the literal separator.
/// `None` unless there are exactly two non-empty names after trimming.
pub fn split_fixture<'a>(raw: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    let mut parts = raw.split(sep);
    let home = parts.next()?.trim();
    let away = parts.next()?.trim();
    if parts.next().is_some() || home.is_empty() || away.is_empty() {
        return None;
    }
    Some((home, away))
}
