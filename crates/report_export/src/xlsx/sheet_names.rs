//! Worksheet naming rules

use std::collections::HashSet;

/// Longest sheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: [char; 7] = ['\\', '/', '*', '?', ':', '[', ']'];

/// Replace forbidden characters with `_`, trim, and cap the length.
/// May return an empty string.
pub fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    // Names may not start or end with an apostrophe
    let trimmed = replaced.trim().trim_matches('\'').trim();
    trimmed.chars().take(MAX_SHEET_NAME_LEN).collect::<String>().trim_end().to_string()
}

/// Sanitize every name and make them unique, case-insensitively.
/// Empty names become `Sheet<N>`; repeats get `_2`, `_3`, ...
pub fn unique_sheet_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut used = HashSet::new();
    let mut result = Vec::with_capacity(names.len());

    for (i, name) in names.iter().enumerate() {
        let mut base = sanitize_sheet_name(name.as_ref());
        if base.is_empty() {
            base = format!("Sheet{}", i + 1);
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while used.contains(&candidate.to_lowercase()) {
            let tail = format!("_{}", suffix);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(tail.chars().count());
            candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), tail);
            suffix += 1;
        }

        used.insert(candidate.to_lowercase());
        result.push(candidate);
    }

    result
}
