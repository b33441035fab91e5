//! Output file naming

use crate::result::ExportFormat;
use chrono::NaiveDate;

const FALLBACK_NAME: &str = "export";

/// Lowercase, collapse non-alphanumeric runs to `-`, trim hyphens
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `<slug>-<YYYYMMDD><ext>`, slugging the filename, else the title
pub fn build_filename(
    filename: Option<&str>,
    title: Option<&str>,
    format: ExportFormat,
    date: NaiveDate,
) -> String {
    let ext = format.extension();
    let base = filename
        .map(|name| strip_extension(name, ext))
        .filter(|name| !name.trim().is_empty())
        .or(title)
        .unwrap_or(FALLBACK_NAME);

    let mut slug = slugify(base);
    if slug.is_empty() {
        slug = FALLBACK_NAME.to_string();
    }
    format!("{}-{}{}", slug, date.format("%Y%m%d"), ext)
}

fn strip_extension<'a>(name: &'a str, ext: &str) -> &'a str {
    let split = name.len().saturating_sub(ext.len());
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(tail)) if tail.eq_ignore_ascii_case(ext) => stem,
        _ => name,
    }
}
