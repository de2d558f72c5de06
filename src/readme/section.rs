use crate::error::Result;
use crate::languages::tally::LanguageShares;
use crate::readme::table::render_table;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionMarkers {
    pub start: String,
    pub end: String,
}

impl SectionMarkers {
    pub fn new(section: &str) -> Self {
        Self {
            start: format!("<!--START_SECTION:{section}-->"),
            end: format!("<!--END_SECTION:{section}-->"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    Unchanged,
    NoData,
    MarkerMissing,
}

/// Regenerates everything between the start and end markers.
///
/// Returns `None` when no line matches the start marker. Marker lines are
/// matched after trimming surrounding whitespace. A stray end marker is
/// dropped, and an unterminated section swallows the rest of the document.
/// `\r\n` and a lone `\r` both count as line breaks and come out as `\n`.
pub fn rewrite_section(
    content: &str,
    markers: &SectionMarkers,
    shares: &LanguageShares,
) -> Option<String> {
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    if !content.lines().any(|l| l.trim() == markers.start) {
        return None;
    }

    let table = render_table(shares);
    let mut out = String::with_capacity(content.len() + table.len());
    let mut in_section = false;

    for raw in content.split_inclusive('\n') {
        let has_newline = raw.ends_with('\n');
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let trimmed = line.trim();

        if trimmed == markers.start {
            in_section = true;
            out.push_str(line);
            out.push_str("\n\n");
            out.push_str(&table);
            out.push_str(&markers.end);
            out.push('\n');
        } else if trimmed == markers.end {
            in_section = false;
        } else if !in_section {
            out.push_str(line);
            if has_newline {
                out.push('\n');
            }
        }
    }

    if in_section {
        tracing::warn!(
            "no {} after {}; content after the table was dropped",
            markers.end,
            markers.start
        );
    }

    Some(out)
}

/// Reads `path`, replaces the marked section and writes it back in place.
/// The file is not touched when there is nothing to write.
pub fn update_file(
    path: &Path,
    markers: &SectionMarkers,
    shares: &LanguageShares,
) -> Result<UpdateStatus> {
    if shares.is_empty() {
        tracing::info!("no language data to update in {}", path.display());
        return Ok(UpdateStatus::NoData);
    }

    let content = std::fs::read_to_string(path)?;
    let Some(updated) = rewrite_section(&content, markers, shares) else {
        tracing::warn!("{} has no {} line, nothing updated", path.display(), markers.start);
        return Ok(UpdateStatus::MarkerMissing);
    };

    if updated == content {
        tracing::info!("{} already up to date", path.display());
        return Ok(UpdateStatus::Unchanged);
    }

    std::fs::write(path, updated)?;
    tracing::info!(languages = shares.len(), "updated {}", path.display());
    Ok(UpdateStatus::Updated)
}
