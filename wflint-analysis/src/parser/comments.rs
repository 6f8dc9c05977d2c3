//! Commented-code detection over the raw file text.
//!
//! Two signals feed the summary: literal `<!-- -->` comment blocks, and
//! structurally disabled activity containers whose real line span is
//! recovered by re-locating the block in the raw text via its display
//! name. Relocation can fail (escaped or duplicate names); the span then
//! falls back to an estimate per contained activity.

use regex::Regex;
use wflint_core::constants::{
    COMMENT_SAMPLE_LIMIT, COMMENT_SAMPLE_MAX_CHARS, ESTIMATED_LINES_PER_DISABLED_ACTIVITY,
};

/// Result of scanning the raw text for literal XML comments.
#[derive(Debug, Default)]
pub struct RawCommentScan {
    pub blocks: usize,
    pub lines: usize,
    pub samples: Vec<String>,
}

/// Scan raw text for `<!-- -->` blocks, counting blocks and their total
/// line span and keeping a small sample of comment text.
pub fn scan_xml_comments(raw: &str) -> RawCommentScan {
    let mut scan = RawCommentScan::default();
    let mut from = 0;

    while let Some(start) = raw[from..].find("<!--") {
        let start = from + start;
        let body_start = start + 4;
        let Some(end) = raw[body_start..].find("-->") else {
            // Unterminated comment: count the remainder and stop.
            scan.blocks += 1;
            scan.lines += raw[start..].matches('\n').count() + 1;
            push_sample(&mut scan.samples, &raw[body_start..]);
            return scan;
        };
        let body_end = body_start + end;

        scan.blocks += 1;
        scan.lines += raw[start..body_end].matches('\n').count() + 1;
        push_sample(&mut scan.samples, &raw[body_start..body_end]);

        from = body_end + 3;
    }

    scan
}

fn push_sample(samples: &mut Vec<String>, text: &str) {
    if samples.len() >= COMMENT_SAMPLE_LIMIT {
        return;
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    let sample: String = trimmed.chars().take(COMMENT_SAMPLE_MAX_CHARS).collect();
    samples.push(sample);
}

/// Span of one re-located disabled block.
#[derive(Debug)]
pub struct DisabledSpan {
    pub lines: usize,
    /// Where the next relocation should start searching, so duplicate
    /// display names resolve in document order.
    pub resume_at: usize,
    /// Whether the span was re-located rather than estimated.
    pub located: bool,
}

/// Re-locate a disabled container's text block by its display name and
/// measure its line span. Falls back to an estimate of
/// [`ESTIMATED_LINES_PER_DISABLED_ACTIVITY`] lines per contained
/// activity when the block cannot be found.
pub fn locate_disabled_span(
    raw: &str,
    container_tag: &str,
    display_name: &str,
    contained_activities: usize,
    search_from: usize,
) -> DisabledSpan {
    let estimate = DisabledSpan {
        lines: contained_activities.max(1) * ESTIMATED_LINES_PER_DISABLED_ACTIVITY,
        resume_at: search_from,
        located: false,
    };

    if display_name.is_empty() || search_from >= raw.len() {
        return estimate;
    }

    let needle = format!("DisplayName=\"{display_name}\"");
    let Some(rel) = raw[search_from..].find(&needle) else {
        return estimate;
    };
    let name_at = search_from + rel;

    // The display name sits inside the container's opening tag; the last
    // tag opening before it is the block start.
    let Ok(tag_re) = Regex::new(&format!(
        r"</?(?:[A-Za-z0-9_.]+:)?{}[\s/>]",
        regex::escape(container_tag)
    )) else {
        return estimate;
    };

    let start = match tag_re
        .find_iter(&raw[..name_at])
        .filter(|m| !raw[m.start()..].starts_with("</"))
        .last()
    {
        Some(m) => m.start(),
        None => return estimate,
    };

    // Walk forward matching open/close tags of the container until the
    // block that contains the display name closes.
    let mut depth = 0usize;
    for m in tag_re.find_iter(&raw[start..]) {
        let at = start + m.start();
        if raw[at..].starts_with("</") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                let end = start + m.end();
                return DisabledSpan {
                    lines: raw[start..end].matches('\n').count() + 1,
                    resume_at: end,
                    located: true,
                };
            }
        } else {
            depth += 1;
        }
    }

    estimate
}
