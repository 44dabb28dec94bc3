//! Math segment extraction.
//!
//! Tutorial documents write inline math as `$...$` and display math as
//! `$$...$$`. Markdown rendering would mangle TeX (underscores become
//! emphasis), so math segments are lifted out before rendering, replaced by
//! HTML comment markers that survive the markdown pass untouched, and
//! re-inserted afterwards as KaTeX-compatible classed markup.

use std::sync::OnceLock;

use regex::Regex;

/// One extracted math segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSegment {
    /// Raw TeX source, delimiters stripped
    pub tex: String,

    /// Display (block) math rather than inline
    pub display: bool,
}

fn display_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\$\$(.+?)\$\$").unwrap())
}

fn inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Opening $ must touch the first TeX character and the closing $ the
    // last, so prose like "costs $5 and $6" is left alone.
    RE.get_or_init(|| Regex::new(r"\$([^\s\$](?:[^\$\n]*?[^\s\$])?)\$").unwrap())
}

/// Replace math segments with comment markers.
///
/// Fenced code blocks are left untouched. Returns the rewritten source and
/// the extracted segments, indexed by marker number.
pub fn extract_math(source: &str) -> (String, Vec<MathSegment>) {
    let mut segments = Vec::new();
    let mut out = String::with_capacity(source.len());
    let mut chunk = String::new();
    let mut in_fence = false;

    for line in source.lines() {
        let is_fence = line.trim_start().starts_with("```") || line.trim_start().starts_with("~~~");

        if is_fence {
            if !in_fence {
                out.push_str(&replace_in(&chunk, &mut segments));
                chunk.clear();
            }
            in_fence = !in_fence;
        }

        if in_fence || is_fence {
            out.push_str(line);
            out.push('\n');
        } else {
            chunk.push_str(line);
            chunk.push('\n');
        }
    }

    out.push_str(&replace_in(&chunk, &mut segments));

    (out, segments)
}

fn replace_in(chunk: &str, segments: &mut Vec<MathSegment>) -> String {
    let with_display = display_re().replace_all(chunk, |caps: &regex::Captures<'_>| {
        let idx = segments.len();
        segments.push(MathSegment {
            tex: caps[1].trim().to_string(),
            display: true,
        });
        // Own paragraph, so the marker becomes an HTML block
        format!("\n<!--math-{}-->\n", idx)
    });

    inline_re()
        .replace_all(&with_display, |caps: &regex::Captures<'_>| {
            let idx = segments.len();
            segments.push(MathSegment {
                tex: caps[1].to_string(),
                display: false,
            });
            format!("<!--math-{}-->", idx)
        })
        .into_owned()
}

/// Replace the comment markers in rendered HTML with classed math markup.
pub fn reinsert_math(html: &str, segments: &[MathSegment]) -> String {
    let mut out = html.to_string();
    for (idx, segment) in segments.iter().enumerate() {
        let marker = format!("<!--math-{}-->", idx);
        out = out.replace(&marker, &render_segment(segment));
    }
    out
}

fn render_segment(segment: &MathSegment) -> String {
    let tex = escape_html(&segment.tex);
    if segment.display {
        format!(r#"<div class="math math-display">\[{}\]</div>"#, tex)
    } else {
        format!(r#"<span class="math math-inline">\({}\)</span>"#, tex)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
