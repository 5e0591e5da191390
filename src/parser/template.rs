use crate::models::field::strip_whitespace;
use crate::models::{ExtractionError, FieldAnchor, FieldTag, RawFieldMap, Terminator, ANCHORS};
use anyhow::{Context, Result};
use regex::Regex;

/// Matches both the half-width and the full-width colon
const SEPARATOR: &str = "[:：]";

/// Template lines that are section headings rather than `label：value` fields
const HEADINGS: [&str; 1] = ["二、缺陷分析结构反馈"];

struct CompiledAnchor {
    tag: FieldTag,
    /// `label + suffix + separator`
    start: Regex,
    /// Same, followed by a lazy capture up to the terminator
    capture: Regex,
}

/// Splits an issue body into the ten template sections
///
/// Patterns are compiled once in `new` and only read afterwards, so a single
/// extractor can be shared across threads.
pub struct TemplateExtractor {
    anchors: Vec<CompiledAnchor>,
    max_body_bytes: Option<usize>,
}

impl TemplateExtractor {
    /// Compile the anchor table
    pub fn new() -> Result<Self> {
        let anchors = ANCHORS
            .iter()
            .map(compile_anchor)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            anchors,
            max_body_bytes: None,
        })
    }

    /// Reject bodies longer than `max` bytes before any pattern runs
    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = Some(max);
        self
    }

    /// Extract every section from `body`
    ///
    /// All-or-nothing: the first section that cannot be located or is empty fails the
    /// whole extraction. Each section is searched in the full body independently.
    pub fn extract(&self, body: &str) -> std::result::Result<RawFieldMap, ExtractionError> {
        if let Some(max) = self.max_body_bytes {
            if body.len() > max {
                return Err(ExtractionError::BodyTooLarge {
                    len: body.len(),
                    max,
                });
            }
        }

        // Locate all start anchors first, so a missing label is reported against its own
        // section and not against the section it terminates.
        for anchor in &self.anchors {
            if !anchor.start.is_match(body) {
                return Err(ExtractionError::PatternNotFound(anchor.tag));
            }
        }

        let mut values: [String; FieldTag::COUNT] = Default::default();
        for anchor in &self.anchors {
            let captured = anchor
                .capture
                .captures(body)
                .and_then(|caps| caps.get(1))
                .ok_or(ExtractionError::PatternNotFound(anchor.tag))?
                .as_str();

            if strip_whitespace(captured).is_empty() {
                return Err(ExtractionError::EmptyField(anchor.tag));
            }

            values[anchor.tag.index()] = anchor.tag.trim_policy().apply(captured);
        }

        Ok(RawFieldMap::new(values))
    }
}

fn compile_anchor(anchor: &FieldAnchor) -> Result<CompiledAnchor> {
    let start = format!("{}{}", regex::escape(&anchor.start_marker()), SEPARATOR);
    let end = match anchor.terminator {
        Terminator::EndOfInput => "$".to_string(),
        terminator => {
            let labels: Vec<String> = terminator.labels().iter().map(|l| regex::escape(l)).collect();
            format!("(?:{})", labels.join("|"))
        }
    };
    let capture = format!(r"(?s){}(.*?){}", start, end);

    Ok(CompiledAnchor {
        tag: anchor.tag,
        start: Regex::new(&start)
            .with_context(|| format!("Failed to compile start anchor for {:?}", anchor.tag))?,
        capture: Regex::new(&capture)
            .with_context(|| format!("Failed to compile capture pattern for {:?}", anchor.tag))?,
    })
}

/// Render the template with each section filled by `fill`
///
/// Labels that only terminate a section (组件版本, 缺陷创建时间, ...) are rendered
/// with an empty value.
pub fn render_template<F>(fill: F) -> String
where
    F: Fn(FieldTag) -> String,
{
    let mut out = String::new();

    for (i, anchor) in ANCHORS.iter().enumerate() {
        out.push_str(&format!("{}：{}\n", anchor.start_marker(), fill(anchor.tag)));

        if let Some(&label) = anchor.terminator.labels().first() {
            let next_label = ANCHORS.get(i + 1).map(|next| next.tag.label());
            if next_label != Some(label) {
                if HEADINGS.contains(&label) {
                    out.push_str(&format!("\n{}\n", label));
                } else {
                    out.push_str(&format!("{}：\n", label));
                }
            }
        }
    }

    out
}

/// The template with every section left empty
pub fn render_blank_template() -> String {
    render_template(|_| String::new())
}
