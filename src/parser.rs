use crate::ir::{MonitorSpec, SizeKey};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

static ID_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static JS_ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\s+|//[^\n]*\n|(?s:/\*.*?\*/))*(?:let|const|var)\s+[A-Za-z_$][\w$]*\s*=\s*")
        .unwrap()
});

#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed monitor list: {0}")]
    Syntax(#[from] json5::Error),
    #[error("monitor #{index} has an empty label")]
    EmptyLabel { index: usize },
    #[error("monitor \"{label}\" has an invalid {key} size ({width}x{height})")]
    InvalidSize {
        label: String,
        key: &'static str,
        width: f32,
        height: f32,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MonitorList {
    Bare(Vec<MonitorSpec>),
    Wrapped { monitors: Vec<MonitorSpec> },
}

/// Derives a monitor id from its label: lowercased, with every run of
/// characters outside `[a-z0-9]` replaced by a single underscore.
///
/// Leading and trailing separators are kept, so `"LG 34WK95U (5K2K)"`
/// becomes `"lg_34wk95u_5k2k_"`.
pub fn generate_id(label: &str) -> String {
    let lower = label.to_lowercase();
    ID_SEPARATOR_RE.replace_all(&lower, "_").into_owned()
}

/// Parses a monitor list written as JSON5.
///
/// Accepts a bare array, an object with a `monitors` array, or a JavaScript
/// data file of the form `let monitors_src = [ ... ];`.
pub fn parse_monitors(input: &str) -> Result<Vec<MonitorSpec>, DataError> {
    let literal = extract_literal(input);
    let list: MonitorList = json5::from_str(literal)?;
    let specs = match list {
        MonitorList::Bare(specs) => specs,
        MonitorList::Wrapped { monitors } => monitors,
    };
    for (index, spec) in specs.iter().enumerate() {
        validate(index, spec)?;
    }
    debug!(count = specs.len(), "parsed monitor list");
    Ok(specs)
}

fn validate(index: usize, spec: &MonitorSpec) -> Result<(), DataError> {
    if spec.label.trim().is_empty() {
        return Err(DataError::EmptyLabel { index });
    }
    let sizes = [
        (SizeKey::Display, spec.display.w, spec.display.h),
        (SizeKey::Resolution, spec.resolution.w, spec.resolution.h),
    ];
    for (key, width, height) in sizes {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(DataError::InvalidSize {
                label: spec.label.clone(),
                key: key.as_str(),
                width,
                height,
            });
        }
        if width == 0.0 || height == 0.0 {
            warn!(label = %spec.label, key = key.as_str(), "monitor has a zero-sized dimension");
        }
    }
    Ok(())
}

/// Strips a leading `let name =` assignment and anything after the literal
/// it introduces. Plain JSON5 input is returned untouched.
fn extract_literal(input: &str) -> &str {
    let Some(found) = JS_ASSIGNMENT_RE.find(input) else {
        return input;
    };
    let rest = &input[found.end()..];
    match balanced_end(rest) {
        Some(end) => &rest[..end],
        None => rest.trim_end().trim_end_matches(';'),
    }
}

fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut line_comment = false;
    let mut block_comment = false;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if line_comment {
            if ch == '\n' {
                line_comment = false;
            }
            continue;
        }
        if block_comment {
            if ch == '*' && matches!(chars.peek(), Some((_, '/'))) {
                chars.next();
                block_comment = false;
            }
            continue;
        }
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '/' if matches!(chars.peek(), Some((_, '/'))) => line_comment = true,
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                block_comment = true;
            }
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_ids_like_the_legend_expects() {
        assert_eq!(generate_id("LG 34WK95U (5K2K)"), "lg_34wk95u_5k2k_");
        assert_eq!(generate_id("Dell U3818DW"), "dell_u3818dw");
        assert_eq!(generate_id("  MSI -- PS341WU  "), "_msi_ps341wu_");
        assert_eq!(generate_id("a__b"), "a_b");
    }

    #[test]
    fn id_generation_is_idempotent() {
        let once = generate_id("MSI PS341WU HDR (5K2K)");
        assert_eq!(generate_id(&once), once);
    }

    #[test]
    fn parses_bare_json5_array() {
        let input = r#"[
            // trailing commas and unquoted keys are fine
            {label: "Dell U3219Q", model: "b96b14f5", display: {w: 713, h: 415}, resolution: {w: 3840, h: 2160, freq: 60},},
        ]"#;
        let specs = parse_monitors(input).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].display.w, 713.0);
        assert_eq!(specs[0].checked, None);
    }

    #[test]
    fn block_comments_inside_the_list_are_skipped() {
        let input = r#"let m = [
	/* Dell's best [so far] } */
	{label: "A", display: {w: 1, h: 1}, resolution: {w: 2, h: 2, freq: 60}},
	/**/
	{label: "B", display: {w: 3, h: 1}, resolution: {w: 4, h: 2, freq: 60}},
];
let x = 1;
"#;
        let specs = parse_monitors(input).unwrap();
        let labels: Vec<&str> = specs.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
    }

    #[test]
    fn parses_wrapped_object() {
        let input = r#"{monitors: [{label: "A", display: {w: 1, h: 1}, resolution: {w: 2, h: 2, freq: 60}, checked: true, curved: true}]}"#;
        let specs = parse_monitors(input).unwrap();
        assert_eq!(specs[0].checked, Some(true));
        assert_eq!(specs[0].curved, Some(true));
        assert!(specs[0].model.is_empty());
    }

    #[test]
    fn parses_javascript_data_file() {
        let input = r#"/*
** header
*/

let monitors_src = [
	{
		label: "Dell U4021QW",
		// model id on the specs site
		model: "81f222f6",
		display: {w: 947, h: 419},
		resolution: {w: 5120, h: 2160, freq: 60},
	},
];

let monitors = new Map();
"#;
        let specs = parse_monitors(input).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].model, "81f222f6");
    }

    #[test]
    fn rejects_empty_label() {
        let input = r#"[{label: " ", display: {w: 1, h: 1}, resolution: {w: 1, h: 1}}]"#;
        assert!(matches!(
            parse_monitors(input),
            Err(DataError::EmptyLabel { index: 0 })
        ));
    }

    #[test]
    fn rejects_negative_size() {
        let input = r#"[{label: "X", display: {w: -1, h: 1}, resolution: {w: 1, h: 1}}]"#;
        assert!(matches!(
            parse_monitors(input),
            Err(DataError::InvalidSize { key: "display", .. })
        ));
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(matches!(parse_monitors("[{label: }]"), Err(DataError::Syntax(_))));
    }
}
