//! `---`-delimited `key: value` headers at the top of markdown files

use ahash::AHashMap;

use crate::{ContentError, Result};

const FENCE: &str = "---";

/// Parsed header fields and the markdown that follows them
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter<'a> {
    pub fields: AHashMap<String, String>,
    pub body: &'a str,
}

impl<'a> FrontMatter<'a> {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Split `text` into its header fields and body
pub fn parse<'a>(source_name: &str, text: &'a str) -> Result<FrontMatter<'a>> {
    let error = |reason: String| ContentError::FrontMatter {
        source_name: source_name.to_string(),
        reason,
    };

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Err(error("missing opening '---'".to_string())),
    }

    let mut offset = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
    let mut fields = AHashMap::new();
    for (number, line) in lines.enumerate() {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed == FENCE {
            let body = text[offset..].trim_start_matches(&['\r', '\n'][..]);
            return Ok(FrontMatter { fields, body });
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| error(format!("expected 'key: value' on line {}", number + 2)))?;
        fields.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }

    Err(error("unterminated front matter".to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
