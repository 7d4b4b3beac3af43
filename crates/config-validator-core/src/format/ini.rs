//! INI documents
//!
//! Sections become nested objects keyed by section name and every value is a
//! string. Keys are lower-cased. Keys of the `DEFAULT` section are inherited
//! by every other section; `DEFAULT` itself is not surfaced.

use indexmap::IndexMap;

use super::Format;
use crate::error::ParseError;
use crate::value::{Map, Value};

const DEFAULT_SECTION: &str = "DEFAULT";

type Section = IndexMap<String, String>;

struct Document {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

pub(super) fn parse(source: &str) -> Result<Value, ParseError> {
    let doc = read(source)?;

    let mut root = Map::with_capacity(doc.sections.len());
    for (name, entries) in doc.sections {
        let mut section = Map::with_capacity(entries.len() + doc.defaults.len());
        for (key, value) in entries {
            section.insert(key, Value::String(value));
        }
        for (key, value) in &doc.defaults {
            if !section.contains_key(key) {
                section.insert(key.clone(), Value::String(value.clone()));
            }
        }
        root.insert(name, Value::Object(section));
    }
    Ok(Value::Object(root))
}

fn read(source: &str) -> Result<Document, ParseError> {
    let mut doc = Document {
        defaults: Section::new(),
        sections: IndexMap::new(),
    };
    // A line indented deeper than the line of `last_key` extends its value
    let mut current: Option<String> = None;
    let mut last_key: Option<(String, usize)> = None;
    let mut blank_run = 0usize;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            if last_key.is_some() {
                blank_run += 1;
            }
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        if let (Some(section), Some((key, key_indent))) = (current.as_deref(), last_key.as_ref()) {
            if indent > *key_indent {
                let entries = section_mut(&mut doc, section);
                if let Some(value) = entries.get_mut(key) {
                    if !value.is_empty() {
                        value.push_str(&"\n".repeat(blank_run + 1));
                    }
                    value.push_str(trimmed);
                }
                blank_run = 0;
                continue;
            }
        }
        blank_run = 0;

        if let Some(rest) = trimmed.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| error(line_no, format!("unterminated section header '{}'", trimmed)))?
                .trim();
            if name.is_empty() {
                return Err(error(line_no, "empty section name"));
            }
            if name != DEFAULT_SECTION {
                if doc.sections.contains_key(name) {
                    return Err(error(line_no, format!("section '{}' already exists", name)));
                }
                doc.sections.insert(name.to_string(), Section::new());
            }
            current = Some(name.to_string());
            last_key = None;
            continue;
        }

        let section = current
            .as_deref()
            .ok_or_else(|| error(line_no, "key found before any section header"))?;

        let (key, value) = split_entry(trimmed)
            .ok_or_else(|| error(line_no, format!("expected 'key = value', found '{}'", trimmed)))?;
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(error(line_no, "empty key"));
        }

        let entries = section_mut(&mut doc, section);
        if entries.contains_key(&key) {
            return Err(error(
                line_no,
                format!("key '{}' already exists in section '{}'", key, section),
            ));
        }
        entries.insert(key.clone(), value.trim().to_string());
        last_key = Some((key, indent));
    }

    Ok(doc)
}

fn section_mut<'a>(doc: &'a mut Document, name: &str) -> &'a mut Section {
    if name == DEFAULT_SECTION {
        &mut doc.defaults
    } else {
        doc.sections.entry(name.to_string()).or_default()
    }
}

/// Split on the first `=` or `:`, whichever comes first
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(|c| c == '=' || c == ':')?;
    Some((&line[..at], &line[at + 1..]))
}

fn error(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::new(Format::Ini, message).at_line(line)
}
