//! API key and credential discovery.
//!
//! Each wrapped application keeps its key somewhere different: Radarr-family
//! XML `<ApiKey>` tags, Tautulli-style INI options, Bazarr-style nested YAML,
//! Overseerr-style JSON documents. Discovery is always best-effort: a missing
//! file or a malformed document yields `None`, never an error.

use std::path::Path;

use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

use crate::error::Result;

/// Where a key lives inside a known config document.
#[derive(Debug, Clone, Copy)]
pub enum KeySource {
    /// Text of the first element with this tag name, e.g. `<ApiKey>..</ApiKey>`.
    XmlTag(&'static str),
    /// `key = value` under a `[section]` header.
    Ini {
        section: &'static str,
        key: &'static str,
    },
    /// Nested mapping keys, e.g. `["auth", "apikey"]`.
    YamlPath(&'static [&'static str]),
    /// JSON pointer, e.g. `/main/apiKey`.
    JsonPointer(&'static str),
}

/// Extract a key from `path` according to `source`.
///
/// Missing file or missing field returns `Ok(None)`. A document that fails to
/// parse is logged and also treated as absent.
pub fn read_key(path: &Path, source: KeySource) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;

    let found = match source {
        KeySource::XmlTag(tag) => xml_tag(&contents, tag),
        KeySource::Ini { section, key } => ini_value(&contents, section, key),
        KeySource::YamlPath(segments) => yaml_path(&contents, segments),
        KeySource::JsonPointer(pointer) => json_pointer(&contents, pointer),
    };

    Ok(found.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

fn xml_tag(contents: &str, tag: &str) -> Option<String> {
    let doc = match roxmltree::Document::parse(contents) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!("malformed xml: {err}");
            return None;
        }
    };
    doc.descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::to_string)
}

fn ini_value(contents: &str, section: &str, key: &str) -> Option<String> {
    let mut in_section = false;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = header.eq_ignore_ascii_case(section);
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            if k.trim() == key {
                return Some(v.trim().trim_matches('"').to_string());
            }
        }
    }
    None
}

fn yaml_path(contents: &str, segments: &[&str]) -> Option<String> {
    let root: serde_yaml::Value = match serde_yaml::from_str(contents) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("malformed yaml: {err}");
            return None;
        }
    };
    let mut node = &root;
    for segment in segments {
        node = node.get(segment)?;
    }
    match node {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_pointer(contents: &str, pointer: &str) -> Option<String> {
    let root: serde_json::Value = match serde_json::from_str(contents) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("malformed json: {err}");
            return None;
        }
    };
    root.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Sanity check on a discovered key: long enough and free of separators that
/// would indicate we grabbed the wrong field.
pub fn looks_valid(key: &str) -> bool {
    key.len() > 10
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// 32-character random alphanumeric key, lowercased. Long random string, no
/// cryptographic strength claims.
pub fn generate_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Hyphen-less v4 UUID, for the services that expect one.
pub fn generate_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Mask a key for display: first four characters, then an ellipsis.
pub fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}

/// Return the key under `[section]`, generating and persisting one if absent.
///
/// Creates the file (and section) when missing; an existing key is returned
/// untouched.
pub fn ensure_ini_key(path: &Path, section: &'static str, key: &'static str) -> Result<String> {
    if let Some(existing) = read_key(path, KeySource::Ini { section, key })? {
        return Ok(existing);
    }
    let value = generate_key();
    set_ini_values(path, section, &[(key, &value)])?;
    Ok(value)
}

/// Set `key = value` pairs under `[section]`, replacing existing lines and
/// appending missing ones. The rest of the file is preserved as-is.
pub fn set_ini_values(path: &Path, section: &str, values: &[(&str, &str)]) -> Result<()> {
    let contents = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();
    let mut remaining: Vec<(&str, &str)> = values.to_vec();

    // Locate the section and replace keys already present in it.
    let mut section_start = None;
    let mut section_end = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if section_start.is_some() {
                section_end = i;
                break;
            }
            if header.eq_ignore_ascii_case(section) {
                section_start = Some(i);
            }
        }
    }

    if let Some(start) = section_start {
        for line in lines[start + 1..section_end].iter_mut() {
            if let Some((k, _)) = line.split_once('=') {
                let k = k.trim().to_string();
                if let Some(pos) = remaining.iter().position(|(key, _)| *key == k) {
                    let (key, value) = remaining.remove(pos);
                    *line = format!("{key} = {value}");
                }
            }
        }
        for (i, (key, value)) in remaining.iter().enumerate() {
            lines.insert(section_end + i, format!("{key} = {value}"));
        }
    } else {
        if !lines.is_empty() && !lines.last().is_some_and(|l| l.is_empty()) {
            lines.push(String::new());
        }
        lines.push(format!("[{section}]"));
        for (key, value) in &remaining {
            lines.push(format!("{key} = {value}"));
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, lines.join("\n") + "\n")?;
    Ok(())
}

/// Return the string at `pointer` in the JSON document, generating and
/// persisting one if absent. Creates the document when missing.
pub fn ensure_json_key(path: &Path, pointer: &str) -> Result<String> {
    let mut root: serde_json::Value = if path.exists() {
        match serde_json::from_str(&std::fs::read_to_string(path)?) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("malformed json: {err}");
                serde_json::json!({})
            }
        }
    } else {
        serde_json::json!({})
    };

    if let Some(existing) = root.pointer(pointer).and_then(|v| v.as_str()) {
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    let value = generate_key();
    let mut node = &mut root;
    let segments: Vec<&str> = pointer.trim_start_matches('/').split('/').collect();
    for segment in &segments[..segments.len() - 1] {
        if !node.get(*segment).is_some_and(|v| v.is_object()) {
            node[*segment] = serde_json::json!({});
        }
        node = &mut node[*segment];
    }
    node[segments[segments.len() - 1]] = serde_json::Value::String(value.clone());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&root)? + "\n")?;
    Ok(value)
}
