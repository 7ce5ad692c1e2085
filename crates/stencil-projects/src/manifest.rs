//! Package manifest rewriting
//!
//! Two flavours: the registry path patches identity fields on the parsed
//! JSON, the archive path treats the whole file as a template and renders it.

use crate::error::{Error, Result};
use crate::types::ManifestPatch;
use camino::Utf8Path;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use tera::{Context, Tera};
use tracing::{debug, info};

/// Apply a patch to a manifest in place and return the written document
///
/// Existing keys keep their position; keys the template lacks are appended.
/// The file is written tab-indented with a trailing newline.
pub fn rewrite_manifest(path: &Utf8Path, patch: &ManifestPatch) -> Result<Value> {
    if !path.is_file() {
        return Err(Error::manifest_not_found(path.as_str()));
    }

    let content = fs::read_to_string(path)?;
    let mut document: Value = serde_json::from_str(&content)
        .map_err(|e| Error::invalid_manifest(path.as_str(), e.to_string()))?;

    let fields = document
        .as_object_mut()
        .ok_or_else(|| Error::invalid_manifest(path.as_str(), "top level is not an object"))?;
    apply_patch(fields, patch);

    fs::write(path, to_tab_indented(&document)?)?;
    info!("Rewrote manifest {}", path);

    Ok(document)
}

fn apply_patch(fields: &mut Map<String, Value>, patch: &ManifestPatch) {
    fields.insert("name".to_string(), Value::String(patch.name.clone()));
    fields.insert("version".to_string(), Value::String(patch.version.clone()));
    fields.insert(
        "description".to_string(),
        Value::String(patch.description.clone()),
    );
    fields.insert("author".to_string(), Value::String(patch.author.clone()));

    for field in &patch.strip_fields {
        if fields.shift_remove(field).is_some() {
            debug!("Stripped manifest field '{}'", field);
        }
    }
}

fn to_tab_indented(document: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    document.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Render a manifest file as a template, overwriting it with the result
///
/// String values are JSON-escaped before rendering since they land inside
/// JSON string literals. Returns `Ok(false)` when the file does not exist.
pub fn render_manifest_file<T: Serialize>(path: &Utf8Path, vars: &T) -> Result<bool> {
    if !path.is_file() {
        debug!("No manifest at {}; skipping render", path);
        return Ok(false);
    }

    let source = fs::read_to_string(path)?;
    let vars = json_escaped(serde_json::to_value(vars)?);
    let context = Context::from_serialize(&vars)?;
    // HTML escaping would turn quotes into entities
    let rendered = Tera::one_off(&source, &context, false)?;

    fs::write(path, rendered)?;
    info!("Rendered manifest {}", path);
    Ok(true)
}

/// Replace every string with its JSON-escaped body (no surrounding quotes)
fn json_escaped(value: Value) -> Value {
    match value {
        Value::String(raw) => {
            let literal = Value::String(raw).to_string();
            let body = literal
                .strip_prefix('"')
                .and_then(|l| l.strip_suffix('"'))
                .unwrap_or(&literal);
            Value::String(body.to_string())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(json_escaped).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key, json_escaped(value)))
                .collect(),
        ),
        other => other,
    }
}
