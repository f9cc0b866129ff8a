//! Declaration rendering
//!
//! Turns a finished variant list into TypeScript declaration syntax. The
//! renderer handles all four variant tags: optional object members get a `?`
//! suffix, an array that never saw an element renders as `Array<unknown>`,
//! and records render as `Record<string, …>`.

use crate::model::{ArrayVariant, ObjectVariant, RecordVariant, Variant};
use once_cell::sync::Lazy;
use regex::Regex;

/// Render `export type <SafeName> = <union>` for a finished root model
pub fn render_declaration(name: &str, model: &[Variant]) -> String {
    format!("export type {} = {}", safe_name(name), render_type(model, 0))
}

/// Render a variant list as a `|`-joined union
pub fn render_type(model: &[Variant], depth: usize) -> String {
    model
        .iter()
        .map(|variant| match variant {
            Variant::Basic(basic) => basic.kind.to_string(),
            Variant::Object(object) => render_object(object, depth),
            Variant::Array(array) => render_array(array, depth),
            Variant::Record(record) => render_record(record, depth),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_object(object: &ObjectVariant, depth: usize) -> String {
    if object.fields.is_empty() {
        return "{}".to_string();
    }
    let inner = indent(depth + 1);
    let members = object
        .fields
        .iter()
        .map(|(field, variants)| {
            let optional = if object.is_optional(field) { "?" } else { "" };
            format!("{field}{optional}: {}", render_type(variants, depth + 1))
        })
        .collect::<Vec<_>>()
        .join(&format!(",\n{inner}"));
    format!("{{\n{inner}{members}\n{}}}", indent(depth))
}

fn render_array(array: &ArrayVariant, depth: usize) -> String {
    if array.elements.is_empty() {
        return "Array<unknown>".to_string();
    }
    format!("Array<{}>", render_type(&array.elements, depth))
}

fn render_record(record: &RecordVariant, depth: usize) -> String {
    if record.values.is_empty() {
        return "Record<string, unknown>".to_string();
    }
    format!("Record<string, {}>", render_type(&record.values, depth))
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Strip non-word characters from a raw key and capitalize its segments
pub fn safe_name(raw: &str) -> String {
    static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]+").expect("valid regex"));
    SEPARATORS
        .split(raw)
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
