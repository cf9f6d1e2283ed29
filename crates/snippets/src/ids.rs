//! Identifier resolution.
//!
//! Generation sources number their nodes with small integers (`"id": 3`,
//! `"parentId": 3`) or write inline placeholders (`"base-{id(3)}"`). Both are
//! rewritten to fresh unique identifiers here, with every occurrence of the
//! same number converging on the same identifier.

use crate::error::SnippetError;
use crate::number;
use crate::stage::{Stage, fail_soft};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

static ID_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{id\((\d+)\)\}").expect("id placeholder pattern"));

/// Source of unique identifier tokens.
pub trait IdGenerator {
    /// Returns a token never returned before by this generator.
    fn token(&mut self) -> String;
}

/// Random UUID v4 tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn token(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic, UUID-shaped tokens counting up from 1. Meant for tests and
/// reproducible fixtures.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn token(&mut self) -> String {
        self.issued += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.issued)
    }
}

/// Replaces `{id(n)}` placeholders in arbitrary text with fresh UUIDs.
pub fn resolve_id_placeholders(text: &str) -> String {
    resolve_id_placeholders_with(text, &mut UuidGenerator)
}

/// [`resolve_id_placeholders`] with a caller-chosen generator.
///
/// Pure string substitution: the text does not need to be JSON.
pub fn resolve_id_placeholders_with<G: IdGenerator + ?Sized>(text: &str, ids: &mut G) -> String {
    if !ID_PLACEHOLDER.is_match(text) {
        return text.to_string();
    }

    let mut assigned: HashMap<String, String> = HashMap::new();
    ID_PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            assigned
                .entry(caps[1].to_string())
                .or_insert_with(|| ids.token())
                .clone()
        })
        .into_owned()
}

/// Replaces numeric `id`/`parentId` values in a JSON document with
/// `{type}-{uuid}` identifiers.
pub fn resolve_ids(content: &str) -> String {
    resolve_ids_with(content, &mut UuidGenerator)
}

/// [`resolve_ids`] with a caller-chosen generator.
///
/// Returns the input unchanged when it is not JSON or holds no numeric `id`.
pub fn resolve_ids_with<G: IdGenerator + ?Sized>(content: &str, ids: &mut G) -> String {
    fail_soft(Stage::Ids, content, try_resolve_ids(content, ids))
}

fn try_resolve_ids<G: IdGenerator + ?Sized>(
    content: &str,
    ids: &mut G,
) -> Result<Option<String>, SnippetError> {
    let mut data: Value = serde_json::from_str(content)?;

    let mut distinct = Vec::new();
    collect_numeric_ids(&data, &mut distinct);
    if distinct.is_empty() {
        return Ok(None);
    }

    let id_map: HashMap<String, String> = distinct
        .into_iter()
        .map(|(key, type_name)| {
            let token = ids.token();
            let generated = match type_name {
                Some(type_name) => format!("{}-{}", type_name, token),
                None => token,
            };
            (key, generated)
        })
        .collect();
    log::debug!("[{}] assigning {} identifiers", Stage::Ids, id_map.len());

    replace_ids(&mut data, &id_map);
    Ok(Some(serde_json::to_string_pretty(&data)?))
}

/// Collects each distinct numeric `id` (compared by value, so `1` and `1.0`
/// are one identifier) with the `type` of its first typed owner,
/// in order of first appearance.
fn collect_numeric_ids(value: &Value, found: &mut Vec<(String, Option<String>)>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Number(n)) = map.get("id") {
                record(map, number::canonical(n), found);
            }
            for child in map.values() {
                collect_numeric_ids(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_numeric_ids(item, found);
            }
        }
        _ => {}
    }
}

fn record(owner: &Map<String, Value>, key: String, found: &mut Vec<(String, Option<String>)>) {
    let type_name = owner
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match found.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, slot)) => {
            if slot.is_none() {
                *slot = type_name;
            }
        }
        None => found.push((key, type_name)),
    }
}

fn replace_ids(value: &mut Value, id_map: &HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if (key == "id" || key == "parentId")
                    && let Value::Number(n) = child
                {
                    if let Some(generated) = id_map.get(&number::canonical(n)) {
                        *child = Value::String(generated.clone());
                    }
                    continue;
                }
                replace_ids(child, id_map);
            }
        }
        Value::Array(items) => {
            for item in items {
                replace_ids(item, id_map);
            }
        }
        _ => {}
    }
}
