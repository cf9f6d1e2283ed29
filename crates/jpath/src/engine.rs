//! Path evaluation: reading (`select`) and writing (`assign`) JSON values.

use crate::ast::{Path, PathSegment};
use crate::error::JPathError;
use crate::parser::parse_path;
use serde_json::{Map, Value};

/// Walks `path` from `root`. Returns `None` as soon as a step has nothing to
/// descend into (missing key, out-of-range index, `null` or a scalar).
pub fn select<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| step(current, segment))
}

/// Parses `path` and selects it. An unparsable path selects nothing.
pub fn select_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    parse_path(path).ok().and_then(|parsed| select(root, &parsed))
}

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (current, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Object(map), PathSegment::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Writes `value` at `path`, creating intermediate containers as needed.
///
/// Missing or scalar intermediates become an array when the following
/// segment is an index and an object otherwise. Arrays are padded with
/// `null` up to the written index.
pub fn assign(root: &mut Value, path: &Path, value: Value) -> Result<(), JPathError> {
    let segments = path.segments();
    let Some((last, parents)) = segments.split_last() else {
        return Err(JPathError::Assign {
            path: path.to_string(),
            message: "empty path".to_string(),
        });
    };

    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        let next_is_index = matches!(segments[i + 1], PathSegment::Index(_));
        current = child_mut(current, segment, next_is_index, path)?;
    }
    set_child(current, last, value, path)
}

fn empty_container(index_next: bool) -> Value {
    if index_next {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn key_on_array(path: &Path, key: &str) -> JPathError {
    JPathError::Assign {
        path: path.to_string(),
        message: format!("'{}' is not an index into an array", key),
    }
}

fn child_mut<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    next_is_index: bool,
    path: &Path,
) -> Result<&'a mut Value, JPathError> {
    match current {
        Value::Object(map) => {
            let slot = map
                .entry(segment.to_string())
                .or_insert_with(|| empty_container(next_is_index));
            if !is_container(slot) {
                *slot = empty_container(next_is_index);
            }
            Ok(slot)
        }
        Value::Array(items) => match segment {
            PathSegment::Index(index) => {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                let slot = &mut items[*index];
                if !is_container(slot) {
                    *slot = empty_container(next_is_index);
                }
                Ok(slot)
            }
            PathSegment::Key(key) => Err(key_on_array(path, key)),
        },
        other => {
            *other = empty_container(matches!(segment, PathSegment::Index(_)));
            child_mut(other, segment, next_is_index, path)
        }
    }
}

fn set_child(
    current: &mut Value,
    segment: &PathSegment,
    value: Value,
    path: &Path,
) -> Result<(), JPathError> {
    match current {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(items) => match segment {
            PathSegment::Index(index) => {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                items[*index] = value;
                Ok(())
            }
            PathSegment::Key(key) => Err(key_on_array(path, key)),
        },
        other => {
            *other = empty_container(matches!(segment, PathSegment::Index(_)));
            set_child(other, segment, value, path)
        }
    }
}
