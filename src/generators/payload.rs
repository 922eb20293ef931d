//! Field-path edits on JSON payloads.
//!
//! Test cases start from a valid payload and change one thing. Paths use the
//! same notation as validation keys (`wasteItems.0.weight.amount` or
//! `wasteItems[0].weight.amount`).

use crate::contract::FieldPath;
use serde_json::{Map, Value};

pub trait PayloadExt: Sized {
    /// Set `path` to `value`, creating missing objects along the way.
    fn with_field(self, path: &str, value: Value) -> Self;

    /// Remove `path`. Missing paths are left alone.
    fn without_field(self, path: &str) -> Self;

    /// Look up `path`.
    fn field(&self, path: &str) -> Option<&Value>;
}

impl PayloadExt for Value {
    fn with_field(mut self, path: &str, value: Value) -> Self {
        let path = FieldPath::parse(path);
        if let Some((last, parents)) = path.segments().split_last() {
            if let Some(parent) = walk_mut(&mut self, parents, true) {
                set_child(parent, last, value);
            }
        }
        self
    }

    fn without_field(mut self, path: &str) -> Self {
        let path = FieldPath::parse(path);
        if let Some((last, parents)) = path.segments().split_last() {
            if let Some(parent) = walk_mut(&mut self, parents, false) {
                match parent {
                    Value::Object(map) => {
                        map.remove(last);
                    }
                    Value::Array(items) => {
                        if let Ok(index) = last.parse::<usize>() {
                            if index < items.len() {
                                items.remove(index);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        self
    }

    fn field(&self, path: &str) -> Option<&Value> {
        FieldPath::parse(path)
            .segments()
            .iter()
            .try_fold(self, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }
}

fn walk_mut<'a>(root: &'a mut Value, segments: &[String], create: bool) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in segments {
        current = match current {
            Value::Object(map) => {
                if create && !map.contains_key(segment) {
                    map.insert(segment.clone(), Value::Object(Map::new()));
                }
                map.get_mut(segment)?
            }
            Value::Array(items) => {
                let index = segment.parse::<usize>().ok()?;
                items.get_mut(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

fn set_child(parent: &mut Value, key: &str, value: Value) {
    match parent {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
        }
        Value::Array(items) => {
            if let Ok(index) = key.parse::<usize>() {
                if index < items.len() {
                    items[index] = value;
                } else if index == items.len() {
                    items.push(value);
                }
            }
        }
        _ => {}
    }
}
