//! Path-addressed patches against resource instances
//!
//! Edits are expressed as add/replace/remove operations at a field path and
//! applied to the JSON instance by the persistence layer, never as direct
//! mutation by the editing surface.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Kind of edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
}

/// One segment of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

/// Location within a resource instance, JSON-pointer style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Parse a pointer such as `/name/0/given/1`.
    ///
    /// All-digit segments address array indices, everything else object keys.
    pub fn parse(pointer: &str) -> Result<Self> {
        if !pointer.starts_with('/') {
            return Err(Error::InvalidPath(pointer.to_string()));
        }

        let segments = pointer[1..]
            .split('/')
            .map(|raw| {
                if raw.is_empty() {
                    return Err(Error::InvalidPath(pointer.to_string()));
                }
                Ok(match raw.parse::<usize>() {
                    Ok(index) => Segment::Index(index),
                    Err(_) => Segment::Key(raw.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if segments.is_empty() {
            return Err(Error::InvalidPath(pointer.to_string()));
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, "/{}", key)?,
                Segment::Index(index) => write!(f, "/{}", index)?,
            }
        }
        Ok(())
    }
}

/// One edit emitted by a form
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub op: PatchOp,
    pub path: FieldPath,
    pub value: Option<Value>,
}

impl Patch {
    pub fn add(pointer: &str, value: Value) -> Result<Self> {
        Ok(Self {
            op: PatchOp::Add,
            path: FieldPath::parse(pointer)?,
            value: Some(value),
        })
    }

    pub fn replace(pointer: &str, value: Value) -> Result<Self> {
        Ok(Self {
            op: PatchOp::Replace,
            path: FieldPath::parse(pointer)?,
            value: Some(value),
        })
    }

    pub fn remove(pointer: &str) -> Result<Self> {
        Ok(Self {
            op: PatchOp::Remove,
            path: FieldPath::parse(pointer)?,
            value: None,
        })
    }
}

/// Apply a patch to a resource instance.
///
/// `Add` creates missing intermediate objects/arrays along the path;
/// `Replace` and `Remove` require the target to exist.
pub fn apply_patch(instance: &mut Value, patch: &Patch) -> Result<()> {
    let segments = patch.path.segments();
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| Error::InvalidPath(patch.path.to_string()))?;

    let create_missing = patch.op == PatchOp::Add;
    let mut target = instance;

    for (position, segment) in parents.iter().enumerate() {
        let next_segment = segments.get(position + 1);
        target = descend(target, segment, next_segment, create_missing, &patch.path)?;
    }

    match patch.op {
        PatchOp::Add => {
            let value = patch.value.clone().ok_or(Error::MissingValue)?;
            insert(target, last, value, &patch.path)
        }
        PatchOp::Replace => {
            let value = patch.value.clone().ok_or(Error::MissingValue)?;
            let slot = existing_slot(target, last, &patch.path)?;
            *slot = value;
            Ok(())
        }
        PatchOp::Remove => remove(target, last, &patch.path),
    }
}

fn descend<'a>(
    target: &'a mut Value,
    segment: &Segment,
    next: Option<&Segment>,
    create_missing: bool,
    path: &FieldPath,
) -> Result<&'a mut Value> {
    match segment {
        Segment::Key(key) => {
            let map = as_object(target, path)?;
            if !map.contains_key(key) {
                if !create_missing {
                    return Err(Error::PathNotFound(path.to_string()));
                }
                map.insert(key.clone(), empty_container(next));
            }
            map.get_mut(key)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))
        }
        Segment::Index(index) => {
            let array = as_array(target, path)?;
            if *index == array.len() && create_missing {
                array.push(empty_container(next));
            }
            array
                .get_mut(*index)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))
        }
    }
}

fn insert(target: &mut Value, segment: &Segment, value: Value, path: &FieldPath) -> Result<()> {
    match segment {
        Segment::Key(key) => {
            as_object(target, path)?.insert(key.clone(), value);
            Ok(())
        }
        Segment::Index(index) => {
            let array = as_array(target, path)?;
            if *index > array.len() {
                return Err(Error::PathNotFound(path.to_string()));
            }
            array.insert(*index, value);
            Ok(())
        }
    }
}

fn existing_slot<'a>(
    target: &'a mut Value,
    segment: &Segment,
    path: &FieldPath,
) -> Result<&'a mut Value> {
    match segment {
        Segment::Key(key) => as_object(target, path)?
            .get_mut(key)
            .ok_or_else(|| Error::PathNotFound(path.to_string())),
        Segment::Index(index) => as_array(target, path)?
            .get_mut(*index)
            .ok_or_else(|| Error::PathNotFound(path.to_string())),
    }
}

fn remove(target: &mut Value, segment: &Segment, path: &FieldPath) -> Result<()> {
    match segment {
        Segment::Key(key) => {
            as_object(target, path)?
                .remove(key)
                .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
            Ok(())
        }
        Segment::Index(index) => {
            let array = as_array(target, path)?;
            if *index >= array.len() {
                return Err(Error::PathNotFound(path.to_string()));
            }
            array.remove(*index);
            Ok(())
        }
    }
}

fn as_object<'a>(value: &'a mut Value, path: &FieldPath) -> Result<&'a mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| Error::TypeMismatch(path.to_string()))
}

fn as_array<'a>(value: &'a mut Value, path: &FieldPath) -> Result<&'a mut Vec<Value>> {
    value
        .as_array_mut()
        .ok_or_else(|| Error::TypeMismatch(path.to_string()))
}

fn empty_container(next: Option<&Segment>) -> Value {
    match next {
        Some(Segment::Index(_)) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}
