//! # Combinators
//!
//! Higher-order descriptors built from existing ones: [`optional`],
//! [`list`] and [`map`]. Each takes anything [`IntoDescriptor`], so an
//! argument that does not honour the descriptor protocol is rejected when
//! the combinator is built, never when a value is checked.
//!
//! `list` and `map` report two distinct failure reasons: the container kind
//! is wrong (`NotASequence` / `NotAContainer`), or a contained value fails
//! the element descriptor (`Element` / `Entry`).

use crate::descriptor::{report, IntoDescriptor, Type, TypeDescriptor};
use crate::error::{DescriptorDefinitionError, ShapeMismatch};
use crate::value::Value;

/// Accepts absent values or anything the inner descriptor accepts.
#[derive(Debug, Clone)]
pub struct Optional {
    name: String,
    inner: Type,
}

impl TypeDescriptor for Optional {
    fn name(&self) -> &str {
        &self.name
    }

    fn satisfied(&self, value: &Value) -> bool {
        value.is_absent() || self.inner.satisfied(value)
    }
}

/// Accepts lists whose every element satisfies the element descriptor.
#[derive(Debug, Clone)]
pub struct List {
    name: String,
    element: Type,
}

impl TypeDescriptor for List {
    fn name(&self) -> &str {
        &self.name
    }

    fn satisfied(&self, value: &Value) -> bool {
        report(&self.name, self.mismatch(value))
    }

    fn mismatch(&self, value: &Value) -> Option<ShapeMismatch> {
        let Some(items) = value.as_list() else {
            return Some(ShapeMismatch::NotASequence {
                value: value.to_string(),
                expected: self.name.clone(),
            });
        };
        items
            .iter()
            .enumerate()
            .find(|(_, item)| !self.element.satisfied(item))
            .map(|(index, item)| ShapeMismatch::Element {
                index,
                value: item.to_string(),
                element: self.element.name().to_string(),
            })
    }
}

/// Accepts keyed containers whose every value satisfies the value
/// descriptor. Keys are unconstrained.
///
/// Lists count as containers keyed by index.
#[derive(Debug, Clone)]
pub struct Map {
    name: String,
    element: Type,
}

impl Map {
    fn entry_mismatch(&self, key: impl ToString, value: &Value) -> Option<ShapeMismatch> {
        if self.element.satisfied(value) {
            None
        } else {
            Some(ShapeMismatch::Entry {
                key: key.to_string(),
                value: value.to_string(),
                element: self.element.name().to_string(),
            })
        }
    }
}

impl TypeDescriptor for Map {
    fn name(&self) -> &str {
        &self.name
    }

    fn satisfied(&self, value: &Value) -> bool {
        report(&self.name, self.mismatch(value))
    }

    fn mismatch(&self, value: &Value) -> Option<ShapeMismatch> {
        match value {
            Value::Object(obj) => obj.iter().find_map(|(k, v)| self.entry_mismatch(k, v)),
            Value::List(items) => items
                .iter()
                .enumerate()
                .find_map(|(i, v)| self.entry_mismatch(i, v)),
            _ => Some(ShapeMismatch::NotAContainer {
                value: value.to_string(),
                expected: self.name.clone(),
            }),
        }
    }
}

/// `optional(T)`: absent or `T`.
pub fn optional(inner: impl IntoDescriptor) -> Result<Type, DescriptorDefinitionError> {
    let inner = inner.into_descriptor()?;
    Ok(Type::new(Optional {
        name: format!("optional({})", inner.name()),
        inner,
    }))
}

/// `list(T)`: a list of `T`.
pub fn list(element: impl IntoDescriptor) -> Result<Type, DescriptorDefinitionError> {
    let element = element.into_descriptor()?;
    Ok(Type::new(List {
        name: format!("list({})", element.name()),
        element,
    }))
}

/// `map(T)`: a keyed container of `T`.
pub fn map(element: impl IntoDescriptor) -> Result<Type, DescriptorDefinitionError> {
    let element = element.into_descriptor()?;
    Ok(Type::new(Map {
        name: format!("map(? -> {})", element.name()),
        element,
    }))
}
