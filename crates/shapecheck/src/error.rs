//! # Error Types
//!
//! Two failure taxonomies, kept apart so callers and tests can tell a
//! programming mistake from a bad value:
//!
//! - [`DescriptorDefinitionError`] is raised while *building* a descriptor:
//!   a combinator or interface field given something that does not honour
//!   the descriptor protocol. It is never produced by checking a value.
//! - [`ShapeMismatch`] is raised by `check` when a candidate value does not
//!   conform. `satisfied` observes the same condition as `false`.
//!
//! Mismatch variants carry rendered strings (value display, descriptor
//! name) rather than the values themselves, so errors are cheap to clone
//! and compare and never hold on to the candidate.

use thiserror::Error;

use crate::value::Value;

/// Construction-time misuse of the descriptor API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorDefinitionError {
    /// A host value offered as a descriptor lacks `name`, `satisfied` or
    /// `check` of the right kind.
    #[error("not a valid type object: {value} ({reason})")]
    NotADescriptor {
        /// String form of the rejected value.
        value: String,
        /// Why the descriptor protocol rejected it.
        reason: ShapeMismatch,
    },

    /// An interface field entry is not a valid descriptor.
    #[error("interface field '{field}' is invalid: {source}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// The underlying definition error.
        source: Box<DescriptorDefinitionError>,
    },

    /// A primitive name that is not in the registry.
    #[error("unknown primitive descriptor: {0:?}")]
    UnknownPrimitive(String),

    /// The descriptor protocol failed its one-time self-check.
    #[error("descriptor protocol bootstrap failed: {0}")]
    Bootstrap(String),
}

/// A candidate value that does not conform to a descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// Generic failure produced by the shared default `check`.
    #[error("{value} is not a {expected}")]
    NotA { value: String, expected: String },

    /// A `list(T)` was given something that is not a list.
    #[error("{value} is not a list, expected {expected}")]
    NotASequence { value: String, expected: String },

    /// A list element failed the element descriptor.
    #[error("element {index} ({value}) is not a {element}")]
    Element {
        index: usize,
        value: String,
        element: String,
    },

    /// A `map(T)` was given something that is not a keyed container.
    #[error("{value} is not a keyed container, expected {expected}")]
    NotAContainer { value: String, expected: String },

    /// A map entry failed the value descriptor.
    #[error("key '{key}' ({value}) is not a {element}")]
    Entry {
        key: String,
        value: String,
        element: String,
    },

    /// An interface was checked against `null` or `undefined`.
    #[error("interface not satisfied, object is {value}")]
    MissingObject { value: String },

    /// An interface field failed its descriptor.
    #[error("interface not satisfied, object of instance {actual} lacks {expected} field {field}")]
    Field {
        /// Name of the first failing field.
        field: String,
        /// Name of the descriptor the field had to satisfy.
        expected: String,
        /// Kind or class name of the checked object.
        actual: String,
    },

    /// Nominal instance check failed.
    #[error("{value} is not an instance of {class}")]
    NotAnInstance { value: String, class: String },
}

impl ShapeMismatch {
    /// The default failure for `value` against a descriptor named `expected`.
    pub fn not_a(value: &Value, expected: &str) -> Self {
        Self::NotA {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Either kind of failure, for callers that build and check in one flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("descriptor definition error: {0}")]
    Definition(#[from] DescriptorDefinitionError),

    #[error("shape mismatch: {0}")]
    Mismatch(#[from] ShapeMismatch),
}
