//! Nominal instance checks.
//!
//! Not a descriptor: [`check_instance`] asks whether a value was built by a
//! given [`Class`] (or a subclass of it), not whether it has a given shape.
//! It shares the validate-or-fail idiom of `check` so both read alike at a
//! module boundary.

use crate::error::ShapeMismatch;
use crate::value::{Class, Value};

/// Return `value` unchanged if it is an instance of `class`.
pub fn check_instance<'v>(value: &'v Value, class: &Class) -> Result<&'v Value, ShapeMismatch> {
    let is_instance = value
        .as_object()
        .and_then(|obj| obj.class())
        .is_some_and(|c| c.is_subclass_of(class));
    if is_instance {
        Ok(value)
    } else {
        Err(ShapeMismatch::NotAnInstance {
            value: value.to_string(),
            class: class.name().to_string(),
        })
    }
}
