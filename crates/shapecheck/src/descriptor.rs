//! # Descriptor Protocol
//!
//! Every descriptor, primitive or composite, implements [`TypeDescriptor`]:
//! a `name` for diagnostics, a `satisfied` predicate that never fails, and
//! a `check` that escalates the same predicate into an error.
//!
//! `check` is defined once, here, on top of [`TypeDescriptor::mismatch`].
//! Descriptors with richer failure reasons (lists, maps, interfaces)
//! override `mismatch` and never `check`, so for every descriptor
//! `satisfied(v) == check(v).is_ok()` and `check` hands back the very value
//! it was given.
//!
//! [`Type`] is the shared, type-erased handle that combinators and
//! interfaces store. [`IntoDescriptor`] is the single entry point through
//! which anything claiming to be a descriptor is admitted, which is where
//! construction-time validation happens.

use std::fmt;
use std::sync::Arc;

use crate::error::{DescriptorDefinitionError, ShapeMismatch};
use crate::interface::Interface;
use crate::primitive::Primitive;
use crate::value::Value;

/// The uniform contract of all descriptors.
///
/// Implementations must be pure: no blocking, no mutation of the candidate,
/// no observable side effects beyond advisory `tracing` events.
pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// Human-readable name, used only in diagnostics.
    fn name(&self) -> &str;

    /// Does `value` conform? Never panics.
    fn satisfied(&self, value: &Value) -> bool;

    /// Why `value` does not conform, or `None` if it does.
    ///
    /// The default reports [`ShapeMismatch::NotA`] built from the value's
    /// string form and this descriptor's name.
    fn mismatch(&self, value: &Value) -> Option<ShapeMismatch> {
        if self.satisfied(value) {
            None
        } else {
            Some(ShapeMismatch::not_a(value, self.name()))
        }
    }

    /// Return `value` unchanged if it conforms, otherwise the mismatch.
    fn check<'v>(&self, value: &'v Value) -> Result<&'v Value, ShapeMismatch> {
        match self.mismatch(value) {
            None => Ok(value),
            Some(reason) => Err(reason),
        }
    }
}

/// Shared `satisfied` for descriptors that derive it from `mismatch`:
/// logs the rejection reason and folds it into a boolean.
pub(crate) fn report(descriptor: &str, mismatch: Option<ShapeMismatch>) -> bool {
    match mismatch {
        None => true,
        Some(reason) => {
            tracing::debug!(descriptor, %reason, "value rejected");
            false
        }
    }
}

/// A shared, immutable handle to any descriptor.
#[derive(Clone)]
pub struct Type(Arc<dyn TypeDescriptor>);

impl Type {
    pub fn new(descriptor: impl TypeDescriptor + 'static) -> Self {
        Self(Arc::new(descriptor))
    }
}

impl TypeDescriptor for Type {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn satisfied(&self, value: &Value) -> bool {
        self.0.satisfied(value)
    }

    fn mismatch(&self, value: &Value) -> Option<ShapeMismatch> {
        self.0.mismatch(value)
    }

    fn check<'v>(&self, value: &'v Value) -> Result<&'v Value, ShapeMismatch> {
        self.0.check(value)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl From<Primitive> for Type {
    fn from(primitive: Primitive) -> Self {
        Type::new(primitive)
    }
}

impl From<Interface> for Type {
    fn from(interface: Interface) -> Self {
        Type::new(interface)
    }
}

/// Anything that can be admitted as a descriptor.
///
/// Statically typed descriptors convert infallibly. Host values are
/// validated against the descriptor protocol first, see
/// [`Type::from_value`].
pub trait IntoDescriptor {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError>;
}

impl IntoDescriptor for Type {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Ok(self)
    }
}

impl IntoDescriptor for &Type {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Ok(self.clone())
    }
}

impl IntoDescriptor for Primitive {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Ok(Type::from(self))
    }
}

impl IntoDescriptor for Interface {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Ok(Type::from(self))
    }
}

impl IntoDescriptor for &Interface {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Ok(Type::from(self.clone()))
    }
}

impl IntoDescriptor for Value {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Type::from_value(&self)
    }
}

impl IntoDescriptor for &Value {
    fn into_descriptor(self) -> Result<Type, DescriptorDefinitionError> {
        Type::from_value(self)
    }
}
