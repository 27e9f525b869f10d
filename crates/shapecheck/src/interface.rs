//! # Interface Descriptors
//!
//! An [`Interface`] is a descriptor defined by a set of named fields, each
//! with its own descriptor. A value satisfies it when it is present and
//! every declared field of the value satisfies the field's descriptor.
//!
//! Conformance is structural: fields the interface does not declare are
//! ignored, and the class that built the value is irrelevant. A missing
//! field reads as `undefined`, so `optional(T)` fields may be left out.
//!
//! ## Construction
//!
//! Field entries pass through [`IntoDescriptor`] when the interface is
//! built. Host values posing as descriptors are validated against the
//! descriptor protocol there, so a malformed entry surfaces as
//! [`DescriptorDefinitionError::InvalidField`] before any value is checked.
//!
//! ## Composition
//!
//! [`extend`] merges several interfaces into one. Field maps are unioned in
//! argument order, later interfaces overriding earlier ones on a name
//! collision.

use std::collections::BTreeMap;

use crate::descriptor::{report, IntoDescriptor, Type, TypeDescriptor};
use crate::error::{DescriptorDefinitionError, ShapeMismatch};
use crate::value::Value;

const INTERFACE_NAME: &str = "<interface>";

/// A descriptor requiring a set of named fields.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    fields: BTreeMap<String, Type>,
}

impl Interface {
    /// Start building an interface field by field.
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::default()
    }

    /// Assemble from already-admitted descriptors. Skips protocol
    /// validation, which is what lets the protocol interface itself be
    /// built.
    pub(crate) fn from_types(fields: BTreeMap<String, Type>) -> Self {
        Self { fields }
    }

    /// Declared fields, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The descriptor declared for `name`.
    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy of this interface with one more field, replacing any field of
    /// the same name.
    pub fn with_field(
        &self,
        name: impl Into<String>,
        descriptor: impl IntoDescriptor,
    ) -> Result<Self, DescriptorDefinitionError> {
        let name = name.into();
        let descriptor = admit(&name, descriptor)?;
        let mut fields = self.fields.clone();
        fields.insert(name, descriptor);
        Ok(Self { fields })
    }
}

impl TypeDescriptor for Interface {
    fn name(&self) -> &str {
        INTERFACE_NAME
    }

    fn satisfied(&self, value: &Value) -> bool {
        report(INTERFACE_NAME, self.mismatch(value))
    }

    fn mismatch(&self, value: &Value) -> Option<ShapeMismatch> {
        if value.is_absent() {
            return Some(ShapeMismatch::MissingObject {
                value: value.to_string(),
            });
        }
        self.fields
            .iter()
            .find(|(field, descriptor)| !descriptor.satisfied(value.get(field)))
            .map(|(field, descriptor)| ShapeMismatch::Field {
                field: field.clone(),
                expected: descriptor.name().to_string(),
                actual: value.kind_name().to_string(),
            })
    }
}

/// Incremental interface construction.
///
/// The first invalid field is remembered and reported by
/// [`build`](InterfaceBuilder::build); later fields are ignored once an
/// error is recorded.
#[derive(Debug, Default)]
pub struct InterfaceBuilder {
    fields: BTreeMap<String, Type>,
    error: Option<DescriptorDefinitionError>,
}

impl InterfaceBuilder {
    /// Declare a field. Redeclaring a name replaces the earlier descriptor.
    pub fn field(mut self, name: impl Into<String>, descriptor: impl IntoDescriptor) -> Self {
        if self.error.is_some() {
            return self;
        }
        let name = name.into();
        match admit(&name, descriptor) {
            Ok(descriptor) => {
                self.fields.insert(name, descriptor);
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    pub fn build(self) -> Result<Interface, DescriptorDefinitionError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Interface {
                fields: self.fields,
            }),
        }
    }
}

fn admit(
    field: &str,
    descriptor: impl IntoDescriptor,
) -> Result<Type, DescriptorDefinitionError> {
    descriptor
        .into_descriptor()
        .map_err(|e| DescriptorDefinitionError::InvalidField {
            field: field.to_string(),
            source: Box::new(e),
        })
}

/// Build an interface from `(field, descriptor)` pairs.
pub fn interface<K, D>(
    fields: impl IntoIterator<Item = (K, D)>,
) -> Result<Interface, DescriptorDefinitionError>
where
    K: Into<String>,
    D: IntoDescriptor,
{
    fields
        .into_iter()
        .fold(Interface::builder(), |builder, (name, descriptor)| {
            builder.field(name, descriptor)
        })
        .build()
}

/// Union of several interfaces; later interfaces win on field collisions.
pub fn extend<'a>(interfaces: impl IntoIterator<Item = &'a Interface>) -> Interface {
    let mut fields = BTreeMap::new();
    for iface in interfaces {
        fields.extend(
            iface
                .fields
                .iter()
                .map(|(name, descriptor)| (name.clone(), descriptor.clone())),
        );
    }
    Interface { fields }
}
