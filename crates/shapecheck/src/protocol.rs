//! # Descriptor Protocol Bootstrap
//!
//! The descriptor that describes "a valid descriptor" is itself an
//! [`Interface`] over `{name: string, satisfied: method, check: method}`.
//! It is how host values posing as descriptors are admitted: a host object
//! carrying those three members is adopted as a [`HostDescriptor`], anything
//! else is a [`DescriptorDefinitionError::NotADescriptor`].
//!
//! ## Bootstrap
//!
//! The protocol interface cannot validate its own fields while it is being
//! built, so it is assembled from primitives directly and then asserted,
//! once, to accept the reified `string`, `number` and `method` primitives.
//! The result is cached in a `OnceLock`; a failed self-check is cached too
//! and surfaces as [`DescriptorDefinitionError::Bootstrap`] on every use.
//!
//! ## Reification
//!
//! [`Type::to_value`] is the inverse direction: it exposes any descriptor as
//! a host object whose `satisfied` and `check` members call back into it.
//! Host functions cannot raise, so the reified `check` returns `undefined`
//! when the value does not conform.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::descriptor::{Type, TypeDescriptor};
use crate::error::DescriptorDefinitionError;
use crate::interface::Interface;
use crate::primitive::Primitive;
use crate::value::{Function, Object, Value};

static UNDEFINED: Value = Value::Undefined;

static PROTOCOL: OnceLock<Result<Interface, DescriptorDefinitionError>> = OnceLock::new();

/// The interface every descriptor satisfies once reified.
pub fn descriptor_protocol() -> Result<&'static Interface, DescriptorDefinitionError> {
    PROTOCOL
        .get_or_init(bootstrap)
        .as_ref()
        .map_err(Clone::clone)
}

fn bootstrap() -> Result<Interface, DescriptorDefinitionError> {
    let fields: BTreeMap<String, Type> = [
        ("name", Primitive::String),
        ("satisfied", Primitive::Method),
        ("check", Primitive::Method),
    ]
    .into_iter()
    .map(|(name, primitive)| (name.to_string(), Type::from(primitive)))
    .collect();
    let protocol = Interface::from_types(fields);

    for primitive in [Primitive::String, Primitive::Number, Primitive::Method] {
        let reified = Type::from(primitive).to_value();
        protocol.check(&reified).map_err(|reason| {
            DescriptorDefinitionError::Bootstrap(format!("{primitive}: {reason}"))
        })?;
    }

    tracing::trace!(fields = protocol.len(), "descriptor protocol bootstrapped");
    Ok(protocol)
}

/// A descriptor backed by a host object's `satisfied` function.
///
/// The predicate result is read by truthiness. `check` is the shared
/// default, so failures read like any other descriptor's.
#[derive(Debug, Clone)]
pub struct HostDescriptor {
    name: String,
    satisfied: Function,
}

impl TypeDescriptor for HostDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn satisfied(&self, value: &Value) -> bool {
        self.satisfied
            .call(std::slice::from_ref(value))
            .is_truthy()
    }
}

impl Type {
    /// Adopt a host object `{name, satisfied, check}` as a descriptor.
    ///
    /// # Errors
    ///
    /// `NotADescriptor` if the value does not satisfy the descriptor
    /// protocol; `Bootstrap` if the protocol itself is unavailable.
    pub fn from_value(value: &Value) -> Result<Type, DescriptorDefinitionError> {
        let protocol = descriptor_protocol()?;
        protocol
            .check(value)
            .map_err(|reason| DescriptorDefinitionError::NotADescriptor {
                value: value.to_string(),
                reason,
            })?;

        match (value.get("name"), value.get("satisfied")) {
            (Value::String(name), Value::Function(satisfied)) => Ok(Type::new(HostDescriptor {
                name: name.clone(),
                satisfied: satisfied.clone(),
            })),
            _ => Err(DescriptorDefinitionError::Bootstrap(
                "protocol admitted a value without name or satisfied".to_string(),
            )),
        }
    }

    /// Expose this descriptor as a host object `{name, satisfied, check}`.
    pub fn to_value(&self) -> Value {
        let satisfied = {
            let this = self.clone();
            Function::new("satisfied", move |args| {
                Value::Bool(this.satisfied(first_arg(args)))
            })
        };
        let check = {
            let this = self.clone();
            Function::new("check", move |args| {
                this.check(first_arg(args))
                    .map_or(Value::Undefined, Value::clone)
            })
        };
        Value::Object(
            Object::new()
                .with("name", self.name())
                .with("satisfied", satisfied)
                .with("check", check),
        )
    }
}

fn first_arg(args: &[Value]) -> &Value {
    args.first().unwrap_or(&UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{list, map};
    use crate::interface::interface;

    /// A host-defined descriptor accepting even integers.
    fn even() -> Value {
        Value::object([
            ("name", Value::from("even")),
            (
                "satisfied",
                Value::function("satisfied", |args| {
                    let n = first_arg(args).as_f64().unwrap_or(f64::NAN);
                    Value::Bool(n % 2.0 == 0.0)
                }),
            ),
            ("check", Value::function("check", |args| first_arg(args).clone())),
        ])
    }

    #[test]
    fn test_protocol_bootstraps() {
        let protocol = descriptor_protocol().unwrap();
        assert_eq!(protocol.len(), 3);
        assert_eq!(protocol.field("name").unwrap().name(), "string");
        assert_eq!(protocol.field("satisfied").unwrap().name(), "method");
        assert_eq!(protocol.field("check").unwrap().name(), "method");
    }

    #[test]
    fn test_protocol_accepts_reified_descriptors() {
        let protocol = descriptor_protocol().unwrap();
        for p in Primitive::all() {
            assert!(protocol.satisfied(&Type::from(*p).to_value()), "{p}");
        }
        assert!(protocol.satisfied(&list(Primitive::Bool).unwrap().to_value()));
        assert!(protocol.satisfied(&Type::from(protocol.clone()).to_value()));
    }

    #[test]
    fn test_protocol_rejects_object_without_check() {
        let protocol = descriptor_protocol().unwrap();
        let partial = Value::object([
            ("name", Value::from("half")),
            ("satisfied", Value::function("satisfied", |_| Value::Bool(true))),
        ]);
        assert!(!protocol.satisfied(&partial));
        let err = Type::from_value(&partial).unwrap_err();
        match err {
            DescriptorDefinitionError::NotADescriptor { reason, .. } => {
                assert!(reason.to_string().contains("field check"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reified_members_call_back() {
        let t = Type::from(Primitive::Integer).to_value();
        assert_eq!(t.get("name"), &Value::from("integer"));
        let satisfied = t.get("satisfied").as_function().unwrap();
        assert_eq!(satisfied.call(&[Value::from(2)]), Value::Bool(true));
        assert_eq!(satisfied.call(&[Value::from(2.5)]), Value::Bool(false));
        assert_eq!(satisfied.call(&[]), Value::Bool(false));
        let check = t.get("check").as_function().unwrap();
        assert_eq!(check.call(&[Value::from(9)]), Value::from(9));
        assert_eq!(check.call(&[Value::from("9")]), Value::Undefined);
    }

    #[test]
    fn test_host_descriptor_adopted() {
        let t = Type::from_value(&even()).unwrap();
        assert_eq!(t.name(), "even");
        assert!(t.satisfied(&Value::from(4)));
        assert!(!t.satisfied(&Value::from(3)));
        assert_eq!(t.check(&Value::from(3)).unwrap_err().to_string(), "3 is not a even");
    }

    #[test]
    fn test_host_descriptor_composes() {
        let evens = list(even()).unwrap();
        assert_eq!(evens.name(), "list(even)");
        assert!(evens.satisfied(&Value::List(vec![2.into(), 4.into()])));
        assert!(!evens.satisfied(&Value::List(vec![2.into(), 5.into()])));

        let iface = interface([("count", even())]).unwrap();
        assert!(iface.satisfied(&Value::object([("count", 10)])));
        assert!(map(&even()).is_ok());
    }

    #[test]
    fn test_round_trip_through_host_value() {
        let original = list(Primitive::String).unwrap();
        let adopted = Type::from_value(&original.to_value()).unwrap();
        assert_eq!(adopted.name(), original.name());
        let v = Value::List(vec!["a".into(), 1.into()]);
        assert_eq!(adopted.satisfied(&v), original.satisfied(&v));
    }
}
