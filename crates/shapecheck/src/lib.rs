//! # shapecheck — Structural Type Descriptors
//!
//! Validates the *shape* of dynamic values at module boundaries: missing
//! methods, wrong primitive kinds, malformed nested collections. Conformance
//! is structural; class hierarchies play no part except in the separate
//! nominal helper [`check_instance`].
//!
//! ## The Protocol
//!
//! Every descriptor implements [`TypeDescriptor`]:
//!
//! - `name()` — a diagnostic name, derived for composites
//!   (`optional(string)`, `list(number)`, `map(? -> bool)`).
//! - `satisfied(&value)` — a pure predicate that never fails.
//! - `check(&value)` — the same predicate escalated to a
//!   [`ShapeMismatch`]; returns the borrowed value unchanged on success.
//!
//! ## Building Descriptors
//!
//! - [`Primitive`] — the fixed registry: `bool`, `string`, `number`,
//!   `integer`, `stringint`, `stringintbool`, `scalar`, `method`, `object`.
//! - [`optional`], [`list`], [`map`] — combinators over any descriptor.
//! - [`interface`] / [`Interface::builder`] — named-field descriptors.
//! - [`extend`] — union of interfaces, last writer wins.
//!
//! Building fails with [`DescriptorDefinitionError`] only when something
//! that is not a descriptor is offered as one. Statically typed
//! descriptors cannot fail; host values are validated against the
//! self-hosted [`descriptor_protocol`].
//!
//! ```
//! use shapecheck::{interface, Primitive, TypeDescriptor, Value};
//!
//! let greeter = interface([
//!     ("name", Primitive::String),
//!     ("greet", Primitive::Method),
//! ])?;
//!
//! let ok = Value::object([
//!     ("name", Value::from("a")),
//!     ("greet", Value::function("greet", |_| Value::Null)),
//! ]);
//! assert!(greeter.satisfied(&ok));
//! assert!(greeter.check(&Value::object([("name", "a")])).is_err());
//! # Ok::<(), shapecheck::ShapeError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Descriptors are immutable and `Send + Sync`; share them freely.
//! - No descriptor mutates or retains the values it inspects.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Rejections through `satisfied` emit `tracing` debug events; the crate
//!   never installs a subscriber.

pub mod combinator;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod interface;
pub mod primitive;
pub mod protocol;
pub mod value;

pub use combinator::{list, map, optional};
pub use descriptor::{IntoDescriptor, Type, TypeDescriptor};
pub use error::{DescriptorDefinitionError, ShapeError, ShapeMismatch};
pub use instance::check_instance;
pub use interface::{extend, interface, Interface, InterfaceBuilder};
pub use primitive::Primitive;
pub use protocol::{descriptor_protocol, HostDescriptor};
pub use value::{Class, Function, Object, Value};
