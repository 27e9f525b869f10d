//! # Host Values
//!
//! The dynamic value model that descriptors inspect. Candidate values at a
//! module boundary are not statically known shapes, so they are represented
//! as a small tagged union mirroring a dynamic host object model:
//!
//! - `Undefined` and `Null` are the two "absent" values.
//! - `Number` is an IEEE-754 double, so NaN and the infinities are
//!   representable and must be rejected explicitly where required.
//! - `List`, `Object` and `Function` are object-like; everything else is a
//!   scalar.
//!
//! Field lookup on anything other than an `Object`, or of a key the object
//! does not carry, yields `Undefined` rather than an error. Descriptors
//! rely on this to treat a missing field exactly like an absent value.
//!
//! Objects may be tagged with the [`Class`] that constructed them. Classes
//! take part only in nominal instance checks
//! ([`check_instance`](crate::check_instance)); structural descriptors
//! ignore them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared `Undefined` returned by field lookups that miss.
static UNDEFINED: Value = Value::Undefined;

/// A dynamic candidate value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value at all; the result of looking up a missing field.
    #[default]
    Undefined,
    /// Explicit absence.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Ordered, indexable sequence.
    List(Vec<Value>),
    /// Keyed container, optionally tagged with its constructing class.
    Object(Object),
    /// Invocable value.
    Function(Function),
}

impl Value {
    /// Build a plain object from `(key, value)` pairs.
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Object::from_fields(fields))
    }

    /// Build a function value from a closure.
    pub fn function(
        name: impl Into<String>,
        call: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Value::Function(Function::new(name, call))
    }

    /// True for `Undefined` and `Null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// True for composite values: objects, lists and functions.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::List(_) | Value::Object(_) | Value::Function(_))
    }

    /// Truthiness as a dynamic host would evaluate it in a condition.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Look up a named field. Misses yield `Undefined`.
    pub fn get(&self, field: &str) -> &Value {
        match self {
            Value::Object(obj) => obj.get(field).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Best-effort name of the value's runtime kind, used in diagnostics.
    ///
    /// Objects report their class name when they have one.
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "Array",
            Value::Object(obj) => obj.class_name(),
            Value::Function(_) => "Function",
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value's string form for error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_absent() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Object(obj) => write!(f, "[object {}]", obj.class_name()),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` maps to `Null`.
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// JSON data maps onto plain values; JSON has no functions, classes or
    /// `undefined`.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::object(map),
        }
    }
}

/// A keyed container of named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    class: Option<Class>,
    fields: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            class: None,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, returning the previous value under that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The class that constructed this object, if any.
    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    /// Class name for diagnostics; plain objects report `Object`.
    pub fn class_name(&self) -> &str {
        self.class.as_ref().map_or("Object", Class::name)
    }
}

type Callback = dyn Fn(&[Value]) -> Value + Send + Sync;

/// An invocable host value.
///
/// Equality is identity: two functions are equal only when they share the
/// same underlying closure.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    call: Arc<Callback>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        call: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Arc::from(name.into()),
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function with positional arguments.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.call)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

/// A named constructor-like handle with an optional parent class.
///
/// Equality is identity, so two classes with the same name are still
/// distinct constructors.
#[derive(Clone)]
pub struct Class(Arc<ClassDef>);

struct ClassDef {
    name: String,
    parent: Option<Class>,
}

impl Class {
    /// A root class with no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassDef {
            name: name.into(),
            parent: None,
        }))
    }

    /// A class deriving from `parent`.
    pub fn extending(name: impl Into<String>, parent: &Class) -> Self {
        Self(Arc::new(ClassDef {
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// True if `self` is `ancestor` or derives from it, directly or not.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Construct an object tagged with this class.
    pub fn instantiate<K, V>(&self, fields: impl IntoIterator<Item = (K, V)>) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut obj = Object::from_fields(fields);
        obj.class = Some(self.clone());
        Value::Object(obj)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.0.name)
            .field("parent", &self.parent().map(Class::name))
            .finish()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
