/*!
 Data structures produced when unarchiving `NSKeyedArchiver` data.
*/

use std::{collections::BTreeMap, rc::Rc};

use chrono::{DateTime, Utc};

use crate::hydrators::object::{ArchivedObject, AsAny};

/// The bag of decoded properties that belong to a single archived object
pub type Properties = BTreeMap<String, Hydrated>;

/// Rust structures containing data decoded from a keyed archive
///
/// Compound values are reference counted: every reference to the same entry in the
/// archive's object table resolves to the same allocation, which can be checked with
/// [`Hydrated::ptr_eq`].
#[derive(Debug, Clone)]
pub enum Hydrated {
    /// The `$null` marker
    Null,
    /// A boolean scalar
    Boolean(bool),
    /// Signed integer types are coerced into this container
    SignedInteger(i64),
    /// Unsigned integers too large for an [`i64`]
    UnsignedInteger(u64),
    /// Floating point numbers
    Real(f64),
    /// Text data
    String(String),
    /// Arbitrary collection of bytes
    Data(Vec<u8>),
    /// A date literal stored directly in the property list
    Date(DateTime<Utc>),
    /// An array that was not archived as an object
    Array(Rc<Vec<Hydrated>>),
    /// A dictionary that was not archived as an object
    Dictionary(Rc<Properties>),
    /// An archived object built by a [`Hydrator`](crate::hydrators::Hydrator)
    Object(Rc<dyn ArchivedObject>),
}

impl Hydrated {
    /// Wrap a list of values
    pub fn array(items: Vec<Hydrated>) -> Self {
        Self::Array(Rc::new(items))
    }

    /// Wrap a dictionary of values
    pub fn dictionary(items: Properties) -> Self {
        Self::Dictionary(Rc::new(items))
    }

    /// Wrap a hydrated object
    pub fn object<T: ArchivedObject>(object: T) -> Self {
        Self::Object(Rc::new(object))
    }

    /// A short name for the kind of value, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Hydrated::Null => "null",
            Hydrated::Boolean(_) => "boolean",
            Hydrated::SignedInteger(_) | Hydrated::UnsignedInteger(_) => "integer",
            Hydrated::Real(_) => "real",
            Hydrated::String(_) => "string",
            Hydrated::Data(_) => "data",
            Hydrated::Date(_) => "date",
            Hydrated::Array(_) => "array",
            Hydrated::Dictionary(_) => "dictionary",
            Hydrated::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Hydrated::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Hydrated::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Hydrated::SignedInteger(num) => Some(*num),
            Hydrated::UnsignedInteger(num) => i64::try_from(*num).ok(),
            _ => None,
        }
    }

    /// Numeric value of an integer or real
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Hydrated::SignedInteger(num) => Some(*num as f64),
            Hydrated::UnsignedInteger(num) => Some(*num as f64),
            Hydrated::Real(num) => Some(*num),
            _ => None,
        }
    }

    /// Raw bytes of a data blob, or of the UTF-8 text of a string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Hydrated::Data(bytes) => Some(bytes),
            Hydrated::String(text) => Some(text.as_bytes()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Hydrated]> {
        match self {
            Hydrated::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Properties> {
        match self {
            Hydrated::Dictionary(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow an archived object as its concrete type
    pub fn downcast_ref<T: ArchivedObject>(&self) -> Option<&T> {
        match self {
            Hydrated::Object(object) => AsAny::as_any(object.as_ref()).downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Whether both values are the same allocation, i.e. decoded from the same object table entry
    ///
    /// Scalars are copied during decoding, so they never share an allocation.
    pub fn ptr_eq(&self, other: &Hydrated) -> bool {
        match (self, other) {
            (Hydrated::Array(a), Hydrated::Array(b)) => Rc::ptr_eq(a, b),
            (Hydrated::Dictionary(a), Hydrated::Dictionary(b)) => Rc::ptr_eq(a, b),
            (Hydrated::Object(a), Hydrated::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

/// Compare two objects by address, ignoring the vtable half of the fat pointer
fn same_object(a: &Rc<dyn ArchivedObject>, b: &Rc<dyn ArchivedObject>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const u8, Rc::as_ptr(b) as *const u8)
}

/// Strict equality: scalars and plain containers compare by value, objects by identity
impl PartialEq for Hydrated {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Hydrated::Null, Hydrated::Null) => true,
            (Hydrated::Boolean(a), Hydrated::Boolean(b)) => a == b,
            (Hydrated::SignedInteger(a), Hydrated::SignedInteger(b)) => a == b,
            (Hydrated::UnsignedInteger(a), Hydrated::UnsignedInteger(b)) => a == b,
            (Hydrated::Real(a), Hydrated::Real(b)) => a == b,
            (Hydrated::String(a), Hydrated::String(b)) => a == b,
            (Hydrated::Data(a), Hydrated::Data(b)) => a == b,
            (Hydrated::Date(a), Hydrated::Date(b)) => a == b,
            (Hydrated::Array(a), Hydrated::Array(b)) => a == b,
            (Hydrated::Dictionary(a), Hydrated::Dictionary(b)) => a == b,
            (Hydrated::Object(a), Hydrated::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Hydrated {
    fn from(value: &str) -> Self {
        Hydrated::String(value.to_string())
    }
}

impl From<String> for Hydrated {
    fn from(value: String) -> Self {
        Hydrated::String(value)
    }
}

impl From<i64> for Hydrated {
    fn from(value: i64) -> Self {
        Hydrated::SignedInteger(value)
    }
}

impl From<f64> for Hydrated {
    fn from(value: f64) -> Self {
        Hydrated::Real(value)
    }
}

impl From<bool> for Hydrated {
    fn from(value: bool) -> Self {
        Hydrated::Boolean(value)
    }
}
