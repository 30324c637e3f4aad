//! Value extraction and the value comparator.

use crate::{PageBuilderError, PageBuilderResult, SortDirective};
use chrono::{DateTime, NaiveDate, Utc};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A value as seen by the comparator.
#[derive(Clone)]
pub enum SortValue<'a> {
    /// Missing or absent value.
    Null,
    /// Boolean (`false < true`).
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number, ordered with `f64::total_cmp`.
    Float(f64),
    /// Text.
    Text(Cow<'a, str>),
    /// Calendar date.
    Date(NaiveDate),
    /// Point in time.
    DateTime(DateTime<Utc>),
    /// A nested value whose properties can be extracted in turn.
    Object(&'a dyn Sortable),
    /// A value of a type without a natural order.
    Unordered(&'static str),
}

impl<'a> SortValue<'a> {
    /// The natural value of anything sortable.
    pub fn of<T: Sortable + ?Sized>(value: &'a T) -> Self {
        value.sort_value()
    }

    /// A nested value, for dotted property paths.
    pub fn object<T: Sortable>(value: &'a T) -> Self {
        Self::Object(value)
    }

    /// Returns true for [`SortValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Debug for SortValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Object(_) => write!(f, "<object>"),
            Self::Unordered(type_name) => write!(f, "<{type_name}>"),
        }
    }
}

impl<'a> From<&'a str> for SortValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl From<String> for SortValue<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl From<i64> for SortValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for SortValue<'_> {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for SortValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SortValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Capability to expose values to the comparator.
///
/// Both methods have defaults, so `impl Sortable for MyType {}` is enough for a
/// type that is only ever sorted by a custom comparator factory. Types sorted by
/// field name answer [`Sortable::property`]; a value with a natural order answers
/// [`Sortable::sort_value`].
///
/// ```rust
/// use pagebuilder_core::{Sortable, SortValue};
///
/// struct Address {
///     city: Option<String>,
/// }
///
/// impl Sortable for Address {
///     fn property(&self, name: &str) -> Option<SortValue<'_>> {
///         match name {
///             "city" => Some(SortValue::of(&self.city)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Sortable {
    /// The value used when a directive has no field.
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Unordered(std::any::type_name::<Self>())
    }

    /// The value of a named property; `None` if the property does not exist.
    fn property(&self, _name: &str) -> Option<SortValue<'_>> {
        None
    }
}

macro_rules! sortable_signed {
    ($($t:ty),*) => {
        $(impl Sortable for $t {
            fn sort_value(&self) -> SortValue<'_> {
                SortValue::Int(i64::from(*self))
            }
        })*
    };
}

macro_rules! sortable_unsigned {
    ($($t:ty),*) => {
        $(impl Sortable for $t {
            fn sort_value(&self) -> SortValue<'_> {
                SortValue::UInt(u64::from(*self))
            }
        })*
    };
}

sortable_signed!(i8, i16, i32, i64);
sortable_unsigned!(u8, u16, u32, u64);

impl Sortable for isize {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Int(*self as i64)
    }
}

impl Sortable for usize {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::UInt(*self as u64)
    }
}

impl Sortable for f32 {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Float(f64::from(*self))
    }
}

impl Sortable for f64 {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Float(*self)
    }
}

impl Sortable for bool {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Bool(*self)
    }
}

impl Sortable for char {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Text(Cow::Owned(self.to_string()))
    }
}

impl Sortable for str {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Text(Cow::Borrowed(self))
    }
}

impl Sortable for String {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl Sortable for NaiveDate {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::Date(*self)
    }
}

impl Sortable for DateTime<Utc> {
    fn sort_value(&self) -> SortValue<'_> {
        SortValue::DateTime(*self)
    }
}

impl<T: Sortable> Sortable for Option<T> {
    fn sort_value(&self) -> SortValue<'_> {
        self.as_ref().map_or(SortValue::Null, Sortable::sort_value)
    }

    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        self.as_ref().and_then(|value| value.property(name))
    }
}

impl<T: Sortable + ?Sized> Sortable for &T {
    fn sort_value(&self) -> SortValue<'_> {
        (**self).sort_value()
    }

    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        (**self).property(name)
    }
}

impl<T: Sortable + ?Sized> Sortable for Box<T> {
    fn sort_value(&self) -> SortValue<'_> {
        (**self).sort_value()
    }

    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        (**self).property(name)
    }
}

impl<T: Sortable + ?Sized> Sortable for Rc<T> {
    fn sort_value(&self) -> SortValue<'_> {
        (**self).sort_value()
    }

    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        (**self).property(name)
    }
}

impl<T: Sortable + ?Sized> Sortable for Arc<T> {
    fn sort_value(&self) -> SortValue<'_> {
        (**self).sort_value()
    }

    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        (**self).property(name)
    }
}

/// Extracts the value a directive compares: the whole value, or the property
/// at a dotted path. Missing properties and paths through non-objects are null.
#[must_use]
pub fn extract_value<'a>(value: &'a dyn Sortable, field: Option<&str>) -> SortValue<'a> {
    let Some(path) = field else {
        return natural(value.sort_value());
    };
    let mut current = SortValue::Object(value);
    for segment in path.split('.') {
        current = match current {
            SortValue::Object(object) => object.property(segment).unwrap_or(SortValue::Null),
            _ => return SortValue::Null,
        };
    }
    natural(current)
}

fn natural(value: SortValue<'_>) -> SortValue<'_> {
    match value {
        SortValue::Object(object) => match object.sort_value() {
            SortValue::Object(_) => SortValue::Unordered("nested object"),
            other => other,
        },
        other => other,
    }
}

/// Natural order of two non-null values; `None` if they have no common order.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
#[must_use]
pub fn natural_order(left: &SortValue<'_>, right: &SortValue<'_>, ignore_case: bool) -> Option<Ordering> {
    use SortValue::{Bool, Date, DateTime, Float, Int, Text, UInt};

    match (left, right) {
        (Bool(a), Bool(b)) => Some(a.cmp(b)),
        (Int(a), Int(b)) => Some(a.cmp(b)),
        (UInt(a), UInt(b)) => Some(a.cmp(b)),
        (Int(a), UInt(b)) => Some(if *a < 0 { Ordering::Less } else { (*a as u64).cmp(b) }),
        (UInt(a), Int(b)) => Some(if *b < 0 { Ordering::Greater } else { a.cmp(&(*b as u64)) }),
        (Float(a), Float(b)) => Some(a.total_cmp(b)),
        (Float(a), Int(b)) => Some(a.total_cmp(&(*b as f64))),
        (Int(a), Float(b)) => Some((*a as f64).total_cmp(b)),
        (Float(a), UInt(b)) => Some(a.total_cmp(&(*b as f64))),
        (UInt(a), Float(b)) => Some((*a as f64).total_cmp(b)),
        (Text(a), Text(b)) if ignore_case => Some(
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
        ),
        (Text(a), Text(b)) => Some(a.cmp(b)),
        (Date(a), Date(b)) => Some(a.cmp(b)),
        (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Compares two values according to one sort directive.
///
/// Null placement follows `nulls_first` independent of the direction; the
/// direction only reverses the order of present values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueComparator {
    directive: SortDirective,
}

impl ValueComparator {
    /// Creates a comparator for the directive.
    #[must_use]
    pub const fn new(directive: SortDirective) -> Self {
        Self { directive }
    }

    /// Returns the directive.
    #[must_use]
    pub const fn directive(&self) -> &SortDirective {
        &self.directive
    }

    /// Compares two values of the same type.
    pub fn compare<T: Sortable>(&self, left: &T, right: &T) -> PageBuilderResult<Ordering> {
        self.compare_dyn(left, right)
    }

    /// Compares two values of possibly different types.
    pub fn compare_dyn(&self, left: &dyn Sortable, right: &dyn Sortable) -> PageBuilderResult<Ordering> {
        let field = self.directive.field();
        let left = extract_value(left, field);
        let right = extract_value(right, field);
        let nulls_first = self.directive.nulls_first;

        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => {
                return Ok(if nulls_first { Ordering::Less } else { Ordering::Greater });
            }
            (false, true) => {
                return Ok(if nulls_first { Ordering::Greater } else { Ordering::Less });
            }
            (false, false) => natural_order(&left, &right, self.directive.ignore_case)
                .ok_or_else(|| PageBuilderError::incomparable(field, &left, &right))?,
        };

        Ok(if self.directive.ascending {
            ordering
        } else {
            ordering.reverse()
        })
    }
}
