//! Comparing values by sort directive.
//!
//! [`ValueComparator`] applies a single [`SortDirective`](crate::SortDirective)
//! to two values. [`ComparatorBuilder`] chains several of them into a
//! [`CompositeComparator`].

mod composite;
mod value;

pub use composite::{
    ordering, try_sort_by, Comparator, ComparatorBuilder, ComparatorFactory, CompositeComparator,
    ValueComparatorFactory,
};
pub use value::{extract_value, natural_order, SortValue, Sortable, ValueComparator};
