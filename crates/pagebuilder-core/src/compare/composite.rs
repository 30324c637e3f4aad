//! Comparator builder and composite comparator.

use super::value::{Sortable, ValueComparator};
use crate::{PageBuilderResult, SortDirective};
use std::cmp::Ordering;
use std::fmt;

/// A fallible comparator over `T`.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> PageBuilderResult<Ordering> + Send + Sync>;

/// Maps a sort directive to a comparator.
///
/// Closures of type `Fn(&SortDirective) -> Comparator<T>` are factories, which
/// lets callers special-case fields and fall back to [`ValueComparatorFactory`]:
///
/// ```rust
/// use pagebuilder_core::{ordering, Comparator, ComparatorFactory, SortDirective, ValueComparatorFactory};
///
/// let factory = |directive: &SortDirective| -> Comparator<String> {
///     if directive.field() == Some("length") {
///         ordering(|a: &String, b: &String| a.len().cmp(&b.len()))
///     } else {
///         ValueComparatorFactory.comparator(directive)
///     }
/// };
/// let by_length = factory.comparator(&SortDirective::by("length"));
/// assert!(by_length(&"ab".to_string(), &"a".to_string()).unwrap().is_gt());
/// ```
pub trait ComparatorFactory<T>: Send + Sync {
    /// Returns the comparator for one directive.
    fn comparator(&self, directive: &SortDirective) -> Comparator<T>;
}

impl<T, F> ComparatorFactory<T> for F
where
    F: Fn(&SortDirective) -> Comparator<T> + Send + Sync,
{
    fn comparator(&self, directive: &SortDirective) -> Comparator<T> {
        self(directive)
    }
}

/// Factory producing a [`ValueComparator`] per directive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueComparatorFactory;

impl<T: Sortable + 'static> ComparatorFactory<T> for ValueComparatorFactory {
    fn comparator(&self, directive: &SortDirective) -> Comparator<T> {
        let comparator = ValueComparator::new(directive.clone());
        Box::new(move |left: &T, right: &T| comparator.compare(left, right))
    }
}

/// Wraps an infallible ordering function as a [`Comparator`].
pub fn ordering<T, F>(compare: F) -> Comparator<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    T: 'static,
{
    Box::new(move |left: &T, right: &T| Ok(compare(left, right)))
}

/// Collects comparators, primary key first.
pub struct ComparatorBuilder<T> {
    comparators: Vec<Comparator<T>>,
}

impl<T> ComparatorBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { comparators: Vec::new() }
    }

    /// Appends a comparator as the next tie-break.
    #[must_use]
    pub fn add(mut self, comparator: Comparator<T>) -> Self {
        self.comparators.push(comparator);
        self
    }

    /// Appends one comparator per directive, created by the factory.
    #[must_use]
    pub fn add_all<'d, F>(mut self, directives: impl IntoIterator<Item = &'d SortDirective>, factory: &F) -> Self
    where
        F: ComparatorFactory<T> + ?Sized,
    {
        self.comparators
            .extend(directives.into_iter().map(|directive| factory.comparator(directive)));
        self
    }

    /// Finishes the composite comparator.
    #[must_use]
    pub fn build(self) -> CompositeComparator<T> {
        CompositeComparator {
            comparators: self.comparators,
        }
    }
}

impl<T> Default for ComparatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lexicographic chain of comparators: the first non-equal result wins.
///
/// Without comparators every pair of elements is equal.
pub struct CompositeComparator<T> {
    comparators: Vec<Comparator<T>>,
}

impl<T> CompositeComparator<T> {
    /// Compares two elements.
    pub fn compare(&self, left: &T, right: &T) -> PageBuilderResult<Ordering> {
        for comparator in &self.comparators {
            let ordering = comparator(left, right)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(Ordering::Equal)
    }

    /// Number of chained comparators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Returns true if no comparator is chained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Sorts the elements stably; the first comparison error aborts the sort.
    pub fn sort(&self, items: &mut Vec<T>) -> PageBuilderResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        try_sort_by(items, |left, right| self.compare(left, right))
    }
}

impl<T> fmt::Debug for CompositeComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeComparator")
            .field("comparators", &self.comparators.len())
            .finish()
    }
}

/// Stable bottom-up merge sort with a fallible comparison.
///
/// The elements are only moved once the whole order is known, so an error
/// leaves `items` untouched.
pub fn try_sort_by<T, E, F>(items: &mut Vec<T>, mut compare: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged = vec![0; len];

    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let middle = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut slot) = (start, middle, start);
            while left < middle && right < end {
                if compare(&items[order[right]], &items[order[left]])? == Ordering::Less {
                    merged[slot] = order[right];
                    right += 1;
                } else {
                    merged[slot] = order[left];
                    left += 1;
                }
                slot += 1;
            }
            merged[slot..slot + (middle - left)].copy_from_slice(&order[left..middle]);
            slot += middle - left;
            merged[slot..slot + (end - right)].copy_from_slice(&order[right..end]);
            start = end;
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.into_iter().filter_map(|index| slots[index].take()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageBuilderError;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        group: i32,
        name: &'static str,
    }

    impl Sortable for Entry {
        fn property(&self, name: &str) -> Option<crate::SortValue<'_>> {
            match name {
                "group" => Some(crate::SortValue::of(&self.group)),
                "name" => Some(crate::SortValue::of(self.name)),
                _ => None,
            }
        }
    }

    fn entry(group: i32, name: &'static str) -> Entry {
        Entry { group, name }
    }

    #[test]
    fn test_empty_builder_treats_all_equal() {
        let comparator = ComparatorBuilder::<i32>::new().build();
        assert!(comparator.is_empty());
        assert_eq!(comparator.compare(&1, &2).unwrap(), Ordering::Equal);

        let mut items = vec![3, 1, 2];
        comparator.sort(&mut items).unwrap();
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn test_tie_breaks_in_order() {
        let directives = [SortDirective::by("group"), SortDirective::by("name").descending()];
        let comparator = ComparatorBuilder::new()
            .add_all(&directives, &ValueComparatorFactory)
            .build();
        assert_eq!(comparator.len(), 2);

        let mut items = vec![entry(2, "a"), entry(1, "a"), entry(1, "b"), entry(2, "c")];
        comparator.sort(&mut items).unwrap();
        assert_eq!(
            items,
            vec![entry(1, "b"), entry(1, "a"), entry(2, "c"), entry(2, "a")]
        );
    }

    #[test]
    fn test_custom_comparator_first() {
        let comparator = ComparatorBuilder::new()
            .add(ordering(|a: &i32, b: &i32| (a % 2).cmp(&(b % 2))))
            .add_all([&SortDirective::natural()], &ValueComparatorFactory)
            .build();
        let mut items = vec![5, 2, 3, 4, 1];
        comparator.sort(&mut items).unwrap();
        assert_eq!(items, vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_try_sort_by_is_stable() {
        let mut items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        try_sort_by::<_, (), _>(&mut items, |a, b| Ok(a.0.cmp(&b.0))).unwrap();
        assert_eq!(items, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (1, 'e')]);
    }

    #[test]
    fn test_try_sort_by_matches_std_sort() {
        let mut items: Vec<i32> = (0..100).map(|i| (i * 37) % 101 - 50).collect();
        let mut expected = items.clone();
        expected.sort_unstable();
        try_sort_by::<_, (), _>(&mut items, |a, b| Ok(a.cmp(b))).unwrap();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_error_aborts_and_keeps_order() {
        let comparator = ComparatorBuilder::new()
            .add_all([&SortDirective::natural()], &ValueComparatorFactory)
            .build();
        let mut items: Vec<Box<dyn Sortable + Send + Sync>> = vec![Box::new(2), Box::new("x"), Box::new(1)];
        let result = comparator.sort(&mut items);
        assert!(matches!(result, Err(PageBuilderError::IncomparableValues { .. })));
        assert_eq!(items.len(), 3);
    }
}
