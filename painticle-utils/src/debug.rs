//! Trimmed `Debug` output for large buffers
//!
//! Particle fields and grid tables routinely hold millions of entries. Use
//! [`trimmed_collection_fmt`] with `custom_debug`'s `#[debug(with = ...)]` so
//! that `{:?}` prints the first few elements and a count of the rest.

use std::fmt;

const FIRST_N_ELEMENTS: usize = 3;

/// Collections that can show a short preview of their leading elements
pub trait Preview {
    type Item: fmt::Debug;

    fn total_len(&self) -> usize;
    fn head(&self, elements: usize) -> &[Self::Item];
}

impl<T: fmt::Debug> Preview for [T] {
    type Item = T;

    fn total_len(&self) -> usize {
        self.len()
    }

    fn head(&self, elements: usize) -> &[T] {
        &self[..elements.min(self.len())]
    }
}

impl<T: fmt::Debug> Preview for Vec<T> {
    type Item = T;

    fn total_len(&self) -> usize {
        self.len()
    }

    fn head(&self, elements: usize) -> &[T] {
        self.as_slice().head(elements)
    }
}

#[cfg(not(feature = "debug-print-all"))]
pub fn trimmed_collection_fmt<T: Preview + ?Sized>(
    n: &T,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let head = n.head(FIRST_N_ELEMENTS);
    let remaining = n.total_len() - head.len();

    if remaining == 0 {
        write!(f, "{:?}", head)
    } else {
        write!(f, "{:?} + {} elements", head, remaining)
    }
}

#[cfg(feature = "debug-print-all")]
pub fn trimmed_collection_fmt<T: Preview + ?Sized>(
    n: &T,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{:?}", n.head(n.total_len()))
}

/// Borrowing wrapper whose `Debug` output is trimmed
///
/// For manual `Debug` impls that cannot use the derive attribute.
pub struct Trimmed<'a, T: ?Sized>(pub &'a T);

impl<T: Preview + ?Sized> fmt::Debug for Trimmed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        trimmed_collection_fmt(self.0, f)
    }
}
