//! Single particle attribute columns

use std::fmt;
use std::ops::Index;

use glam::{Vec2, Vec3};
use painticle_utils::debug::Trimmed;

use crate::error::{ParticleError, Result};

/// Element types a [`ParticleField`] can hold
///
/// Every element is a fixed number of `f32` components, which is how hosts
/// exchange field data as flat buffers.
pub trait FieldElement: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Number of `f32` components per element
    const COMPONENTS: usize;

    /// Read one element from exactly `COMPONENTS` floats
    fn from_components(values: &[f32]) -> Self;

    /// Write one element into exactly `COMPONENTS` floats
    fn write_components(&self, out: &mut [f32]);
}

impl FieldElement for f32 {
    const COMPONENTS: usize = 1;

    #[inline]
    fn from_components(values: &[f32]) -> Self {
        values[0]
    }

    #[inline]
    fn write_components(&self, out: &mut [f32]) {
        out[0] = *self;
    }
}

impl FieldElement for Vec2 {
    const COMPONENTS: usize = 2;

    #[inline]
    fn from_components(values: &[f32]) -> Self {
        Self::from_slice(values)
    }

    #[inline]
    fn write_components(&self, out: &mut [f32]) {
        self.write_to_slice(out);
    }
}

impl FieldElement for Vec3 {
    const COMPONENTS: usize = 3;

    #[inline]
    fn from_components(values: &[f32]) -> Self {
        Self::from_slice(values)
    }

    #[inline]
    fn write_components(&self, out: &mut [f32]) {
        self.write_to_slice(out);
    }
}

/// Name, element layout and length of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    /// Bytes per element
    pub element_size: usize,
    /// `f32` components per element
    pub components: usize,
    pub len: usize,
}

/// One densely packed attribute of all particles
///
/// The values of a field can be read and overwritten freely, but its length
/// only changes through the owning
/// [`ParticleData`](crate::ParticleData), which keeps all fields the same
/// length.
#[derive(Clone, PartialEq)]
pub struct ParticleField<T: FieldElement> {
    name: &'static str,
    data: Vec<T>,
}

impl<T: FieldElement> ParticleField<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            data: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size of one element in bytes
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn info(&self) -> FieldInfo {
        FieldInfo {
            name: self.name,
            element_size: self.element_size(),
            components: T::COMPONENTS,
            len: self.len(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the values; the length stays fixed
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Overwrite all values; `values` must have exactly `len()` elements
    pub fn assign(&mut self, values: &[T]) -> Result<()> {
        self.check_len(values.len())?;
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Set every value to `value`
    pub fn assign_constant(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite all values from a flat buffer of `len() * COMPONENTS` floats
    pub fn assign_flat(&mut self, values: &[f32]) -> Result<()> {
        self.check_flat_len(values.len())?;
        for (element, chunk) in self.data.iter_mut().zip(values.chunks_exact(T::COMPONENTS)) {
            *element = T::from_components(chunk);
        }
        Ok(())
    }

    /// Copy all values into a flat buffer of `len() * COMPONENTS` floats
    pub fn copy_to_flat(&self, out: &mut [f32]) -> Result<()> {
        self.check_flat_len(out.len())?;
        for (element, chunk) in self.data.iter().zip(out.chunks_exact_mut(T::COMPONENTS)) {
            element.write_components(chunk);
        }
        Ok(())
    }

    /// All values as a freshly allocated flat buffer
    pub fn to_flat(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.len() * T::COMPONENTS];
        for (element, chunk) in self.data.iter().zip(out.chunks_exact_mut(T::COMPONENTS)) {
            element.write_components(chunk);
        }
        out
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual == self.len() {
            Ok(())
        } else {
            Err(ParticleError::FieldLength {
                field: self.name,
                expected: self.len(),
                actual,
            })
        }
    }

    fn check_flat_len(&self, actual: usize) -> Result<()> {
        let expected = self.len() * T::COMPONENTS;
        if actual == expected {
            Ok(())
        } else {
            Err(ParticleError::FieldLength {
                field: self.name,
                expected,
                actual,
            })
        }
    }

    pub(crate) fn reserve(&mut self, capacity: usize) {
        self.data.reserve(capacity.saturating_sub(self.data.len()));
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.data.resize(len, T::default());
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    pub(crate) fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub(crate) fn append(&mut self, other: &Self) {
        self.data.extend_from_slice(&other.data);
    }

    /// Move the last element into `index` and shrink by one
    pub(crate) fn swap_remove(&mut self, index: usize) {
        self.data.swap_remove(index);
    }
}

impl<T: FieldElement> Index<usize> for ParticleField<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: FieldElement> fmt::Debug for ParticleField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleField")
            .field("name", &self.name)
            .field("data", &Trimmed(&self.data))
            .finish()
    }
}

impl<'a, T: FieldElement> IntoIterator for &'a ParticleField<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
