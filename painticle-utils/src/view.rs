//! Read-only views over caller-owned buffers
//!
//! Host environments hand us flat `f32` buffers (three floats per element,
//! possibly with padding between elements). [`StridedView`] wraps such a
//! buffer without copying, and [`Vec3Source`] lets the batch kernels accept
//! either a view or a plain slice of [`Vec3`].

use glam::Vec3;

use crate::error::{Result, ViewError};

/// A read-only, indexable source of [`Vec3`] values
///
/// Implementations must be safe to read from many worker threads at once.
pub trait Vec3Source: Sync {
    /// Number of elements in the source
    fn len(&self) -> usize;

    /// Read the element at `index`
    ///
    /// Panics if `index` is out of range.
    fn vec3(&self, index: usize) -> Vec3;

    /// Check whether the source has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy all elements into a freshly allocated vector
    fn to_vec3s(&self) -> Vec<Vec3> {
        (0..self.len()).map(|i| self.vec3(i)).collect()
    }
}

impl Vec3Source for [Vec3] {
    #[inline]
    fn len(&self) -> usize {
        <[Vec3]>::len(self)
    }

    #[inline]
    fn vec3(&self, index: usize) -> Vec3 {
        self[index]
    }
}

impl Vec3Source for Vec<Vec3> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn vec3(&self, index: usize) -> Vec3 {
        self[index]
    }
}

impl Vec3Source for [[f32; 3]] {
    #[inline]
    fn len(&self) -> usize {
        <[[f32; 3]]>::len(self)
    }

    #[inline]
    fn vec3(&self, index: usize) -> Vec3 {
        Vec3::from_array(self[index])
    }
}

impl<S: Vec3Source + ?Sized> Vec3Source for &S {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn vec3(&self, index: usize) -> Vec3 {
        (**self).vec3(index)
    }
}

/// Non-owning view of 3-component elements inside a flat `f32` buffer
///
/// The stride is measured in floats and must be at least 3. Element `i`
/// occupies `data[i * stride..i * stride + 3]`.
#[derive(Debug, Clone, Copy)]
pub struct StridedView<'a> {
    data: &'a [f32],
    len: usize,
    stride: usize,
}

impl<'a> StridedView<'a> {
    /// Wrap a tightly packed buffer (`x0 y0 z0 x1 y1 z1 ...`)
    pub fn from_flat(data: &'a [f32]) -> Result<Self> {
        Self::from_flat_named("values", data)
    }

    /// Wrap a tightly packed buffer, naming it in the error message
    pub fn from_flat_named(what: &'static str, data: &'a [f32]) -> Result<Self> {
        if data.len() % 3 != 0 {
            return Err(ViewError::NotMultipleOfThree {
                what,
                len: data.len(),
            });
        }

        Ok(Self {
            data,
            len: data.len() / 3,
            stride: 3,
        })
    }

    /// Wrap `len` elements spaced `stride` floats apart
    pub fn with_stride(data: &'a [f32], len: usize, stride: usize) -> Result<Self> {
        if stride < 3 {
            return Err(ViewError::InvalidStride { stride });
        }

        if len > 0 {
            let needed = (len - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(3))
                .unwrap_or(usize::MAX);
            if needed > data.len() {
                return Err(ViewError::OutOfBounds {
                    len,
                    stride,
                    available: data.len(),
                });
            }
        }

        Ok(Self { data, len, stride })
    }

    /// Number of elements in the view
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the view has no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element stride in floats
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Read the element at `index`, if in range
    pub fn get(&self, index: usize) -> Option<Vec3> {
        (index < self.len).then(|| self.read(index))
    }

    /// Iterate over all elements in order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        (0..self.len).map(|i| self.read(i))
    }

    #[inline]
    fn read(&self, index: usize) -> Vec3 {
        let base = index * self.stride;
        Vec3::from_slice(&self.data[base..base + 3])
    }
}

impl Vec3Source for StridedView<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn vec3(&self, index: usize) -> Vec3 {
        assert!(
            index < self.len,
            "index {index} out of range for view of {}",
            self.len
        );
        self.read(index)
    }
}

/// Check that two paired buffers have the same length
pub fn ensure_same_len(
    left: &'static str,
    left_len: usize,
    right: &'static str,
    right_len: usize,
) -> Result<()> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(ViewError::LengthMismatch {
            left,
            left_len,
            right,
            right_len,
        })
    }
}
