//! Linear containers that can be viewed as tensors.

/// A contiguous, indexable sequence of elements.
///
/// A view borrows a container and reinterprets its elements as a tensor. The container decides nothing about the
/// layout; it only exposes its elements as a slice, and reports its length so a view can check it against the total
/// number of elements of its shape.
///
/// Implemented for slices, arrays and, with the `alloc` feature, for `Vec` and boxed slices.
///
/// # Safety
///
/// The unchecked accessors of the views trust the length checked at binding. `as_slice` and `as_mut_slice` must
/// return slices of `len()` elements, and that length may only change through a mutable borrow of the container.
pub unsafe trait Container {
    /// The element type.
    type Elem;

    /// Returns the elements as a slice.
    fn as_slice(&self) -> &[Self::Elem];

    /// Returns the elements as a mutable slice.
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Returns the number of elements.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// SAFETY: the slice itself.
unsafe impl<T> Container for [T] {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

// SAFETY: the array itself, always `N` elements.
unsafe impl<T, const N: usize> Container for [T; N] {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn len(&self) -> usize {
        N
    }
}

#[cfg(feature = "alloc")]
// SAFETY: `Vec::len` is the length of its slice; resizing takes `&mut self`.
unsafe impl<T> Container for crate::alloc::Vec<T> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn len(&self) -> usize {
        crate::alloc::Vec::len(self)
    }
}

#[cfg(feature = "alloc")]
// SAFETY: the boxed slice itself.
unsafe impl<T> Container for crate::alloc::Box<[T]> {
    type Elem = T;

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}
