//! Tensor views over linear containers.
//!
//! A view borrows a [`Container`] and a [`Layout`], and reinterprets the elements of the container as a tensor of
//! that layout. Two views are provided, following the shared/exclusive borrow split of Rust references:
//! - [`TensorView`] borrows its container immutably, it is `Copy` whenever its layout is, and many views may point to
//!     the same container.
//! - [`TensorViewMut`] borrows its container mutably, and allows writing elements through the view.
//!
//! The container length always equals the total number of elements of the layout: this is checked when the view is
//! created and when it is rebound to another container, and a view never holds a container that failed the check.
//!
//! ```rust
//! use tensor_view::shape::Dim2;
//! use tensor_view::{TensorView, TensorViewMut};
//!
//! let mut data = [0_i32; 6];
//! let mut matrix = TensorViewMut::<_, Dim2<2, 3>>::new(&mut data);
//! for col in 0..3 {
//!     for row in 0..2 {
//!         matrix[&[row, col]] = (10 * row + col) as i32;
//!     }
//! }
//! // columns are contiguous
//! assert_eq!(data, [0, 10, 1, 11, 2, 12]);
//!
//! let matrix = TensorView::<_, Dim2<2, 3>>::new(&data);
//! assert_eq!(matrix.get(&[1, 2]), Some(&12));
//! assert_eq!(matrix.get(&[2, 0]), None);
//! ```
//!
//! A view can only be rebound to a container of the same type:
//!
//! ```rust,compile_fail
//! use tensor_view::shape::Dim1;
//! use tensor_view::TensorView;
//!
//! let ints = [0_i32; 4];
//! let floats = [0.0_f32; 4];
//! let mut view = TensorView::<_, Dim1<4>>::new(&ints);
//! view.rebind(&floats);
//! ```
//!
//! Shapes with a zero extent are rejected at compile time:
//!
//! ```rust,compile_fail
//! use tensor_view::shape::Dim2;
//! use tensor_view::TensorView;
//!
//! let data: [u8; 0] = [];
//! let _ = TensorView::<_, Dim2<0, 3>>::new(&data);
//! ```

use std::ops::{Index, IndexMut};

use crate::shape::{Layout, Shape};
use crate::{offset, Container, Error, Result};

#[cfg(feature = "ndarray")]
mod array;
mod fmt;

/// Checks that a container of `len` elements can be viewed with the given layout.
fn check_len<L: Layout + ?Sized>(len: usize, layout: &L) -> Result<()> {
    let expected = layout.total_size();
    if len != expected {
        log::debug!(
            "rejecting container of {len} elements for shape {:?}, which requires {expected}",
            layout.extents()
        );
        return Err(Error::SizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// An immutable view of a linear container as a tensor.
///
/// The view borrows the container for the lifetime `'a` and holds the layout `L`. When `L` is a static
/// [`Shape`] the view is exactly as big as a reference, and all the shape computations are constants.
///
/// Elements are accessed with [`get`](Self::get), [`try_get`](Self::try_get) or by indexing with a reference to the
/// coordinates, `view[&[i, j, k]]`. Returned references point directly into the container.
pub struct TensorView<'a, C: Container + ?Sized, L: Layout> {
    data: &'a C,
    layout: L,
}
impl<'a, C: Container + ?Sized, S: Shape> TensorView<'a, C, S> {
    /// Create a new view of a container with a static shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the length of the container is not the total number of elements of the
    /// shape.
    pub fn try_new(data: &'a C) -> Result<Self> {
        Self::try_with_layout(data, S::default())
    }

    /// Create a new view of a container with a static shape.
    ///
    /// # Panics
    ///
    /// If the length of the container is not the total number of elements of the shape.
    #[track_caller]
    pub fn new(data: &'a C) -> Self {
        Self::with_layout(data, S::default())
    }
}
impl<'a, C: Container + ?Sized, L: Layout> TensorView<'a, C, L> {
    /// Create a new view of a container with the given layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the length of the container is not the total number of elements of the
    /// layout.
    pub fn try_with_layout(data: &'a C, layout: L) -> Result<Self> {
        check_len(data.len(), &layout)?;
        Ok(Self { data, layout })
    }

    /// Create a new view of a container with the given layout.
    ///
    /// # Panics
    ///
    /// If the length of the container is not the total number of elements of the layout.
    #[track_caller]
    pub fn with_layout(data: &'a C, layout: L) -> Self {
        match Self::try_with_layout(data, layout) {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Get a reference to the element at the given coordinates.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, coords: &L::Coords) -> Option<&'a C::Elem> {
        self.try_get(coords).ok()
    }

    /// Get a reference to the element at the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankMismatch`] if the number of coordinates is not the rank of the layout (only possible with
    /// runtime layouts), and [`Error::IndexOutOfBounds`] if any coordinate is not smaller than the extent of its axis.
    pub fn try_get(&self, coords: &L::Coords) -> Result<&'a C::Elem> {
        let offset = self.layout.offset_of(coords)?;
        let data: &'a [C::Elem] = self.data.as_slice();
        data.get(offset).ok_or(Error::OffsetOutOfBounds {
            offset,
            len: data.len(),
        })
    }

    /// Get a reference to the element at the given coordinates, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that there is exactly one coordinate per axis, that each coordinate is smaller than the
    /// extent of its axis, and that the container was not shrunk through [`TensorViewMut::container_mut`] before the
    /// view was obtained from a mutable one.
    pub unsafe fn get_unchecked(&self, coords: &L::Coords) -> &'a C::Elem {
        let offset = offset::coordinate_to_offset(self.layout.strides(), coords.as_ref());
        let data: &'a [C::Elem] = self.data.as_slice();
        unsafe { data.get_unchecked(offset) }
    }

    /// Bind the view to another container of the same type, keeping the layout.
    ///
    /// On success, returns the previously bound container. If the length of the new container does not match the
    /// layout, the view is left untouched and the rejected container is returned as the error.
    pub fn try_rebind(&mut self, data: &'a C) -> std::result::Result<&'a C, &'a C> {
        if check_len(data.len(), &self.layout).is_err() {
            return Err(data);
        }
        log::trace!("rebinding view of shape {:?}", self.layout.extents());
        Ok(std::mem::replace(&mut self.data, data))
    }

    /// Bind the view to another container of the same type, keeping the layout.
    ///
    /// Returns the previously bound container.
    ///
    /// # Panics
    ///
    /// If the length of the new container is not the total number of elements of the layout.
    #[track_caller]
    pub fn rebind(&mut self, data: &'a C) -> &'a C {
        if let Err(err) = check_len(data.len(), &self.layout) {
            panic!("{err}");
        }
        log::trace!("rebinding view of shape {:?}", self.layout.extents());
        std::mem::replace(&mut self.data, data)
    }

    /// Get the bound container.
    pub fn container(&self) -> &'a C {
        self.data
    }

    /// Get the elements of the bound container as a slice.
    pub fn as_slice(&self) -> &'a [C::Elem] {
        self.data.as_slice()
    }

    /// Consume the view and return the bound container.
    pub fn into_container(self) -> &'a C {
        self.data
    }

    /// Get the layout of the view.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Get the number of axes of the view.
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Get the extent of each axis.
    pub fn extents(&self) -> &[usize] {
        self.layout.extents()
    }

    /// Get the stride of each axis, in number of elements.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Get the total number of elements of the view.
    pub fn len(&self) -> usize {
        self.layout.total_size()
    }

    /// Returns `true` if the view has no elements.
    ///
    /// Never the case for [`Shape`] and [`DynShape`](crate::shape::DynShape) layouts, whose extents are positive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the offset in the container of the element at the given coordinates.
    ///
    /// # Errors
    ///
    /// See [`try_get`](Self::try_get).
    pub fn offset_of(&self, coords: &L::Coords) -> Result<usize> {
        self.layout.offset_of(coords)
    }

    /// Get the coordinates of the element at the given offset in the container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetOutOfBounds`] if the offset is not smaller than [`len`](Self::len).
    pub fn coordinate_of(&self, offset: usize) -> Result<L::OwnedCoords> {
        self.layout.coordinate_of(offset)
    }
}
impl<C: Container + ?Sized, L: Layout + Clone> Clone for TensorView<'_, C, L> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            layout: self.layout.clone(),
        }
    }
}
impl<C: Container + ?Sized, L: Layout + Copy> Copy for TensorView<'_, C, L> {}
impl<C: Container + ?Sized, L: Layout> Index<&L::Coords> for TensorView<'_, C, L> {
    type Output = C::Elem;

    #[track_caller]
    fn index(&self, coords: &L::Coords) -> &Self::Output {
        match self.try_get(coords) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}

/// A mutable view of a linear container as a tensor.
///
/// This is similar to [`TensorView`], but borrows the container mutably and allows writing elements through
/// [`get_mut`](Self::get_mut), [`try_get_mut`](Self::try_get_mut) or by indexing, `view[&[i, j, k]] = value`. See
/// the immutable view for more details.
pub struct TensorViewMut<'a, C: Container + ?Sized, L: Layout> {
    data: &'a mut C,
    layout: L,
}
impl<'a, C: Container + ?Sized, S: Shape> TensorViewMut<'a, C, S> {
    /// Create a new mutable view of a container with a static shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the length of the container is not the total number of elements of the
    /// shape.
    pub fn try_new(data: &'a mut C) -> Result<Self> {
        Self::try_with_layout(data, S::default())
    }

    /// Create a new mutable view of a container with a static shape.
    ///
    /// # Panics
    ///
    /// If the length of the container is not the total number of elements of the shape.
    #[track_caller]
    pub fn new(data: &'a mut C) -> Self {
        Self::with_layout(data, S::default())
    }
}
impl<'a, C: Container + ?Sized, L: Layout> TensorViewMut<'a, C, L> {
    /// Create a new mutable view of a container with the given layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if the length of the container is not the total number of elements of the
    /// layout.
    pub fn try_with_layout(data: &'a mut C, layout: L) -> Result<Self> {
        check_len(data.len(), &layout)?;
        Ok(Self { data, layout })
    }

    /// Create a new mutable view of a container with the given layout.
    ///
    /// # Panics
    ///
    /// If the length of the container is not the total number of elements of the layout.
    #[track_caller]
    pub fn with_layout(data: &'a mut C, layout: L) -> Self {
        match Self::try_with_layout(data, layout) {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Get a reference to the element at the given coordinates.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, coords: &L::Coords) -> Option<&C::Elem> {
        self.try_get(coords).ok()
    }

    /// Get a reference to the element at the given coordinates.
    ///
    /// # Errors
    ///
    /// See [`TensorView::try_get`].
    pub fn try_get(&self, coords: &L::Coords) -> Result<&C::Elem> {
        let offset = self.layout.offset_of(coords)?;
        let data = self.data.as_slice();
        data.get(offset).ok_or(Error::OffsetOutOfBounds {
            offset,
            len: data.len(),
        })
    }

    /// Get a reference to the element at the given coordinates, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that there is exactly one coordinate per axis, that each coordinate is smaller than the
    /// extent of its axis, and that the container was not shrunk through [`container_mut`](Self::container_mut).
    pub unsafe fn get_unchecked(&self, coords: &L::Coords) -> &C::Elem {
        let offset = offset::coordinate_to_offset(self.layout.strides(), coords.as_ref());
        unsafe { self.data.as_slice().get_unchecked(offset) }
    }

    /// Get a mutable reference to the element at the given coordinates.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get_mut(&mut self, coords: &L::Coords) -> Option<&mut C::Elem> {
        self.try_get_mut(coords).ok()
    }

    /// Get a mutable reference to the element at the given coordinates.
    ///
    /// # Errors
    ///
    /// See [`TensorView::try_get`].
    pub fn try_get_mut(&mut self, coords: &L::Coords) -> Result<&mut C::Elem> {
        let offset = self.layout.offset_of(coords)?;
        let data = self.data.as_mut_slice();
        let len = data.len();
        data.get_mut(offset)
            .ok_or(Error::OffsetOutOfBounds { offset, len })
    }

    /// Get a mutable reference to the element at the given coordinates, without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that there is exactly one coordinate per axis, that each coordinate is smaller than the
    /// extent of its axis, and that the container was not shrunk through [`container_mut`](Self::container_mut).
    pub unsafe fn get_unchecked_mut(&mut self, coords: &L::Coords) -> &mut C::Elem {
        let offset = offset::coordinate_to_offset(self.layout.strides(), coords.as_ref());
        unsafe { self.data.as_mut_slice().get_unchecked_mut(offset) }
    }

    /// Bind the view to another container of the same type, keeping the layout.
    ///
    /// On success, returns the previously bound container. If the length of the new container does not match the
    /// layout, the view is left untouched and the rejected container is returned as the error.
    pub fn try_rebind(&mut self, data: &'a mut C) -> std::result::Result<&'a mut C, &'a mut C> {
        if check_len(data.len(), &self.layout).is_err() {
            return Err(data);
        }
        log::trace!("rebinding mutable view of shape {:?}", self.layout.extents());
        Ok(std::mem::replace(&mut self.data, data))
    }

    /// Bind the view to another container of the same type, keeping the layout.
    ///
    /// Returns the previously bound container.
    ///
    /// # Panics
    ///
    /// If the length of the new container is not the total number of elements of the layout.
    #[track_caller]
    pub fn rebind(&mut self, data: &'a mut C) -> &'a mut C {
        if let Err(err) = check_len(data.len(), &self.layout) {
            panic!("{err}");
        }
        log::trace!("rebinding mutable view of shape {:?}", self.layout.extents());
        std::mem::replace(&mut self.data, data)
    }

    /// Get the bound container.
    pub fn container(&self) -> &C {
        &*self.data
    }

    /// Get the bound container, mutably.
    ///
    /// Changes made to the container are visible through the view. A container that can grow or shrink, such as a
    /// `Vec`, should keep its length: the checked accessors of a view whose container no longer holds
    /// [`len`](Self::len) elements fail with [`Error::OffsetOutOfBounds`] for coordinates past its end.
    pub fn container_mut(&mut self) -> &mut C {
        &mut *self.data
    }

    /// Get the elements of the bound container as a slice.
    pub fn as_slice(&self) -> &[C::Elem] {
        self.data.as_slice()
    }

    /// Get the elements of the bound container as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [C::Elem] {
        self.data.as_mut_slice()
    }

    /// Consume the view and return the bound container.
    pub fn into_container(self) -> &'a mut C {
        self.data
    }

    /// Get an immutable view of the same container.
    pub fn as_view(&self) -> TensorView<'_, C, L>
    where
        L: Clone,
    {
        TensorView {
            data: &*self.data,
            layout: self.layout.clone(),
        }
    }

    /// Get a mutable view of the same container with a shorter lifetime.
    pub fn reborrow(&mut self) -> TensorViewMut<'_, C, L>
    where
        L: Clone,
    {
        TensorViewMut {
            data: &mut *self.data,
            layout: self.layout.clone(),
        }
    }

    /// Convert this view into an immutable view of the same container.
    pub fn into_view(self) -> TensorView<'a, C, L> {
        TensorView {
            data: self.data,
            layout: self.layout,
        }
    }

    /// Get the layout of the view.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Get the number of axes of the view.
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Get the extent of each axis.
    pub fn extents(&self) -> &[usize] {
        self.layout.extents()
    }

    /// Get the stride of each axis, in number of elements.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Get the total number of elements of the view.
    pub fn len(&self) -> usize {
        self.layout.total_size()
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the offset in the container of the element at the given coordinates.
    ///
    /// # Errors
    ///
    /// See [`TensorView::try_get`].
    pub fn offset_of(&self, coords: &L::Coords) -> Result<usize> {
        self.layout.offset_of(coords)
    }

    /// Get the coordinates of the element at the given offset in the container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OffsetOutOfBounds`] if the offset is not smaller than [`len`](Self::len).
    pub fn coordinate_of(&self, offset: usize) -> Result<L::OwnedCoords> {
        self.layout.coordinate_of(offset)
    }
}
impl<C: Container + ?Sized, L: Layout> Index<&L::Coords> for TensorViewMut<'_, C, L> {
    type Output = C::Elem;

    #[track_caller]
    fn index(&self, coords: &L::Coords) -> &Self::Output {
        match self.try_get(coords) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}
impl<C: Container + ?Sized, L: Layout> IndexMut<&L::Coords> for TensorViewMut<'_, C, L> {
    #[track_caller]
    fn index_mut(&mut self, coords: &L::Coords) -> &mut Self::Output {
        match self.try_get_mut(coords) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}
impl<'a, C: Container + ?Sized, L: Layout> From<TensorViewMut<'a, C, L>> for TensorView<'a, C, L> {
    fn from(view: TensorViewMut<'a, C, L>) -> Self {
        view.into_view()
    }
}
