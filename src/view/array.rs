use ndarray::{ArrayView, ArrayViewMut, Dimension, ShapeBuilder, StrideShape};

use super::{TensorView, TensorViewMut};
use crate::{Container, Layout};

/// Builds the ndarray shape of a layout, with its strides.
///
/// # Panics
///
/// If the rank does not match the number of dimensions of `Dim`.
#[track_caller]
fn stride_shape<Dim: Dimension>(extents: &[usize], strides: &[usize]) -> StrideShape<Dim> {
    let ndim = extents.len();
    if let Some(arr_ndim) = Dim::NDIM {
        assert_eq!(ndim, arr_ndim, "Dimension mismatch: {ndim} != {arr_ndim}");
    }
    let mut dim = Dim::zeros(ndim);
    let mut dim_strides = Dim::zeros(ndim);
    for (i, (&extent, &stride)) in extents.iter().zip(strides).enumerate() {
        dim[i] = extent;
        dim_strides[i] = stride;
    }
    dim.strides(dim_strides)
}

#[track_caller]
pub(super) fn array_view<'a, T, Dim: Dimension>(
    extents: &[usize],
    strides: &[usize],
    data: &'a [T],
) -> ArrayView<'a, T, Dim> {
    match ArrayView::from_shape(stride_shape(extents, strides), data) {
        Ok(array) => array,
        // only if the container was shrunk after binding
        Err(err) => panic!("layout does not fit its container: {err}"),
    }
}

#[track_caller]
fn array_view_mut<'a, T, Dim: Dimension>(
    extents: &[usize],
    strides: &[usize],
    data: &'a mut [T],
) -> ArrayViewMut<'a, T, Dim> {
    match ArrayViewMut::from_shape(stride_shape(extents, strides), data) {
        Ok(array) => array,
        Err(err) => panic!("layout does not fit its container: {err}"),
    }
}

impl<'a, C: Container + ?Sized, L: Layout> TensorView<'a, C, L> {
    /// Get an array view of the tensor.
    ///
    /// The array shares the container of the view, with the same (first-axis-fastest) strides.
    ///
    /// # Panics
    ///
    /// If the rank of the view does not match the number of dimensions of the type `Dim`.
    #[track_caller]
    pub fn as_array<Dim: Dimension>(&self) -> ArrayView<'a, C::Elem, Dim> {
        array_view(self.layout.extents(), self.layout.strides(), self.data.as_slice())
    }

    /// Get an array view of the tensor with dynamic number of dimensions.
    #[cfg(feature = "alloc")]
    pub fn as_array_dyn(&self) -> ArrayView<'a, C::Elem, ndarray::IxDyn> {
        self.as_array()
    }
}

impl<'a, C: Container + ?Sized, L: Layout> TensorViewMut<'a, C, L> {
    /// Get an array view of the tensor.
    ///
    /// # Panics
    ///
    /// If the rank of the view does not match the number of dimensions of the type `Dim`.
    #[track_caller]
    pub fn as_array<Dim: Dimension>(&self) -> ArrayView<'_, C::Elem, Dim> {
        array_view(self.layout.extents(), self.layout.strides(), self.data.as_slice())
    }

    /// Get an array view of the tensor with dynamic number of dimensions.
    #[cfg(feature = "alloc")]
    pub fn as_array_dyn(&self) -> ArrayView<'_, C::Elem, ndarray::IxDyn> {
        self.as_array()
    }

    /// Get a mutable array view of the tensor.
    ///
    /// # Panics
    ///
    /// If the rank of the view does not match the number of dimensions of the type `Dim`.
    #[track_caller]
    pub fn as_array_mut<Dim: Dimension>(&mut self) -> ArrayViewMut<'_, C::Elem, Dim> {
        array_view_mut(self.layout.extents(), self.layout.strides(), self.data.as_mut_slice())
    }

    /// Get a mutable array view of the tensor with dynamic number of dimensions.
    #[cfg(feature = "alloc")]
    pub fn as_array_mut_dyn(&mut self) -> ArrayViewMut<'_, C::Elem, ndarray::IxDyn> {
        self.as_array_mut()
    }

    /// Convert the view into a mutable array view of the same container.
    ///
    /// # Panics
    ///
    /// If the rank of the view does not match the number of dimensions of the type `Dim`.
    #[track_caller]
    pub fn into_array_mut<Dim: Dimension>(self) -> ArrayViewMut<'a, C::Elem, Dim> {
        let Self { data, layout } = self;
        array_view_mut(layout.extents(), layout.strides(), data.as_mut_slice())
    }
}
