use std::fmt::{Debug, Formatter, Result};

use super::{TensorView, TensorViewMut};
use crate::{Container, Layout};

fn fmt_struct<T: Debug>(extents: &[usize], strides: &[usize], data: &[T], f: &mut Formatter) -> Result {
    f.debug_struct("Tensor")
        .field("extents", &extents)
        .field("strides", &strides)
        .field("data", &data)
        .finish()
}

cfg_if::cfg_if! { if #[cfg(feature = "ndarray")] {
    fn fmt_view<L: Layout + ?Sized, T: Debug>(layout: &L, data: &[T], f: &mut Formatter) -> Result {
        use super::array::array_view;

        let (extents, strides) = (layout.extents(), layout.strides());
        // container shrunk through `container_mut`
        if data.len() < layout.total_size() {
            return fmt_struct(extents, strides, data, f);
        }
        match extents.len() {
            0 => Debug::fmt(&array_view::<T, ndarray::Ix0>(extents, strides, data), f),
            1 => Debug::fmt(&array_view::<T, ndarray::Ix1>(extents, strides, data), f),
            2 => Debug::fmt(&array_view::<T, ndarray::Ix2>(extents, strides, data), f),
            3 => Debug::fmt(&array_view::<T, ndarray::Ix3>(extents, strides, data), f),
            4 => Debug::fmt(&array_view::<T, ndarray::Ix4>(extents, strides, data), f),
            5 => Debug::fmt(&array_view::<T, ndarray::Ix5>(extents, strides, data), f),
            6 => Debug::fmt(&array_view::<T, ndarray::Ix6>(extents, strides, data), f),
            _ => {
                cfg_if::cfg_if! { if #[cfg(feature = "alloc")] {
                    Debug::fmt(&array_view::<T, ndarray::IxDyn>(extents, strides, data), f)
                } else {
                    write!(
                        f,
                        "[unsupported (too many dimensions) ...], shape={extents:?}, strides={strides:?}",
                    )
                } }
            }
        }
    }
} else {
    fn fmt_view<L: Layout + ?Sized, T: Debug>(layout: &L, data: &[T], f: &mut Formatter) -> Result {
        fmt_struct(layout.extents(), layout.strides(), data, f)
    }
} }

impl<C: Container + ?Sized, L: Layout> Debug for TensorView<'_, C, L>
where
    C::Elem: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_view(self.layout(), self.as_slice(), f)
    }
}

impl<C: Container + ?Sized, L: Layout> Debug for TensorViewMut<'_, C, L>
where
    C::Elem: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        fmt_view(self.layout(), self.as_slice(), f)
    }
}
