//! Shapes and their stride tables.
//!
//! A shape is an ordered list of per-axis extents. Its stride table is derived with the first declared axis varying
//! fastest (column-major, Fortran order):
//! - `stride(0) = 1`
//! - `stride(i) = stride(i - 1) * extent(i - 1)`
//! - `total_size = extent(0) * extent(1) * ... * extent(n - 1)`
//!
//! Two kinds of shapes are provided:
//! - Static shapes implement [`Shape`], whose extents, strides and total size are associated constants computed at
//!     compile time. Use the generic [`Dim0`] ... [`Dim6`] types, or declare a named shape of any rank with the
//!     [`shape!`](crate::shape!) macro.
//! - [`DynShape`] holds its extents at runtime, and computes the stride table once when created. Requires the
//!     `alloc` feature.
//!
//! Both implement [`Layout`], the runtime interface used by the views.

use crate::offset;
use crate::Result;

/// The runtime description of a tensor layout: extents, strides and total number of elements.
///
/// Implemented by every static [`Shape`] and by [`DynShape`]. The views are generic over this trait.
///
/// # Safety
///
/// The unchecked accessors of the views trust the layout. An implementation must guarantee that:
///
/// - `extents()` and `strides()` have the same length,
/// - for every coordinate tuple with each coordinate smaller than the extent of its axis, the sum of the coordinates
///   multiplied by the strides does not overflow and is smaller than `total_size()`,
/// - `extents()`, `strides()` and `total_size()` return the same values for the lifetime of the layout.
pub unsafe trait Layout {
    /// The type of a full coordinate tuple.
    ///
    /// A fixed size array `[usize; RANK]` for static shapes, so the number of coordinates is checked by the
    /// compiler, and an unsized `[usize]` for runtime shapes.
    type Coords: ?Sized + AsRef<[usize]>;

    /// An owned coordinate tuple, as returned by [`coordinate_of`](Layout::coordinate_of).
    type OwnedCoords: AsRef<[usize]> + AsMut<[usize]> + core::fmt::Debug;

    /// Returns the extent of each axis.
    fn extents(&self) -> &[usize];

    /// Returns the stride of each axis, in number of elements.
    fn strides(&self) -> &[usize];

    /// Returns the total number of elements.
    fn total_size(&self) -> usize;

    /// Returns the number of axes.
    fn rank(&self) -> usize {
        self.extents().len()
    }

    /// Returns the linear offset of the given coordinates.
    ///
    /// Fails if the number of coordinates differs from the rank, or if any coordinate is not smaller than the extent
    /// of its axis.
    fn offset_of(&self, coords: &Self::Coords) -> Result<usize> {
        offset::checked_coordinate_to_offset(self.extents(), self.strides(), coords.as_ref())
    }

    /// Returns the coordinates addressing the given linear offset.
    ///
    /// Fails with [`Error::OffsetOutOfBounds`](crate::Error::OffsetOutOfBounds) if the offset is not smaller than
    /// the total number of elements.
    fn coordinate_of(&self, offset: usize) -> Result<Self::OwnedCoords>;
}

/// A shape whose extents are known at compile time.
///
/// All the quantities of the shape are associated constants, and cost nothing at runtime. Implementations are
/// usually not written by hand, see [`Dim0`] ... [`Dim6`] and the [`shape!`](crate::shape!) macro.
///
/// Shapes with a zero extent, or with a total size that overflows `usize`, fail to compile as soon as the shape is
/// used to create a view.
///
/// # Safety
///
/// Every shape is a [`Layout`], and must uphold its invariants: `EXTENTS` and `STRIDES` have `RANK` entries, and the
/// offset of every in-bounds coordinate tuple is smaller than `TOTAL_SIZE`. Computing the constants with [`strides`]
/// and [`total_size`] from the same extents is enough.
///
/// Implementing the trait without `unsafe` is rejected:
///
/// ```compile_fail,E0200
/// use tensor_view::Shape;
///
/// #[derive(Clone, Copy, Default)]
/// struct Lying;
/// impl Shape for Lying {
///     type Coords = [usize; 1];
///     const EXTENTS: &'static [usize] = &[2];
///     const STRIDES: &'static [usize] = &[1 << 40];
///     const TOTAL_SIZE: usize = 2;
///     const ORIGIN: [usize; 1] = [0];
/// }
/// ```
pub unsafe trait Shape: Copy + Default + 'static {
    /// The coordinates type, always `[usize; RANK]`.
    type Coords: Copy + AsRef<[usize]> + AsMut<[usize]> + core::fmt::Debug + Eq + core::hash::Hash;

    /// The extent of each axis.
    const EXTENTS: &'static [usize];

    /// The stride of each axis.
    const STRIDES: &'static [usize];

    /// The total number of elements.
    const TOTAL_SIZE: usize;

    /// The number of axes.
    const RANK: usize = Self::EXTENTS.len();

    /// The all-zero coordinates.
    const ORIGIN: Self::Coords;
}

// SAFETY: forwards the constants of `S`, which uphold the layout invariants.
unsafe impl<S: Shape> Layout for S {
    type Coords = <S as Shape>::Coords;
    type OwnedCoords = <S as Shape>::Coords;

    fn extents(&self) -> &[usize] {
        S::EXTENTS
    }

    fn strides(&self) -> &[usize] {
        S::STRIDES
    }

    fn total_size(&self) -> usize {
        S::TOTAL_SIZE
    }

    fn rank(&self) -> usize {
        S::RANK
    }

    fn coordinate_of(&self, offset: usize) -> Result<S::Coords> {
        let mut coords = S::ORIGIN;
        offset::offset_to_coordinate(S::EXTENTS, offset, coords.as_mut())?;
        Ok(coords)
    }
}

/// Computes the first-axis-fastest strides of the given extents.
///
/// # Panics
///
/// If the strides overflow `usize`. When evaluated in a constant context the panic is a compile error.
pub const fn strides<const N: usize>(extents: [usize; N]) -> [usize; N] {
    let mut strides = [1usize; N];
    let mut axis = 1;
    while axis < N {
        strides[axis] = match strides[axis - 1].checked_mul(extents[axis - 1]) {
            Some(stride) => stride,
            None => panic!("shape strides overflow usize"),
        };
        axis += 1;
    }
    strides
}

/// Computes the total number of elements of the given extents.
///
/// # Panics
///
/// If any extent is zero or the product overflows `usize`. When evaluated in a constant context the panic is a
/// compile error.
pub const fn total_size(extents: &[usize]) -> usize {
    let mut total = 1usize;
    let mut axis = 0;
    while axis < extents.len() {
        if extents[axis] == 0 {
            panic!("shape extents must be positive");
        }
        total = match total.checked_mul(extents[axis]) {
            Some(total) => total,
            None => panic!("shape total size overflows usize"),
        };
        axis += 1;
    }
    total
}

#[doc(hidden)]
pub const fn rank_of(extents: &[usize]) -> usize {
    extents.len()
}

/// Declares a named static shape.
///
/// The generated unit struct implements [`Shape`], and can be used with any number of axes:
///
/// ```rust
/// use tensor_view::{shape, Shape};
///
/// shape! {
///     /// A 2x3x4 shape.
///     pub Cuboid = [2, 3, 4]
/// }
///
/// assert_eq!(Cuboid::RANK, 3);
/// assert_eq!(Cuboid::STRIDES, &[1, 2, 6]);
/// assert_eq!(Cuboid::TOTAL_SIZE, 24);
/// ```
#[macro_export]
macro_rules! shape {
    ($(#[$meta:meta])* $vis:vis $name:ident = [$($extent:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;
        // SAFETY: the strides and the total size are computed from the extents.
        unsafe impl $crate::shape::Shape for $name {
            type Coords = [usize; $crate::shape::rank_of(&[$($extent),+])];
            const EXTENTS: &'static [usize] = &[$($extent),+];
            const STRIDES: &'static [usize] = &$crate::shape::strides([$($extent),+]);
            const TOTAL_SIZE: usize = $crate::shape::total_size(&[$($extent),+]);
            const ORIGIN: Self::Coords = [0; $crate::shape::rank_of(&[$($extent),+])];
        }
    };
}

/// A rank zero shape, holding a single element addressed by the empty coordinate tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dim0;
// SAFETY: a single element at offset zero.
unsafe impl Shape for Dim0 {
    type Coords = [usize; 0];
    const EXTENTS: &'static [usize] = &[];
    const STRIDES: &'static [usize] = &[];
    const TOTAL_SIZE: usize = 1;
    const ORIGIN: [usize; 0] = [];
}

macro_rules! impl_dim {
    ($(#[$meta:meta])* $name:ident, $rank:literal; $($extent:ident),+) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name<$(const $extent: usize),+>;
        // SAFETY: the strides and the total size are computed from the extents.
        unsafe impl<$(const $extent: usize),+> Shape for $name<$($extent),+> {
            type Coords = [usize; $rank];
            const EXTENTS: &'static [usize] = &[$($extent),+];
            const STRIDES: &'static [usize] = &strides([$($extent),+]);
            const TOTAL_SIZE: usize = total_size(&[$($extent),+]);
            const ORIGIN: [usize; $rank] = [0; $rank];
        }
    };
}
impl_dim!(
    /// A rank one shape with extent `D0`.
    Dim1, 1; D0
);
impl_dim!(
    /// A rank two shape with extents `[D0, D1]`.
    Dim2, 2; D0, D1
);
impl_dim!(
    /// A rank three shape with extents `[D0, D1, D2]`.
    Dim3, 3; D0, D1, D2
);
impl_dim!(
    /// A rank four shape with extents `[D0, D1, D2, D3]`.
    Dim4, 4; D0, D1, D2, D3
);
impl_dim!(
    /// A rank five shape with extents `[D0, D1, D2, D3, D4]`.
    Dim5, 5; D0, D1, D2, D3, D4
);
impl_dim!(
    /// A rank six shape with extents `[D0, D1, D2, D3, D4, D5]`.
    Dim6, 6; D0, D1, D2, D3, D4, D5
);

#[cfg(feature = "alloc")]
mod dynamic {
    use super::Layout;
    use crate::alloc::Vec;
    use crate::{offset, Error, Result};

    /// A shape whose extents are only known at runtime.
    ///
    /// The stride table and the total size are computed once, by [`DynShape::new`], and cached for the lifetime of
    /// the shape. Coordinates are slices, and their number is checked against the rank on every access.
    ///
    /// A view may hold the shape by value or by reference (`&DynShape` is also a [`Layout`]); holding a reference
    /// keeps reborrowing a view allocation free.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DynShape {
        extents: Vec<usize>,
        strides: Vec<usize>,
        total_size: usize,
    }
    impl DynShape {
        /// Create a new shape from its extents.
        ///
        /// # Errors
        ///
        /// Returns [`Error::ZeroExtent`] if any extent is zero and [`Error::SizeOverflow`] if the total number of
        /// elements does not fit in `usize`.
        pub fn new(extents: impl Into<Vec<usize>>) -> Result<Self> {
            let extents = extents.into();
            let mut strides = Vec::with_capacity(extents.len());
            let mut total_size = 1usize;
            for (axis, &extent) in extents.iter().enumerate() {
                if extent == 0 {
                    log::debug!("rejecting shape {extents:?}: axis {axis} has zero extent");
                    return Err(Error::ZeroExtent { axis });
                }
                strides.push(total_size);
                total_size = total_size.checked_mul(extent).ok_or_else(|| {
                    log::debug!("rejecting shape {extents:?}: total size overflows usize");
                    Error::SizeOverflow
                })?;
            }
            Ok(Self {
                extents,
                strides,
                total_size,
            })
        }
    }
    // SAFETY: the fields are private, computed once by `new` from the extents and never modified.
    unsafe impl Layout for DynShape {
        type Coords = [usize];
        type OwnedCoords = Vec<usize>;

        fn extents(&self) -> &[usize] {
            &self.extents
        }

        fn strides(&self) -> &[usize] {
            &self.strides
        }

        fn total_size(&self) -> usize {
            self.total_size
        }

        fn coordinate_of(&self, offset: usize) -> Result<Vec<usize>> {
            let mut coords = Vec::new();
            coords.resize(self.extents.len(), 0);
            offset::offset_to_coordinate(&self.extents, offset, &mut coords)?;
            Ok(coords)
        }
    }
    // SAFETY: same as `DynShape`.
    unsafe impl Layout for &DynShape {
        type Coords = [usize];
        type OwnedCoords = Vec<usize>;

        fn extents(&self) -> &[usize] {
            &self.extents
        }

        fn strides(&self) -> &[usize] {
            &self.strides
        }

        fn total_size(&self) -> usize {
            self.total_size
        }

        fn coordinate_of(&self, offset: usize) -> Result<Vec<usize>> {
            <DynShape as Layout>::coordinate_of(self, offset)
        }
    }
}
#[cfg(feature = "alloc")]
pub use dynamic::DynShape;

#[cfg(test)]
mod tests {
    use super::*;

    crate::shape! {
        Hypercube = [2, 2, 2, 2]
    }

    crate::shape! {
        Ragged = [3, 1, 4, 1, 5,]
    }

    #[test]
    fn dim_constants() {
        assert_eq!(Dim1::<7>::EXTENTS, &[7]);
        assert_eq!(Dim1::<7>::STRIDES, &[1]);
        assert_eq!(Dim1::<7>::TOTAL_SIZE, 7);
        assert_eq!(Dim1::<7>::RANK, 1);

        assert_eq!(Dim2::<2, 3>::STRIDES, &[1, 2]);
        assert_eq!(Dim2::<2, 3>::TOTAL_SIZE, 6);

        assert_eq!(Dim3::<4, 5, 3>::EXTENTS, &[4, 5, 3]);
        assert_eq!(Dim3::<4, 5, 3>::STRIDES, &[1, 4, 20]);
        assert_eq!(Dim3::<4, 5, 3>::TOTAL_SIZE, 60);

        assert_eq!(Dim6::<2, 3, 4, 5, 6, 7>::STRIDES, &[1, 2, 6, 24, 120, 720]);
        assert_eq!(Dim6::<2, 3, 4, 5, 6, 7>::TOTAL_SIZE, 5040);
        assert_eq!(Dim6::<2, 3, 4, 5, 6, 7>::RANK, 6);
    }

    #[test]
    fn dim0() {
        assert_eq!(Dim0::RANK, 0);
        assert_eq!(Dim0::TOTAL_SIZE, 1);
        assert!(Dim0::STRIDES.is_empty());
        assert_eq!(Dim0.offset_of(&[]), Ok(0));
    }

    #[test]
    fn macro_shapes() {
        assert_eq!(Hypercube::EXTENTS, &[2, 2, 2, 2]);
        assert_eq!(Hypercube::STRIDES, &[1, 2, 4, 8]);
        assert_eq!(Hypercube::TOTAL_SIZE, 16);
        assert_eq!(Hypercube::RANK, 4);

        assert_eq!(Ragged::STRIDES, &[1, 3, 3, 12, 12]);
        assert_eq!(Ragged::TOTAL_SIZE, 60);
        let coords: <Ragged as Shape>::Coords = [2, 0, 3, 0, 4];
        assert_eq!(Ragged.offset_of(&coords), Ok(2 + 3 * 3 + 12 * 4));
        assert_eq!(Ragged.coordinate_of(2 + 3 * 3 + 12 * 4), Ok(coords));
        assert_eq!(Ragged::ORIGIN, [0; 5]);
    }

    #[test]
    fn const_fns() {
        const STRIDES: [usize; 3] = strides([5, 6, 7]);
        const TOTAL: usize = total_size(&[5, 6, 7]);
        assert_eq!(STRIDES, [1, 5, 30]);
        assert_eq!(TOTAL, 210);
        assert!(strides::<0>([]).is_empty());
        assert_eq!(total_size(&[]), 1);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn layout_invariants() {
        fn check<L: Layout>(layout: L) {
            assert_eq!(layout.extents().len(), layout.strides().len());
            assert_eq!(layout.total_size(), layout.extents().iter().product::<usize>());
            // the last in-bounds coordinates address the last element
            let last: crate::alloc::Vec<usize> = layout.extents().iter().map(|&extent| extent - 1).collect();
            assert_eq!(offset::coordinate_to_offset(layout.strides(), &last), layout.total_size() - 1);
        }
        check(Dim0);
        check(Dim1::<7>);
        check(Dim3::<4, 5, 3>);
        check(Dim6::<2, 3, 4, 5, 6, 7>);
        check(Hypercube);
        check(Ragged);
        let shape = DynShape::new([3, 1, 4, 1, 5]).unwrap();
        check(&shape);
        check(shape);
    }

    /// A last-axis-fastest 2x3 shape.
    #[derive(Clone, Copy, Default)]
    struct RowMajor;
    // SAFETY: the largest in-bounds offset is 1 * 3 + 2 * 1 = 5.
    unsafe impl Shape for RowMajor {
        type Coords = [usize; 2];
        const EXTENTS: &'static [usize] = &[2, 3];
        const STRIDES: &'static [usize] = &[3, 1];
        const TOTAL_SIZE: usize = 6;
        const ORIGIN: [usize; 2] = [0; 2];
    }

    #[test]
    fn hand_written_shape() {
        let data = [0, 1, 2, 3, 4, 5];
        let tensor = crate::TensorView::<_, RowMajor>::new(&data);
        assert_eq!(tensor[&[0, 2]], 2);
        assert_eq!(tensor[&[1, 0]], 3);
        assert_eq!(unsafe { *tensor.get_unchecked(&[1, 2]) }, 5);
        assert_eq!(RowMajor.offset_of(&[1, 1]), Ok(4));
    }

    #[test]
    #[should_panic(expected = "shape extents must be positive")]
    fn total_size_zero_extent() {
        let extents = [3, 0, 2];
        total_size(&extents);
    }

    #[test]
    #[should_panic(expected = "shape total size overflows usize")]
    fn total_size_overflow() {
        let extents = [usize::MAX, 2];
        total_size(&extents);
    }

    #[test]
    fn layout_of_static_shape() {
        let layout = Dim3::<4, 5, 3>;
        assert_eq!(layout.rank(), 3);
        assert_eq!(layout.extents(), &[4, 5, 3]);
        assert_eq!(layout.strides(), &[1, 4, 20]);
        assert_eq!(layout.total_size(), 60);
        assert_eq!(layout.offset_of(&[3, 4, 2]), Ok(3 + 4 * 4 + 2 * 20));
        assert_eq!(
            layout.offset_of(&[4, 0, 0]),
            Err(crate::Error::IndexOutOfBounds {
                axis: 0,
                index: 4,
                extent: 4
            })
        );
        assert_eq!(layout.coordinate_of(59), Ok([3, 4, 2]));
        assert_eq!(
            layout.coordinate_of(60),
            Err(crate::Error::OffsetOutOfBounds {
                offset: 60,
                len: 60
            })
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn dyn_shape() {
        use crate::Error;

        let shape = DynShape::new([2, 3, 4]).unwrap();
        assert_eq!(shape.rank(), 3);
        assert_eq!(shape.extents(), &[2, 3, 4]);
        assert_eq!(shape.strides(), &[1, 2, 6]);
        assert_eq!(shape.total_size(), 24);
        assert_eq!(shape.offset_of(&[1, 2, 3]), Ok(1 + 2 * 2 + 3 * 6));
        assert_eq!(
            shape.offset_of(&[1, 2]),
            Err(Error::RankMismatch {
                expected: 3,
                actual: 2
            })
        );

        let by_ref = &shape;
        assert_eq!(by_ref.strides(), shape.strides());
        assert_eq!(by_ref.offset_of(&[1, 1, 1]), Ok(9));
        assert_eq!(by_ref.coordinate_of(9).unwrap(), [1, 1, 1]);
        assert_eq!(shape.coordinate_of(23).unwrap(), [1, 2, 3]);

        let no_extents: [usize; 0] = [];
        let scalar = DynShape::new(no_extents).unwrap();
        assert_eq!(scalar.rank(), 0);
        assert_eq!(scalar.total_size(), 1);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn dyn_shape_matches_static() {
        let shape = DynShape::new(Hypercube::EXTENTS).unwrap();
        assert_eq!(shape.strides(), Hypercube::STRIDES);
        assert_eq!(shape.total_size(), Hypercube::TOTAL_SIZE);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn dyn_shape_invalid() {
        use crate::Error;

        assert_eq!(
            DynShape::new([2, 0, 4]),
            Err(Error::ZeroExtent { axis: 1 })
        );
        assert_eq!(
            DynShape::new([usize::MAX, 3]),
            Err(Error::SizeOverflow)
        );
    }
}
