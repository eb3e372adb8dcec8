#![cfg_attr(deny_warnings, deny(warnings))]
// some new clippy::lint annotations are supported in latest Rust but not recognized by older versions
#![cfg_attr(deny_warnings, allow(unknown_lints))]
#![cfg_attr(deny_warnings, deny(missing_docs))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Non-owning multidimensional views over flat buffers.
//!
//! A [`TensorView`] or [`TensorViewMut`] reinterprets an existing linear container (a slice, an array, a `Vec`, ...)
//! as a tensor of a fixed shape, without copying or owning the data. Coordinates are mapped to offsets in the
//! container with first-axis-fastest strides: for a shape `[d0, d1, ..., dn-1]` the coordinate
//! `(c0, c1, ..., cn-1)` lives at offset `c0 + d0 * (c1 + d1 * (c2 + ...))`, i.e. column-major (Fortran) order.
//!
//! The shape is usually known at compile time, either through the generic [`Dim1`](shape::Dim1) ...
//! [`Dim6`](shape::Dim6) types or through the [`shape!`] macro. The extents, strides and total size of such shapes
//! are associated constants, and coordinates are fixed size arrays, so passing the wrong number of coordinates is a
//! compile error:
//!
//! ```rust
//! use tensor_view::shape::Dim4;
//! use tensor_view::TensorViewMut;
//!
//! let mut data = vec![0.0_f64; 16];
//! let mut tensor = TensorViewMut::<_, Dim4<2, 2, 2, 2>>::new(&mut data);
//!
//! tensor[&[0, 0, 0, 0]] = 1.0;
//! tensor[&[1, 0, 1, 0]] = 2.0;
//! tensor[&[0, 1, 1, 1]] = 99.0;
//!
//! assert_eq!(data[0], 1.0);
//! assert_eq!(data[5], 2.0);
//! assert_eq!(data[14], 99.0);
//! ```
//!
//! ```rust,compile_fail
//! use tensor_view::shape::Dim4;
//! use tensor_view::TensorView;
//!
//! let data = [0_i32; 16];
//! let tensor = TensorView::<_, Dim4<2, 2, 2, 2>>::new(&data);
//! let _ = tensor[&[0, 0, 0]]; // rank 4 shape, 3 coordinates
//! ```
//!
//! Shapes that are only known at runtime are supported by [`DynShape`](shape::DynShape), which computes the same
//! stride table once, when the shape is created.
//!
//! The container length must equal the total number of elements of the shape; this is checked when the view is
//! created and whenever it is rebound to another container. Coordinates are bounds checked on every access, unless
//! the `unsafe` unchecked accessors are used.
//!
//! ## Cargo Features
//! - `std`:
//!     Enable the standard library. This feature is enabled by default, but can be disabled to build
//!     [`tensor_view`](crate) in a `no_std` environment.
//!     Also includes the `alloc` feature.
//! - `alloc`:
//!     Enable allocations. Adds `Vec` and `Box<[T]>` containers and the runtime [`DynShape`](shape::DynShape).
//!     This feature is enabled by the `std` feature, which is enabled by default.
//! - `ndarray`:
//!     Conversions from views to `ndarray` array views, and `ndarray` based `Debug` output.
//!     This feature is enabled by default.
//! - `half`:
//!     Re-exports the [`half`](https://docs.rs/half/latest/half/) crate, whose reduced precision `f16` and `bf16`
//!     types are common element types of views.
//! - `num-complex`:
//!     Re-exports the [`num-complex`](https://docs.rs/num-complex/latest/num_complex/) crate.
//!
//! By default the `std` and `ndarray` features are enabled.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate core as std;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "std")]
    pub mod alloc {
        pub use std::boxed::Box;
        pub use std::string::ToString;
        pub use std::vec::Vec;
    }
    #[cfg(all(feature = "alloc", not(feature = "std")))]
    pub mod alloc {
        extern crate alloc;
        pub use alloc::boxed::Box;
        pub use alloc::string::ToString;
        pub use alloc::vec::Vec;
    }
}

#[cfg(feature = "alloc")]
#[allow(unused_imports)]
use crate::__private::alloc;

pub mod container;
mod error;
pub mod offset;
pub mod shape;
pub mod view;

pub use container::Container;
pub use error::{Error, Result};
pub use shape::{Layout, Shape};
pub use view::{TensorView, TensorViewMut};

#[cfg(feature = "ndarray")]
pub use ndarray;

#[cfg(feature = "half")]
pub use half;

#[cfg(feature = "num-complex")]
pub use num_complex;
