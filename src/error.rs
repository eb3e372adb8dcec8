//! Error types used in the [`tensor_view`](crate) crate.

/// Tensor view error type.
///
/// All errors are structural: they describe a mismatch between a shape and the data or coordinates it is used with,
/// and indicate a bug in the calling code rather than a transient condition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /* Binding errors */
    //
    /// The length of the container does not match the total number of elements of the shape.
    SizeMismatch {
        /// The number of elements implied by the shape.
        expected: usize,
        /// The number of elements in the container.
        actual: usize,
    },

    /* Access errors */
    //
    /// The number of coordinates does not match the rank of the shape.
    RankMismatch {
        /// The rank of the shape.
        expected: usize,
        /// The number of coordinates supplied.
        actual: usize,
    },
    /// A coordinate is not smaller than the extent of its axis.
    IndexOutOfBounds {
        /// The axis of the offending coordinate.
        axis: usize,
        /// The offending coordinate.
        index: usize,
        /// The extent of the axis.
        extent: usize,
    },
    /// A linear offset is not smaller than the total number of elements.
    OffsetOutOfBounds {
        /// The offending offset.
        offset: usize,
        /// The total number of elements.
        len: usize,
    },

    /* Shape errors */
    //
    /// An axis has zero extent.
    ZeroExtent {
        /// The axis with zero extent.
        axis: usize,
    },
    /// The total number of elements of a shape does not fit in `usize`.
    SizeOverflow,
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Error::SizeMismatch { expected, actual } => write!(
                f,
                "container holds {actual} elements but the shape requires {expected}"
            ),
            Error::RankMismatch { expected, actual } => write!(
                f,
                "got {actual} coordinates for a shape of rank {expected}"
            ),
            Error::IndexOutOfBounds {
                axis,
                index,
                extent,
            } => write!(
                f,
                "index {index} is out of bounds for axis {axis} with extent {extent}"
            ),
            Error::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {offset} is out of bounds for {len} elements")
            }
            Error::ZeroExtent { axis } => write!(f, "axis {axis} has zero extent"),
            Error::SizeOverflow => write!(f, "total number of elements overflows usize"),
        }
    }
}
#[cfg(any(error_in_core, feature = "std"))]
impl std::error::Error for Error {}

/// Result type with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn display() {
        use crate::alloc::ToString;

        let err = Error::SizeMismatch {
            expected: 16,
            actual: 15,
        };
        assert_eq!(
            err.to_string(),
            "container holds 15 elements but the shape requires 16"
        );
        let err = Error::RankMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "got 3 coordinates for a shape of rank 4");
        let err = Error::IndexOutOfBounds {
            axis: 1,
            index: 2,
            extent: 2,
        };
        assert_eq!(
            err.to_string(),
            "index 2 is out of bounds for axis 1 with extent 2"
        );
        assert_eq!(
            Error::ZeroExtent { axis: 0 }.to_string(),
            "axis 0 has zero extent"
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&Error::SizeOverflow);
    }
}
