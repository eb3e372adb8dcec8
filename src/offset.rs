//! Mapping between coordinates and linear offsets.
//!
//! The offset of a coordinate tuple is the dot product of the coordinates with the strides of the shape. With the
//! first-axis-fastest strides computed by [`shape`](crate::shape) this is equivalent to the nested form
//! `c0 + d0 * (c1 + d1 * (c2 + ...))`.

use crate::{Error, Result};

/// Folds the coordinates into a linear offset, without any check.
///
/// Extra coordinates or strides are ignored. Coordinates outside of their axis produce an offset that may address
/// another element of the tensor, or fall outside of it; use [`checked_coordinate_to_offset`] to reject them.
///
/// The arithmetic wraps around on overflow, in debug and release builds alike. Coordinates within the extents of a
/// [`Layout`](crate::Layout) never overflow.
#[inline]
pub fn coordinate_to_offset(strides: &[usize], coords: &[usize]) -> usize {
    debug_assert_eq!(strides.len(), coords.len());
    strides
        .iter()
        .zip(coords)
        .fold(0, |offset: usize, (&stride, &coord)| offset.wrapping_add(coord.wrapping_mul(stride)))
}

/// Folds the coordinates into a linear offset.
///
/// # Errors
///
/// Returns [`Error::RankMismatch`] if the number of coordinates differs from the number of extents, and
/// [`Error::IndexOutOfBounds`] for the first coordinate that is not smaller than the extent of its axis.
pub fn checked_coordinate_to_offset(
    extents: &[usize],
    strides: &[usize],
    coords: &[usize],
) -> Result<usize> {
    if coords.len() != extents.len() {
        return Err(Error::RankMismatch {
            expected: extents.len(),
            actual: coords.len(),
        });
    }
    let mut offset = 0;
    for (axis, ((&index, &extent), &stride)) in coords.iter().zip(extents).zip(strides).enumerate() {
        if index >= extent {
            return Err(Error::IndexOutOfBounds {
                axis,
                index,
                extent,
            });
        }
        offset += index * stride;
    }
    Ok(offset)
}

/// Unfolds a linear offset into the coordinates addressing it, written to `coords`.
///
/// This is the inverse of [`checked_coordinate_to_offset`]: the first axis varies fastest.
///
/// # Errors
///
/// Returns [`Error::RankMismatch`] if `coords` does not have one entry per extent, and
/// [`Error::OffsetOutOfBounds`] if the offset is not smaller than the total number of elements.
pub fn offset_to_coordinate(extents: &[usize], offset: usize, coords: &mut [usize]) -> Result<()> {
    if coords.len() != extents.len() {
        return Err(Error::RankMismatch {
            expected: extents.len(),
            actual: coords.len(),
        });
    }
    let mut rest = offset;
    for (coord, &extent) in coords.iter_mut().zip(extents) {
        if extent == 0 {
            return Err(Error::OffsetOutOfBounds { offset, len: 0 });
        }
        *coord = rest % extent;
        rest /= extent;
    }
    if rest != 0 {
        return Err(Error::OffsetOutOfBounds {
            offset,
            len: extents.iter().product(),
        });
    }
    Ok(())
}
