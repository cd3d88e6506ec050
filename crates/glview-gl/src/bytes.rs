//! Byte views of plain numeric data for buffer and texture uploads.

/// Types that can be viewed as raw bytes for upload.
///
/// # Safety
///
/// Only implement on types made purely of `f32`/`u32`/`u8` with no padding,
/// pointers or references.
pub unsafe trait AsBytes: Sized {
    /// View a slice of `Self` as its underlying bytes.
    fn slice_as_bytes(items: &[Self]) -> &[u8] {
        unsafe { std::slice::from_raw_parts(items.as_ptr().cast(), std::mem::size_of_val(items)) }
    }
}

// SAFETY: plain numbers and arrays of them have no padding.
unsafe impl AsBytes for u8 {}
unsafe impl AsBytes for u32 {}
unsafe impl AsBytes for f32 {}
unsafe impl<const N: usize> AsBytes for [f32; N] {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_slice_bytes() {
        let points = [[1.0f32, 2.0], [3.0, 4.0]];
        let bytes = <[f32; 2]>::slice_as_bytes(&points);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &2.0f32.to_ne_bytes());
    }

    #[test]
    fn test_index_slice_bytes() {
        let bytes = u32::slice_as_bytes(&[1, 0x0102_0304]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[4..], &0x0102_0304u32.to_ne_bytes());
    }
}
