/// Number of bytes between `ptr` and the next `align`-byte boundary.
///
/// Returns 0 when `ptr` is already aligned. `align` must be a power of two.
#[inline(always)]
pub fn align_offset_bytes(ptr: *const u8, align: usize) -> usize {
    debug_assert!(align.is_power_of_two(), "alignment must be a power of two");

    let mask = align - 1;
    (align - (ptr as usize & mask)) & mask
}

/// Length of the scalar prefix of a `len`-element region starting at `ptr`.
///
/// The prefix ends at the first `align`-byte boundary, clamped to the region:
/// a region that never reaches a boundary is filled entirely by the prefix.
/// `T` must have a size that divides `align` and `ptr` must be aligned to
/// `T`, which makes the byte offset a whole number of elements.
#[inline(always)]
pub fn prefix_len<T>(ptr: *const T, len: usize, align: usize) -> usize {
    let elem = core::mem::size_of::<T>();
    debug_assert_eq!(align % elem, 0, "element size must divide the alignment");

    (align_offset_bytes(ptr as *const u8, align) / elem).min(len)
}

/// Returns `true` when `ptr` sits on an `align`-byte boundary.
#[inline(always)]
pub fn is_aligned<T>(ptr: *const T, align: usize) -> bool {
    align_offset_bytes(ptr as *const u8, align) == 0
}
