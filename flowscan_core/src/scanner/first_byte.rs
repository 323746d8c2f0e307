//! First-byte candidate scan.
//!
//! Finds every offset of a single byte in a buffer. On `x86_64` with AVX2 the
//! buffer is compared 32 bytes at a time against a broadcast needle; the tail
//! and every other target use the scalar loop. Both paths return the same
//! offsets in ascending order.

/// Bytes compared per vector step.
pub const LANES: usize = 32;

/// Every offset in `haystack` holding `needle`, ascending.
#[must_use]
#[allow(unsafe_code)]
pub fn find_all(haystack: &[u8], needle: u8) -> Vec<usize> {
    let mut positions = Vec::new();

    #[cfg(target_arch = "x86_64")]
    {
        if std::is_x86_feature_detected!("avx2") {
            // SAFETY: AVX2 support was just checked at runtime.
            unsafe {
                find_all_avx2(haystack, needle, &mut positions);
            }
            return positions;
        }
    }

    find_all_scalar_from(haystack, needle, 0, &mut positions);
    positions
}

/// Scalar scan, exposed so tests can compare it against the vector path.
#[must_use]
pub fn find_all_scalar(haystack: &[u8], needle: u8) -> Vec<usize> {
    let mut positions = Vec::new();
    find_all_scalar_from(haystack, needle, 0, &mut positions);
    positions
}

fn find_all_scalar_from(haystack: &[u8], needle: u8, from: usize, out: &mut Vec<usize>) {
    out.extend(
        haystack[from..]
            .iter()
            .enumerate()
            .filter(|&(_, &byte)| byte == needle)
            .map(|(offset, _)| from + offset),
    );
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[allow(unsafe_code, clippy::cast_sign_loss, clippy::cast_ptr_alignment)]
unsafe fn find_all_avx2(haystack: &[u8], needle: u8, out: &mut Vec<usize>) {
    use std::arch::x86_64::{
        __m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8, _mm256_set1_epi8,
    };

    let len = haystack.len();
    let ptr = haystack.as_ptr();
    let mut i = 0;

    // SAFETY: every load reads LANES bytes starting at `i`, and the loop
    // condition keeps `i + LANES <= len`.
    unsafe {
        let broadcast = _mm256_set1_epi8(i8::from_ne_bytes([needle]));
        while i + LANES <= len {
            let chunk = _mm256_loadu_si256(ptr.add(i).cast::<__m256i>());
            let mut mask = _mm256_movemask_epi8(_mm256_cmpeq_epi8(chunk, broadcast)) as u32;
            while mask != 0 {
                out.push(i + mask.trailing_zeros() as usize);
                mask &= mask - 1;
            }
            i += LANES;
        }
    }

    find_all_scalar_from(haystack, needle, i, out);
}
