#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

pub fn sum_u8_u64(values: &[u8]) -> u64 {
    let mut sum = 0u64;
    let mut i = 0usize;
    let n = values.len();
    unsafe {
        let zero = _mm256_setzero_si256();
        while i + 32 <= n {
            let ptr = values.as_ptr().add(i) as *const __m256i;
            let v = _mm256_loadu_si256(ptr);
            // |v - 0| summed over each 8-byte group into four u64 lanes.
            let sad = _mm256_sad_epu8(v, zero);
            let mut lanes = [0u64; 4];
            _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, sad);
            for lane in &lanes {
                sum += *lane;
            }
            i += 32;
        }
    }
    while i < n {
        sum += values[i] as u64;
        i += 1;
    }
    sum
}

pub fn backend_name() -> &'static str {
    "avx2"
}

#[cfg(test)]
#[path = "../../tests/src_inline/simd/avx2.rs"]
mod tests;
