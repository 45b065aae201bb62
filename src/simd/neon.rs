#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

pub fn sum_u8_u64(values: &[u8]) -> u64 {
    let mut sum = 0u64;
    let mut i = 0usize;
    let n = values.len();
    unsafe {
        while i + 16 <= n {
            let ptr = values.as_ptr().add(i);
            let v = vld1q_u8(ptr);
            // 16 * 255 fits in u16.
            sum += vaddlvq_u8(v) as u64;
            i += 16;
        }
    }
    while i < n {
        sum += values[i] as u64;
        i += 1;
    }
    sum
}

pub fn backend_name() -> &'static str {
    "neon"
}

#[cfg(test)]
#[path = "../../tests/src_inline/simd/neon.rs"]
mod tests;
