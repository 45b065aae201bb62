pub fn sum_u8_u64(values: &[u8]) -> u64 {
    let mut sum = 0u64;
    for &v in values {
        sum += v as u64;
    }
    sum
}

pub fn backend_name() -> &'static str {
    "scalar"
}

#[cfg(test)]
#[path = "../../tests/src_inline/simd/scalar.rs"]
mod tests;
