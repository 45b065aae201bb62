use super::*;
use crate::simd::scalar;

#[test]
fn test_sum_equiv() {
    let v: Vec<u8> = (0..77u32).map(|i| (255 - i * 3 % 256) as u8).collect();
    assert_eq!(sum_u8_u64(&v), scalar::sum_u8_u64(&v));
}
