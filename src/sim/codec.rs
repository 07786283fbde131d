//! Packed task codes
//!
//! A level task is "collect `count` fruits of `type`", stored as one integer:
//! the type in the high bits and a 12-bit count in the low bits.

use super::state::FruitType;

/// Number of bits reserved for the count
pub const COUNT_BITS: u32 = 12;
/// Mask selecting the count bits
pub const COUNT_MASK: u32 = (1 << COUNT_BITS) - 1;
/// Largest count a code can carry
pub const MAX_TASK_COUNT: u32 = COUNT_MASK;

/// Pack a task. Counts above [`MAX_TASK_COUNT`] are truncated to their low 12 bits.
#[inline]
pub fn encode(fruit_type: FruitType, count: u32) -> u32 {
    (fruit_type << COUNT_BITS) | (count & COUNT_MASK)
}

/// Fruit type stored in a packed code
#[inline]
pub fn decode_type(code: u32) -> FruitType {
    code >> COUNT_BITS
}

/// Count stored in a packed code
#[inline]
pub fn decode_count(code: u32) -> u32 {
    code & COUNT_MASK
}

/// Decode both halves at once
#[inline]
pub fn decode(code: u32) -> (FruitType, u32) {
    (decode_type(code), decode_count(code))
}
