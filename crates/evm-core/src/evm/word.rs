//! # Word Arithmetic
//!
//! 256-bit word helpers on top of [`U256`].
//!
//! Every function here is total: arithmetic wraps modulo 2^256, division by
//! zero yields zero, and shifts past the word width saturate. The signed view
//! reads the same bits as a two's complement integer in −2^255 … 2^255−1.

use primitive_types::{U256, U512};

/// Word size in bytes (32 bytes = 256 bits).
pub const WORD_SIZE: usize = 32;

/// Word width in bits.
const WORD_BITS: usize = 256;

/// Index of the sign bit.
const SIGN_BIT: usize = 255;

/// `1` for true, `0` for false.
#[must_use]
pub fn from_bool(value: bool) -> U256 {
    if value {
        U256::one()
    } else {
        U256::zero()
    }
}

/// Builds a word from a signed integer using two's complement.
#[must_use]
pub fn from_i64(value: i64) -> U256 {
    let magnitude = U256::from(value.unsigned_abs());
    if value < 0 {
        negate(magnitude)
    } else {
        magnitude
    }
}

/// Big-endian encoding of a word.
#[must_use]
pub fn to_be_bytes(value: U256) -> [u8; WORD_SIZE] {
    let mut bytes = [0u8; WORD_SIZE];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Interprets up to 32 big-endian bytes as an unsigned word, zero-extended.
#[must_use]
pub fn from_be_slice(bytes: &[u8]) -> U256 {
    debug_assert!(bytes.len() <= WORD_SIZE);
    U256::from_big_endian(bytes)
}

/// Converts to `usize` if the value fits.
#[must_use]
pub fn to_usize(value: U256) -> Option<usize> {
    if value > U256::from(usize::MAX) {
        None
    } else {
        Some(value.as_usize())
    }
}

/// Converts to `u64` if the value fits.
#[must_use]
pub fn to_u64(value: U256) -> Option<u64> {
    if value > U256::from(u64::MAX) {
        None
    } else {
        Some(value.low_u64())
    }
}

// =============================================================================
// SIGNED VIEW
// =============================================================================

/// True if the sign bit is set.
#[must_use]
pub fn is_negative(value: U256) -> bool {
    value.bit(SIGN_BIT)
}

/// Two's complement negation. `−(−2^255)` wraps to itself.
#[must_use]
pub fn negate(value: U256) -> U256 {
    (!value).overflowing_add(U256::one()).0
}

/// Magnitude of the signed view (`−2^255` maps to `2^255`).
fn abs(value: U256) -> U256 {
    if is_negative(value) {
        negate(value)
    } else {
        value
    }
}

/// Signed less-than comparison.
#[must_use]
pub fn signed_lt(a: U256, b: U256) -> bool {
    match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

/// Signed division truncated toward zero.
///
/// Division by zero yields zero; `−2^255 / −1` yields `−2^255`.
#[must_use]
pub fn signed_div(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    let quotient = abs(a) / abs(b);
    if is_negative(a) == is_negative(b) {
        quotient
    } else {
        negate(quotient)
    }
}

/// Signed remainder; the result takes the sign of the dividend.
///
/// Division by zero yields zero.
#[must_use]
pub fn signed_mod(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    let remainder = abs(a) % abs(b);
    if is_negative(a) {
        negate(remainder)
    } else {
        remainder
    }
}

// =============================================================================
// UNSIGNED ARITHMETIC
// =============================================================================

/// Unsigned division; division by zero yields zero.
#[must_use]
pub fn div(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        U256::zero()
    } else {
        a / b
    }
}

/// Unsigned remainder; modulus zero yields zero.
#[must_use]
pub fn rem(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        U256::zero()
    } else {
        a % b
    }
}

/// `(a + b) mod m` computed in 512 bits; `m == 0` yields zero.
#[must_use]
pub fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    if m.is_zero() {
        return U256::zero();
    }
    let sum = u256_to_u512(a) + u256_to_u512(b);
    u512_to_u256(sum % u256_to_u512(m))
}

/// `(a * b) mod m` computed in 512 bits; `m == 0` yields zero.
#[must_use]
pub fn mul_mod(a: U256, b: U256, m: U256) -> U256 {
    if m.is_zero() {
        return U256::zero();
    }
    let product = u256_to_u512(a) * u256_to_u512(b);
    u512_to_u256(product % u256_to_u512(m))
}

/// `base ** exponent mod 2^256` by squaring. `x ** 0 == 1`, including `0 ** 0`.
#[must_use]
pub fn exp(base: U256, mut exponent: U256) -> U256 {
    let mut result = U256::one();
    let mut base = base;

    while !exponent.is_zero() {
        if exponent.bit(0) {
            result = result.overflowing_mul(base).0;
        }
        exponent >>= 1;
        base = base.overflowing_mul(base).0;
    }

    result
}

/// Sign-extends `value` from byte `byte_index` (0 = least significant).
///
/// Indexes of 31 and above leave the value unchanged.
#[must_use]
pub fn sign_extend(value: U256, byte_index: U256) -> U256 {
    if byte_index >= U256::from(WORD_SIZE - 1) {
        return value;
    }
    let bit_index = 8 * byte_index.as_usize() + 7;
    let mask = (U256::one() << (bit_index + 1)) - U256::one();
    if value.bit(bit_index) {
        value | !mask
    } else {
        value & mask
    }
}

// =============================================================================
// BITWISE
// =============================================================================

/// Byte `index` of `value`, counting from the most significant byte.
///
/// Indexes of 32 and above yield zero.
#[must_use]
pub fn byte_at(index: U256, value: U256) -> U256 {
    match to_usize(index) {
        Some(i) if i < WORD_SIZE => U256::from(to_be_bytes(value)[i]),
        _ => U256::zero(),
    }
}

/// Logical left shift; shifts of 256 or more yield zero.
#[must_use]
pub fn shl(shift: U256, value: U256) -> U256 {
    if shift >= U256::from(WORD_BITS) {
        U256::zero()
    } else {
        value << shift.as_usize()
    }
}

/// Logical right shift; shifts of 256 or more yield zero.
#[must_use]
pub fn shr(shift: U256, value: U256) -> U256 {
    if shift >= U256::from(WORD_BITS) {
        U256::zero()
    } else {
        value >> shift.as_usize()
    }
}

/// Arithmetic right shift, filling vacated bits with the sign bit.
#[must_use]
pub fn sar(shift: U256, value: U256) -> U256 {
    let negative = is_negative(value);
    if shift >= U256::from(WORD_BITS) {
        return if negative { U256::MAX } else { U256::zero() };
    }
    let shift = shift.as_usize();
    if shift == 0 || !negative {
        return value >> shift;
    }
    (value >> shift) | (U256::MAX << (WORD_BITS - shift))
}

// =============================================================================
// WIDE CONVERSIONS
// =============================================================================

fn u256_to_u512(value: U256) -> U512 {
    let mut bytes = [0u8; 2 * WORD_SIZE];
    value.to_big_endian(&mut bytes[WORD_SIZE..]);
    U512::from_big_endian(&bytes)
}

/// Truncates to the low 256 bits. Callers only pass values already reduced
/// below a 256-bit modulus.
fn u512_to_u256(value: U512) -> U256 {
    let mut bytes = [0u8; 2 * WORD_SIZE];
    value.to_big_endian(&mut bytes);
    U256::from_big_endian(&bytes[WORD_SIZE..])
}

// =============================================================================
// TESTS
// =============================================================================
