//! Leading-zero-bit validity predicate.

use crate::error::DigestTooShort;

/// Count the leading zero bits of a digest, most significant bit first.
pub fn leading_zero_bits(digest: &[u8]) -> u32 {
    let mut zero_bits = 0u32;

    for byte in digest {
        if *byte == 0 {
            zero_bits += 8;
        } else {
            zero_bits += byte.leading_zeros();
            break;
        }
    }

    zero_bits
}

/// Check whether the first `difficulty` bits of `digest` are all zero.
///
/// Bytes are scanned in order and bits from most to least significant. The
/// scan stops at the first set bit or as soon as `difficulty` zero bits have
/// been seen. A difficulty of zero is always met.
///
/// Asking for more bits than the digest holds is a configuration error and
/// is reported as [`DigestTooShort`] regardless of the digest contents.
///
/// # Example
///
/// ```rust
/// use powork_core::meets_difficulty;
///
/// // 0x00, 0x0F: 12 leading zero bits
/// let digest = [0x00, 0x0F, 0xFF, 0xFF];
/// assert_eq!(meets_difficulty(&digest, 12), Ok(true));
/// assert_eq!(meets_difficulty(&digest, 13), Ok(false));
/// assert!(meets_difficulty(&digest, 33).is_err());
/// ```
#[inline]
pub fn meets_difficulty(digest: &[u8], difficulty: u32) -> Result<bool, DigestTooShort> {
    let digest_bits = digest.len() * 8;
    if difficulty as usize > digest_bits {
        return Err(DigestTooShort {
            difficulty,
            digest_bits,
        });
    }

    let mut remaining = difficulty;
    if remaining == 0 {
        return Ok(true);
    }

    for byte in digest {
        let zeros = byte.leading_zeros();
        if zeros >= remaining {
            return Ok(true);
        }
        if zeros < 8 {
            // hit a set bit first
            return Ok(false);
        }
        remaining -= 8;
    }

    // unreachable while the length check above holds
    Err(DigestTooShort {
        difficulty,
        digest_bits,
    })
}
