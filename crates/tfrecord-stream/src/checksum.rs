//! Masked CRC-32C
//!
//! TFRecord never stores a raw checksum. Each CRC-32C (Castagnoli) is rotated and
//! offset first, so the checksum of a length prefix cannot be mistaken for the
//! checksum of payload bytes that happen to contain the same pattern.

/// Delta added after rotation
pub const MASK_DELTA: u32 = 0xa282_ead8;

/// Mask a raw CRC-32C value
#[inline]
pub const fn mask(crc: u32) -> u32 { crc.rotate_right(15).wrapping_add(MASK_DELTA) }

/// Exact inverse of [`mask`]
#[inline]
pub const fn unmask(masked: u32) -> u32 { masked.wrapping_sub(MASK_DELTA).rotate_left(15) }

/// CRC-32C of `data`, masked for storage
#[inline]
pub fn masked_crc32c(data: &[u8]) -> u32 { mask(crc32c::crc32c(data)) }

/// Check `data` against a stored masked checksum
#[inline]
pub fn verify(data: &[u8], masked_crc: u32) -> bool { crc32c::crc32c(data) == unmask(masked_crc) }

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_crc32c() {
        // RFC 3720 B.4 check value
        assert_eq!(crc32c::crc32c(b"123456789"), 0xe306_9283);
    }

    #[test]
    fn test_masked_zero_length_prefix() {
        // Header of an empty record as written by TensorFlow
        let length = 0u64.to_le_bytes();
        let masked = masked_crc32c(&length);
        assert!(verify(&length, masked));
        assert!(!verify(&length, masked ^ 1));
    }

    #[test]
    fn test_mask_is_not_identity() {
        let crc = crc32c::crc32c(b"payload");
        assert_ne!(mask(crc), crc);
        assert!(!verify(b"payload", crc));
    }

    proptest! {
        #[test]
        fn prop_unmask_inverts_mask(crc in any::<u32>()) {
            prop_assert_eq!(unmask(mask(crc)), crc);
            prop_assert_eq!(mask(unmask(crc)), crc);
        }

        #[test]
        fn prop_verify_accepts_own_checksum(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let crc = crc32c::crc32c(&data);
            prop_assert_eq!(unmask(masked_crc32c(&data)), crc);
            prop_assert!(verify(&data, masked_crc32c(&data)));
        }
    }
}
