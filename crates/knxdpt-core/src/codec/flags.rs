//! Bit-flag octets used by composite colour types.
//!
//! For `N` flags, flag `i` lives at bit `N - 1 - i`: the first flag takes the
//! most significant used bit. The flag count is never carried on the wire;
//! callers pick `N` from the datapoint type being decoded.

/// Pack up to eight flags into one octet.
pub fn pack_flags<const N: usize>(flags: [bool; N]) -> u8 {
    const { assert!(N >= 1 && N <= 8, "a flag octet holds 1..=8 flags") };
    flags
        .iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .fold(0u8, |byte, (i, _)| byte | 1 << (N - 1 - i))
}

/// Extract `N` flags from the low `N` bits of `byte`. Higher bits are ignored.
pub fn unpack_flags<const N: usize>(byte: u8) -> [bool; N] {
    const { assert!(N >= 1 && N <= 8, "a flag octet holds 1..=8 flags") };
    std::array::from_fn(|i| byte & (1 << (N - 1 - i)) != 0)
}

#[cfg(test)]
mod tests {
    use super::{pack_flags, unpack_flags};

    #[test]
    fn first_flag_is_most_significant_used_bit() {
        assert_eq!(pack_flags([true, false]), 0b10);
        assert_eq!(pack_flags([false, true]), 0b01);
        assert_eq!(pack_flags([true, false, false, false]), 0b1000);
        assert_eq!(pack_flags([false, false, false, true]), 0b0001);
        assert_eq!(pack_flags([true]), 0b1);
    }

    #[test]
    fn all_set_fills_low_bits() {
        assert_eq!(pack_flags([true; 4]), 0x0F);
        assert_eq!(pack_flags([true; 8]), 0xFF);
        assert_eq!(pack_flags([false; 4]), 0x00);
    }

    #[test]
    fn bijection_for_two_and_four_flags() {
        for byte in 0u8..4 {
            let flags: [bool; 2] = unpack_flags(byte);
            assert_eq!(pack_flags(flags), byte);
            assert_eq!(unpack_flags::<2>(pack_flags(flags)), flags);
        }
        for byte in 0u8..16 {
            let flags: [bool; 4] = unpack_flags(byte);
            assert_eq!(pack_flags(flags), byte);
            assert_eq!(unpack_flags::<4>(pack_flags(flags)), flags);
        }
    }

    #[test]
    fn unpack_ignores_unused_high_bits() {
        assert_eq!(unpack_flags::<2>(0b1111_1101), [false, true]);
        assert_eq!(unpack_flags::<4>(0xF8), [true, false, false, false]);
    }
}
