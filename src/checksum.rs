//! The two integrity checks used on the wire. ASCII sentences carry the XOR
//! of their body as two hex digits after `*`. Trimble-style binary frames carry
//! a 16-bit additive sum of the frame in front of the `DLE ETX` terminator.

use core::num::Wrapping;

use crate::decode::hex_nibble;

/// Escape byte preceding the binary frame terminator.
pub const DLE: u8 = 0x10;

/// Binary frame terminator, only meaningful right after [`DLE`].
pub const ETX: u8 = 0x03;

/// Rolling XOR over the body of an ASCII sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parity(pub u8);

impl Parity {
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.0 ^= byte;
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Checksum carried by the trailing field of an ASCII sentence: two hex
/// digits, high nibble first. Missing digits read as NUL.
#[must_use]
pub fn hex_checksum(field: &[u8]) -> u8 {
    let hi = hex_nibble(field.first().copied().unwrap_or(0));
    let lo = hex_nibble(field.get(1).copied().unwrap_or(0));

    hi.wrapping_mul(16).wrapping_add(lo)
}

/// Rolling 16-bit additive sum over a binary frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSum(Wrapping<u16>);

impl FrameSum {
    pub const fn new() -> Self {
        Self(Wrapping(0))
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.0 += Wrapping(u16::from(byte));
    }

    #[inline]
    pub fn reset(&mut self) {
        self.0 = Wrapping(0);
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0 .0
    }

    /// Check a frame whose last three buffered bytes are `[sum_hi, sum_lo, DLE]`.
    ///
    /// Those three bytes were already folded into the running sum as ordinary
    /// bytes, so they are taken back out before comparing against the
    /// transmitted value. The subtraction sticks even when the check fails.
    pub fn verify_trailer(&mut self, trailer: [u8; 3]) -> bool {
        let [hi, lo, dle] = trailer;

        self.0 -= Wrapping(u16::from(dle));
        self.0 -= Wrapping(u16::from(lo));
        self.0 -= Wrapping(u16::from(hi));

        self.0 .0 == u16::from_be_bytes([hi, lo])
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameSum {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "FrameSum({:04x})", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_of_gga_body() {
        let mut parity = Parity::default();
        for b in b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,," {
            parity.push(*b);
        }

        assert_eq!(parity.value(), 0x47);
        assert_eq!(hex_checksum(b"47"), 0x47);
    }

    #[test]
    fn hex_checksum_cases() {
        assert_eq!(hex_checksum(b"6F"), 0x6f);
        assert_eq!(hex_checksum(b"6f"), 0x6f);
        assert_eq!(hex_checksum(b"00"), 0);
        assert_eq!(hex_checksum(b"FF"), 0xff);
    }

    #[test]
    fn frame_trailer() {
        let mut sum = FrameSum::default();
        let body = b"@ROXTE,1.23";
        for b in body {
            sum.push(*b);
        }
        let expected = sum.value().to_be_bytes();

        let mut good = sum;
        for b in [expected[0], expected[1], DLE] {
            good.push(b);
        }
        assert!(good.verify_trailer([expected[0], expected[1], DLE]));

        let mut bad = sum;
        let wrong = [expected[0], expected[1].wrapping_add(1), DLE];
        for b in wrong {
            bad.push(b);
        }
        assert!(!bad.verify_trailer(wrong));
    }

    #[test]
    fn frame_sum_wraps() {
        let mut sum = FrameSum::default();
        for _ in 0..300 {
            sum.push(0xff);
        }
        assert_eq!(sum.value(), (300u32 * 0xff % 0x1_0000) as u16);

        sum.reset();
        assert_eq!(sum.value(), 0);
    }
}
