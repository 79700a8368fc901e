//! Leaf decoders for the text of a single field. None of these fail: a field
//! that does not start with a number decodes to zero, mirroring how receivers
//! treat empty or garbled fields as "no value".

use generic_array::{ArrayLength, GenericArray};
use nom::{
    character::complete::i32 as integer,
    number::complete::{double, float},
    IResult,
};

type Error<'a> = nom::error::Error<&'a [u8]>;

/// Run a float parser over `field`. nom rejects a number whose exponent has
/// no digits (`5e`), in that case the mantissa before the `e` is used.
fn float_prefix<'a, T>(
    field: &'a [u8],
    parser: fn(&'a [u8]) -> IResult<&'a [u8], T, Error<'a>>,
) -> Option<T> {
    parser(field)
        .or_else(|_| {
            let mantissa = field
                .split(|&c| c == b'e' || c == b'E')
                .next()
                .unwrap_or(field);
            parser(mantissa)
        })
        .map(|(_, value)| value)
        .ok()
}

/// Decode the longest numeric prefix of `field` as a decimal number.
#[must_use]
pub fn parse_decimal(field: &[u8]) -> f32 {
    float_prefix(field, float).unwrap_or(0.0)
}

/// Same as [`parse_decimal`] with double precision, used for coordinates.
#[must_use]
pub fn parse_double(field: &[u8]) -> f64 {
    float_prefix(field, double).unwrap_or(0.0)
}

/// Decode the longest integer prefix of `field`, accepting a leading sign.
#[must_use]
pub fn parse_integer(field: &[u8]) -> i32 {
    integer::<_, Error>(field).map_or(0, |(_, value)| value)
}

/// Convert `dddmm.mmmm` into unsigned decimal degrees.
///
/// ```
/// # use vehicle_gps::decode::parse_degrees;
/// assert!((parse_degrees(b"4807.038") - 48.1173).abs() < 1e-6);
/// ```
#[must_use]
pub fn parse_degrees(field: &[u8]) -> f64 {
    let value = parse_double(field);
    let degrees = libm::trunc(value / 100.0);
    let minutes = value - degrees * 100.0;

    degrees + minutes / 60.0
}

/// Value of a single hex digit. Characters outside `0-9A-Fa-f` are not
/// rejected, they decode to their distance from `'0'` (wrapping).
#[inline]
#[must_use]
pub const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'A'..=b'F' => c - b'A' + 10,
        b'a'..=b'f' => c - b'a' + 10,
        _ => c.wrapping_sub(b'0'),
    }
}

/// Decode the first `N * 2` hex characters of `field` into `N` bytes, high
/// nibble first. Returns `None` if the field is too short.
#[must_use]
pub fn decode_hex<N: ArrayLength>(field: &[u8]) -> Option<GenericArray<u8, N>> {
    let digits = field.get(..N::USIZE * 2)?;
    let mut out = GenericArray::<u8, N>::default();

    for (byte, pair) in out.iter_mut().zip(digits.chunks_exact(2)) {
        *byte = (hex_nibble(pair[0]) & 0x0f) << 4 | (hex_nibble(pair[1]) & 0x0f);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use generic_array::typenum::{U2, U8};

    use super::*;

    #[test]
    fn decimals() {
        assert_eq!(parse_decimal(b"545.4"), 545.4);
        assert_eq!(parse_decimal(b"-12.5"), -12.5);
        assert_eq!(parse_decimal(b"054.7,T"), 54.7);
        assert_eq!(parse_decimal(b"M"), 0.0);
        assert_eq!(parse_decimal(b""), 0.0);
    }

    #[test]
    fn exponents() {
        assert_eq!(parse_decimal(b"2e1"), 20.0);
        assert_eq!(parse_decimal(b"5e"), 5.0);
        assert_eq!(parse_decimal(b"-1.5E+"), -1.5);
        assert_eq!(parse_double(b"4807.5e"), 4807.5);
        assert_eq!(parse_double(b"e5"), 0.0);
    }

    #[test]
    fn integers() {
        assert_eq!(parse_integer(b"1"), 1);
        assert_eq!(parse_integer(b"08"), 8);
        assert_eq!(parse_integer(b"-3x"), -3);
        assert_eq!(parse_integer(b"x"), 0);
    }

    #[test]
    fn degrees_and_minutes() {
        assert!((parse_degrees(b"4807.038") - (48.0 + 7.038 / 60.0)).abs() < 1e-9);
        assert!((parse_degrees(b"01131.000") - (11.0 + 31.0 / 60.0)).abs() < 1e-9);
        assert_eq!(parse_degrees(b"0000.000"), 0.0);
    }

    #[test]
    fn nibbles() {
        assert_eq!(hex_nibble(b'0'), 0);
        assert_eq!(hex_nibble(b'9'), 9);
        assert_eq!(hex_nibble(b'A'), 10);
        assert_eq!(hex_nibble(b'f'), 15);
        assert_eq!(hex_nibble(b'/'), 0xff);
    }

    #[test]
    fn hex_payloads() {
        let bytes = decode_hex::<U8>(b"9C3CDD877AB64479").unwrap();
        assert_eq!(
            bytes.as_slice(),
            &[0x9c, 0x3c, 0xdd, 0x87, 0x7a, 0xb6, 0x44, 0x79]
        );

        let bytes = decode_hex::<U2>(b"a0ffEXTRA").unwrap();
        assert_eq!(bytes.as_slice(), &[0xa0, 0xff]);

        assert!(decode_hex::<U8>(b"9C3CDD87").is_none());
    }
}
