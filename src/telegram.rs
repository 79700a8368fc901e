//! CAN telegrams relayed as hex text. The payload layout of each telegram is
//! fixed by the bus that produced it.

use generic_array::{typenum, GenericArray};

use crate::{fix::StagingFix, Buf, Id, Telegram};

/// Payload shorter than the telegram layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Truncated;

/// Bias applied to both coordinates of [`VehiclePosition`], in 1e-7 degrees.
pub const POSITION_OFFSET: i64 = 2_100_000_000;

/// Bias of the raw [`CrossTrack`] value.
pub const CROSS_TRACK_OFFSET: i32 = 32_000;

/// Fix quality reported while the guidance controller has an RTK fixed
/// solution.
pub const QUALITY_RTK_FIXED: u8 = 4;

/// Vehicle position, PGN 65267. Two big-endian `u32`, latitude then
/// longitude, 1e-7 degrees per bit, offset -210 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehiclePosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl Telegram for VehiclePosition {
    const ID: Id = Id::from_raw(0x0cfe_f31c);

    type EncodedLen = typenum::U8;

    type DecodeError = Truncated;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut data = data.as_slice();

        let latitude = data.get_u32_be().ok_or(Truncated)?;
        let longitude = data.get_u32_be().ok_or(Truncated)?;

        Ok(Self {
            latitude: scale_coordinate(latitude),
            longitude: scale_coordinate(longitude),
        })
    }

    fn stage(&self, staging: &mut StagingFix) {
        staging.latitude = Some(self.latitude);
        staging.longitude = Some(self.longitude);
    }
}

fn scale_coordinate(raw: u32) -> f64 {
    (i64::from(raw) - POSITION_OFFSET) as f64 * 1e-7
}

/// Vehicle direction/speed, PGN 65256. Little-endian `u16` fields: bearing
/// (1/128 degree), speed (1/256 per bit), pitch (unused), altitude (1/8 m,
/// offset -2500 m).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VehicleDirectionSpeed {
    pub course: f32,
    pub speed: f32,
    pub altitude: f32,
}

impl Telegram for VehicleDirectionSpeed {
    const ID: Id = Id::from_raw(0x0cfe_e81c);

    type EncodedLen = typenum::U8;

    type DecodeError = Truncated;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut data = data.as_slice();

        let course = data.get_u16_le().ok_or(Truncated)?;
        let speed = data.get_u16_le().ok_or(Truncated)?;
        data.advance(2).ok_or(Truncated)?; // pitch
        let altitude = data.get_u16_le().ok_or(Truncated)?;

        Ok(Self {
            course: f32::from(course) / 128.0,
            speed: f32::from(speed) / 256.0,
            altitude: f32::from(altitude) / 8.0 - 2500.0,
        })
    }

    fn stage(&self, staging: &mut StagingFix) {
        staging.course = Some(self.course);
        staging.speed = Some(self.speed);
        staging.altitude = Some(self.altitude);
    }
}

/// Cross-track error from the guidance controller, proprietary PGN 65535.
/// Bytes 0-1: little-endian `u16`, offset 32000, two counts per centimeter.
/// Low nibble of byte 2: 1 while the controller has RTK fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrossTrack {
    /// Centimeters.
    pub cross_track: i32,
    pub rtk_fixed: bool,
}

impl Telegram for CrossTrack {
    const ID: Id = Id::from_raw(0x0cff_ff2a);

    type EncodedLen = typenum::U8;

    type DecodeError = Truncated;

    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError> {
        let mut data = data.as_slice();

        let raw = data.get_u16_le().ok_or(Truncated)?;
        let status = data.get_u8().ok_or(Truncated)?;

        Ok(Self {
            cross_track: (i32::from(raw) - CROSS_TRACK_OFFSET) >> 1,
            rtk_fixed: status & 0x0f == 1,
        })
    }

    fn stage(&self, staging: &mut StagingFix) {
        staging.cross_track = Some(self.cross_track);
        if self.rtk_fixed {
            staging.quality = Some(QUALITY_RTK_FIXED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_position() {
        // 2_621_234_567 and 2_058_765_433
        let msg = VehiclePosition::from_hex(b"9C3CDD877AB64479").unwrap();

        assert!((msg.latitude - 52.123_456_7).abs() < 1e-9);
        assert!((msg.longitude + 4.123_456_7).abs() < 1e-9);
    }

    #[test]
    fn vehicle_direction_speed() {
        // course 0x2D00 = 11520, speed 0x0A00 = 2560, altitude 0x4E70 = 20080
        let msg = VehicleDirectionSpeed::from_hex(b"002D000AFFFF704E").unwrap();

        assert_eq!(msg.course, 90.0);
        assert_eq!(msg.speed, 10.0);
        assert_eq!(msg.altitude, 10.0);
    }

    #[test]
    fn cross_track() {
        // 0x7D64 = 32100 -> +50 cm, status nibble 1
        let msg = CrossTrack::from_hex(b"647D010000000000").unwrap();
        assert_eq!(msg.cross_track, 50);
        assert!(msg.rtk_fixed);

        // 0x7CEB = 31979 -> -21 >> 1 = -11
        let msg = CrossTrack::from_hex(b"EB7C000000000000").unwrap();
        assert_eq!(msg.cross_track, -11);
        assert!(!msg.rtk_fixed);
    }

    #[test]
    fn rtk_flag_only_raises_quality() {
        let mut staging = StagingFix {
            quality: Some(1),
            ..Default::default()
        };

        CrossTrack::from_hex(b"007D000000000000")
            .unwrap()
            .stage(&mut staging);
        assert_eq!(staging.quality, Some(1));
        assert_eq!(staging.cross_track, Some(0));

        CrossTrack::from_hex(b"007D010000000000")
            .unwrap()
            .stage(&mut staging);
        assert_eq!(staging.quality, Some(QUALITY_RTK_FIXED));
    }

    #[test]
    fn short_payload_is_ignored() {
        assert_eq!(VehiclePosition::from_hex(b"9C3CDD87"), None);
    }
}
