//! Per sentence field layout: which field of which sentence kind feeds which
//! staged value.

use crate::{
    decode::{parse_decimal, parse_degrees, parse_double, parse_integer},
    fix::StagingFix,
    sentence::SentenceKind,
    telegram::{CrossTrack, VehicleDirectionSpeed, VehiclePosition},
    Telegram,
};

pub type Decoder = fn(&mut StagingFix, &[u8]);

/// Look up the decoder for field `index` (the tag being 0) of a `kind`
/// sentence. Fields not listed here are not used.
pub fn decoder(kind: SentenceKind, index: u8) -> Option<Decoder> {
    use SentenceKind::*;

    let decode: Decoder = match (kind, index) {
        (Gga, 1) => time,
        (Gga, 2) => latitude,
        (Gga, 3) => north_south,
        (Gga, 4) => longitude,
        (Gga, 5) => east_west,
        (Gga, 6) => quality,
        (Gga, 9) => altitude,
        (Vtg, 1) => course,
        (Vtg, 5) => speed,
        (Xte, 3) | (XteFramed, 1) => cross_track,
        (CanPosition, 1) => telegram::<VehiclePosition>,
        (CanVelocity, 1) => telegram::<VehicleDirectionSpeed>,
        (CanCrossTrack, 1) => telegram::<CrossTrack>,
        _ => return None,
    };

    Some(decode)
}

fn time(staging: &mut StagingFix, field: &[u8]) {
    staging.time = Some(parse_double(field));
}

fn latitude(staging: &mut StagingFix, field: &[u8]) {
    staging.latitude = Some(parse_degrees(field));
}

fn north_south(staging: &mut StagingFix, field: &[u8]) {
    if field.first() == Some(&b'S') {
        staging.latitude = staging.latitude.map(|lat| -lat);
    }
}

fn longitude(staging: &mut StagingFix, field: &[u8]) {
    staging.longitude = Some(parse_degrees(field));
}

fn east_west(staging: &mut StagingFix, field: &[u8]) {
    if field.first() == Some(&b'W') {
        staging.longitude = staging.longitude.map(|lon| -lon);
    }
}

fn quality(staging: &mut StagingFix, field: &[u8]) {
    staging.quality = Some(u8::try_from(parse_integer(field)).unwrap_or(0));
}

fn altitude(staging: &mut StagingFix, field: &[u8]) {
    staging.altitude = Some(parse_decimal(field));
}

fn course(staging: &mut StagingFix, field: &[u8]) {
    staging.course = Some(parse_decimal(field));
}

fn speed(staging: &mut StagingFix, field: &[u8]) {
    staging.speed = Some(parse_decimal(field));
}

// meters on the wire, centimeters staged
fn cross_track(staging: &mut StagingFix, field: &[u8]) {
    staging.cross_track = Some(libm::roundf(parse_decimal(field) * 100.0) as i32);
}

fn telegram<T: Telegram>(staging: &mut StagingFix, field: &[u8]) {
    if let Some(telegram) = T::from_hex(field) {
        telegram.stage(staging);
    }
}
