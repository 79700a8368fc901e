//! Decoded telemetry. Fields of the sentence being received land in a
//! [`StagingFix`]; the subset belonging to that sentence is copied into the
//! [`PublishedFix`] only once its checksum has passed.

use crate::sentence::{Family, SentenceKind};

pub const MS_PER_KNOT: f32 = 0.514_444_44;
pub const KMH_PER_KNOT: f32 = 1.852;

/// Speed in km/h above which the vehicle counts as moving.
pub const MIN_SPEED_KMH: f32 = 0.5;

/// Values decoded from the sentence in flight. Nothing here has been
/// validated. Values are never cleared, a sentence that omits a field leaves
/// the previous sentence's value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StagingFix {
    /// Time of day as transmitted, `hhmmss.ss`.
    pub time: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f32>,
    pub speed: Option<f32>,
    pub course: Option<f32>,
    pub quality: Option<u8>,
    /// Centimeters.
    pub cross_track: Option<i32>,
}

/// Last known good telemetry. `None` means no sentence carrying the field has
/// passed its checksum yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublishedFix {
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f32>,
    quality: Option<u8>,
    time: Option<f64>,
    date: Option<u32>,
    course: Option<f32>,
    speed: Option<f32>,
    cross_track: Option<i32>,

    position_at: Option<u64>,
    velocity_at: Option<u64>,
    cross_track_at: Option<u64>,
}

impl PublishedFix {
    pub const fn new() -> Self {
        Self {
            latitude: None,
            longitude: None,
            altitude: None,
            quality: None,
            time: None,
            date: None,
            course: None,
            speed: None,
            cross_track: None,
            position_at: None,
            velocity_at: None,
            cross_track_at: None,
        }
    }

    /// Copy the fields carried by a sentence of `kind` out of `staging` and
    /// stamp the family's update time.
    pub(crate) fn commit(&mut self, staging: &StagingFix, kind: SentenceKind, now: u64) {
        match kind {
            SentenceKind::Gga => {
                self.altitude = staging.altitude;
                self.time = staging.time;
                self.latitude = staging.latitude;
                self.longitude = staging.longitude;
                self.quality = staging.quality;
            }
            SentenceKind::Vtg => {
                self.course = staging.course;
                self.speed = staging.speed;
            }
            SentenceKind::Xte | SentenceKind::XteFramed => {
                self.cross_track = staging.cross_track;
            }
            SentenceKind::CanPosition => {
                self.latitude = staging.latitude;
                self.longitude = staging.longitude;
            }
            SentenceKind::CanVelocity => {
                self.course = staging.course;
                self.speed = staging.speed;
                self.altitude = staging.altitude;
            }
            SentenceKind::CanCrossTrack => {
                self.cross_track = staging.cross_track;
                self.quality = staging.quality;
            }
            SentenceKind::Unrecognized => {}
        }

        match kind.family() {
            Some(Family::Position) => self.position_at = Some(now),
            Some(Family::Velocity) => self.velocity_at = Some(now),
            Some(Family::CrossTrack) => self.cross_track_at = Some(now),
            None => {}
        }
    }

    /// Signed decimal degrees, north positive.
    #[inline]
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Signed decimal degrees, east positive.
    #[inline]
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Meters above mean sea level.
    #[inline]
    #[must_use]
    pub fn altitude(&self) -> Option<f32> {
        self.altitude
    }

    #[must_use]
    pub fn altitude_cm(&self) -> Option<i32> {
        self.altitude.map(|m| (m * 100.0) as i32)
    }

    /// Fix quality code as reported by the receiver (0 = invalid, 1 = GPS,
    /// 2 = DGPS, 4 = RTK fixed, 5 = RTK float, ...).
    #[inline]
    #[must_use]
    pub fn quality(&self) -> Option<u8> {
        self.quality
    }

    /// Raw UTC time of day, `hhmmss.ss`.
    #[inline]
    #[must_use]
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// Raw UTC date, `ddmmyy`. None of the decoded sentences carry a date, so
    /// this stays unset unless a future sentence kind provides one.
    #[inline]
    #[must_use]
    pub fn date(&self) -> Option<u32> {
        self.date
    }

    /// Degrees from true north.
    #[inline]
    #[must_use]
    pub fn course(&self) -> Option<f32> {
        self.course
    }

    /// Knots.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> Option<f32> {
        self.speed
    }

    #[must_use]
    pub fn speed_ms(&self) -> Option<f32> {
        self.speed.map(|knots| knots * MS_PER_KNOT)
    }

    #[must_use]
    pub fn speed_kmh(&self) -> Option<f32> {
        self.speed.map(|knots| knots * KMH_PER_KNOT)
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.speed_kmh().is_some_and(|kmh| kmh > MIN_SPEED_KMH)
    }

    /// Cross-track error in centimeters.
    #[inline]
    #[must_use]
    pub fn cross_track(&self) -> Option<i32> {
        self.cross_track
    }

    #[must_use]
    pub fn cross_track_m(&self) -> Option<f32> {
        self.cross_track.map(|cm| cm as f32 / 100.0)
    }

    /// Clock reading (milliseconds) at which a sentence of `family` was last
    /// published.
    #[must_use]
    pub fn updated_at(&self, family: Family) -> Option<u64> {
        match family {
            Family::Position => self.position_at,
            Family::Velocity => self.velocity_at,
            Family::CrossTrack => self.cross_track_at,
        }
    }

    /// Milliseconds since `family` was last published.
    #[must_use]
    pub fn age(&self, family: Family, now: u64) -> Option<u64> {
        self.updated_at(family).map(|at| now.saturating_sub(at))
    }

    /// Time of day and, if known, the date, split into their components.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime> {
        let hhmmsscc = libm::round(self.time? * 100.0) as u32;
        let date = self.date.map(|ddmmyy| {
            let yy = (ddmmyy % 100) as u16;
            Date {
                year: yy + if yy > 80 { 1900 } else { 2000 },
                month: (ddmmyy / 100 % 100) as u8,
                day: (ddmmyy / 10_000) as u8,
            }
        });

        Some(DateTime {
            date,
            hour: (hhmmsscc / 1_000_000) as u8,
            minute: (hhmmsscc / 10_000 % 100) as u8,
            second: (hhmmsscc / 100 % 100) as u8,
            hundredths: (hhmmsscc % 100) as u8,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub date: Option<Date>,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}
