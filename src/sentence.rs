use crate::{
    telegram::{CrossTrack, VehicleDirectionSpeed, VehiclePosition},
    Id, Telegram,
};

/// Kind of the sentence being received, decided by its first field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    /// `GPGGA`: time, position, fix quality, altitude.
    Gga,
    /// `GPVTG`: course and speed over ground.
    Vtg,
    /// `GPXTE`: cross-track error.
    Xte,
    /// `ROXTE`: cross-track error inside a Trimble binary frame.
    XteFramed,
    /// Relayed J1939 vehicle position telegram.
    CanPosition,
    /// Relayed J1939 vehicle direction/speed telegram.
    CanVelocity,
    /// Relayed proprietary cross-track telegram from the guidance controller.
    CanCrossTrack,
    #[default]
    Unrecognized,
}

/// Sentence kinds grouped by what they report. Each family has its own
/// last-updated timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Family {
    Position,
    Velocity,
    CrossTrack,
}

const TAGS: [(&[u8], SentenceKind); 4] = [
    (b"GPGGA", SentenceKind::Gga),
    (b"GPVTG", SentenceKind::Vtg),
    (b"GPXTE", SentenceKind::Xte),
    (b"ROXTE", SentenceKind::XteFramed),
];

const TELEGRAMS: [SentenceKind; 3] = [
    SentenceKind::CanPosition,
    SentenceKind::CanVelocity,
    SentenceKind::CanCrossTrack,
];

impl SentenceKind {
    /// Classify a sentence by its tag. Matching is exact and case-sensitive.
    /// Relayed telegrams are tagged with their CAN identifier.
    #[must_use]
    pub fn classify(tag: &[u8]) -> Self {
        if let Some(&(_, kind)) = TAGS.iter().find(|(t, _)| *t == tag) {
            return kind;
        }

        Id::from_tag(tag).map_or(Self::Unrecognized, Self::from_can_id)
    }

    fn from_can_id(id: Id) -> Self {
        TELEGRAMS
            .into_iter()
            .find(|kind| kind.can_id() == Some(id))
            .unwrap_or(Self::Unrecognized)
    }

    #[must_use]
    pub const fn family(self) -> Option<Family> {
        match self {
            Self::Gga | Self::CanPosition => Some(Family::Position),
            Self::Vtg | Self::CanVelocity => Some(Family::Velocity),
            Self::Xte | Self::XteFramed | Self::CanCrossTrack => Some(Family::CrossTrack),
            Self::Unrecognized => None,
        }
    }

    /// Bus identifier for kinds that relay a CAN telegram.
    #[must_use]
    pub const fn can_id(self) -> Option<Id> {
        match self {
            Self::CanPosition => Some(VehiclePosition::ID),
            Self::CanVelocity => Some(VehicleDirectionSpeed::ID),
            Self::CanCrossTrack => Some(CrossTrack::ID),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tags() {
        assert_eq!(SentenceKind::classify(b"GPGGA"), SentenceKind::Gga);
        assert_eq!(SentenceKind::classify(b"GPVTG"), SentenceKind::Vtg);
        assert_eq!(SentenceKind::classify(b"GPXTE"), SentenceKind::Xte);
        assert_eq!(SentenceKind::classify(b"ROXTE"), SentenceKind::XteFramed);
        assert_eq!(SentenceKind::classify(b"0CFEF31C"), SentenceKind::CanPosition);
        assert_eq!(SentenceKind::classify(b"0CFEE81C"), SentenceKind::CanVelocity);
        assert_eq!(SentenceKind::classify(b"0CFFFF2A"), SentenceKind::CanCrossTrack);
    }

    #[test]
    fn classify_is_exact() {
        assert_eq!(SentenceKind::classify(b"gpgga"), SentenceKind::Unrecognized);
        assert_eq!(SentenceKind::classify(b"0cfef31c"), SentenceKind::Unrecognized);
        assert_eq!(SentenceKind::classify(b"GPGGAX"), SentenceKind::Unrecognized);
        assert_eq!(SentenceKind::classify(b"GPGG"), SentenceKind::Unrecognized);
        assert_eq!(SentenceKind::classify(b"GPRMC"), SentenceKind::Unrecognized);
        assert_eq!(SentenceKind::classify(b""), SentenceKind::Unrecognized);
    }

    #[test]
    fn telegrams_classify_by_id() {
        for kind in TELEGRAMS {
            let id = kind.can_id().unwrap();
            assert_eq!(SentenceKind::from_can_id(id), kind);
            assert!(kind.family().is_some());
        }

        assert_eq!(SentenceKind::CanVelocity.can_id().unwrap().pgn(), 65256);
        assert_eq!(SentenceKind::Gga.can_id(), None);

        // a well-formed identifier nobody relays
        assert_eq!(SentenceKind::classify(b"18EA2A1C"), SentenceKind::Unrecognized);
        // same PGN, different source
        assert_eq!(SentenceKind::classify(b"0CFEF31D"), SentenceKind::Unrecognized);
    }
}
