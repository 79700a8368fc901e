use embedded_can::ExtendedId;

use crate::decode::hex_nibble;

/// Identifier of a CAN telegram relayed inside an ASCII sentence. This is the
/// 29-bit extended id of the original bus frame: a 3-bit priority, an 18-bit
/// parameter group number (PGN) and an 8-bit source address. On the wire it
/// appears as the sentence tag, written as eight hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(ExtendedId);

impl Id {
    /// # Panics
    ///
    /// Panics if `raw` does not fit in 29 bits. Use in const context so this
    /// surfaces at compile time.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match ExtendedId::new(raw) {
            Some(id) => Self(id),
            None => panic!("CAN identifier does not fit in 29 bits"),
        }
    }

    /// Parse a sentence tag such as `0CFEF31C`. Exactly eight upper-case hex
    /// digits.
    #[must_use]
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        if tag.len() != 8 || !tag.iter().all(|c| matches!(c, b'0'..=b'9' | b'A'..=b'F')) {
            return None;
        }

        let raw = tag
            .iter()
            .fold(0u32, |acc, &c| acc << 4 | u32::from(hex_nibble(c)));

        ExtendedId::new(raw).map(Self)
    }

    #[inline]
    #[must_use]
    pub const fn as_can_id(self) -> ExtendedId {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn priority(self) -> u8 {
        (self.0.as_raw() >> 26) as u8 & 0x7
    }

    /// Parameter group number. In PDU1 telegrams (PF below 240) the low
    /// byte is a destination address and not part of the PGN.
    #[inline]
    #[must_use]
    pub fn pgn(self) -> u32 {
        let raw = self.0.as_raw();

        if ((raw >> 16) as u8) < 240 {
            (raw >> 8) & 0x3ff00
        } else {
            (raw >> 8) & 0x3ffff
        }
    }

    #[inline]
    #[must_use]
    pub fn source(self) -> u8 {
        self.0.as_raw() as u8
    }
}

impl From<ExtendedId> for Id {
    fn from(id: ExtendedId) -> Self {
        Self(id)
    }
}

impl From<Id> for embedded_can::Id {
    fn from(id: Id) -> Self {
        Self::Extended(id.as_can_id())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Id {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Id(prio {}, pgn {}, src {:x})",
            self.priority(),
            self.pgn(),
            self.source()
        )
    }
}
