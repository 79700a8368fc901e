use crate::{
    checksum::{FrameSum, Parity, DLE},
    sentence::SentenceKind,
};

/// Longest field kept. Bytes past this are dropped, which is enough for any
/// decoded field (a CAN payload is 16 characters).
pub const FIELD_CAPACITY: usize = 19;

/// Tokenizer state for the sentence being received.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    pub field: heapless::Vec<u8, FIELD_CAPACITY>,
    /// Ordinal of the field within the sentence, the tag being 0.
    pub index: u8,
    pub parity: Parity,
    pub sum: FrameSum,
    /// The field being received is the checksum trailer.
    pub in_checksum: bool,
    pub kind: SentenceKind,
}

impl RawFrame {
    pub const fn new() -> Self {
        Self {
            field: heapless::Vec::new(),
            index: 0,
            parity: Parity(0),
            sum: FrameSum::new(),
            in_checksum: false,
            kind: SentenceKind::Unrecognized,
        }
    }

    /// `$` or `@`: a new sentence. The marker itself counts towards the frame
    /// sum, which is only reset by the binary frame marker.
    pub fn start_sentence(&mut self, marker: u8) {
        self.field.clear();
        self.index = 0;
        self.parity = Parity::default();
        self.sum.push(marker);
        self.kind = SentenceKind::Unrecognized;
        self.in_checksum = false;
    }

    /// Binary frame marker. Parity, kind and checksum state carry over.
    pub fn start_binary(&mut self) {
        self.field.clear();
        self.index = 0;
        self.sum.reset();
    }

    /// Append a field byte. Once the buffer is full further bytes are dropped
    /// but still count towards parity and sum.
    pub fn push(&mut self, byte: u8) {
        let _ = self.field.push(byte);

        if !self.in_checksum {
            self.parity.push(byte);
        }
        self.sum.push(byte);
    }

    /// Move on to the next field.
    pub fn next_field(&mut self) {
        self.index = self.index.saturating_add(1);
        self.field.clear();
    }

    /// The trailing `[sum_hi, sum_lo, DLE]` of a binary frame, if the field
    /// ends in one and the checksum has not been seen yet.
    pub fn binary_trailer(&self) -> Option<[u8; 3]> {
        if self.in_checksum {
            return None;
        }

        match self.field.as_slice() {
            [.., hi, lo, DLE] => Some([*hi, *lo, DLE]),
            _ => None,
        }
    }

    /// Drop the binary trailer from the field buffer.
    pub fn strip_trailer(&mut self) {
        let len = self.field.len().saturating_sub(3);
        self.field.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_is_dropped() {
        let mut frame = RawFrame::new();

        for b in b"0123456789ABCDEF0123456789" {
            frame.push(*b);
        }

        assert_eq!(frame.field.as_slice(), b"0123456789ABCDEF012");
        assert_eq!(frame.field.len(), FIELD_CAPACITY);
    }

    #[test]
    fn checksum_bytes_skip_parity() {
        let mut frame = RawFrame::new();
        frame.push(b'A');
        frame.in_checksum = true;
        frame.push(b'4');

        assert_eq!(frame.parity.value(), b'A');
        assert_eq!(frame.sum.value(), u16::from(b'A') + u16::from(b'4'));
    }

    #[test]
    fn trailer_detection() {
        let mut frame = RawFrame::new();
        for b in [b'1', 0x02, 0xc2, DLE] {
            frame.push(b);
        }
        assert_eq!(frame.binary_trailer(), Some([0x02, 0xc2, DLE]));

        frame.strip_trailer();
        assert_eq!(frame.field.as_slice(), b"1");

        frame.field.clear();
        for b in [0xc2, DLE] {
            frame.push(b);
        }
        assert_eq!(frame.binary_trailer(), None);
    }

    #[test]
    fn sentence_start_keeps_sum() {
        let mut frame = RawFrame::new();
        frame.start_binary();
        frame.start_sentence(b'@');
        frame.push(b'R');

        assert_eq!(frame.sum.value(), u16::from(b'@') + u16::from(b'R'));
        assert_eq!(frame.parity.value(), b'R');

        frame.start_binary();
        assert_eq!(frame.sum.value(), 0);
        assert_eq!(frame.parity.value(), b'R');
    }
}
