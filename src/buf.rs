/// Sequential fixed-width reads from a decoded telegram payload. Every read
/// returns `None` once the payload is exhausted, leaving the cursor untouched.
pub trait Buf {
    fn get_u8(&mut self) -> Option<u8>;

    fn get_u16_le(&mut self) -> Option<u16>;

    fn get_u16_be(&mut self) -> Option<u16>;

    fn get_u32_le(&mut self) -> Option<u32>;

    fn get_u32_be(&mut self) -> Option<u32>;

    /// Skip `n` bytes.
    ///
    /// ```
    /// # use vehicle_gps::Buf;
    /// let mut buf = &[0xde, 0xad, 0x01, 0x00][..];
    /// assert_eq!(buf.advance(2), Some(()));
    /// assert_eq!(buf.get_u16_le(), Some(1));
    /// ```
    fn advance(&mut self, n: usize) -> Option<()>;
}

impl Buf for &[u8] {
    #[inline]
    fn get_u8(&mut self) -> Option<u8> {
        self.split_off_first().copied()
    }

    #[inline]
    fn get_u16_le(&mut self) -> Option<u16> {
        let bytes = self.get(..2)?.try_into().ok()?;
        *self = &self[2..];
        Some(u16::from_le_bytes(bytes))
    }

    #[inline]
    fn get_u16_be(&mut self) -> Option<u16> {
        let bytes = self.get(..2)?.try_into().ok()?;
        *self = &self[2..];
        Some(u16::from_be_bytes(bytes))
    }

    #[inline]
    fn get_u32_le(&mut self) -> Option<u32> {
        let bytes = self.get(..4)?.try_into().ok()?;
        *self = &self[4..];
        Some(u32::from_le_bytes(bytes))
    }

    #[inline]
    fn get_u32_be(&mut self) -> Option<u32> {
        let bytes = self.get(..4)?.try_into().ok()?;
        *self = &self[4..];
        Some(u32::from_be_bytes(bytes))
    }

    #[inline]
    fn advance(&mut self, n: usize) -> Option<()> {
        self.split_off(..n).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::Buf;

    #[test]
    fn reads_both_byte_orders() {
        let mut buf = &[0x12, 0x34, 0x12, 0x34, 0xde, 0xad, 0xbe, 0xef][..];

        assert_eq!(buf.get_u16_be(), Some(0x1234));
        assert_eq!(buf.get_u16_le(), Some(0x3412));
        assert_eq!(buf.get_u32_be(), Some(0xdead_beef));
        assert_eq!(buf.get_u8(), None);
    }

    #[test]
    fn short_read_leaves_cursor() {
        let mut buf = &[0x01, 0x02, 0x03][..];

        assert_eq!(buf.get_u32_le(), None);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.advance(4), None);
        assert_eq!(buf.get_u8(), Some(0x01));
    }
}
