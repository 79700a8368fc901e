#[cfg(feature = "defmt")]
use defmt::{debug, trace};

use crate::{
    checksum::{hex_checksum, ETX},
    config::{Config, ConfigStore, DataRate},
    field,
    fix::{PublishedFix, StagingFix},
    frame::RawFrame,
    sentence::SentenceKind,
};

/// Opens a Trimble binary frame.
pub const FRAME_MARKER: u8 = 0xbf;

/// Filler byte sent by Trimble receivers between frames.
const FILLER: u8 = 0x14;

/// Source of the timestamps stamped on published fixes, in milliseconds
/// since an arbitrary epoch. Must not go backwards.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now_millis(&self) -> u64 {
        self()
    }
}

/// Stream counters, kept when [`Config::statistics`] is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Statistics {
    /// Bytes fed to the parser.
    pub bytes: u32,
    pub passed_checksum: u32,
    pub failed_checksum: u32,
}

/// Byte-at-a-time decoder for one receiver.
///
/// Feed every received byte to [`Parser::feed`]. Whenever it returns `true` a
/// sentence just passed its checksum and [`Parser::fix`] holds its values.
/// A sentence that fails its checksum leaves the published fix untouched.
pub struct Parser<C> {
    clock: C,
    frame: RawFrame,
    staging: StagingFix,
    fix: PublishedFix,
    stats: Option<Statistics>,
    data_rate: DataRate,
}

impl<C: Clock> Parser<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, Config::default())
    }

    pub fn with_config(clock: C, config: Config) -> Self {
        Self {
            clock,
            frame: RawFrame::new(),
            staging: StagingFix::default(),
            fix: PublishedFix::new(),
            stats: config.statistics.then(Statistics::default),
            data_rate: config.data_rate,
        }
    }

    /// Consume one byte. Returns `true` if it completed a sentence that passed
    /// its checksum.
    pub fn feed(&mut self, byte: u8) -> bool {
        if let Some(stats) = &mut self.stats {
            stats.bytes = stats.bytes.wrapping_add(1);
        }

        match byte {
            FRAME_MARKER => {
                self.frame.start_binary();
                false
            }
            b'$' | b'@' => {
                self.frame.start_sentence(byte);
                false
            }
            b' ' | b'\0' | FILLER => {
                self.frame.sum.push(byte);
                false
            }
            b',' | b':' | b'*' | b'\r' | b'\n' => self.end_field(byte),
            ETX => match self.frame.binary_trailer() {
                Some(trailer) => self.end_frame(trailer),
                None => {
                    self.frame.push(byte);
                    false
                }
            },
            _ => {
                self.frame.push(byte);
                false
            }
        }
    }

    /// Feed a whole buffer, returning how many sentences passed their checksum.
    pub fn feed_all(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.feed(b)).count()
    }

    fn end_field(&mut self, delimiter: u8) -> bool {
        if delimiter == b',' {
            self.frame.parity.push(delimiter);
        }
        self.frame.sum.push(delimiter);

        let valid = self.commit_field();

        self.frame.next_field();
        self.frame.in_checksum = delimiter == b'*';

        valid
    }

    /// `DLE ETX` closing a binary frame whose field ends in `trailer`.
    fn end_frame(&mut self, trailer: [u8; 3]) -> bool {
        let mut valid = false;

        if self.frame.sum.verify_trailer(trailer) {
            self.frame.strip_trailer();
            self.commit_field();
            self.frame.in_checksum = true;
            valid = self.commit_field();
        } else {
            #[cfg(feature = "defmt")]
            debug!("binary frame sum mismatch: {}", self.frame.sum);

            if let Some(stats) = &mut self.stats {
                stats.failed_checksum = stats.failed_checksum.wrapping_add(1);
            }
        }

        self.frame.next_field();

        valid
    }

    /// Process the field that was just completed. Returns `true` if it was a
    /// checksum field and the checksum matched.
    fn commit_field(&mut self) -> bool {
        let frame = &mut self.frame;

        if frame.in_checksum {
            let expected = match frame.kind {
                // the frame sum was already verified, parity is not transmitted
                SentenceKind::XteFramed => frame.parity.value(),
                _ => hex_checksum(&frame.field),
            };

            if expected != frame.parity.value() {
                #[cfg(feature = "defmt")]
                debug!(
                    "{} checksum mismatch: expected {:x}, found {:x}",
                    frame.kind,
                    frame.parity.value(),
                    expected
                );

                if let Some(stats) = &mut self.stats {
                    stats.failed_checksum = stats.failed_checksum.wrapping_add(1);
                }
                return false;
            }

            #[cfg(feature = "defmt")]
            trace!("{} passed checksum", frame.kind);

            if let Some(stats) = &mut self.stats {
                stats.passed_checksum = stats.passed_checksum.wrapping_add(1);
            }
            let now = self.clock.now_millis();
            self.fix.commit(&self.staging, frame.kind, now);
            return true;
        }

        if frame.index == 0 {
            frame.kind = SentenceKind::classify(&frame.field);

            #[cfg(feature = "defmt")]
            trace!("sentence {}", frame.kind);

            return false;
        }

        if !frame.field.is_empty() {
            if let Some(decode) = field::decoder(frame.kind, frame.index) {
                decode(&mut self.staging, &frame.field);
            }
        }

        false
    }

    /// Last known good telemetry.
    #[inline]
    #[must_use]
    pub fn fix(&self) -> &PublishedFix {
        &self.fix
    }

    /// Kind of the sentence currently (or last) being received. Right after
    /// [`Parser::feed`] returned `true` this is the kind that was published.
    #[inline]
    #[must_use]
    pub fn sentence_kind(&self) -> SentenceKind {
        self.frame.kind
    }

    /// `None` if statistics are disabled.
    #[inline]
    #[must_use]
    pub fn statistics(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// Persist a new data rate. The caller reconfigures the byte source.
    pub fn commit_data_rate<S: ConfigStore>(
        &mut self,
        store: &mut S,
        rate: DataRate,
    ) -> Result<(), S::Error> {
        rate.save(store)?;
        self.data_rate = rate;
        Ok(())
    }
}
