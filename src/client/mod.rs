#[cfg(feature = "defmt")]
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use crate::{config::Config, fix::PublishedFix, parser::Clock, Parser, SentenceKind};

mod async_serial;

pub use async_serial::AsyncSerial;

/// Bytes pulled from the source per read.
pub const RX_CHUNK: usize = 32;

/// [`Clock`] backed by the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_millis(&self) -> u64 {
        Instant::now().as_millis()
    }
}

pub enum Error<S: AsyncSerial> {
    Serial(S::Error),
    /// No byte arrived within the idle timeout.
    Timeout,
    /// The source reported end of stream.
    Closed,
}

impl<S> core::fmt::Debug for Error<S>
where
    S: AsyncSerial,
    S::Error: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Serial(e) => f.debug_tuple("Serial").field(e).finish(),
            Self::Timeout => f.write_str("Timeout"),
            Self::Closed => f.write_str("Closed"),
        }
    }
}

/// Drives a [`Parser`] from an async byte source, stamping fixes with the
/// embassy clock.
///
/// The client does not reopen or reconfigure the source. On an error the
/// caller decides what to do; the parser state survives and polling can
/// resume.
pub struct Client<S: AsyncSerial> {
    serial: S,
    parser: Parser<EmbassyClock>,
    rx: [u8; RX_CHUNK],
    rx_pos: usize,
    rx_len: usize,
    idle_timeout: Option<Duration>,
}

impl<S: AsyncSerial> Client<S> {
    pub fn new(serial: S, config: Config) -> Self {
        Self {
            serial,
            parser: Parser::with_config(EmbassyClock, config),
            rx: [0; RX_CHUNK],
            rx_pos: 0,
            rx_len: 0,
            idle_timeout: None,
        }
    }

    /// Fail [`Client::poll`] with [`Error::Timeout`] when the source stays
    /// silent for `timeout`.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    #[inline]
    #[must_use]
    pub fn parser(&self) -> &Parser<EmbassyClock> {
        &self.parser
    }

    #[inline]
    #[must_use]
    pub fn fix(&self) -> &PublishedFix {
        self.parser.fix()
    }

    /// Baud rate the source should be configured for.
    #[inline]
    #[must_use]
    pub fn baud(&self) -> u32 {
        self.parser.data_rate().baud()
    }

    /// Read until a sentence passes its checksum and return its kind. The
    /// values it carried are then available through [`Client::fix`].
    pub async fn poll(&mut self) -> Result<SentenceKind, Error<S>> {
        loop {
            while self.rx_pos < self.rx_len {
                let byte = self.rx[self.rx_pos];
                self.rx_pos += 1;

                if self.parser.feed(byte) {
                    let kind = self.parser.sentence_kind();

                    #[cfg(feature = "defmt")]
                    info!("{} published", kind);

                    return Ok(kind);
                }
            }

            self.fill().await?;
        }
    }

    async fn fill(&mut self) -> Result<(), Error<S>> {
        let read = self.serial.read(&mut self.rx);

        let len = match self.idle_timeout {
            Some(timeout) => match select(read, Timer::after(timeout)).await {
                Either::First(res) => res.map_err(Error::Serial)?,
                Either::Second(()) => {
                    #[cfg(feature = "defmt")]
                    warn!("no data for {} ms", timeout.as_millis());

                    return Err(Error::Timeout);
                }
            },
            None => read.await.map_err(Error::Serial)?,
        };

        if len == 0 {
            return Err(Error::Closed);
        }

        self.rx_pos = 0;
        self.rx_len = len;

        Ok(())
    }
}
