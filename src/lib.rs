//! This crate decodes the byte stream of a positioning receiver into the few
//! values a vehicle guidance application needs: position, altitude, speed,
//! course, cross-track error and fix quality. It uses no heap allocation and
//! works one byte at a time, so it can sit directly behind a UART interrupt.
//!
//! Three framings share the stream:
//!
//! - NMEA 0183 sentences (`$GPGGA`, `$GPVTG`, `$GPXTE`) with an XOR checksum.
//! - Trimble binary frames (`ROXTE`) opened by `0xBF`, closed by `DLE ETX`
//!   and protected by a 16-bit additive sum.
//! - CAN telegrams relayed as text: the tag is the 29-bit bus identifier in
//!   hex and the single field is the 8-byte payload in hex.
//!
//! Values only become visible through [`Parser::fix`] once the sentence that
//! carried them passed its checksum.
//!
//! ```
//! use vehicle_gps::Parser;
//!
//! let mut parser = Parser::new(|| 0);
//! let n = parser.feed_all(b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n");
//!
//! assert_eq!(n, 1);
//! assert_eq!(parser.fix().course(), Some(54.7));
//! ```

#![no_std]

mod buf;
pub mod checksum;
#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod decode;
mod distance;
mod field;
pub mod fix;
mod frame;
mod id;
mod parser;
pub mod sentence;
pub mod telegram;

use generic_array::{ArrayLength, GenericArray};

pub use buf::Buf;
pub use config::{Config, ConfigStore, DataRate};
pub use distance::distance_between;
pub use fix::{PublishedFix, StagingFix};
pub use generic_array::typenum;
pub use id::Id;
pub use parser::{Clock, Parser, Statistics};
pub use sentence::{Family, SentenceKind};

/// A CAN telegram that can be relayed inside an ASCII sentence. The trait
/// mirrors a bus message: a fixed identifier, a fixed payload length and a
/// decoder for that payload.
pub trait Telegram {
    /// Identifier of the telegram on its original bus. The relaying sentence
    /// carries it as its tag, written as eight upper-case hex digits.
    const ID: Id;

    /// Payload length in bytes.
    type EncodedLen: ArrayLength;

    /// The error type returned when a payload fails to decode.
    type DecodeError;

    /// Decode a telegram from its payload bytes.
    fn decode(data: &GenericArray<u8, Self::EncodedLen>) -> Result<Self, Self::DecodeError>
    where
        Self: Sized;

    /// Write the decoded values into the staging record.
    fn stage(&self, staging: &mut StagingFix);

    /// Decode a telegram from the hex text of a sentence field. Characters
    /// past the payload length are ignored.
    fn from_hex(field: &[u8]) -> Option<Self>
    where
        Self: Sized,
    {
        let data = decode::decode_hex::<Self::EncodedLen>(field)?;
        Self::decode(&data).ok()
    }
}
