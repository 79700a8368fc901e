use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, pipe};

/// A byte source, usually the UART the receiver is wired to, or a pipe filled
/// by the task that owns the UART.
pub trait AsyncSerial {
    type Error;

    /// Wait for at least one byte and read as many as fit into `buf`.
    /// Returning `Ok(0)` means the source is closed.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T> AsyncSerial for &mut T
where
    T: AsyncSerial,
{
    type Error = T::Error;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (*self).read(buf).await
    }
}

impl<M, const N: usize> AsyncSerial for pipe::Reader<'_, M, N>
where
    M: RawMutex,
{
    type Error = Infallible;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(pipe::Reader::read(self, buf).await)
    }
}
