use core::fmt;

/// Possible errors from the DHT11 driver.
///
/// Every handshake phase has its own timeout variant so a caller can tell
/// a wiring problem (no acknowledge at all) from a timing problem (the
/// sensor stops half way) or corrupted data.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The line never read high after the start signal was released.
    AckTimeout,
    /// The sensor never pulled the line low to begin its response.
    ResponseStartTimeout,
    /// The sensor never released the line after its response low pulse.
    ResponseTimeout,
    /// No edge arrived in time while the data bits were being sampled.
    BitTimeout,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (direction change, input or output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E> DhtError<E> {
    /// Short description of the failure, without the pin error payload.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::AckTimeout => "timed out waiting for the line to be released",
            Self::ResponseStartTimeout => "timed out waiting for the sensor response",
            Self::ResponseTimeout => "timed out waiting for the end of the response",
            Self::BitTimeout => "timed out while sampling data bits",
            Self::ChecksumMismatch => "checksum mismatch",
            Self::PinError(_) => "pin error",
        }
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinError(e) => write!(f, "pin error: {e:?}"),
            other => f.write_str(other.label()),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DhtError<E> {}
