//! Monotonic time source used to measure pulse widths and deadlines.
//!
//! `embedded-hal` 1.0 only offers delays, but decoding the DHT11 signal
//! needs to know how long the line *stayed* at a level. Any free running
//! microsecond counter is enough: a hardware timer on a microcontroller,
//! or [`StdClock`] on a Linux board.

/// A monotonic microsecond counter.
///
/// The counter is allowed to wrap around. Durations are always computed
/// with wrapping subtraction, so a 32 bit timer works across overflow as
/// long as a single measured interval is shorter than the wrap period.
pub trait Clock {
    /// Returns the current counter value in microseconds.
    fn now_us(&mut self) -> u32;

    /// Microseconds elapsed since `since`, a value previously returned by
    /// [`Clock::now_us`].
    fn elapsed_us(&mut self, since: u32) -> u32 {
        self.now_us().wrapping_sub(since)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_us(&mut self) -> u32 {
        T::now_us(self)
    }
}

/// [`Clock`] backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock counting from now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_us(&mut self) -> u32 {
        // Truncation is the wrap-around the trait allows for.
        self.origin.elapsed().as_micros() as u32
    }
}
