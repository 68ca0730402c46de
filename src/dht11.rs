use embedded_hal::delay::DelayNs;

use crate::clock::Clock;
use crate::error::DhtError;
use crate::frame::{FRAME_BITS, FRAME_LEN, Frame};
use crate::pin::{Direction, DirectionalPin};
use crate::pulse::PulseClassifier;
use crate::timing::Timing;

/// Driver for the DHT11 temperature and humidity sensor.
pub struct Dht11<PIN, DELAY, CLOCK> {
    pin: PIN,
    delay: DELAY,
    clock: CLOCK,
    timing: Timing,
    last: Option<Reading>,
}

/// Reading returned by the DHT11 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

impl<PIN, DELAY, CLOCK, E> Dht11<PIN, DELAY, CLOCK>
where
    PIN: DirectionalPin<Error = E>,
    DELAY: DelayNs,
    CLOCK: Clock,
{
    /// Creates a new instance of the DHT11 driver with datasheet timings.
    ///
    /// The line is driven high and the driver then waits
    /// [`Timing::power_up_delay_ms`] (2 s by default) so the sensor is
    /// stable before the first request. This call blocks for that long.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT11 data line.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - A free running microsecond counter.
    pub fn new(pin: PIN, delay: DELAY, clock: CLOCK) -> Result<Self, DhtError<E>> {
        Self::with_timing(pin, delay, clock, Timing::default())
    }

    /// Creates a driver with custom [`Timing`].
    pub fn with_timing(
        pin: PIN,
        delay: DELAY,
        clock: CLOCK,
        timing: Timing,
    ) -> Result<Self, DhtError<E>> {
        let mut dht = Dht11 {
            pin,
            delay,
            clock,
            timing,
            last: None,
        };

        dht.pin.set_direction(Direction::Output)?;
        dht.pin.set_high()?;
        dht.delay.delay_ms(dht.timing.power_up_delay_ms);

        Ok(dht)
    }

    /// Reads a temperature and humidity measurement from the DHT11 sensor.
    ///
    /// This performs one complete exchange: the start signal, the
    /// three phase handshake, sampling of the 40 data bits and checksum
    /// validation. It busy-waits for the whole exchange, a few
    /// milliseconds plus [`Timing::start_request_ms`].
    ///
    /// On success the reading is also cached, see [`Dht11::last_reading`].
    /// A failed read leaves the cache untouched. The sensor needs about a
    /// second between measurements; pacing and retries are up to the caller.
    pub fn read(&mut self) -> Result<Reading, DhtError<E>> {
        let result = self.exchange();

        match &result {
            Ok(reading) => {
                self.last = Some(*reading);

                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "dht11: {=f32} C, {=f32} %",
                    reading.temperature,
                    reading.humidity
                );
                #[cfg(feature = "log")]
                log::debug!(
                    "dht11: {} C, {} %",
                    reading.temperature,
                    reading.humidity
                );
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("dht11: read failed: {=str}", _err.label());
                #[cfg(feature = "log")]
                log::warn!("dht11: read failed: {}", _err.label());
            }
        }

        result
    }

    fn exchange(&mut self) -> Result<Reading, DhtError<E>> {
        self.start()?;
        self.await_response()?;

        let frame = self.read_frame()?;
        let reading = frame.validate();
        if reading.is_none() {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "dht11: expected checksum {=u8:#x} in {}",
                frame.computed_checksum(),
                frame
            );
            #[cfg(feature = "log")]
            log::debug!(
                "dht11: expected checksum {:#04x} in {:02x?}",
                frame.computed_checksum(),
                frame.bytes()
            );
        }
        reading.ok_or(DhtError::ChecksumMismatch)
    }

    /// Sends the start request and hands the line over to the sensor.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        // MCU sends start request
        self.pin.set_direction(Direction::Output)?;
        self.pin.set_low()?;
        self.delay.delay_ms(self.timing.start_request_ms);

        // Release; the pull-up takes the line high
        self.pin.set_direction(Direction::Input)?;
        Ok(())
    }

    /// Waits through the sensor's acknowledge.
    ///
    /// The line is first seen high once released, then the sensor pulls it
    /// low for ~80us and high for another ~80us before the first bit.
    fn await_response(&mut self) -> Result<(), DhtError<E>> {
        self.wait_for_high(DhtError::AckTimeout)?;
        self.wait_for_low(DhtError::ResponseStartTimeout)?; // 80us
        self.wait_for_high(DhtError::ResponseTimeout)?; // 80us
        Ok(())
    }

    /// Samples the 40 data bits.
    ///
    /// Every falling edge closes one pulse. The first pulse, the response
    /// high that is already running when this is called, calibrates the
    /// classifier. Each following pulse is the time between two falling
    /// edges (the ~50us low plus the variable high) and is a 1 when it is
    /// at least the reference plus [`Timing::bit_margin_us`].
    fn read_frame(&mut self) -> Result<Frame, DhtError<E>> {
        let mut bytes = [0u8; FRAME_LEN];
        let mut classifier: Option<PulseClassifier> = None;
        let mut index = 0;
        let mut mask: u8 = 0b1000_0000;
        let mut bits = 0;

        let mut was_high = true;
        let mut edge = self.clock.now_us();

        while bits < FRAME_BITS {
            let is_high = self.pin.is_high()?;

            if was_high && !is_high {
                let now = self.clock.now_us();
                let width = now.wrapping_sub(edge);

                match classifier {
                    None => {
                        classifier = Some(PulseClassifier::new(width, self.timing.bit_margin_us));
                    }
                    Some(classifier) => {
                        if classifier.is_long(width) {
                            bytes[index] |= mask;
                        }
                        mask >>= 1;
                        if mask == 0 {
                            index += 1;
                            mask = 0b1000_0000;
                        }
                        bits += 1;
                    }
                }

                edge = now;
            }
            was_high = is_high;

            if self.clock.elapsed_us(edge) > self.timing.bit_timeout_us {
                return Err(DhtError::BitTimeout);
            }
        }

        Ok(Frame::new(bytes))
    }

    /// Waits until the data line goes high or times out.
    fn wait_for_high(&mut self, timeout: DhtError<E>) -> Result<(), DhtError<E>> {
        let limit_us = self.timing.handshake_timeout_us;
        Self::wait_for_state(&mut self.clock, limit_us, timeout, || self.pin.is_high())
    }

    /// Waits until the data line goes low or times out.
    fn wait_for_low(&mut self, timeout: DhtError<E>) -> Result<(), DhtError<E>> {
        let limit_us = self.timing.handshake_timeout_us;
        Self::wait_for_state(&mut self.clock, limit_us, timeout, || self.pin.is_low())
    }

    /// Generic busy loop that checks a pin condition until true or timeout.
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source for the deadline
    /// * `limit_us` - How long the condition may stay false
    /// * `timeout` - Error returned once `limit_us` has passed
    /// * `condition` - Closure that returns true when the expected condition is met
    fn wait_for_state<F>(
        clock: &mut CLOCK,
        limit_us: u32,
        timeout: DhtError<E>,
        mut condition: F,
    ) -> Result<(), DhtError<E>>
    where
        F: FnMut() -> Result<bool, E>,
    {
        let start = clock.now_us();
        loop {
            if condition()? {
                return Ok(());
            }
            if clock.elapsed_us(start) > limit_us {
                return Err(timeout);
            }
        }
    }
}

impl<PIN, DELAY, CLOCK> Dht11<PIN, DELAY, CLOCK> {
    /// Result of the most recent successful read, if any.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    /// Temperature from the most recent successful read, 0.0 before the first.
    pub fn last_temperature(&self) -> f32 {
        self.last.map_or(0.0, |r| r.temperature)
    }

    /// Humidity from the most recent successful read, 0.0 before the first.
    pub fn last_humidity(&self) -> f32 {
        self.last.map_or(0.0, |r| r.humidity)
    }

    /// Active timing configuration.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Releases the pin, delay and clock.
    pub fn release(self) -> (PIN, DELAY, CLOCK) {
        (self.pin, self.delay, self.clock)
    }
}
