/// Timing parameters of one DHT11 exchange.
///
/// The defaults follow the DHT11 datasheet. The host low pulse must last
/// at least 18 ms for the sensor to notice it, and every phase of the
/// response is well under 200 us.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// How long the host holds the line low to request a measurement.
    pub start_request_ms: u32,
    /// Stabilization wait performed once when the driver is created.
    pub power_up_delay_ms: u32,
    /// Budget for each handshake phase after the start signal.
    pub handshake_timeout_us: u32,
    /// Longest time allowed between two edges while sampling bits.
    pub bit_timeout_us: u32,
    /// Tolerance added to the calibration pulse to get the 0/1 threshold.
    pub bit_margin_us: u32,
}

impl Timing {
    /// Datasheet timings.
    pub const DEFAULT: Self = Self {
        start_request_ms: 20,
        power_up_delay_ms: 2000,
        handshake_timeout_us: 200,
        bit_timeout_us: 200,
        bit_margin_us: 20,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
