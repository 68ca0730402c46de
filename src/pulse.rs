/// Tells short pulses from long ones relative to a measured reference.
///
/// The DHT11 runs on an RC oscillator, so its pulse widths drift with
/// supply voltage and temperature. Instead of a fixed cut-off, the decoder
/// measures a pulse of known length at the start of every frame and
/// classifies the data pulses against it.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseClassifier {
    reference_us: u32,
    margin_us: u32,
}

impl PulseClassifier {
    /// Creates a classifier from the calibration pulse width and a margin.
    pub const fn new(reference_us: u32, margin_us: u32) -> Self {
        Self {
            reference_us,
            margin_us,
        }
    }

    /// Width of the calibration pulse.
    pub const fn reference_us(&self) -> u32 {
        self.reference_us
    }

    /// Pulses at least this long are ones.
    pub const fn threshold_us(&self) -> u32 {
        self.reference_us.saturating_add(self.margin_us)
    }

    /// Returns `true` if a pulse of `duration_us` encodes a 1 bit.
    pub const fn is_long(&self, duration_us: u32) -> bool {
        duration_us >= self.threshold_us()
    }
}
