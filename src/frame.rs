use crate::dht11::Reading;

/// Number of bytes the sensor sends per measurement.
pub const FRAME_LEN: usize = 5;

/// Number of data bits in a frame.
pub const FRAME_BITS: usize = FRAME_LEN * 8;

/// Raw 40 bit frame as received from the sensor.
///
/// | byte | content                                      |
/// |------|----------------------------------------------|
/// | 0    | humidity, integral part                      |
/// | 1    | humidity, decimal part                       |
/// | 2    | temperature, integral part                   |
/// | 3    | temperature, bit 7 sign, low nibble tenths   |
/// | 4    | checksum, low 8 bits of the sum of bytes 0-3 |
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    /// Wraps five received bytes.
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// The raw bytes, in the order they were received.
    pub const fn bytes(&self) -> [u8; FRAME_LEN] {
        self.bytes
    }

    /// Checksum byte sent by the sensor.
    pub const fn checksum(&self) -> u8 {
        self.bytes[4]
    }

    /// Checksum computed from the four data bytes.
    pub fn computed_checksum(&self) -> u8 {
        self.bytes[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Whether the checksum byte matches the data.
    pub fn is_valid(&self) -> bool {
        self.computed_checksum() == self.checksum()
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> f32 {
        let [integral, decimal, ..] = self.bytes;
        let tenths = u16::from(integral) * 10 + u16::from(decimal);
        tenths as f32 / 10.0
    }

    /// Temperature in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        let [_, _, integral, decimal, _] = self.bytes;

        let is_negative = (decimal >> 7) != 0;
        let tenths = u16::from(integral) * 10 + u16::from(decimal & 0x0F);
        let temperature = tenths as f32 / 10.0;
        if is_negative { -temperature } else { temperature }
    }

    /// Decodes the frame without looking at the checksum.
    pub fn reading(&self) -> Reading {
        Reading {
            temperature: self.temperature(),
            humidity: self.humidity(),
        }
    }

    /// Decodes the frame if its checksum is valid.
    pub fn validate(&self) -> Option<Reading> {
        self.is_valid().then(|| self.reading())
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self::new(bytes)
    }
}
