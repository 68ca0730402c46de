//! Reconfigurable GPIO line.
//!
//! The DHT11 data line is driven by the host for the start signal and then
//! handed over to the sensor. `embedded-hal` 1.0 has no trait for switching
//! a pin between input and output, so the driver asks for [`DirectionalPin`].

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Direction of the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The line is released and sampled; the pull-up holds it high when idle.
    Input,
    /// The host drives the line.
    Output,
}

/// A GPIO pin that can be read, written and switched between directions.
pub trait DirectionalPin: InputPin + OutputPin {
    /// Reconfigures the pin.
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;
}

impl<T: DirectionalPin + ?Sized> DirectionalPin for &mut T {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        T::set_direction(self, direction)
    }
}

/// Adapter for an open-drain output with an external pull-up.
///
/// Many HALs expose such a pin as `InputPin + OutputPin` without any mode
/// switch. Driving it high releases the line, which is all "input" means
/// for an open-drain bus.
#[derive(Debug)]
pub struct OpenDrainPin<P> {
    pin: P,
}

impl<P> OpenDrainPin<P> {
    /// Wraps an open-drain pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: ErrorType> ErrorType for OpenDrainPin<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for OpenDrainPin<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}

impl<P: OutputPin> OutputPin for OpenDrainPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }
}

impl<P: InputPin + OutputPin> DirectionalPin for OpenDrainPin<P> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Input => self.pin.set_high(),
            Direction::Output => Ok(()),
        }
    }
}
