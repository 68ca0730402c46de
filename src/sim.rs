//! Simulated DHT11 data line for tests.
//!
//! A [`Sim`] plays a [`Waveform`] back from the moment the driver releases
//! the line, against a virtual microsecond clock. Every sample of the line
//! advances the clock by [`POLL_US`], which makes polling loops behave like
//! they do on hardware without depending on real time.

use std::{cell::RefCell, rc::Rc};

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::clock::Clock;
use crate::pin::{Direction, DirectionalPin};

/// Virtual time spent on one sample of the line.
pub const POLL_US: u32 = 1;

/// Error returned by a [`SimLine`] with injected faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineFault;

impl digital::Error for LineFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Levels seen on the released line, as `(is_high, duration_us)` segments.
///
/// Past the last segment the line idles high.
#[derive(Clone, Debug, Default)]
pub struct Waveform {
    segments: Vec<(bool, u32)>,
}

impl Waveform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn high(mut self, us: u32) -> Self {
        self.segments.push((true, us));
        self
    }

    pub fn low(mut self, us: u32) -> Self {
        self.segments.push((false, us));
        self
    }

    /// Pull-up wait, then the sensor's 80us low and 80us high.
    pub fn response(self) -> Self {
        self.high(30).low(80).high(80)
    }

    /// Bits of `bytes` MSB first, each a low pulse followed by a high pulse
    /// whose width depends on the bit.
    pub fn pulses(mut self, bytes: &[u8], low_us: u32, zero_us: u32, one_us: u32) -> Self {
        for byte in bytes {
            for i in 0..8 {
                let bit = (byte >> (7 - i)) & 1;
                self = self
                    .low(low_us)
                    .high(if bit == 1 { one_us } else { zero_us });
            }
        }
        self
    }

    /// Bits with datasheet timings.
    pub fn bytes(self, bytes: &[u8]) -> Self {
        self.pulses(bytes, 50, 27, 70)
    }

    /// A complete exchange: response, five bytes and the final low.
    pub fn frame(bytes: [u8; 5]) -> Self {
        Self::new().response().bytes(&bytes).low(50)
    }

    fn level_at(&self, offset_us: u32) -> bool {
        let mut end = 0u32;
        for &(level, us) in &self.segments {
            end = end.saturating_add(us);
            if offset_us < end {
                return level;
            }
        }
        true
    }
}

struct State {
    now: u32,
    direction: Direction,
    driven_high: bool,
    released_at: Option<u32>,
    samples: u32,
    direction_fault: bool,
    waveform: Waveform,
}

impl State {
    fn level(&self) -> bool {
        match (self.direction, self.released_at) {
            (Direction::Output, _) => self.driven_high,
            (Direction::Input, None) => true,
            (Direction::Input, Some(at)) => self.waveform.level_at(self.now.wrapping_sub(at)),
        }
    }
}

/// Shared simulation state; hands out the line and the clock.
#[derive(Clone)]
pub struct Sim {
    state: Rc<RefCell<State>>,
}

impl Sim {
    pub fn new(waveform: Waveform) -> Self {
        Self::starting_at(0, waveform)
    }

    /// Starts the virtual clock at `now`, e.g. just before it wraps.
    pub fn starting_at(now: u32, waveform: Waveform) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                now,
                direction: Direction::Input,
                driven_high: true,
                released_at: None,
                samples: 0,
                direction_fault: false,
                waveform,
            })),
        }
    }

    pub fn line(&self) -> SimLine {
        SimLine {
            state: Rc::clone(&self.state),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock {
            state: Rc::clone(&self.state),
        }
    }

    /// Replaces the waveform played after the next release.
    pub fn load(&self, waveform: Waveform) {
        self.state.borrow_mut().waveform = waveform;
    }

    /// Makes every following direction change fail.
    pub fn fail_direction_changes(&self) {
        self.state.borrow_mut().direction_fault = true;
    }

    /// Samples taken since the line was last released.
    pub fn samples(&self) -> u32 {
        self.state.borrow().samples
    }

    /// Virtual microseconds since the line was last released.
    pub fn since_release(&self) -> u32 {
        let state = self.state.borrow();
        state
            .released_at
            .map_or(0, |at| state.now.wrapping_sub(at))
    }
}

pub struct SimLine {
    state: Rc<RefCell<State>>,
}

impl ErrorType for SimLine {
    type Error = LineFault;
}

impl InputPin for SimLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.state.borrow_mut();
        let level = state.level();
        state.now = state.now.wrapping_add(POLL_US);
        state.samples += 1;
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for SimLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().driven_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().driven_high = true;
        Ok(())
    }
}

impl DirectionalPin for SimLine {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.direction_fault {
            return Err(LineFault);
        }

        state.direction = direction;
        if direction == Direction::Input {
            let now = state.now;
            state.released_at = Some(now);
            state.samples = 0;
        }
        Ok(())
    }
}

pub struct SimClock {
    state: Rc<RefCell<State>>,
}

impl Clock for SimClock {
    fn now_us(&mut self) -> u32 {
        self.state.borrow().now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_plays_from_release() {
        let sim = Sim::new(Waveform::new().low(2).high(1));
        let mut line = sim.line();

        // Driven while in output mode
        line.set_direction(Direction::Output).unwrap();
        line.set_low().unwrap();
        assert!(line.is_low().unwrap());

        line.set_direction(Direction::Input).unwrap();
        assert!(line.is_low().unwrap());
        assert!(line.is_low().unwrap());
        assert!(line.is_high().unwrap());
        // Idles high afterwards
        assert!(line.is_high().unwrap());

        assert_eq!(sim.samples(), 4);
        assert_eq!(sim.since_release(), 4);
    }
}
