//! DHT11 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the DHT11 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! The DHT11 talks over a single data line. The host pulls the line low to
//! request a measurement, the sensor acknowledges and then sends 40 bits
//! where the width of each pulse encodes the bit value. The driver measures
//! a reference pulse at the start of every frame and classifies the data
//! pulses against it, so it keeps working when the sensor's timing drifts.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Distinct errors for every handshake phase, the bit stream and the checksum
//! - Optional logging support via `defmt` or `log`
//!
//! # Dependencies
//! This driver depends on the following traits:
//! - [`DirectionalPin`] (an `embedded-hal` [`InputPin`] + [`OutputPin`] that
//!   can switch direction) for the data line; [`OpenDrainPin`] adapts a
//!   plain open-drain pin
//! - [`DelayNs`] for the start request and power-up wait
//! - [`Clock`] for measuring pulse widths
//!
//! # Example
//!
//! ```ignore
//! use dht11_sensor::{Dht11, OpenDrainPin};
//!
//! let mut dht = Dht11::new(OpenDrainPin::new(pin), delay, clock)?;
//! match dht.read() {
//!     Ok(reading) => defmt::info!("{} C, {} %", reading.temperature, reading.humidity),
//!     Err(e) => defmt::warn!("DHT11 read failed: {}", e),
//! }
//! ```
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs failed reads via `defmt`
//! - `log`: Logs failed reads via the `log` facade
//! - `std`: Provides `StdClock`, a [`Clock`] backed by `std::time::Instant`
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod clock;
pub mod dht11;
pub mod error;
pub mod frame;
pub mod pin;
pub mod pulse;
pub mod timing;

#[cfg(test)]
mod sim;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::Clock;
pub use dht11::{Dht11, Reading};
pub use error::DhtError;
pub use frame::Frame;
pub use pin::{Direction, DirectionalPin, OpenDrainPin};
pub use pulse::PulseClassifier;
pub use timing::Timing;
