//! phenology-core: APSIM winter-wheat phenology in Rust.
//!
//! Daily weather is turned into crown temperature, thermal time,
//! vernalisation and photoperiod responses by the [`apsim_wheat`]
//! accumulator, and the resulting table is scanned by [`stages`] to assign
//! the calendar dates of six developmental transitions.
pub mod apsim_wheat;
pub mod daylength;
pub mod error;
pub mod forcing;
pub mod numeric;
pub mod simulation;
pub mod stages;
pub mod traits;

pub use error::PhenologyError;
pub use forcing::{WeatherDay, WeatherSeries};
pub use simulation::{simulate, RunConfig};
pub use stages::{Stage, StageDates, StageDivisors, StageTable};
