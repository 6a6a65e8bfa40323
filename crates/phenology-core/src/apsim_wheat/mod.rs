/// APSIM wheat phenology accumulator.
///
/// Turns daily maximum/minimum temperature into crown temperature, thermal
/// time, vernalisation and photoperiod responses for one sowing, with an
/// emergence latch driven by sowing depth.
pub mod constants;
pub mod params;
pub mod processes;
pub mod records;
pub mod run;
pub mod state;
