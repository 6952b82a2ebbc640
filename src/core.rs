pub mod analysis;
pub mod carrier;
pub mod comparison;
pub mod counters;
pub mod emissions;
pub mod factors;
pub mod fleet;
pub mod metrics;
pub mod occupancy;
pub mod vehicle;
