/// Simulation: level loading, the map, the per-tick step and its events.

pub mod event;
pub mod level;
pub mod map;
pub mod step;
pub mod world;
