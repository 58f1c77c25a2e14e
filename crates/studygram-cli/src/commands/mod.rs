pub mod assistant;
pub mod config;
pub mod goal;
pub mod timer;
