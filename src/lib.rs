pub mod cli;
pub mod draws;
pub mod emax;
pub mod model;
pub mod parallel;
