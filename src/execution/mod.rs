pub mod simulator;
pub mod slip;
pub mod types;
