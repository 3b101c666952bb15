pub mod export;
pub mod trips;
