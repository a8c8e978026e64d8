pub mod config;
pub mod startup;
pub mod utils;
pub mod web;

pub use utils::state;
