pub mod config;
pub mod error;
pub mod hours;
pub mod input;
pub mod output;
pub mod ratings;
pub mod time;
