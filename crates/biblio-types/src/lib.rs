pub mod clock;
pub mod config;
pub mod general;
pub mod identity;
