// Timeline engines and configuration services

pub mod config;
pub mod gesture;
pub mod layout;
pub mod timescale;
