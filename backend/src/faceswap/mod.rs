pub mod client;
pub mod random;
pub mod service;
