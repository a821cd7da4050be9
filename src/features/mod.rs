pub mod geo;
pub mod messaging;
