//! CLI command implementations

mod doctor;
mod sign;

pub use doctor::DoctorCommand;
pub use sign::SignCommand;
