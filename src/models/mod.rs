pub mod activity_log;
pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod filters;
pub mod patient;
pub mod profile;

pub use activity_log::*;
pub use appointment::*;
pub use doctor::*;
pub use enums::*;
pub use filters::*;
pub use patient::*;
pub use profile::*;
