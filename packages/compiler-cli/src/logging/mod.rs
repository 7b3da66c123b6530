//! Logging
//!
//! Leveled logging shared by the converter and the command line driver.

pub mod src {
    pub mod console_logger;
    pub mod logger;
}

pub use src::console_logger::ConsoleLogger;
pub use src::logger::{LogLevel, Logger, NullLogger};
