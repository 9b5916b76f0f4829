//! Expose northdoc's internal API for use in integration tests. The command
//! line is the supported interface; nothing here is stable.
pub mod builder;
pub mod cli;
pub mod error;
pub mod html;
