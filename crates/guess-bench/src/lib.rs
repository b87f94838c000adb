pub mod config;
pub mod logging;
pub mod oracle;
pub mod report;
pub mod runner;
