pub mod knowledge;
pub mod logging;
pub mod prompt;
pub mod session;
