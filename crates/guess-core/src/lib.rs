#![deny(warnings)]
pub mod engine;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "mdguess"
    }

    pub const fn codename() -> &'static str {
        "Dynamic Learner"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
