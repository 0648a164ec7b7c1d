pub mod config;
pub mod logging;

pub mod hosts;
pub mod metrics;
pub mod reports;
pub mod text;
pub mod url_params;
