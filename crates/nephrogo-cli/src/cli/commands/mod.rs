//! CLI command handlers, one per file.

mod ascii;
mod gauge;
mod pages;
mod params;
mod reverse;
mod route;

pub use ascii::{ascii_text, run_ascii};
pub use gauge::run_gauge;
pub use pages::{describe_page, run_pages};
pub use params::{build_params, run_params};
pub use reverse::{reverse_url, run_reverse};
pub use route::{describe_dispatch, run_route};
