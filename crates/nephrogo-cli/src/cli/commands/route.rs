//! `nephrogo route` – show where a request would be dispatched.

use anyhow::Result;
use nephrogo_core::config::NephrogoConfig;
use nephrogo_core::hosts::{Dispatch, HostRouter, DOCTOR_NAMESPACE};

pub fn describe_dispatch(dispatch: &Dispatch) -> String {
    match dispatch {
        Dispatch::Doctor(route) => format!("doctor  {}:{}", DOCTOR_NAMESPACE, route.name()),
        Dispatch::Api { path } => format!("api     {path}"),
        Dispatch::NotFound => "404     not found".to_string(),
    }
}

pub fn run_route(cfg: &NephrogoConfig, host: &str, path: &str) -> Result<()> {
    let router = HostRouter::from_config(&cfg.hosts)?;
    println!("{}", describe_dispatch(&router.dispatch(host, path)));
    Ok(())
}
