//! `nephrogo reverse` – absolute URL for a named doctor route.

use anyhow::Result;
use nephrogo_core::config::NephrogoConfig;
use nephrogo_core::hosts::HostRouter;
use nephrogo_core::reports::page_url;

pub fn reverse_url(
    cfg: &NephrogoConfig,
    name: &str,
    scheme: Option<&str>,
    page: Option<usize>,
) -> Result<String> {
    let router = HostRouter::from_config(&cfg.hosts)?;
    let url = router.reverse(name, scheme)?;
    Ok(match page {
        Some(page) => page_url(&url, page)?,
        None => url,
    })
}

pub fn run_reverse(
    cfg: &NephrogoConfig,
    name: &str,
    scheme: Option<&str>,
    page: Option<usize>,
) -> Result<()> {
    println!("{}", reverse_url(cfg, name, scheme, page)?);
    Ok(())
}
