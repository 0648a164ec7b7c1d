//! `nephrogo pages` – show how a list of `count` rows is paginated.

use anyhow::Result;
use nephrogo_core::reports::{page_param, Paginator};

/// Describes the selected page and its links. `raw_page` overrides any
/// `page` already present in `url`.
pub fn describe_page(
    per_page: usize,
    count: usize,
    raw_page: Option<&str>,
    url: &str,
) -> Result<Vec<String>> {
    let raw = raw_page.map(str::to_string).or_else(|| page_param(url));
    let page = Paginator::new(per_page).page((1..=count).collect::<Vec<_>>(), raw.as_deref())?;

    let mut lines = vec![format!(
        "page {} of {} ({} rows)",
        page.number, page.num_pages, page.count
    )];
    match (page.items.first(), page.items.last()) {
        (Some(first), Some(last)) => lines.push(format!("rows {first}-{last}")),
        _ => lines.push("rows none".to_string()),
    }
    if let Some(previous) = page.previous_url(url)? {
        lines.push(format!("previous {previous}"));
    }
    if let Some(next) = page.next_url(url)? {
        lines.push(format!("next {next}"));
    }
    Ok(lines)
}

pub fn run_pages(per_page: usize, count: usize, raw_page: Option<&str>, url: &str) -> Result<()> {
    for line in describe_page(per_page, count, raw_page, url)? {
        println!("{line}");
    }
    Ok(())
}
