//! List pagination and page links.

use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

use crate::url_params::{add_url_params, UrlParams, UrlParamsError};

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page {0:?} is not a number")]
    Invalid(String),
    #[error("page {page} out of range (1..={num_pages})")]
    OutOfRange { page: usize, num_pages: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    /// `per_page` of 0 is treated as 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// An empty list still has one (empty) page.
    pub fn num_pages(&self, count: usize) -> usize {
        if count == 0 {
            1
        } else {
            count.div_ceil(self.per_page)
        }
    }

    /// Validates the raw `page` value: absent means 1, `last` means the last page.
    pub fn page_number(&self, raw: Option<&str>, count: usize) -> Result<usize, PaginationError> {
        let num_pages = self.num_pages(count);
        let page = match raw.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(s) => s
                .parse::<usize>()
                .map_err(|_| PaginationError::Invalid(s.to_string()))?,
        };
        if page == 0 || page > num_pages {
            return Err(PaginationError::OutOfRange { page, num_pages });
        }
        Ok(page)
    }

    pub fn page<T>(&self, items: Vec<T>, raw: Option<&str>) -> Result<Page<T>, PaginationError> {
        let count = items.len();
        let number = self.page_number(raw, count)?;
        let start = (number - 1) * self.per_page;
        let items = items.into_iter().skip(start).take(self.per_page).collect();
        Ok(Page {
            items,
            number,
            num_pages: self.num_pages(count),
            count,
        })
    }
}

/// One page of a list, 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    /// Total items across all pages.
    pub count: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// `current_url` with `page` set to the next page, keeping other parameters.
    pub fn next_url(&self, current_url: &str) -> Result<Option<String>, UrlParamsError> {
        if !self.has_next() {
            return Ok(None);
        }
        page_url(current_url, self.number + 1).map(Some)
    }

    pub fn previous_url(&self, current_url: &str) -> Result<Option<String>, UrlParamsError> {
        if !self.has_previous() {
            return Ok(None);
        }
        page_url(current_url, self.number - 1).map(Some)
    }
}

/// `url` with its `page` parameter replaced.
pub fn page_url(url: &str, page: usize) -> Result<String, UrlParamsError> {
    let mut params = UrlParams::new();
    params.insert(PAGE_PARAM.to_string(), Value::from(page));
    add_url_params(url, &params)
}

/// Raw `page` value of a request URL; the last occurrence wins.
pub fn page_param(request_url: &str) -> Option<String> {
    let without_fragment = request_url.split('#').next().unwrap_or_default();
    let (_, query) = without_fragment.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == PAGE_PARAM)
        .map(|(_, value)| value.into_owned())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_pages_rounds_up() {
        let p = Paginator::new(30);
        assert_eq!(p.num_pages(0), 1);
        assert_eq!(p.num_pages(30), 1);
        assert_eq!(p.num_pages(31), 2);
        assert_eq!(Paginator::new(0).per_page(), 1);
    }

    #[test]
    fn page_number_parsing() {
        let p = Paginator::new(30);
        assert_eq!(p.page_number(None, 31), Ok(1));
        assert_eq!(p.page_number(Some("2"), 31), Ok(2));
        assert_eq!(p.page_number(Some("last"), 31), Ok(2));
        assert_eq!(p.page_number(Some("last"), 0), Ok(1));
        assert_eq!(
            p.page_number(Some("3"), 31),
            Err(PaginationError::OutOfRange {
                page: 3,
                num_pages: 2
            })
        );
        assert_eq!(
            p.page_number(Some("0"), 31),
            Err(PaginationError::OutOfRange {
                page: 0,
                num_pages: 2
            })
        );
        assert_eq!(
            p.page_number(Some("two"), 31),
            Err(PaginationError::Invalid("two".to_string()))
        );
    }

    #[test]
    fn page_slices_items() {
        let p = Paginator::new(30);
        let page = p.page((0..31).collect::<Vec<_>>(), Some("2")).unwrap();
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages, 2);
        assert_eq!(page.count, 31);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn links_keep_other_params() {
        let p = Paginator::new(2);
        let page = p.page(vec![1, 2, 3, 4, 5], Some("2")).unwrap();
        let url = "/doctor/nutrition/?sort=date&page=2";
        assert_eq!(
            page.next_url(url).unwrap().as_deref(),
            Some("/doctor/nutrition/?sort=date&page=3")
        );
        assert_eq!(
            page.previous_url(url).unwrap().as_deref(),
            Some("/doctor/nutrition/?sort=date&page=1")
        );
    }

    #[test]
    fn no_links_on_single_page() {
        let page = Paginator::new(30).page(vec![1], None).unwrap();
        assert_eq!(page.next_url("/doctor/health/").unwrap(), None);
        assert_eq!(page.previous_url("/doctor/health/").unwrap(), None);
    }

    #[test]
    fn page_param_reads_last_value() {
        assert_eq!(page_param("/x/?page=2&page=3#page=9").as_deref(), Some("3"));
        assert_eq!(page_param("/x/?sort=date"), None);
        assert_eq!(page_param("/x/"), None);
    }
}
