//! Component split and reassembly for absolute URLs and relative references.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::error::UrlParamsError;

/// Bytes that cannot appear raw in a fragment. `%` is left alone so already
/// escaped sequences are not escaped twice.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Path additionally escapes braces.
const PATH: &AsciiSet = &FRAGMENT.add(b'{').add(b'}');

/// A URL (or relative reference) cut into its generic-syntax components.
///
/// Borrowed from the decoded input; `with_query` puts it back together with a
/// replacement query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SplitUrl<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: Option<&'a str>,
}

impl<'a> SplitUrl<'a> {
    /// Splits `input` and validates it when it carries a scheme or authority.
    pub fn parse(input: &'a str) -> Result<Self, UrlParamsError> {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (scheme, rest) = match split_scheme(rest) {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, rest),
        };
        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(&after[..end]), &after[end..])
            }
            None => (None, rest),
        };

        let split = SplitUrl {
            scheme,
            authority,
            path,
            query,
            fragment,
        };
        split.validate(input)?;
        Ok(split)
    }

    fn validate(&self, input: &str) -> Result<(), UrlParamsError> {
        let parsed = match (self.scheme, self.authority) {
            (Some(_), _) => url::Url::parse(input),
            // Scheme-relative: borrow a scheme so the authority gets checked.
            (None, Some(_)) => url::Url::parse(&format!("http:{input}")),
            (None, None) => return Ok(()),
        };
        parsed
            .map(drop)
            .map_err(|err| UrlParamsError::malformed(input, err))
    }

    /// Reassembles the URL around `query`. An empty query drops the `?`.
    pub fn with_query(&self, query: &str) -> String {
        let mut out = String::with_capacity(self.path.len() + query.len() + 32);
        if let Some(scheme) = self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(authority) = self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.extend(utf8_percent_encode(self.path, PATH));
        if !query.is_empty() {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.extend(utf8_percent_encode(fragment, FRAGMENT));
        }
        out
    }
}

/// `scheme ":" rest` when the text before the first colon is a valid scheme.
fn split_scheme(s: &str) -> Option<(&str, &str)> {
    let (candidate, rest) = s.split_once(':')?;
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some((candidate, rest))
    } else {
        None
    }
}
