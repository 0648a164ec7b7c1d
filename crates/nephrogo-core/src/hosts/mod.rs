//! Host-based routing.
//!
//! The request host picks the URL configuration: `doctor.<parent>` serves the
//! doctor portal, everything else falls through to the API host. Patterns
//! are regexes anchored at the start of the host and must end at a label
//! boundary (`doctor` matches `doctor.nephrogo.com` but not `doctors.nephrogo.com`).

mod routes;

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::HostsConfig;

pub use routes::{DoctorRoute, DOCTOR_NAMESPACE, DOCTOR_PREFIX};

#[derive(Debug, Error)]
pub enum HostsError {
    #[error("invalid regex for host {name:?}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown host name {0:?} (expected \"doctor\" or \"api\")")]
    UnknownHost(String),
    #[error("default host {0:?} has no pattern")]
    MissingDefault(String),
    #[error("unknown route name {0:?}")]
    UnknownRoute(String),
    #[error("host {0:?} pattern is not a literal and cannot be reversed")]
    NotReversible(String),
}

/// URL configuration selected by the request host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Portal {
    Doctor,
    Api,
}

impl Portal {
    pub fn as_str(self) -> &'static str {
        match self {
            Portal::Doctor => "doctor",
            Portal::Api => "api",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = HostsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Portal::Doctor),
            "api" => Ok(Portal::Api),
            other => Err(HostsError::UnknownHost(other.to_string())),
        }
    }
}

/// Where a `(host, path)` request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Doctor(DoctorRoute),
    /// Handed to the API layer untouched.
    Api { path: String },
    NotFound,
}

#[derive(Debug)]
struct HostPattern {
    portal: Portal,
    source: String,
    regex: Regex,
}

#[derive(Debug)]
pub struct HostRouter {
    parent_host: String,
    default: Portal,
    patterns: Vec<HostPattern>,
}

impl HostRouter {
    pub fn from_config(cfg: &HostsConfig) -> Result<Self, HostsError> {
        let mut patterns = Vec::with_capacity(cfg.patterns.len());
        for p in &cfg.patterns {
            let portal: Portal = p.name.parse()?;
            let regex = Regex::new(&format!(r"^(?:{})(?:\.|$)", p.regex)).map_err(|source| {
                HostsError::InvalidPattern {
                    name: p.name.clone(),
                    source,
                }
            })?;
            patterns.push(HostPattern {
                portal,
                source: p.regex.clone(),
                regex,
            });
        }

        let default: Portal = cfg.default_host.parse()?;
        if !patterns.iter().any(|p| p.portal == default) {
            return Err(HostsError::MissingDefault(cfg.default_host.clone()));
        }

        Ok(Self {
            parent_host: cfg.parent_host.trim_matches('.').to_ascii_lowercase(),
            default,
            patterns,
        })
    }

    /// Portal for a `Host` header value (port and case ignored).
    pub fn match_host(&self, host: &str) -> Portal {
        let host = strip_port(host.trim()).to_ascii_lowercase();
        if host.is_empty() {
            return self.default;
        }
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(&host))
            .map(|p| p.portal)
            .unwrap_or(self.default)
    }

    pub fn dispatch(&self, host: &str, path: &str) -> Dispatch {
        let portal = self.match_host(host);
        let dispatch = match portal {
            Portal::Doctor => DoctorRoute::resolve(path)
                .map(Dispatch::Doctor)
                .unwrap_or(Dispatch::NotFound),
            Portal::Api => Dispatch::Api {
                path: path.to_string(),
            },
        };
        tracing::debug!(host, path, %portal, ?dispatch, "dispatched request");
        dispatch
    }

    /// Full host name for `portal`, e.g. `doctor.nephrogo.com`.
    pub fn host_for(&self, portal: Portal) -> Result<String, HostsError> {
        let pattern = self
            .patterns
            .iter()
            .find(|p| p.portal == portal)
            .ok_or_else(|| HostsError::UnknownHost(portal.to_string()))?;
        if regex::escape(&pattern.source) != pattern.source {
            return Err(HostsError::NotReversible(pattern.source.clone()));
        }
        if self.parent_host.is_empty() {
            Ok(pattern.source.clone())
        } else {
            Ok(format!("{}.{}", pattern.source, self.parent_host))
        }
    }

    /// Absolute URL for a qualified route name such as `doctor:nutrition`.
    ///
    /// Without a scheme the result is scheme-relative (`//doctor.nephrogo.com/doctor/`).
    pub fn reverse(&self, route_name: &str, scheme: Option<&str>) -> Result<String, HostsError> {
        let route = DoctorRoute::from_qualified_name(route_name)
            .ok_or_else(|| HostsError::UnknownRoute(route_name.to_string()))?;
        let host = self.host_for(Portal::Doctor)?;
        Ok(match scheme {
            Some(scheme) => format!("{}://{}{}", scheme, host, route.path()),
            None => format!("//{}{}", host, route.path()),
        })
    }
}

/// Drops a trailing `:port`, leaving bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
