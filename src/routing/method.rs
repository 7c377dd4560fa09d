//! HTTP methods that can carry route settings.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use axum::routing::MethodFilter;
use serde::{Deserialize, Serialize};

use crate::error::RouteExtError;

/// The closed set of methods a route can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Options,
    ];

    /// Upper-case wire name, as used in route index keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        }
    }

    pub(crate) fn filter(&self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Delete => MethodFilter::DELETE,
            HttpMethod::Head => MethodFilter::HEAD,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Options => MethodFilter::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouteExtError;

    /// Method names are matched exactly; `get` is not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RouteExtError::UnsupportedMethod(s.to_string()))
    }
}

impl TryFrom<&Method> for HttpMethod {
    type Error = RouteExtError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_methods() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>(), Ok(method));
        }
        assert_eq!(HttpMethod::try_from(&Method::PATCH), Ok(HttpMethod::Patch));
    }

    #[test]
    fn test_parse_unsupported_method() {
        let err = "TRACE".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err, RouteExtError::UnsupportedMethod("TRACE".into()));
        assert_eq!(err.to_string(), "Route method is not supported: TRACE");

        assert!("get".parse::<HttpMethod>().is_err());
        assert!(HttpMethod::try_from(&Method::CONNECT).is_err());
    }

    #[test]
    fn test_serializes_as_wire_name() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }
}
