//! Share links: the four estimate fields encoded into a page URL.
//!
//! A link is `{origin}/?rs=..&rc=..&ls=..&lc=..` carrying the raw field text.
//! Axis is never part of a link.

use std::fmt;

use serde::Serialize;

use crate::models::{Field, RefractionInput};

/// Scheme plus authority of the page, e.g. `https://example.com:8443`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Origin(String);

/// Text that is not an absolute http(s) origin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an absolute http(s) origin: '{0}'")]
pub struct InvalidOrigin(pub String);

impl Origin {
    /// Parse `http://host[:port]` or `https://host[:port]`. A single trailing
    /// slash is tolerated; any other path is rejected.
    pub fn parse(text: &str) -> Result<Self, InvalidOrigin> {
        let trimmed = text.trim();
        let (scheme, rest) = trimmed
            .split_once("://")
            .ok_or_else(|| InvalidOrigin(text.to_string()))?;
        let host = rest.strip_suffix('/').unwrap_or(rest);
        Self::from_parts(scheme, host).map_err(|_| InvalidOrigin(text.to_string()))
    }

    /// Build an origin from a scheme and a `Host` header value.
    pub fn from_parts(scheme: &str, host: &str) -> Result<Self, InvalidOrigin> {
        let scheme = scheme.to_ascii_lowercase();
        let valid_scheme = scheme == "http" || scheme == "https";
        let valid_host = !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']' | '_'));
        if !valid_scheme || !valid_host {
            return Err(InvalidOrigin(format!("{scheme}://{host}")));
        }
        Ok(Self(format!("{scheme}://{host}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute URL that reopens the form with the same four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShareLink(String);

impl ShareLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four raw field strings a link carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedInputs {
    pub rs: String,
    pub rc: String,
    pub ls: String,
    pub lc: String,
}

impl SharedInputs {
    pub fn from_eyes(right: &RefractionInput, left: &RefractionInput) -> Self {
        Self {
            rs: right.sphere.clone(),
            rc: right.cylinder.clone(),
            ls: left.sphere.clone(),
            lc: left.cylinder.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::RightSphere => &self.rs,
            Field::RightCylinder => &self.rc,
            Field::LeftSphere => &self.ls,
            Field::LeftCylinder => &self.lc,
        }
    }

    /// Form-urlencoded query string, keys in `rs, rc, ls, lc` order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for field in Field::ALL {
            serializer.append_pair(field.query_key(), self.get(field));
        }
        serializer.finish()
    }
}

/// Share-link parameters as read from a page query. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareQuery {
    pub rs: Option<String>,
    pub rc: Option<String>,
    pub ls: Option<String>,
    pub lc: Option<String>,
}

impl ShareQuery {
    /// Read the parameters from a raw query string (without the leading `?`).
    /// Unknown keys are ignored; on repeated keys the last one wins.
    pub fn from_query_str(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "rs" => &mut out.rs,
                "rc" => &mut out.rc,
                "ls" => &mut out.ls,
                "lc" => &mut out.lc,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        out
    }

    /// All four fields, or `None` when any is missing.
    pub fn complete(&self) -> Option<SharedInputs> {
        Some(SharedInputs {
            rs: self.rs.clone()?,
            rc: self.rc.clone()?,
            ls: self.ls.clone()?,
            lc: self.lc.clone()?,
        })
    }
}

/// Link reopening the form at `origin` with the given fields.
pub fn share_link(origin: &Origin, inputs: &SharedInputs) -> ShareLink {
    ShareLink(format!("{}/?{}", origin, inputs.to_query_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(rs: &str, rc: &str, ls: &str, lc: &str) -> SharedInputs {
        SharedInputs {
            rs: rs.into(),
            rc: rc.into(),
            ls: ls.into(),
            lc: lc.into(),
        }
    }

    #[test]
    fn test_origin_parse() {
        assert_eq!(
            Origin::parse("https://example.com/").unwrap().as_str(),
            "https://example.com"
        );
        assert_eq!(
            Origin::parse("HTTP://localhost:8080").unwrap().as_str(),
            "http://localhost:8080"
        );
        assert!(Origin::parse("example.com").is_err());
        assert!(Origin::parse("ftp://example.com").is_err());
        assert!(Origin::parse("https://example.com/path").is_err());
        assert!(Origin::parse("https://").is_err());
    }

    #[test]
    fn test_origin_from_host_header_rejects_markup() {
        assert!(Origin::from_parts("http", "evil.com\"><script>").is_err());
        assert!(Origin::from_parts("http", "[::1]:8080").is_ok());
    }

    #[test]
    fn test_share_link_format() {
        let origin = Origin::parse("https://example.com").unwrap();
        let link = share_link(&origin, &inputs("-0.50", "-2.00", "-0.75", "-1.75"));
        assert_eq!(
            link.as_str(),
            "https://example.com/?rs=-0.50&rc=-2.00&ls=-0.75&lc=-1.75"
        );
    }

    #[test]
    fn test_share_link_escapes_raw_text() {
        let origin = Origin::parse("http://localhost:8080").unwrap();
        let link = share_link(&origin, &inputs("+1.00", "a&b", "", "1 2"));
        assert_eq!(
            link.as_str(),
            "http://localhost:8080/?rs=%2B1.00&rc=a%26b&ls=&lc=1+2"
        );
    }

    #[test]
    fn test_query_round_trip() {
        let original = inputs("+1.00", "a&b=c", "", "-0.25 ");
        let query = ShareQuery::from_query_str(&original.to_query_string());
        assert_eq!(query.complete(), Some(original));
    }

    #[test]
    fn test_incomplete_query_does_not_load() {
        let query = ShareQuery::from_query_str("rs=-1.00&rc=-0.50&ls=-1.00&ra=90");
        assert_eq!(query.lc, None);
        assert!(query.complete().is_none());
    }

    #[test]
    fn test_repeated_keys_last_one_wins() {
        let query = ShareQuery::from_query_str("rs=1&rs=-1.00&rc=0&ls=0&lc=0&lc=-0.50");
        assert_eq!(query.complete(), Some(inputs("-1.00", "0", "0", "-0.50")));
    }

    #[test]
    fn test_empty_values_count_as_present() {
        let query = ShareQuery::from_query_str("rs=&rc=&ls=&lc=");
        assert_eq!(query.complete(), Some(inputs("", "", "", "")));
    }
}
