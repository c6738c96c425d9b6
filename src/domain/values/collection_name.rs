use crate::domain::error::DomainError;
use std::fmt;
use std::net::Ipv4Addr;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 63;

/// A collection name accepted by the store.
///
/// Rules: 3-63 characters from `[A-Za-z0-9._-]`, alphanumeric at both ends,
/// no `..`, and not an IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| {
            DomainError::InvalidCollectionName(format!("'{name}': {reason}"))
        };

        let len = name.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(invalid(&format!(
                "expected between {MIN_LEN} and {MAX_LEN} characters, got {len}"
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(invalid("only alphanumerics, '.', '_' and '-' are allowed"));
        }
        let first = name.chars().next().unwrap_or('.');
        let last = name.chars().last().unwrap_or('.');
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(invalid("must start and end with an alphanumeric character"));
        }
        if name.contains("..") {
            return Err(invalid("must not contain two consecutive periods"));
        }
        if name.parse::<Ipv4Addr>().is_ok() {
            return Err(invalid("must not be a valid IPv4 address"));
        }
        Ok(CollectionName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
