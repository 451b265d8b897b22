use serde::{Deserialize, Serialize};

/// Identifier of a storefront product, as issued by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_as_plain_integer() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();

        assert_eq!(json, "42");
    }

    #[test]
    fn should_display_inner_value() {
        assert_eq!(ProductId::from(7).to_string(), "7");
    }
}
