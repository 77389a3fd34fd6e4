//! Cart types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of a cart resource on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub u64);

impl CartId {
    /// The cart the storefront displays
    pub const DEFAULT: CartId = CartId(1);
}

impl Default for CartId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cart as returned by the backend.
///
/// The body is kept as raw JSON; the storefront never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    body: Value,
}

impl Cart {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Two-space indented JSON
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_cart_id() {
        assert_eq!(CartId::default(), CartId(1));
        assert_eq!(CartId::DEFAULT.to_string(), "1");
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let cart = Cart::new(json!({ "id": 1, "products": [] }));
        assert_eq!(cart.to_pretty_json(), "{\n  \"id\": 1,\n  \"products\": []\n}");
    }
}
