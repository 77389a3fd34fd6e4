//! Cart display

use crate::CartSource;
use std::fmt;
use types::{Cart, CartId};

/// Heading printed above the cart
pub const CART_HEADING: &str = "Cart";

/// The cart view: a heading and, once fetched, the raw cart JSON.
///
/// Fetch failures are logged and leave the view empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartDisplay {
    cart: Option<Cart>,
}

impl CartDisplay {
    /// Fetch the default cart exactly once
    pub async fn load(source: &dyn CartSource) -> Self {
        Self::load_cart(source, CartId::DEFAULT).await
    }

    pub async fn load_cart(source: &dyn CartSource, id: CartId) -> Self {
        match source.fetch_cart(id).await {
            Ok(cart) => Self { cart: Some(cart) },
            Err(e) => {
                tracing::error!(source = source.name(), cart_id = %id, error = %e, "Failed to load cart");
                Self::default()
            }
        }
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CartDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", CART_HEADING)?;
        if let Some(cart) = &self.cart {
            writeln!(f, "{}", cart.to_pretty_json())?;
        }
        Ok(())
    }
}
