//! Cart source trait

use async_trait::async_trait;
use types::{Cart, CartError, CartId};

/// Anything that can produce a cart by id
#[async_trait]
pub trait CartSource: Send + Sync {
    /// Fetch a single cart. Called at most once per display.
    async fn fetch_cart(&self, id: CartId) -> Result<Cart, CartError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
