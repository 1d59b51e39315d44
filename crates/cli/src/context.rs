//! Shared construction of the API client and the stores.

use minimarket_api::{ApiClient, ApiConfig};
use minimarket_storefront::{
    CartStore, CatalogStore, CheckoutFlow, SessionStore, StorefrontConfig,
};

/// Everything a command needs, built once per invocation.
///
/// The session store restores any persisted session (installing its token
/// on the client) and the cart store restores the persisted cart, so each
/// invocation picks up where the previous one left off.
pub struct AppContext {
    pub client: ApiClient,
    pub session: SessionStore,
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub checkout: CheckoutFlow,
}

impl AppContext {
    pub async fn new(config: &ApiConfig) -> Self {
        let client = ApiClient::new(config);
        let storage = StorefrontConfig::from_env().storage();
        let session = SessionStore::new(client.clone(), storage.clone()).await;
        let catalog = CatalogStore::new(client.clone());
        let cart = CartStore::new(storage);
        let checkout = CheckoutFlow::new(
            client.clone(),
            cart.clone(),
            catalog.clone(),
            session.clone(),
        );

        Self {
            client,
            session,
            catalog,
            cart,
            checkout,
        }
    }
}
