use crate::{
    client::Client,
    config::Config,
    error::FieldOpsError,
    types::{Customer, ListParams, Page},
};

/// API resource for the `/customers` endpoint
pub struct Customers<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Customers<'c, C> {
    /// Creates a new Customers resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch one page of customers
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Customer>, FieldOpsError> {
        self.client.get("/customers", &params.to_query()).await
    }

    /// Fetch a customer by id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Customer, FieldOpsError> {
        self.client.get(&format!("/customers/{id}"), &[]).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Customers API resource
    #[must_use]
    pub const fn customers(&self) -> Customers<'_, C> {
        Customers::new(self)
    }
}
