use crate::{
    client::Client,
    config::Config,
    error::FieldOpsError,
    types::{Invoice, ListParams, Page},
};

/// API resource for the `/invoices` endpoint
pub struct Invoices<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Invoices<'c, C> {
    /// Creates a new Invoices resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch one page of invoices
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Invoice>, FieldOpsError> {
        self.client.get("/invoices", &params.to_query()).await
    }

    /// Fetch an invoice by id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Invoice, FieldOpsError> {
        self.client.get(&format!("/invoices/{id}"), &[]).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Invoices API resource
    #[must_use]
    pub const fn invoices(&self) -> Invoices<'_, C> {
        Invoices::new(self)
    }
}
