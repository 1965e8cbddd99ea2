use crate::{
    client::Client,
    config::Config,
    error::FieldOpsError,
    types::{ListParams, Page, Territory},
};

/// API resource for the `/territories` endpoint
pub struct Territories<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Territories<'c, C> {
    /// Creates a new Territories resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch every territory in a single unpaginated call
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the request fails, or the API
    /// returns a non-success status.
    pub async fn list_all(&self) -> Result<Vec<Territory>, FieldOpsError> {
        let page: Page<Territory> = self.client.get("/territories", &[]).await?;
        Ok(page.data)
    }

    /// Fetch one page of territories
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Territory>, FieldOpsError> {
        self.client.get("/territories", &params.to_query()).await
    }

    /// Fetch a territory by id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Territory, FieldOpsError> {
        self.client.get(&format!("/territories/{id}"), &[]).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Territories API resource
    #[must_use]
    pub const fn territories(&self) -> Territories<'_, C> {
        Territories::new(self)
    }
}
