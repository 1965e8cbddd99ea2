use crate::{
    client::Client,
    config::Config,
    error::FieldOpsError,
    types::{Job, ListParams, NewJob, Page},
};

/// API resource for the `/jobs` endpoint
pub struct Jobs<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Jobs<'c, C> {
    /// Creates a new Jobs resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch one page of jobs
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Job>, FieldOpsError> {
        self.client.get("/jobs", &params.to_query()).await
    }

    /// Fetch a job by id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn get(&self, id: &str) -> Result<Job, FieldOpsError> {
        self.client.get(&format!("/jobs/{id}"), &[]).await
    }

    /// Create a job
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn create(&self, job: NewJob) -> Result<Job, FieldOpsError> {
        self.client.post("/jobs", job).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Jobs API resource
    #[must_use]
    pub const fn jobs(&self) -> Jobs<'_, C> {
        Jobs::new(self)
    }
}
