use crate::{
    client::Client,
    config::Config,
    error::FieldOpsError,
    types::{AppointmentSlot, AvailabilityQuery, Page},
};

/// API resource for the `/scheduling` endpoints
pub struct Scheduling<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Scheduling<'c, C> {
    /// Creates a new Scheduling resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List open appointment slots near a location
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns an error.
    pub async fn availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AppointmentSlot>, FieldOpsError> {
        let page: Page<AppointmentSlot> = self
            .client
            .get("/scheduling/availability", &query.to_query())
            .await?;
        Ok(page.data)
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Scheduling API resource
    #[must_use]
    pub const fn scheduling(&self) -> Scheduling<'_, C> {
        Scheduling::new(self)
    }
}
