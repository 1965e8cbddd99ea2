//! Tool wrappers over [`FieldOpsTools`].
//!
//! Every tool resolves the REST client from the caller's credential before
//! doing anything else, so a missing credential never reaches the network.

use crate::FieldOpsTools;
use crate::models::{
    AdjacencyResult, AppointmentsResult, CoverageReport, Listing, Record,
};
use chrono::NaiveDate;
use fieldops_async::FieldOpsError;
use fieldops_async::types::{Customer, Invoice, Job, ListParams, Territory};
use fieldops_tool_core::{Tool, ToolContext, ToolError, ToolRegistry};
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use territory_coverage::{CoverageError, GeocodingError};

// ============================================================================
// CheckTerritoryCoverage Tool
// ============================================================================

/// Input for check_territory_coverage tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckTerritoryCoverageInput {
    /// Street address to check, e.g. "2800 1st Ave N, Billings, MT"
    pub address: String,
}

/// Decides whether an address falls inside an active service territory.
#[derive(Clone)]
pub struct CheckTerritoryCoverageTool {
    fieldops: Arc<FieldOpsTools>,
}

impl CheckTerritoryCoverageTool {
    /// Tool sharing the given settings
    pub const fn new(fieldops: Arc<FieldOpsTools>) -> Self {
        Self { fieldops }
    }
}

impl Tool for CheckTerritoryCoverageTool {
    type Input = CheckTerritoryCoverageInput;
    type Output = CoverageReport;
    const NAME: &'static str = "check_territory_coverage";
    const DESCRIPTION: &'static str = "Check whether an address falls inside an active service territory. \
         Returns the covering territory, or the closest territory and its distance when not covered.";

    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let fieldops = Arc::clone(&self.fieldops);
        let client = fieldops.client_for(ctx);
        Box::pin(async move { fieldops.check_coverage(client?, &input.address).await })
    }
}

// ============================================================================
// CheckAdjacentTerritories Tool
// ============================================================================

/// Input for check_adjacent_territories tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckAdjacentTerritoriesInput {
    /// Street address to search around
    pub address: String,
    /// Search radius in miles (default 50, must be > 0 and at most 500)
    #[serde(default)]
    pub radius_miles: Option<f64>,
}

/// Lists active territories near an address.
#[derive(Clone)]
pub struct CheckAdjacentTerritoriesTool {
    fieldops: Arc<FieldOpsTools>,
}

impl CheckAdjacentTerritoriesTool {
    /// Tool sharing the given settings
    pub const fn new(fieldops: Arc<FieldOpsTools>) -> Self {
        Self { fieldops }
    }
}

impl Tool for CheckAdjacentTerritoriesTool {
    type Input = CheckAdjacentTerritoriesInput;
    type Output = AdjacencyResult;
    const NAME: &'static str = "check_adjacent_territories";
    const DESCRIPTION: &'static str =
        "List active territories whose center lies within a radius of an address, nearest first";

    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let fieldops = Arc::clone(&self.fieldops);
        let client = fieldops.client_for(ctx);
        Box::pin(async move {
            fieldops
                .adjacent_territories(client?, &input.address, input.radius_miles)
                .await
        })
    }
}

// ============================================================================
// GetAvailableAppointments Tool
// ============================================================================

/// Input for get_available_appointments tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetAvailableAppointmentsInput {
    /// Service address
    pub address: String,
    /// First day to search, YYYY-MM-DD (default: today)
    #[serde(default)]
    pub date: Option<String>,
    /// Appointment length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Number of days to search
    #[serde(default)]
    pub days: Option<u32>,
}

/// Returns open appointment slots for an address.
#[derive(Clone)]
pub struct GetAvailableAppointmentsTool {
    fieldops: Arc<FieldOpsTools>,
}

impl GetAvailableAppointmentsTool {
    /// Tool sharing the given settings
    pub const fn new(fieldops: Arc<FieldOpsTools>) -> Self {
        Self { fieldops }
    }
}

impl Tool for GetAvailableAppointmentsTool {
    type Input = GetAvailableAppointmentsInput;
    type Output = AppointmentsResult;
    const NAME: &'static str = "get_available_appointments";
    const DESCRIPTION: &'static str = "Find open appointment slots near an address";

    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let fieldops = Arc::clone(&self.fieldops);
        let client = fieldops.client_for(ctx);
        Box::pin(async move {
            let client = client?;
            let date = input.date.as_deref().map(parse_date).transpose()?;
            fieldops
                .available_appointments(client, &input.address, |mut q| {
                    q.date = date;
                    q.duration_minutes = input.duration_minutes;
                    q.days = input.days;
                    q
                })
                .await
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ToolError::invalid_input(format!("date must be YYYY-MM-DD, got {s:?}: {e}")))
}

// ============================================================================
// CRUD passthrough tools
// ============================================================================

/// Paging and search for territory and customer lists.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchPageInput {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (default 25, max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Free-text search
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchPageInput {
    fn params(self) -> ListParams {
        ListParams {
            page: self.page,
            per_page: self.per_page,
            search: self.search,
            status: None,
        }
    }
}

/// Paging, search and status filter for job and invoice lists.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FilteredPageInput {
    /// Page number, starting at 1
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size (default 25, max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Free-text search
    #[serde(default)]
    pub search: Option<String>,
    /// Status filter, e.g. "scheduled" for jobs or "paid" for invoices
    #[serde(default)]
    pub status: Option<String>,
}

impl FilteredPageInput {
    fn params(self) -> ListParams {
        ListParams {
            page: self.page,
            per_page: self.per_page,
            search: self.search,
            status: self.status,
        }
    }
}

/// Input for the get_* tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetByIdInput {
    /// Record identifier
    pub id: String,
}

impl GetByIdInput {
    fn validated(&self) -> Result<String, ToolError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ToolError::invalid_input("id must not be empty"));
        }
        if id.contains(['/', '?', '#']) {
            return Err(ToolError::invalid_input(format!("invalid id: {id:?}")));
        }
        Ok(id.to_string())
    }
}

/// Declares a list tool and a get tool for one REST resource.
macro_rules! passthrough_tools {
    (
        $resource:ident, $record:ty, $list_input:ty,
        $list_tool:ident = $list_name:literal, $list_desc:literal,
        $get_tool:ident = $get_name:literal, $get_desc:literal
    ) => {
        #[doc = $list_desc]
        #[derive(Clone)]
        pub struct $list_tool {
            fieldops: Arc<FieldOpsTools>,
        }

        impl $list_tool {
            /// Tool sharing the given settings
            pub const fn new(fieldops: Arc<FieldOpsTools>) -> Self {
                Self { fieldops }
            }
        }

        impl Tool for $list_tool {
            type Input = $list_input;
            type Output = Listing<$record>;
            const NAME: &'static str = $list_name;
            const DESCRIPTION: &'static str = $list_desc;

            fn call(
                &self,
                input: Self::Input,
                ctx: &ToolContext,
            ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
                let client = self.fieldops.client_for(ctx);
                Box::pin(async move {
                    let client = client?;
                    client
                        .$resource()
                        .list(&input.params())
                        .await
                        .map(Listing)
                        .map_err(map_rest_error)
                })
            }
        }

        #[doc = $get_desc]
        #[derive(Clone)]
        pub struct $get_tool {
            fieldops: Arc<FieldOpsTools>,
        }

        impl $get_tool {
            /// Tool sharing the given settings
            pub const fn new(fieldops: Arc<FieldOpsTools>) -> Self {
                Self { fieldops }
            }
        }

        impl Tool for $get_tool {
            type Input = GetByIdInput;
            type Output = Record<$record>;
            const NAME: &'static str = $get_name;
            const DESCRIPTION: &'static str = $get_desc;

            fn call(
                &self,
                input: Self::Input,
                ctx: &ToolContext,
            ) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
                let client = self.fieldops.client_for(ctx);
                Box::pin(async move {
                    let client = client?;
                    let id = input.validated()?;
                    client
                        .$resource()
                        .get(&id)
                        .await
                        .map(Record)
                        .map_err(map_rest_error)
                })
            }
        }
    };
}

passthrough_tools!(
    territories, Territory, SearchPageInput,
    ListTerritoriesTool = "list_territories", "List service territories (one page)",
    GetTerritoryTool = "get_territory", "Get a service territory by id"
);

passthrough_tools!(
    jobs, Job, FilteredPageInput,
    ListJobsTool = "list_jobs", "List jobs (one page), optionally filtered by status or search term",
    GetJobTool = "get_job", "Get a job by id"
);

passthrough_tools!(
    customers, Customer, SearchPageInput,
    ListCustomersTool = "list_customers", "List customers (one page), optionally filtered by search term",
    GetCustomerTool = "get_customer", "Get a customer by id"
);

passthrough_tools!(
    invoices, Invoice, FilteredPageInput,
    ListInvoicesTool = "list_invoices", "List invoices (one page), optionally filtered by status or search term",
    GetInvoiceTool = "get_invoice", "Get an invoice by id"
);

// ============================================================================
// Registry
// ============================================================================

/// Registry with every FieldOps tool.
pub fn build_registry(fieldops: Arc<FieldOpsTools>) -> ToolRegistry {
    ToolRegistry::builder()
        .register::<CheckTerritoryCoverageTool, ()>(CheckTerritoryCoverageTool::new(Arc::clone(&fieldops)))
        .register::<CheckAdjacentTerritoriesTool, ()>(CheckAdjacentTerritoriesTool::new(Arc::clone(&fieldops)))
        .register::<GetAvailableAppointmentsTool, ()>(GetAvailableAppointmentsTool::new(Arc::clone(&fieldops)))
        .register::<ListTerritoriesTool, ()>(ListTerritoriesTool::new(Arc::clone(&fieldops)))
        .register::<GetTerritoryTool, ()>(GetTerritoryTool::new(Arc::clone(&fieldops)))
        .register::<ListJobsTool, ()>(ListJobsTool::new(Arc::clone(&fieldops)))
        .register::<GetJobTool, ()>(GetJobTool::new(Arc::clone(&fieldops)))
        .register::<ListCustomersTool, ()>(ListCustomersTool::new(Arc::clone(&fieldops)))
        .register::<GetCustomerTool, ()>(GetCustomerTool::new(Arc::clone(&fieldops)))
        .register::<ListInvoicesTool, ()>(ListInvoicesTool::new(Arc::clone(&fieldops)))
        .register::<GetInvoiceTool, ()>(GetInvoiceTool::new(fieldops))
        .finish()
}

// ============================================================================
// Error Conversion
// ============================================================================

fn status_error(status: u16, message: String) -> ToolError {
    match status {
        401 | 403 => ToolError::Permission(message),
        404 => ToolError::NotFound(message),
        _ => ToolError::External(message),
    }
}

/// Map a REST client error to a tool error by variant.
pub(crate) fn map_rest_error(e: FieldOpsError) -> ToolError {
    let msg = e.to_string();
    match e {
        FieldOpsError::MissingCredential => ToolError::Permission(msg),
        FieldOpsError::Api(obj) => status_error(obj.status_code.unwrap_or_default(), msg),
        FieldOpsError::Reqwest(_) | FieldOpsError::Serde(_) => ToolError::External(msg),
        FieldOpsError::Config(_) => ToolError::Internal(msg),
    }
}

/// Map an address lookup failure to a tool error by variant.
pub(crate) fn map_geocoding_error(e: GeocodingError) -> ToolError {
    let msg = e.to_string();
    match e {
        GeocodingError::EmptyAddress => ToolError::InvalidInput(msg),
        GeocodingError::NoResults { .. } => ToolError::NotFound(msg),
        GeocodingError::Upstream { .. } | GeocodingError::Http(_) | GeocodingError::Parse(_) => {
            ToolError::External(msg)
        }
    }
}

/// Map a coverage or adjacency failure to a tool error by variant.
pub(crate) fn map_coverage_error(e: CoverageError) -> ToolError {
    let msg = e.to_string();
    match e {
        CoverageError::MissingCredential => ToolError::Permission(msg),
        CoverageError::Geocoding(g) => map_geocoding_error(g),
        CoverageError::UpstreamApi { status, .. } => status_error(status, msg),
        CoverageError::Fetch(_) => ToolError::External(msg),
        CoverageError::InvalidRadius { .. } => ToolError::InvalidInput(msg),
    }
}
