//! SEC EDGAR company facts client.

use super::facts::CompanyFacts;
use crate::cik::Cik;
use crate::error::{DataError, Result};
use std::future::Future;
use tracing::{debug, warn};

/// Default company facts endpoint. `{cik}` is replaced by the 10-digit CIK.
pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "https://data.sec.gov/api/xbrl/companyfacts/CIK{cik}.json";

/// User agent for SEC EDGAR requests (SEC requires identifying information)
pub const DEFAULT_USER_AGENT: &str = "factsheet/0.1 (contact@example.com)";

/// Placeholder substituted with the CIK in endpoint templates.
pub const CIK_PLACEHOLDER: &str = "{cik}";

/// Anything that can produce a company facts document for a CIK.
///
/// `None` means the facts are unavailable for that company (failed request,
/// non-success status, unreadable body). Implementations never fail the caller.
pub trait FactsSource {
    /// Fetch the facts document for one company.
    fn company_facts(&self, cik: &Cik) -> impl Future<Output = Option<CompanyFacts>> + Send;
}

/// HTTP client for the company facts endpoint.
///
/// One attempt per call: no retries, no backoff and the transport's default
/// timeout. Pacing between calls is the caller's business.
pub struct EdgarClient {
    client: reqwest::Client,
    endpoint_template: String,
}

impl EdgarClient {
    /// Create a client for the public SEC endpoint with the default identity.
    pub fn new() -> Result<Self> {
        Self::with_identity(DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_USER_AGENT)
    }

    /// Create a client with a custom endpoint template and User-Agent.
    ///
    /// The SEC rejects anonymous traffic, so the user agent should name the
    /// requester, e.g. `"Company Name contact@email.com"`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidTemplate` if the template has no `{cik}`.
    ///
    /// # Example
    /// ```no_run
    /// use factsheet_data::edgar::EdgarClient;
    ///
    /// # fn example() -> factsheet_data::Result<()> {
    /// let client = EdgarClient::with_identity(
    ///     "https://data.sec.gov/api/xbrl/companyfacts/CIK{cik}.json",
    ///     "Example Corp research@example.com",
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_identity(endpoint_template: impl Into<String>, user_agent: &str) -> Result<Self> {
        let endpoint_template = endpoint_template.into();
        if !endpoint_template.contains(CIK_PLACEHOLDER) {
            return Err(DataError::InvalidTemplate(format!(
                "{} is missing {}",
                endpoint_template, CIK_PLACEHOLDER
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            endpoint_template,
        })
    }

    /// URL of the facts document for a CIK.
    pub fn facts_url(&self, cik: &Cik) -> String {
        self.endpoint_template.replace(CIK_PLACEHOLDER, cik.as_str())
    }

    /// Fetch and parse the facts document for a CIK.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Network` if the request fails, `DataError::Http` on a
    /// non-success status and `DataError::Parse` if the body is not a facts
    /// document.
    pub async fn fetch_company_facts(&self, cik: &Cik) -> Result<CompanyFacts> {
        let url = self.facts_url(cik);
        debug!(%cik, %url, "fetching company facts");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "SEC API returned status {} for CIK {}",
                response.status(),
                cik
            )));
        }

        let json = response.text().await?;
        CompanyFacts::parse_json(&json)
    }
}

impl FactsSource for EdgarClient {
    async fn company_facts(&self, cik: &Cik) -> Option<CompanyFacts> {
        match self.fetch_company_facts(cik).await {
            Ok(facts) => Some(facts),
            Err(e) => {
                warn!(%cik, error = %e, "company facts unavailable");
                None
            }
        }
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("endpoint_template", &self.endpoint_template)
            .finish_non_exhaustive()
    }
}
