use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::{Result, SurveyError};
use crate::models::{OverpassResponse, PointRecord};
use crate::processors::{NormalizationReport, ResponseNormalizer};
use crate::query::QueryBuilder;
use crate::settings::OverpassSettings;
use crate::utils::progress::ProgressReporter;

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 256;

/// Result of one fetch: the surviving records and what was dropped on the way.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<PointRecord>,
    pub report: NormalizationReport,
}

pub struct OverpassClient {
    client: Client,
    url: String,
    builder: QueryBuilder,
}

impl OverpassClient {
    pub fn new(settings: &OverpassSettings) -> Result<Self> {
        // Leave the interpreter its own timeout plus some slack for transfer.
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs + 30))
            .build()?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            builder: QueryBuilder::new(settings.area.clone()).with_timeout(settings.timeout_secs),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Post a query as the `data` form field and decode the reply.
    pub async fn send_query(&self, query: &str) -> Result<OverpassResponse> {
        debug!(url = %self.url, "Sending Overpass query:\n{}", query);

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SurveyError::Api {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let decoded: OverpassResponse = response.json().await?;
        if let Some(remark) = &decoded.remark {
            info!("Overpass remark: {}", remark);
        }
        Ok(decoded)
    }

    /// Fetch point features for the configured area.
    ///
    /// Transport, status and decoding failures are reported on the console
    /// and yield an empty outcome instead of an error.
    pub async fn fetch_nodes(
        &self,
        node_type: Option<&str>,
        progress: Option<&ProgressReporter>,
    ) -> FetchOutcome {
        let query = self.builder.build(node_type);

        match self.send_query(&query).await {
            Ok(response) => {
                let (records, report) =
                    ResponseNormalizer::new().normalize_with_report(response.elements);
                if let Some(progress) = progress {
                    progress.finish_with_message(&format!("Fetched {} nodes", records.len()));
                }
                info!(nodes = records.len(), "Fetched nodes from Overpass");
                FetchOutcome { records, report }
            }
            Err(e) => {
                if let Some(progress) = progress {
                    progress.abandon_with_message("Fetch failed");
                }
                error!("Error fetching data: {}", e);
                println!("Error fetching data: {}", e);
                FetchOutcome::default()
            }
        }
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
