use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::StudyRecord;

const SORT_ORDER: &str = "LastUpdatePostDate:desc";

/// Client for the ClinicalTrials.gov v2 studies API.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http_client: Client,
    studies_url: Url,
    page_size: u16,
}

#[derive(Deserialize)]
struct SearchStudiesResponse {
    #[serde(default)]
    studies: Vec<Study>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Study {
    #[serde(default)]
    protocol_section: ProtocolSection,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProtocolSection {
    #[serde(default)]
    identification_module: IdentificationModule,
    #[serde(default)]
    sponsor_collaborators_module: SponsorCollaboratorsModule,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct IdentificationModule {
    nct_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SponsorCollaboratorsModule {
    #[serde(default)]
    lead_sponsor: LeadSponsor,
}

#[derive(Deserialize, Default)]
struct LeadSponsor {
    name: Option<String>,
}

impl SearchStudiesResponse {
    fn into_records(self) -> Vec<StudyRecord> {
        self.studies
            .into_iter()
            .filter_map(|study| {
                let section = study.protocol_section;
                StudyRecord::new(
                    section.identification_module.nct_id.unwrap_or_default(),
                    section
                        .sponsor_collaborators_module
                        .lead_sponsor
                        .name
                        .unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl RegistryClient {
    pub fn new(base_url: &str, page_size: u16, timeout: Duration) -> Result<Self, anyhow::Error> {
        let studies_url = Url::parse(base_url)
            .and_then(|url| url.join("api/v2/studies"))
            .with_context(|| format!("Invalid registry base url: {}", base_url))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the registry http client")?;

        Ok(Self {
            http_client,
            studies_url,
            page_size,
        })
    }

    /// Fetch the first page of studies matching `query_term`, most recently updated first.
    #[tracing::instrument(name = "Searching the study registry", skip(self))]
    pub async fn search_studies(&self, query_term: &str) -> Result<Vec<StudyRecord>, reqwest::Error> {
        let response: SearchStudiesResponse = self
            .http_client
            .get(self.studies_url.clone())
            .query(&[
                ("query.term", query_term),
                ("sort", SORT_ORDER),
                ("pageSize", self.page_size.to_string().as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.into_records())
    }
}
