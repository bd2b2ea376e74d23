//! Control-plane HTTP client.
//!
//! Implements the `FleetControl` capability set against the fleet
//! control plane's region-scoped REST API. List endpoints paginate via
//! `page_token`; both are exhausted here so callers always see the
//! full listing.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use teardown_fleet::{AutoscalingGroup, StandaloneInstance, TagFilter};
use teardown_retire::{FleetControl, ProviderError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the fleet control plane.
#[derive(Debug, Clone)]
pub struct ControlPlaneClient {
    client: reqwest::Client,
    base_url: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct GroupListPage {
    groups: Vec<AutoscalingGroup>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InstanceListPage {
    instances: Vec<StandaloneInstance>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CapacityRequest {
    desired: u32,
    min: u32,
    max: u32,
}

#[derive(Debug, Serialize)]
struct TerminateRequest<'a> {
    instance_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct TerminateResponse {
    terminating: Vec<String>,
}

impl ControlPlaneClient {
    pub fn new(endpoint: &str, region: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
            region: region.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/regions/{}{}", self.base_url, self.region, path)
    }

    /// Maps a non-success response to `ProviderError::Api`, preserving
    /// the response body as the message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ProviderError::Api {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        })
    }

    fn transport(err: reqwest::Error) -> ProviderError {
        ProviderError::Transport(err.into())
    }
}

#[async_trait]
impl FleetControl for ControlPlaneClient {
    async fn list_groups(&self) -> Result<Vec<AutoscalingGroup>, ProviderError> {
        let url = self.url("/autoscaling-groups");
        let mut groups = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url);
            if let Some(token) = &page_token {
                request = request.query(&[("page_token", token)]);
            }
            let response = request.send().await.map_err(Self::transport)?;
            let page: GroupListPage = Self::check(response)
                .await?
                .json()
                .await
                .map_err(Self::transport)?;

            groups.extend(page.groups);
            match page.next_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = groups.len(), "listed autoscaling groups");
        Ok(groups)
    }

    async fn describe_group(
        &self,
        name: &str,
    ) -> Result<Option<AutoscalingGroup>, ProviderError> {
        let url = self.url(&format!("/autoscaling-groups/{name}"));
        let response = self.client.get(&url).send().await.map_err(Self::transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let group = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;
        Ok(Some(group))
    }

    async fn list_instances(
        &self,
        filters: &[TagFilter],
    ) -> Result<Vec<StandaloneInstance>, ProviderError> {
        let url = self.url("/instances");
        let tag_filters: Vec<(&str, String)> = filters
            .iter()
            .map(|f| ("filter", format!("{}={}", f.key, f.value)))
            .collect();

        let mut instances = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).query(&tag_filters);
            if let Some(token) = &page_token {
                request = request.query(&[("page_token", token)]);
            }
            let response = request.send().await.map_err(Self::transport)?;
            let page: InstanceListPage = Self::check(response)
                .await?
                .json()
                .await
                .map_err(Self::transport)?;

            instances.extend(page.instances);
            match page.next_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = instances.len(), "listed instances");
        Ok(instances)
    }

    async fn set_group_capacity(
        &self,
        name: &str,
        desired: u32,
        min: u32,
        max: u32,
    ) -> Result<(), ProviderError> {
        let url = self.url(&format!("/autoscaling-groups/{name}/capacity"));
        let response = self
            .client
            .put(&url)
            .json(&CapacityRequest { desired, min, max })
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_group(&self, name: &str, force: bool) -> Result<(), ProviderError> {
        let url = self.url(&format!("/autoscaling-groups/{name}"));
        let response = self
            .client
            .delete(&url)
            .query(&[("force", force)])
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_launch_template(&self, id: &str) -> Result<(), ProviderError> {
        let url = self.url(&format!("/launch-templates/{id}"));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn terminate_instances(&self, ids: &[String]) -> Result<Vec<String>, ProviderError> {
        let url = self.url("/instances/terminate");
        let response = self
            .client
            .post(&url)
            .json(&TerminateRequest { instance_ids: ids })
            .send()
            .await
            .map_err(Self::transport)?;
        let body: TerminateResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport)?;
        Ok(body.terminating)
    }
}
