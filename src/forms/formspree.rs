use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

use super::{ContactFields, FieldError, FormBackend, SubmissionOutcome};
use crate::config::FormSettings;

/// Formspree form endpoint client.
#[derive(Clone)]
pub struct FormspreeBackend {
    http: Client,
    submit_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<FormspreeError>,
}

#[derive(Debug, Deserialize)]
struct FormspreeError {
    #[serde(default)]
    field: Option<String>,
    message: String,
}

impl FormspreeBackend {
    pub fn new(settings: &FormSettings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("humanist-site/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .context("building form backend http client")?;
        Ok(Self {
            http,
            submit_url: settings.submit_url(),
        })
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }
}

#[async_trait::async_trait]
impl FormBackend for FormspreeBackend {
    async fn submit(&self, fields: &ContactFields) -> Result<SubmissionOutcome> {
        let rsp = self
            .http
            .post(&self.submit_url)
            .header(header::ACCEPT, "application/json")
            .form(fields)
            .send()
            .await
            .context("formspree post")?;

        let status = rsp.status();
        if status.is_success() {
            return Ok(SubmissionOutcome {
                succeeded: true,
                errors: Vec::new(),
            });
        }
        if status.is_client_error() {
            let body: ErrorBody = rsp
                .json()
                .await
                .with_context(|| format!("formspree {status} without json errors"))?;
            let errors = body
                .errors
                .into_iter()
                .map(|e| FieldError {
                    field: e.field,
                    message: e.message,
                })
                .collect();
            return Ok(SubmissionOutcome {
                succeeded: false,
                errors,
            });
        }
        Err(anyhow!("formspree returned {status}"))
    }

    fn name(&self) -> &'static str {
        "formspree"
    }
}
