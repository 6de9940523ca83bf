//! The create → read → update → delete sequence
//!
//! Every step owns its failure handling: transport errors, status mismatches
//! and a missing identifier are logged and recorded in the ledger, and the
//! next step runs regardless.

use crate::config::{Config, PayloadConfig};
use crate::error::{Error, Result};
use crate::ledger::{AssertionLedger, Step};
use crate::model::{ResourceId, UserRecord};
use crate::transport::{HttpTransport, ReqwestTransport, TransportResponse};
use reqwest::{Method, StatusCode};

pub struct CrudProbe<T: HttpTransport> {
    transport: T,
    base_url: String,
    payload: PayloadConfig,
}

impl CrudProbe<ReqwestTransport> {
    /// Build a probe that talks to the configured endpoint over `reqwest`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.target.timeout())?;
        Ok(Self::new(
            transport,
            config.target.base_url.clone(),
            config.payload.clone(),
        ))
    }
}

impl<T: HttpTransport> CrudProbe<T> {
    pub fn new(transport: T, base_url: impl Into<String>, payload: PayloadConfig) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            payload,
        }
    }

    /// Run all four steps in order and return the filled ledger.
    ///
    /// Never fails as a whole; call [`AssertionLedger::assert_all`] on the
    /// result to evaluate it.
    pub async fn run_crud_sequence(&self) -> AssertionLedger {
        let mut ledger = AssertionLedger::new();

        let id = self.create_user(&mut ledger).await;
        self.read_user(&mut ledger, id.as_ref()).await;
        self.update_user(&mut ledger, id.as_ref()).await;
        self.delete_user(&mut ledger, id.as_ref()).await;

        tracing::info!(
            checks = ledger.outcomes().len(),
            failures = ledger.failure_count(),
            "CRUD sequence finished"
        );
        ledger
    }

    async fn create_user(&self, ledger: &mut AssertionLedger) -> Option<ResourceId> {
        let record = UserRecord::from_config(&self.payload);
        let result = self
            .exchange(
                Method::POST,
                &self.base_url,
                Some(&record),
                StatusCode::CREATED,
            )
            .await
            .and_then(|response| {
                ResourceId::from_body(&response.body).ok_or(Error::MissingIdentifier)
            });

        match result {
            Ok(id) => {
                tracing::info!(id = %id, "User created successfully");
                ledger.pass(Step::Create, "create user");
                Some(id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error occurred while creating user");
                ledger.fail(Step::Create, format!("Failed to create user: {e}"));
                None
            }
        }
    }

    async fn read_user(&self, ledger: &mut AssertionLedger, id: Option<&ResourceId>) {
        let url = self.resource_url(id);
        let result = self
            .exchange(Method::GET, &url, None, StatusCode::OK)
            .await;
        record_outcome(ledger, Step::Read, id, result);
    }

    async fn update_user(&self, ledger: &mut AssertionLedger, id: Option<&ResourceId>) {
        let record = UserRecord::updated_from_config(&self.payload);
        let url = self.resource_url(id);
        let result = self
            .exchange(Method::PUT, &url, Some(&record), StatusCode::OK)
            .await;
        record_outcome(ledger, Step::Update, id, result);
    }

    async fn delete_user(&self, ledger: &mut AssertionLedger, id: Option<&ResourceId>) {
        let url = self.resource_url(id);
        let result = self
            .exchange(Method::DELETE, &url, None, StatusCode::NO_CONTENT)
            .await;
        record_outcome(ledger, Step::Delete, id, result);
    }

    /// Send one request and check its status.
    async fn exchange(
        &self,
        method: Method,
        url: &str,
        record: Option<&UserRecord>,
        expected: StatusCode,
    ) -> Result<TransportResponse> {
        let body = record
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| Error::TransportFailure(format!("failed to encode body: {e}")))?;

        tracing::debug!(%method, url, "Sending request");
        let response = self.transport.send(method, url, body.as_ref()).await?;

        if response.status != expected {
            return Err(Error::UnexpectedStatus {
                expected,
                actual: response.status,
            });
        }
        Ok(response)
    }

    /// `{base_url}/{id}`, with an empty id segment when creation failed.
    fn resource_url(&self, id: Option<&ResourceId>) -> String {
        let id = id.map(ResourceId::as_str).unwrap_or_default();
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }
}

fn record_outcome(
    ledger: &mut AssertionLedger,
    step: Step,
    id: Option<&ResourceId>,
    result: Result<TransportResponse>,
) {
    let verb = step.as_str();
    let id = id.map(ResourceId::as_str).unwrap_or_default();
    match result {
        Ok(_) => {
            tracing::info!(id, "User {verb} succeeded");
            ledger.pass(step, format!("{verb} user"));
        }
        Err(e) => {
            tracing::error!(id, error = %e, "Error occurred while trying to {verb} user");
            ledger.fail(step, format!("Failed to {verb} user: {e}"));
        }
    }
}
