//! Step trait and the two step flavours the chain ships with

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::StepFailure;
use crate::domain::http::{RequestIssuer, StatusPolicy};

/// One unit of dependent work: previous value in, next value out
#[async_trait]
pub trait Step: Send + Sync + std::fmt::Debug {
    /// Name used in logs and failures
    fn name(&self) -> &str;

    async fn run(&self, input: Value) -> Result<Value, StepFailure>;
}

/// Step backed by an async closure
pub struct FnStep<F> {
    name: String,
    f: F,
}

impl<F> FnStep<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> std::fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> Step for FnStep<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, StepFailure>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: Value) -> Result<Value, StepFailure> {
        (self.f)(input).await
    }
}

type LocatorFn<P> = Box<dyn Fn(&P) -> String + Send + Sync>;

/// Step that fetches one resource and decodes it into a declared shape.
///
/// The incoming value is decoded as `P` and turned into a locator. The
/// response must pass the status policy and decode as `T`, which becomes the
/// value handed to the next step.
pub struct FetchStep<P, T> {
    name: String,
    issuer: Arc<dyn RequestIssuer>,
    policy: StatusPolicy,
    locator: LocatorFn<P>,
    _shape: PhantomData<fn(P) -> T>,
}

impl<P, T> FetchStep<P, T> {
    pub fn new(
        name: impl Into<String>,
        issuer: Arc<dyn RequestIssuer>,
        locator: impl Fn(&P) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            issuer,
            policy: StatusPolicy::default(),
            locator: Box::new(locator),
            _shape: PhantomData,
        }
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<P, T> std::fmt::Debug for FetchStep<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchStep")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl<P, T> Step for FetchStep<P, T>
where
    P: DeserializeOwned + Send + Sync + 'static,
    T: DeserializeOwned + Serialize + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: Value) -> Result<Value, StepFailure> {
        let previous: P = match serde_json::from_value(input.clone()) {
            Ok(previous) => previous,
            Err(e) => {
                let message = format!("Invalid step input: {}", e);
                return Err(StepFailure::parse(input.to_string(), message));
            }
        };

        let locator = (self.locator)(&previous);
        debug!("Step '{}' requesting '{}'", self.name, locator);

        let response = self.issuer.get(&locator).await?;

        if !self.policy.accepts(response.status) {
            return Err(StepFailure::unexpected_status(
                locator,
                response.status,
                response.body,
            ));
        }

        let decoded: T = serde_json::from_str(&response.body)
            .map_err(|e| StepFailure::parse(response.body.as_str(), e.to_string()))?;

        serde_json::to_value(decoded).map_err(|e| StepFailure::parse(response.body, e.to_string()))
    }
}
