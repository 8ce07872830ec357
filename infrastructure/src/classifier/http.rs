//! HTTP-backed classifier
//!
//! Talks to an external scoring service. Every failure mode maps to a
//! [`ClassifierError`] variant so the pipeline can log what went wrong
//! before degrading to the fallback scorer.

use async_trait::async_trait;
use esg_application::{ClassifierError, InsightClassifier};
use esg_domain::{CategoryInsight, EsgCategory, EsgRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Wire request for the scoring service
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    category: EsgCategory,
    record: &'a EsgRecord,
}

/// Wire response from the scoring service
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    score: f64,
    confidence: f64,
    #[serde(default)]
    insights: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

impl ClassifyResponse {
    fn into_insight(self) -> CategoryInsight {
        let mut insight = CategoryInsight::new(self.score, self.confidence);
        for text in self.insights {
            insight = insight.with_insight(text);
        }
        for text in self.recommendations {
            insight = insight.with_recommendation(text);
        }
        insight
    }
}

/// Classifier backed by a remote scoring service
pub struct HttpInsightClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInsightClassifier {
    /// Build a classifier for the given endpoint
    ///
    /// The request timeout lives in the client so a stuck service is
    /// reported as [`ClassifierError::Timeout`] rather than hanging
    /// until the pipeline's own patience runs out.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Other(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a classifier around an existing client
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InsightClassifier for HttpInsightClassifier {
    async fn classify(
        &self,
        category: EsgCategory,
        record: &EsgRecord,
    ) -> Result<CategoryInsight, ClassifierError> {
        debug!(endpoint = %self.endpoint, %category, "Requesting classification");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { category, record })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::ConnectionError(format!(
                "scoring service answered {status}"
            )));
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into_insight())
    }

    fn name(&self) -> &str {
        "http"
    }
}
