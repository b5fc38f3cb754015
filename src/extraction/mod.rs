//! # Constraint Extractor
//!
//! Turns free user text into [`PcRequirements`] with a structured-output
//! agent. The combined schema is tried first; when that call fails with a
//! schema violation or a provider fault, five per-category calls are made
//! instead and assembled into the same shape.

use crate::agent::{AgentError, StructuredAgent, StructuredRequest};
use crate::context::AdvisorContext;
use crate::requirements::{
    parse_requirement, CoolerRequirements, CpuRequirements, MemoryRequirements,
    MotherboardRequirements, PcRequirements, Requirement, SchemaViolation, StorageRequirements,
};
use std::sync::Arc;
use thiserror::Error;

pub const EXTRACTION_PROMPT: &str = "\
You are an expert assistant helping to extract PC component preferences from user input. \
Your task is to identify only the details that the user explicitly or implicitly mentions \
about their desired PC build.

The main objective is a set of filters that significantly narrows down the choice of each \
PC component from the wide selection on the market. Infer user preferences within reason. \
For attributes that are not clearly stated or reasonably implied, return null.

Categorical fields only accept the listed values.

Examples:
'I want a PC that has lots of storage as well as RAM.' -> high min_capacity_gb for both memory and storage
'I'm building a PC for video editing' -> high CPU core count and clock speed
'Give me something compact. I'm limited on desk space.' -> smaller preferred_form_factor";

/// Extraction failures.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ExtractionError {
    /// Whether a combined-call failure should be retried per category.
    ///
    /// Configuration errors would fail the same way five more times.
    pub fn triggers_fallback(&self) -> bool {
        match self {
            ExtractionError::Schema(_) => true,
            ExtractionError::Agent(AgentError::Configuration(_)) => false,
            ExtractionError::Agent(_) => true,
        }
    }
}

/// Which strategy produced the requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    Combined,
    PerCategory,
}

/// Two-tier requirement extractor.
#[derive(Clone)]
pub struct Extractor {
    agent: Arc<dyn StructuredAgent>,
    context: Arc<AdvisorContext>,
}

impl Extractor {
    pub fn new(agent: Arc<dyn StructuredAgent>, context: Arc<AdvisorContext>) -> Self {
        Self { agent, context }
    }

    /// Extract combined requirements from `text`.
    pub async fn extract(&self, text: &str) -> Result<PcRequirements, ExtractionError> {
        self.extract_with_tier(text).await.map(|(requirements, _)| requirements)
    }

    /// Like [`Extractor::extract`], also reporting which tier succeeded.
    pub async fn extract_with_tier(
        &self,
        text: &str,
    ) -> Result<(PcRequirements, ExtractionTier), ExtractionError> {
        match self.extract_combined(text).await {
            Ok(requirements) => {
                tracing::info!(agent = %self.agent.name(), tier = "combined", "Extracted requirements");
                Ok((requirements, ExtractionTier::Combined))
            }
            Err(e) if e.triggers_fallback() => {
                tracing::warn!(
                    error = %e,
                    "Combined extraction failed, falling back to per-category extraction"
                );
                let requirements = self.extract_per_category(text).await?;
                tracing::info!(agent = %self.agent.name(), tier = "per_category", "Extracted requirements");
                Ok((requirements, ExtractionTier::PerCategory))
            }
            Err(e) => Err(e),
        }
    }

    async fn extract_combined(&self, text: &str) -> Result<PcRequirements, ExtractionError> {
        let enumerations = &self.context.enumerations;
        let request = StructuredRequest::new(
            PcRequirements::TITLE,
            PcRequirements::schema(enumerations),
            EXTRACTION_PROMPT,
            text,
        );
        let value = self.agent.generate(request).await?;
        Ok(PcRequirements::parse(value, enumerations)?)
    }

    async fn extract_per_category(&self, text: &str) -> Result<PcRequirements, ExtractionError> {
        Ok(PcRequirements {
            cpu: self.extract_one::<CpuRequirements>(text).await?,
            cooler: self.extract_one::<CoolerRequirements>(text).await?,
            storage: self.extract_one::<StorageRequirements>(text).await?,
            memory: self.extract_one::<MemoryRequirements>(text).await?,
            motherboard: self.extract_one::<MotherboardRequirements>(text).await?,
        })
    }

    async fn extract_one<Q: Requirement>(&self, text: &str) -> Result<Option<Q>, ExtractionError> {
        let enumerations = &self.context.enumerations;
        let request =
            StructuredRequest::new(Q::TITLE, Q::schema(enumerations), EXTRACTION_PROMPT, text);
        let value = self.agent.generate(request).await?;
        if value.is_null() {
            return Ok(None);
        }
        let requirement = parse_requirement::<Q>(value, enumerations).map_err(|e| {
            tracing::debug!(category = %Q::CATEGORY, error = %e, "Per-category extraction rejected");
            e
        })?;
        Ok(Some(requirement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogStore};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedAgent {
        replies: Mutex<VecDeque<Result<Value, AgentError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedAgent {
        fn new(replies: Vec<Result<Value, AgentError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn schemas(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StructuredAgent for ScriptedAgent {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, request: StructuredRequest) -> Result<Value, AgentError> {
            self.seen.lock().unwrap().push(request.schema_name);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AgentError::Network("script exhausted".to_string())))
        }
    }

    fn empty_context() -> Arc<AdvisorContext> {
        Arc::new(AdvisorContext::new(CatalogStore {
            cpu: Catalog::from_rows(vec![]),
            cooler: Catalog::from_rows(vec![]),
            storage: Catalog::from_rows(vec![]),
            memory: Catalog::from_rows(vec![]),
            motherboard: Catalog::from_rows(vec![]),
        }))
    }

    #[tokio::test]
    async fn combined_success_makes_one_call() {
        let agent = ScriptedAgent::new(vec![Ok(json!({
            "cpu": {"min_cores": 8},
            "cooler": null,
            "storage": {"min_capacity_gb": 1000},
            "memory": {"min_capacity_gb": 16},
            "motherboard": null
        }))]);
        let extractor = Extractor::new(agent.clone(), empty_context());

        let (requirements, tier) = extractor.extract_with_tier("8 cores").await.unwrap();

        assert_eq!(tier, ExtractionTier::Combined);
        assert_eq!(agent.schemas(), vec!["PcRequirements"]);
        assert_eq!(requirements.cpu.unwrap().min_cores, Some(8));
        assert!(requirements.cooler.is_none());
    }

    #[tokio::test]
    async fn schema_error_triggers_five_category_calls() {
        let agent = ScriptedAgent::new(vec![
            Ok(json!({
                "cpu": {"min_cores": "lots"},
                "cooler": null,
                "storage": null,
                "memory": null,
                "motherboard": null
            })),
            Ok(json!({"min_cores": 6})),
            Ok(json!({})),
            Ok(json!({"min_capacity_gb": 1000})),
            Ok(json!({"min_capacity_gb": 16})),
            Ok(json!(null)),
        ]);
        let extractor = Extractor::new(agent.clone(), empty_context());

        let (requirements, tier) = extractor.extract_with_tier("text").await.unwrap();

        assert_eq!(tier, ExtractionTier::PerCategory);
        assert_eq!(
            agent.schemas(),
            vec![
                "PcRequirements",
                "CpuRequirements",
                "CoolerRequirements",
                "StorageRequirements",
                "MemoryRequirements",
                "MotherboardRequirements",
            ]
        );
        assert_eq!(requirements.cpu.unwrap().min_cores, Some(6));
        assert!(requirements.cooler.unwrap().is_unconstrained());
        assert_eq!(requirements.storage.unwrap().min_capacity_gb, Some(1000.0));
        assert!(requirements.motherboard.is_none());
    }

    #[tokio::test]
    async fn provider_error_triggers_fallback() {
        let agent = ScriptedAgent::new(vec![
            Err(AgentError::Upstream {
                status: 500,
                message: "boom".to_string(),
            }),
            Ok(json!({})),
            Ok(json!({})),
            Ok(json!({})),
            Ok(json!({})),
            Ok(json!({})),
        ]);
        let extractor = Extractor::new(agent.clone(), empty_context());

        let requirements = extractor.extract("text").await.unwrap();
        assert_eq!(agent.schemas().len(), 6);
        assert!(requirements.cpu.unwrap().is_unconstrained());
    }

    #[tokio::test]
    async fn failure_in_fallback_is_hard_failure() {
        let agent = ScriptedAgent::new(vec![
            Ok(json!("not an object")),
            Ok(json!({})),
            Ok(json!({"max_price": -1})),
        ]);
        let extractor = Extractor::new(agent.clone(), empty_context());

        let err = extractor.extract("text").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Schema(SchemaViolation::OutOfRange { .. })));
        assert_eq!(agent.schemas().len(), 3);
    }

    #[tokio::test]
    async fn configuration_error_does_not_fall_back() {
        let agent = ScriptedAgent::new(vec![Err(AgentError::Configuration(
            "no client".to_string(),
        ))]);
        let extractor = Extractor::new(agent.clone(), empty_context());

        let err = extractor.extract("text").await.unwrap_err();
        assert!(!err.triggers_fallback());
        assert_eq!(agent.schemas().len(), 1);
    }

    #[test]
    fn fallback_condition() {
        assert!(ExtractionError::Schema(SchemaViolation::shape("X", "bad")).triggers_fallback());
        assert!(ExtractionError::Agent(AgentError::Timeout(100)).triggers_fallback());
        assert!(!ExtractionError::Agent(AgentError::Configuration("x".into())).triggers_fallback());
    }
}
