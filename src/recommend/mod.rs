//! # Recommendation Orchestrator
//!
//! Extract requirements, build one shortlist per category, then ask the
//! agent to pick exactly one compatible row from each shortlist.

use crate::agent::{AgentError, StructuredAgent, StructuredRequest};
use crate::catalog::{CatalogRow, Category};
use crate::context::AdvisorContext;
use crate::extraction::{ExtractionError, Extractor};
use crate::filter::{Shortlist, Shortlists};
use crate::requirements::{schema, PcRequirements, SchemaViolation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

pub const SELECTION_PROMPT: &str = "\
You are tasked with recommending a compatible and high-performance PC setup. You are given \
five JSON arrays with details of CPUs, coolers, storage drives, memory kits and motherboards. \
Choose exactly ONE item from each array, ensuring compatibility across all components and \
meeting the user's expectations and preferences. For each component, output its index, name \
and price exactly as given. Only select from the given options. Never invent new items.";

/// A single chosen catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub index: usize,
    pub name: String,
    pub price: f64,
}

/// One chosen row per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentChoices {
    pub cpu: Component,
    pub cooler: Component,
    pub storage: Component,
    pub memory: Component,
    pub motherboard: Component,
}

impl ComponentChoices {
    pub const TITLE: &'static str = "ComponentChoices";

    pub fn schema() -> Value {
        let component = schema_component();
        schema::object(
            Self::TITLE,
            "One selected component per category",
            Category::ALL
                .iter()
                .map(|c| (c.as_str(), component.clone()))
                .collect(),
        )
    }

    /// Choices in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Component)> {
        [
            (Category::Cpu, &self.cpu),
            (Category::Cooler, &self.cooler),
            (Category::Storage, &self.storage),
            (Category::Memory, &self.memory),
            (Category::Motherboard, &self.motherboard),
        ]
        .into_iter()
    }

    /// Sum of chosen prices.
    pub fn total_price(&self) -> f64 {
        self.iter().map(|(_, c)| c.price).sum()
    }
}

fn schema_component() -> Value {
    json!({
        "type": "object",
        "properties": {
            "index": {"type": "integer", "minimum": 0, "description": "Index of the chosen row"},
            "name": {"type": "string", "description": "Name of the chosen row"},
            "price": {"type": "number", "description": "Price of the chosen row"},
        },
        "required": ["index", "name", "price"],
        "additionalProperties": false,
    })
}

/// Recommendation failures.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Requirement extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Component selection failed: {0}")]
    Selection(#[from] AgentError),

    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SchemaViolation),
}

/// Full pipeline result, including the intermediate requirements.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub requirements: PcRequirements,
    pub choices: ComponentChoices,
    /// Categories where filtering matched nothing and the catalog head was offered.
    pub fallback_categories: Vec<Category>,
}

/// Runs extraction, shortlisting and selection.
#[derive(Clone)]
pub struct Recommender {
    extractor: Extractor,
    agent: Arc<dyn StructuredAgent>,
    context: Arc<AdvisorContext>,
    shortlist_limit: usize,
}

impl Recommender {
    pub fn new(
        agent: Arc<dyn StructuredAgent>,
        context: Arc<AdvisorContext>,
        shortlist_limit: usize,
    ) -> Self {
        Self {
            extractor: Extractor::new(agent.clone(), context.clone()),
            agent,
            context,
            shortlist_limit,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub async fn recommend(&self, text: &str) -> Result<ComponentChoices, RecommendError> {
        self.recommend_detailed(text).await.map(|r| r.choices)
    }

    pub async fn recommend_detailed(&self, text: &str) -> Result<Recommendation, RecommendError> {
        let requirements = self.extractor.extract(text).await?;
        let shortlists = Shortlists::build(&self.context, &requirements, self.shortlist_limit);
        let fallback_categories = shortlists.fallback_categories();

        let request = StructuredRequest::new(
            ComponentChoices::TITLE,
            ComponentChoices::schema(),
            SELECTION_PROMPT,
            selection_message(text, &shortlists),
        );
        let value = self.agent.generate(request).await?;
        let choices = parse_choices(value, &shortlists)?;

        tracing::info!(
            total_price = choices.total_price(),
            fallbacks = fallback_categories.len(),
            "Selected components"
        );
        Ok(Recommendation {
            requirements,
            choices,
            fallback_categories,
        })
    }
}

fn selection_message(text: &str, shortlists: &Shortlists<'_>) -> String {
    let options = shortlists.to_prompt_value();
    format!(
        "The user wrote: {}\n\nHere are the component options:\nCPUs: {}\nCoolers: {}\nStorage: {}\nMemory: {}\nMotherboards: {}",
        text,
        options["cpu"],
        options["cooler"],
        options["storage"],
        options["memory"],
        options["motherboard"],
    )
}

fn check_choice<R: CatalogRow>(
    component: &Component,
    shortlist: &Shortlist<'_, R>,
) -> Result<(), SchemaViolation> {
    if shortlist.contains_index(component.index) {
        Ok(())
    } else {
        Err(SchemaViolation::UnknownValue {
            field: format!("{}.index", shortlist.category),
            value: component.index.to_string(),
        })
    }
}

/// Deserialize the selection and require each index to come from its shortlist.
pub fn parse_choices(
    value: Value,
    shortlists: &Shortlists<'_>,
) -> Result<ComponentChoices, SchemaViolation> {
    let choices: ComponentChoices = serde_json::from_value(value)
        .map_err(|e| SchemaViolation::shape(ComponentChoices::TITLE, e))?;

    check_choice(&choices.cpu, &shortlists.cpu)?;
    check_choice(&choices.cooler, &shortlists.cooler)?;
    check_choice(&choices.storage, &shortlists.storage)?;
    check_choice(&choices.memory, &shortlists.memory)?;
    check_choice(&choices.motherboard, &shortlists.motherboard)?;

    for (category, component) in choices.iter() {
        if !component.price.is_finite() || component.price < 0.0 {
            return Err(SchemaViolation::OutOfRange {
                field: format!("{}.price", category),
                value: component.price,
            });
        }
    }
    Ok(choices)
}
