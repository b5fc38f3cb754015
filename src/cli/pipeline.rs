//! One-shot `extract` and `recommend` commands

use crate::agent::StructuredAgent;
use crate::catalog::Category;
use crate::cli::output::{
    format_choices_table, format_recommendation_json, format_requirements_json,
    format_requirements_table,
};
use crate::cli::serve::{build_agent, load_config_file};
use crate::cli::{ExtractArgs, RecommendArgs, RunArgs};
use crate::config::AdvisorConfig;
use crate::context::AdvisorContext;
use crate::extraction::ExtractionTier;
use crate::recommend::Recommender;
use std::sync::Arc;

/// Apply the shared command overrides on top of file and env configuration.
pub fn load_run_config(args: &RunArgs) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
    let mut config = load_config_file(&args.config)?;
    if let Some(ref dir) = args.catalog_dir {
        config.catalog.dir = dir.clone();
    }
    if let Some(ref model) = args.model {
        config.llm.model = model.clone();
    }
    config.validate()?;
    Ok(config)
}

type Prepared = (AdvisorConfig, Arc<AdvisorContext>, Arc<dyn StructuredAgent>);

/// Config, catalogs and agent, in that order. Catalog errors win over a missing key.
fn prepare(args: &RunArgs) -> Result<Prepared, Box<dyn std::error::Error>> {
    let config = load_run_config(args)?;
    let context = AdvisorContext::load(&config.catalog.dir)?;
    let agent = build_agent(&config)?;
    Ok((config, context, agent))
}

/// Handle `build-advisor extract`
pub async fn handle_extract(args: &ExtractArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (config, context, agent) = prepare(&args.run)?;
    let recommender = Recommender::new(agent, context, config.catalog.shortlist_limit);

    let (requirements, tier) = recommender
        .extractor()
        .extract_with_tier(&args.message)
        .await?;

    if args.run.json {
        return Ok(format_requirements_json(&requirements)?);
    }

    let mut output = format_requirements_table(&requirements)?;
    if tier == ExtractionTier::PerCategory {
        output.push_str("\nNote: combined extraction failed; requirements were extracted per category.");
    }
    Ok(output)
}

/// Handle `build-advisor recommend`
pub async fn handle_recommend(args: &RecommendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let (config, context, agent) = prepare(&args.run)?;
    let recommender = Recommender::new(agent, context, config.catalog.shortlist_limit);

    let recommendation = recommender.recommend_detailed(&args.message).await?;

    if args.run.json {
        return Ok(format_recommendation_json(&recommendation, args.verbose)?);
    }

    let fallbacks: &[Category] = if args.verbose {
        recommendation.fallback_categories.as_slice()
    } else {
        &[]
    };
    Ok(format_choices_table(&recommendation.choices, fallbacks))
}
