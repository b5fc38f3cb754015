//! Shared test utilities for build-advisor integration tests.
//!
//! Provides catalog fixtures on disk, a scripted structured-output agent and
//! helpers for building the router against either.

#![allow(dead_code)]

use async_trait::async_trait;
use build_advisor::agent::{AgentError, OpenAIAgent, StructuredAgent, StructuredRequest};
use build_advisor::api::{create_router, AppState};
use build_advisor::config::AdvisorConfig;
use build_advisor::context::AdvisorContext;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Catalog Fixtures
// =============================================================================

pub const CPU_CSV: &str = "\
name,core_count,performance_core_clock,performance_core_boost_clock,microarchitecture,tdp,integrated_graphics,rating,price
AMD Ryzen 5 7600,6,3.8 GHz,5.1 GHz,Zen 4,65 W,Radeon,4.5,$199.99
AMD Ryzen 7 7800X3D,8,4.2 GHz,5 GHz,Zen 4,120 W,Radeon,4.8,$449.00
Intel Core i5-12400F,6,2.5 GHz,4.4 GHz,Alder Lake,65 W,,4.6,$109.99
Intel Core i9-13900K,24,3 GHz,5.8 GHz,Raptor Lake,125 W,Intel UHD Graphics 770,4.7,$569.99
";

pub const COOLER_CSV: &str = "\
name,average_fan_rpm,average_noise_level,color,radiator_size,rating,price
Noctua NH-D15,1200,24.6,Brown / Beige,,4.8,109.95
Cooler Master Hyper 212,1650,26,Black,,4.5,29.99
NZXT Kraken 240,1800,30,White,240,4.4,129.99
";

pub const STORAGE_CSV: &str = "\
name,capacity_gb,price_per_gb,type,cache_gb,form_factor,interface,rating,price
Samsung 990 Pro,2000,0.085,SSD,2.048,M.2-2280,M.2 PCIe 4.0 X4,4.9,169.99
Crucial P3,1000,0.05,SSD,,M.2-2280,M.2 PCIe 3.0 X4,4.5,49.99
Seagate Barracuda,4000,0.02,7200,0.256,3.5,SATA 6.0 Gb/s,4.4,79.99
";

pub const MEMORY_CSV: &str = "\
name,speed,module_count,total_ram,price_per_gb,color,first_word_latency,cas_latency,rating,price
Corsair Vengeance,DDR5-6000,2,32,3.1,Black,10,30,4.7,99.99
G.Skill Trident Z5,DDR5-6400,2,64,3.3,Silver / Black,10.3,32,4.8,209.99
Kingston Fury Beast,DDR4-3200,2,16,2.5,White,10,16,4.6,39.99
";

pub const MOTHERBOARD_CSV: &str = "\
name,cpu_socket,form_factor,max_memory_gb,memory_slots,color,rating,price
MSI B650 Tomahawk,AM5,ATX,192,4,Black,4.7,199.99
ASUS ROG Strix B650-I,AM5,Mini ITX,96,2,Black / White,4.6,249.99
Gigabyte Z790 UD,LGA1700,ATX,128,4,Black,4.5,189.99
";

/// Write the five fixture catalogs into `dir`.
pub fn write_catalogs(dir: &Path) {
    for (file, content) in [
        ("cpu.csv", CPU_CSV),
        ("cooler.csv", COOLER_CSV),
        ("storage.csv", STORAGE_CSV),
        ("memory.csv", MEMORY_CSV),
        ("motherboard.csv", MOTHERBOARD_CSV),
    ] {
        std::fs::write(dir.join(file), content).unwrap();
    }
}

/// A temporary directory holding the fixture catalogs.
pub fn catalog_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_catalogs(dir.path());
    dir
}

/// Load the fixture catalogs into a context.
pub fn fixture_context() -> Arc<AdvisorContext> {
    let dir = catalog_dir();
    AdvisorContext::load(dir.path()).unwrap()
}

// =============================================================================
// Agents
// =============================================================================

/// Agent that replays canned replies in order and records requested schemas.
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<Result<Value, AgentError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    pub fn new(replies: Vec<Result<Value, AgentError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Schema names requested so far, in call order.
    pub fn schemas(&self) -> Vec<String> {
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

/// Agent that answers every request with an empty object after `delay`.
pub struct SlowAgent {
    delay: Duration,
}

impl SlowAgent {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self { delay })
    }
}

#[async_trait]
impl StructuredAgent for SlowAgent {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, _request: StructuredRequest) -> Result<Value, AgentError> {
        tokio::time::sleep(self.delay).await;
        Ok(json!({}))
    }
}

/// Agent pointed at a mock OpenAI-compatible server.
pub fn openai_agent(base_url: &str) -> Arc<dyn StructuredAgent> {
    Arc::new(OpenAIAgent::new(
        base_url.to_string(),
        "test-key".to_string(),
        "test-model".to_string(),
        Arc::new(reqwest::Client::new()),
    ))
}

/// Chat completion body whose assistant content is `content` serialized.
pub fn completion_body(content: &Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1699999999,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content.to_string()},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

// =============================================================================
// Requirement and Selection Payloads
// =============================================================================

/// Combined requirements asking for an 8+ core Zen 4 CPU on AM5.
pub fn zen4_requirements() -> Value {
    json!({
        "cpu": {"min_cores": 8, "microarchitecture": ["zen_4"]},
        "cooler": null,
        "storage": {"min_capacity_gb": 1000},
        "memory": {"min_capacity_gb": 32},
        "motherboard": {"preferred_socket": ["am5"]}
    })
}

/// A selection consistent with [`zen4_requirements`] on the fixture catalogs.
pub fn zen4_selection() -> Value {
    json!({
        "cpu": {"index": 1, "name": "AMD Ryzen 7 7800X3D", "price": 449.0},
        "cooler": {"index": 0, "name": "Noctua NH-D15", "price": 109.95},
        "storage": {"index": 0, "name": "Samsung 990 Pro", "price": 169.99},
        "memory": {"index": 0, "name": "Corsair Vengeance", "price": 99.99},
        "motherboard": {"index": 0, "name": "MSI B650 Tomahawk", "price": 199.99}
    })
}

// =============================================================================
// App Builders
// =============================================================================

/// Router over the fixture catalogs with the given agent.
pub fn create_test_app(agent: Arc<dyn StructuredAgent>) -> axum::Router {
    create_test_app_with_config(agent, AdvisorConfig::default())
}

pub fn create_test_app_with_config(
    agent: Arc<dyn StructuredAgent>,
    config: AdvisorConfig,
) -> axum::Router {
    let state = Arc::new(AppState::new(fixture_context(), agent, Arc::new(config)));
    create_router(state)
}

/// Read a response body as JSON.
pub async fn body_json(body: axum::body::Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
