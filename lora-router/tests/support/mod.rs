use lora_router::{EngineConfig, RoutingEngine};
use mock_adapters::{CapturingReporter, MockBrokerNetwork, RecordingGatewayAdapter};
use std::sync::Arc;
use std::time::Duration;

#[allow(dead_code)]
pub(crate) struct Harness {
    pub(crate) engine: Arc<RoutingEngine>,
    pub(crate) gateway: Arc<RecordingGatewayAdapter>,
    pub(crate) brokers: Arc<MockBrokerNetwork>,
    pub(crate) reporter: Arc<CapturingReporter>,
}

/// Engine wired to fresh mock adapters.
pub(crate) fn connected_harness(config: EngineConfig) -> Harness {
    let harness = disconnected_harness(config);
    harness
        .engine
        .connect(harness.gateway.clone(), harness.brokers.clone())
        .expect("connect should succeed");
    harness
}

/// Engine and mock adapters left unbound, for pre-connect scenarios.
pub(crate) fn disconnected_harness(config: EngineConfig) -> Harness {
    mock_adapters::init_tracing();
    let reporter = Arc::new(CapturingReporter::new());
    let engine = Arc::new(RoutingEngine::new("test-router", config, reporter.clone()));
    Harness {
        engine,
        gateway: Arc::new(RecordingGatewayAdapter::new()),
        brokers: Arc::new(MockBrokerNetwork::new()),
        reporter,
    }
}

/// Default policy with an adapter timeout short enough for hang tests.
pub(crate) fn test_config() -> EngineConfig {
    EngineConfig {
        adapter_timeout: Duration::from_millis(50),
        ..EngineConfig::default()
    }
}
