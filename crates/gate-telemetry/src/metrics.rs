//! Prometheus metrics for gate and component outcomes.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use rg_01_required_gate::{GateMetrics, GateOutcome};

use crate::TelemetryError;

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PIPELINE METRICS
    // =========================================================================

    /// Outcomes recorded by the packet and room pipelines
    pub static ref GATE_OUTCOMES: IntCounterVec = IntCounterVec::new(
        Opts::new("rg_gate_outcomes_total", "Pipeline outcomes by gate"),
        &["gate", "outcome"]  // gate: packet/room, outcome: gate_blocked/component_rejected/...
    ).expect("metric creation failed");

    // =========================================================================
    // REGISTRY METRICS
    // =========================================================================

    /// Live required components per gate
    pub static ref REQUIRED_LIVE: IntGaugeVec = IntGaugeVec::new(
        Opts::new("rg_required_live", "Live required components"),
        &["gate"]
    ).expect("metric creation failed");

    /// Declared required components per gate
    pub static ref REQUIRED_DECLARED: IntGaugeVec = IntGaugeVec::new(
        Opts::new("rg_required_declared", "Declared required components"),
        &["gate"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Registering a second time is not an error.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(GATE_OUTCOMES.clone()),
        Box::new(REQUIRED_LIVE.clone()),
        Box::new(REQUIRED_DECLARED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Update the registry gauges for one gate.
pub fn observe_registry(gate: &str, live: usize, declared: usize) {
    REQUIRED_LIVE
        .with_label_values(&[gate])
        .set(i64::try_from(live).unwrap_or(i64::MAX));
    REQUIRED_DECLARED
        .with_label_values(&[gate])
        .set(i64::try_from(declared).unwrap_or(i64::MAX));
}

/// [`GateMetrics`] sink backed by [`GATE_OUTCOMES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusGateMetrics;

impl GateMetrics for PrometheusGateMetrics {
    fn record(&self, gate: &'static str, outcome: GateOutcome) {
        GATE_OUTCOMES
            .with_label_values(&[gate, outcome.as_str()])
            .inc();
    }

    fn registry(&self, gate: &'static str, live: usize, declared: usize) {
        observe_registry(gate, live, declared);
    }
}
