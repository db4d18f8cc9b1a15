use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Outbound gateway calls (count by outcome, latency)
// - Production workflows (mark-ready, payment-approved, ...)
// - Order lifecycle commands (applied vs refused)
//
// Exposed over HTTP at GET /metrics by the api module.
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Gateway Metrics
    pub gateway_requests: IntCounterVec,
    pub gateway_request_duration: HistogramVec,

    // Workflow Metrics
    pub production_workflows: IntCounterVec,

    // Order Lifecycle Metrics
    pub order_transitions: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let gateway_requests = IntCounterVec::new(
            Opts::new("gateway_requests_total", "Total outbound calls to sibling services"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(gateway_requests.clone()))?;

        let gateway_request_duration = HistogramVec::new(
            HistogramOpts::new("gateway_request_duration_seconds", "Outbound call duration")
                .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(gateway_request_duration.clone()))?;

        let production_workflows = IntCounterVec::new(
            Opts::new("production_workflows_total", "Production workflow executions"),
            &["workflow", "outcome"],
        )?;
        registry.register(Box::new(production_workflows.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new("order_transitions_total", "Order lifecycle commands by outcome"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        Ok(Self {
            registry,
            gateway_requests,
            gateway_request_duration,
            production_workflows,
            order_transitions,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> anyhow::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }

    /// Helper to record one outbound call
    pub fn record_gateway_call(&self, operation: &str, outcome: &str, duration_secs: f64) {
        self.gateway_requests.with_label_values(&[operation, outcome]).inc();
        self.gateway_request_duration
            .with_label_values(&[operation])
            .observe(duration_secs);
    }

    pub fn record_workflow(&self, workflow: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.production_workflows.with_label_values(&[workflow, outcome]).inc();
    }

    pub fn record_order_transition(&self, command: &str, applied: bool) {
        let outcome = if applied { "applied" } else { "refused" };
        self.order_transitions.with_label_values(&[command, outcome]).inc();
    }
}
