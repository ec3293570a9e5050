use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub bid_submissions: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let bid_submissions = IntCounterVec::new(
            Opts::new("gavel_bid_submissions_total", "Bid submissions by outcome"),
            &["outcome"],
        )
        .expect("metric definition is valid");
        registry
            .register(Box::new(bid_submissions.clone()))
            .expect("metric registered once");

        Self { registry, bid_submissions }
    }

    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
