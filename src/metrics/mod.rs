//! Prometheus metrics for the HTTP surface and DCA runs

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub dca_executions_total: IntCounter,
    pub dca_skipped_total: IntCounter,
    pub dca_failures_total: IntCounter,
    pub market_data_fallbacks_total: IntCounter,
    pub buy_multiplier: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let dca_executions_total = IntCounter::new(
            "dca_executions_total",
            "Currency exchanges executed by the DCA job",
        )?;
        let dca_skipped_total =
            IntCounter::new("dca_skipped_total", "DCA runs that ended without an exchange")?;
        let dca_failures_total =
            IntCounter::new("dca_failures_total", "DCA runs that failed with an error")?;
        let market_data_fallbacks_total = IntCounter::new(
            "market_data_fallbacks_total",
            "DCA runs that used the neutral multiplier because market data was unavailable",
        )?;
        let buy_multiplier = Gauge::new("buy_multiplier", "Most recent buy level multiplier")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(dca_executions_total.clone()))?;
        registry.register(Box::new(dca_skipped_total.clone()))?;
        registry.register(Box::new(dca_failures_total.clone()))?;
        registry.register(Box::new(market_data_fallbacks_total.clone()))?;
        registry.register(Box::new(buy_multiplier.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            dca_executions_total,
            dca_skipped_total,
            dca_failures_total,
            market_data_fallbacks_total,
            buy_multiplier,
        })
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
