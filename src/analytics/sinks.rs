//! Analytics Sinks

use std::io;

use tracing::{info, warn};

use crate::analytics::{AnalyticsEvent, AnalyticsSink};

/// Keeps every recorded event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<AnalyticsEvent>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[AnalyticsEvent] {
        &self.events
    }
}

impl AnalyticsSink for RecordingSink {
    fn record(&mut self, event: &AnalyticsEvent) {
        self.events.push(event.clone());
    }
}

/// Emits each event as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&mut self, event: &AnalyticsEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(target: "trolley::analytics", event = event.name(), %payload),
            Err(err) => warn!(target: "trolley::analytics", event = event.name(), %err, "could not encode event"),
        }
    }
}

/// Writes each event as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: io::Write> JsonLinesSink<W> {
    /// Create a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &AnalyticsEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: io::Write> AnalyticsSink for JsonLinesSink<W> {
    fn record(&mut self, event: &AnalyticsEvent) {
        if let Err(err) = self.write_event(event) {
            warn!(target: "trolley::analytics", event = event.name(), %err, "could not write event");
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{analytics::AddToCartEvent, products::Product};

    use super::*;

    fn add_event() -> AnalyticsEvent {
        AnalyticsEvent::AddToCart(AddToCartEvent::for_product(&Product::new(
            3,
            "Ergonomic Mouse",
            Decimal::new(45, 0),
        )))
    }

    #[test]
    fn recording_sink_keeps_events_in_order() {
        let mut sink = RecordingSink::new();

        sink.record(&add_event());
        sink.record(&add_event());

        assert_eq!(sink.events().len(), 2);
        assert!(sink.events().iter().all(|e| e.name() == "add_to_cart"));
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_event() -> TestResult {
        let mut sink = JsonLinesSink::new(Vec::new());

        sink.record(&add_event());
        sink.record(&add_event());

        let output = String::from_utf8(sink.into_inner())?;
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);

        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line)?;
            assert_eq!(value["event"], "add_to_cart");
        }

        Ok(())
    }

    #[test]
    fn borrowed_sinks_record_into_the_owner() {
        fn record_twice(mut sink: impl AnalyticsSink) {
            sink.record(&add_event());
            sink.record(&add_event());
        }

        let mut sink = RecordingSink::new();

        record_twice(&mut sink);

        assert_eq!(sink.events().len(), 2);
    }
}
