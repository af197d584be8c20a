use super::OutputWriter;
use crate::alerts::NotificationResult;
use crate::providers::Assessment;
use crate::risk::{ScoringInput, ScoringResult};
use crate::store::{FloodEvent, Subscription};
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ScoredInput<'a> {
    input: &'a ScoringInput,
    result: &'a ScoringResult,
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_score(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()> {
        self.emit(&ScoredInput { input, result })
    }

    fn write_assessment(&mut self, assessment: &Assessment) -> anyhow::Result<()> {
        self.emit(assessment)
    }

    fn write_batch(&mut self, rows: &[(ScoringInput, ScoringResult)]) -> anyhow::Result<()> {
        let rows: Vec<ScoredInput<'_>> = rows
            .iter()
            .map(|(input, result)| ScoredInput { input, result })
            .collect();
        self.emit(&rows)
    }

    fn write_events(&mut self, events: &[FloodEvent]) -> anyhow::Result<()> {
        self.emit(events)
    }

    fn write_event(&mut self, event: &FloodEvent) -> anyhow::Result<()> {
        self.emit(event)
    }

    fn write_subscriptions(&mut self, subscriptions: &[Subscription]) -> anyhow::Result<()> {
        self.emit(subscriptions)
    }

    fn write_notification(&mut self, result: &NotificationResult) -> anyhow::Result<()> {
        self.emit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::score;

    #[test]
    fn test_batch_is_array_in_input_order() {
        let rows = vec![
            (ScoringInput::new(0.0, 500.0), score(0.0, 500.0)),
            (ScoringInput::new(60.0, 0.0), score(60.0, 0.0)),
        ];
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_batch(&rows).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["result"]["risk_score"], 15.0);
        assert_eq!(array[1]["result"]["severity"], "Critical");
        assert_eq!(array[1]["input"]["rainfall_mm"], 60.0);
    }

    #[test]
    fn test_notification_fields() {
        let result = NotificationResult {
            sms_sent: 1,
            message: "Notified 1 subscriptions".into(),
            ..NotificationResult::default()
        };
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf).write_notification(&result).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["sms_sent"], 1);
        assert_eq!(json["emails_failed"], 0);
    }
}
