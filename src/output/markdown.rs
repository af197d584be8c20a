use super::{format_reading, OutputWriter};
use crate::alerts::NotificationResult;
use crate::providers::{Assessment, Reading};
use crate::risk::buckets::{bucket_index, describe_bucket};
use crate::risk::{Factor, ScoringInput, ScoringResult};
use crate::store::{FloodEvent, Subscription};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_breakdown(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()> {
        writeln!(self.writer, "| Factor | Reading | Bucket | Points | Label |")?;
        writeln!(self.writer, "|--------|---------|--------|--------|-------|")?;
        for (factor, reading, points) in [
            (Factor::Rainfall, input.rainfall_mm, result.rainfall_points),
            (Factor::Elevation, input.elevation_m, result.elevation_points),
        ] {
            let bucket = describe_bucket(factor, bucket_index(factor.table(), reading));
            let label = result
                .explanation
                .get(factor.name())
                .map(String::as_str)
                .unwrap_or("-");
            writeln!(
                self.writer,
                "| {} | {} {} | {} | {} | {} |",
                factor.name(),
                reading,
                factor.unit(),
                bucket,
                points,
                label
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_result_summary(&mut self, result: &ScoringResult) -> anyhow::Result<()> {
        writeln!(self.writer, "**Risk score:** {} / 100", result.risk_score)?;
        writeln!(self.writer, "**Severity:** {}", result.severity)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.summary)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

fn reading_note(reading: &Reading) -> &'static str {
    if reading.is_available() {
        ""
    } else {
        " (data unavailable)"
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_score(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Flood Risk Score")?;
        writeln!(self.writer)?;
        self.write_result_summary(result)?;
        self.write_breakdown(input, result)
    }

    fn write_assessment(&mut self, assessment: &Assessment) -> anyhow::Result<()> {
        let title = assessment
            .location_name
            .as_deref()
            .unwrap_or("Flood Risk Assessment");
        writeln!(self.writer, "# {}", title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Coordinates: {}", assessment.location)?;
        writeln!(
            self.writer,
            "Rainfall: {} mm{}",
            assessment.rainfall.value,
            reading_note(&assessment.rainfall)
        )?;
        writeln!(
            self.writer,
            "Elevation: {} m{}",
            assessment.elevation.value,
            reading_note(&assessment.elevation)
        )?;
        if assessment.has_missing_data() {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "> Unavailable readings were scored as 0; the real risk may be higher."
            )?;
        }
        writeln!(self.writer)?;
        self.write_result_summary(&assessment.result)?;
        let input = ScoringInput::new(assessment.rainfall.value, assessment.elevation.value);
        self.write_breakdown(&input, &assessment.result)
    }

    fn write_batch(&mut self, rows: &[(ScoringInput, ScoringResult)]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Batch Flood Risk Scores")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Rainfall (mm) | Elevation (m) | Score | Severity |")?;
        writeln!(self.writer, "|---|---------------|---------------|-------|----------|")?;
        for (i, (input, result)) in rows.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                i + 1,
                input.rainfall_mm,
                input.elevation_m,
                result.risk_score,
                result.severity
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_events(&mut self, events: &[FloodEvent]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Flood Events")?;
        writeln!(self.writer)?;
        if events.is_empty() {
            writeln!(self.writer, "_No flood events recorded._")?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| ID | Location | Coordinates | Severity | Score | Rainfall | Elevation | Recorded |"
        )?;
        writeln!(
            self.writer,
            "|----|----------|-------------|----------|-------|----------|-----------|----------|"
        )?;
        for event in events {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                event.id,
                event.location_name,
                event.location,
                event.severity,
                event.risk_score,
                format_reading(event.rainfall_mm, "mm"),
                format_reading(event.elevation_m, "m"),
                event.timestamp.format("%Y-%m-%d %H:%M UTC")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_event(&mut self, event: &FloodEvent) -> anyhow::Result<()> {
        writeln!(self.writer, "# Flood Event {}: {}", event.id, event.location_name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- **Severity:** {}", event.severity)?;
        writeln!(self.writer, "- **Risk score:** {} / 100", event.risk_score)?;
        writeln!(self.writer, "- **Coordinates:** {}", event.location)?;
        writeln!(self.writer, "- **Rainfall:** {}", format_reading(event.rainfall_mm, "mm"))?;
        writeln!(self.writer, "- **Elevation:** {}", format_reading(event.elevation_m, "m"))?;
        writeln!(
            self.writer,
            "- **Recorded:** {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(description) = &event.description {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", description)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_subscriptions(&mut self, subscriptions: &[Subscription]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Alert Subscriptions")?;
        writeln!(self.writer)?;
        if subscriptions.is_empty() {
            writeln!(self.writer, "_No subscriptions._")?;
            return Ok(());
        }
        writeln!(self.writer, "| ID | Email | Phone | Coordinates | Radius | Min Severity | Active |")?;
        writeln!(self.writer, "|----|-------|-------|-------------|--------|--------------|--------|")?;
        for sub in subscriptions {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} km | {} | {} |",
                sub.id,
                sub.email.as_deref().unwrap_or("-"),
                sub.phone.as_deref().unwrap_or("-"),
                sub.location,
                sub.radius_km,
                sub.min_severity,
                if sub.active { "yes" } else { "no" }
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_notification(&mut self, result: &NotificationResult) -> anyhow::Result<()> {
        writeln!(self.writer, "# Alert Dispatch")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.message)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Channel | Sent | Failed |")?;
        writeln!(self.writer, "|---------|------|--------|")?;
        writeln!(self.writer, "| SMS | {} | {} |", result.sms_sent, result.sms_failed)?;
        writeln!(
            self.writer,
            "| Email | {} | {} |",
            result.emails_sent, result.emails_failed
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}
