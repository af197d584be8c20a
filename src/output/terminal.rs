use super::{format_reading, OutputWriter};
use crate::alerts::NotificationResult;
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::providers::{Assessment, Reading};
use crate::risk::buckets::{bucket_index, describe_bucket};
use crate::risk::{Factor, ScoringInput, ScoringResult};
use crate::store::{FloodEvent, Subscription};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

const DIVIDER: &str = "════════════════════════════════════════";
const PLAIN_DIVIDER: &str = "========================================";

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    plain: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
            plain: formatting == FormattingConfig::plain(),
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.plain { ASCII_FULL } else { UTF8_FULL })
            .set_content_arrangement(ContentArrangement::Disabled);
        table
    }

    fn divider(&self) -> &'static str {
        if self.plain {
            PLAIN_DIVIDER
        } else {
            DIVIDER
        }
    }

    fn write_title(&mut self, title: &str) -> anyhow::Result<()> {
        let icon = self.formatter.emoji("🌊", "[FLOOD]");
        writeln!(self.writer, "{}", self.formatter.header(self.divider()))?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.header(&format!("{} {}", icon, title))
        )?;
        writeln!(self.writer, "{}", self.formatter.header(self.divider()))?;
        Ok(())
    }

    fn write_result(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {} / 100  ({})",
            self.formatter.bold("Risk score:"),
            result.risk_score,
            self.formatter.severity(result.severity)
        )?;
        writeln!(self.writer)?;

        let mut table = self.table();
        table.set_header(vec!["Factor", "Reading", "Bucket", "Points", "Label"]);
        for (factor, reading, points) in [
            (Factor::Rainfall, input.rainfall_mm, result.rainfall_points),
            (Factor::Elevation, input.elevation_m, result.elevation_points),
        ] {
            let label = result
                .explanation
                .get(factor.name())
                .cloned()
                .unwrap_or_default();
            table.add_row(vec![
                factor.name().to_string(),
                format!("{} {}", reading, factor.unit()),
                describe_bucket(factor, bucket_index(factor.table(), reading)),
                format!("{}", points),
                label,
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.summary)?;
        Ok(())
    }

    fn write_reading_line(&mut self, name: &str, reading: &Reading, unit: &str) -> anyhow::Result<()> {
        if reading.is_available() {
            writeln!(self.writer, "  {}: {} {}", name, reading.value, unit)?;
        } else {
            let warn = self.formatter.emoji("⚠️", "[!]");
            writeln!(
                self.writer,
                "  {}: {} {} {}",
                name,
                reading.value,
                unit,
                self.formatter.dim(&format!("{} data unavailable, scored as 0", warn))
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_score(&mut self, input: &ScoringInput, result: &ScoringResult) -> anyhow::Result<()> {
        self.write_title("FLOOD RISK SCORE")?;
        writeln!(self.writer)?;
        self.write_result(input, result)
    }

    fn write_assessment(&mut self, assessment: &Assessment) -> anyhow::Result<()> {
        let title = match &assessment.location_name {
            Some(name) => format!("FLOOD RISK: {}", name),
            None => "FLOOD RISK ASSESSMENT".to_string(),
        };
        self.write_title(&title)?;
        writeln!(self.writer, "  Coordinates: {}", assessment.location)?;
        self.write_reading_line("Rainfall", &assessment.rainfall, "mm")?;
        self.write_reading_line("Elevation", &assessment.elevation, "m")?;
        if assessment.has_missing_data() {
            writeln!(
                self.writer,
                "  {}",
                self.formatter
                    .dim("Score uses 0 for missing readings; the real risk may be higher.")
            )?;
        }
        writeln!(self.writer)?;

        let input = ScoringInput::new(assessment.rainfall.value, assessment.elevation.value);
        self.write_result(&input, &assessment.result)
    }

    fn write_batch(&mut self, rows: &[(ScoringInput, ScoringResult)]) -> anyhow::Result<()> {
        self.write_title(&format!("BATCH SCORES ({})", rows.len()))?;
        let mut table = self.table();
        table.set_header(vec!["#", "Rainfall (mm)", "Elevation (m)", "Score", "Severity"]);
        for (i, (input, result)) in rows.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                input.rainfall_mm.to_string(),
                input.elevation_m.to_string(),
                result.risk_score.to_string(),
                result.severity.to_string(),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_events(&mut self, events: &[FloodEvent]) -> anyhow::Result<()> {
        self.write_title(&format!("FLOOD EVENTS ({})", events.len()))?;
        if events.is_empty() {
            writeln!(self.writer, "{}", self.formatter.dim("No flood events recorded."))?;
            return Ok(());
        }
        let mut table = self.table();
        table.set_header(vec![
            "ID", "Location", "Coordinates", "Severity", "Score", "Rainfall", "Elevation", "Recorded",
        ]);
        for event in events {
            table.add_row(vec![
                event.id.to_string(),
                event.location_name.clone(),
                event.location.to_string(),
                event.severity.to_string(),
                event.risk_score.to_string(),
                format_reading(event.rainfall_mm, "mm"),
                format_reading(event.elevation_m, "m"),
                event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_event(&mut self, event: &FloodEvent) -> anyhow::Result<()> {
        self.write_title(&format!("EVENT #{}: {}", event.id, event.location_name))?;
        writeln!(
            self.writer,
            "  {} {}",
            self.formatter.bold("Severity:"),
            self.formatter.severity(event.severity)
        )?;
        writeln!(self.writer, "  {} {} / 100", self.formatter.bold("Risk score:"), event.risk_score)?;
        writeln!(self.writer, "  Coordinates: {}", event.location)?;
        writeln!(self.writer, "  Rainfall: {}", format_reading(event.rainfall_mm, "mm"))?;
        writeln!(self.writer, "  Elevation: {}", format_reading(event.elevation_m, "m"))?;
        writeln!(
            self.writer,
            "  Recorded: {}",
            event.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(description) = &event.description {
            writeln!(self.writer)?;
            writeln!(self.writer, "  {}", description)?;
        }
        Ok(())
    }

    fn write_subscriptions(&mut self, subscriptions: &[Subscription]) -> anyhow::Result<()> {
        self.write_title(&format!("SUBSCRIPTIONS ({})", subscriptions.len()))?;
        if subscriptions.is_empty() {
            writeln!(self.writer, "{}", self.formatter.dim("No subscriptions."))?;
            return Ok(());
        }
        let mut table = self.table();
        table.set_header(vec![
            "ID", "Email", "Phone", "Coordinates", "Radius", "Min Severity", "Active",
        ]);
        for sub in subscriptions {
            table.add_row(vec![
                sub.id.to_string(),
                sub.email.clone().unwrap_or_else(|| "-".into()),
                sub.phone.clone().unwrap_or_else(|| "-".into()),
                sub.location.to_string(),
                format!("{} km", sub.radius_km),
                sub.min_severity.to_string(),
                if sub.active { "yes" } else { "no" }.to_string(),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_notification(&mut self, result: &NotificationResult) -> anyhow::Result<()> {
        let icon = if result.failed() > 0 {
            self.formatter.emoji("⚠️", "[WARN]")
        } else {
            self.formatter.emoji("📣", "[ALERT]")
        };
        writeln!(self.writer, "{} {}", icon, self.formatter.bold(&result.message))?;
        writeln!(
            self.writer,
            "  SMS: {} sent, {} failed",
            result.sms_sent, result.sms_failed
        )?;
        writeln!(
            self.writer,
            "  Email: {} sent, {} failed",
            result.emails_sent, result.emails_failed
        )?;
        Ok(())
    }
}
