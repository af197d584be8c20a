//! Panic hook that prints a boxed crash report to stderr.
//!
//! The report names the phase and target recorded in the thread's
//! [`RunContext`](super::RunContext) plus the active tracing span.

use super::context::{get_current_context, RunContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    let span = Span::current()
        .metadata()
        .map(|metadata| metadata.name().to_string());

    eprintln!();
    for line in crash_report_lines(&extract_panic_message(info), location(info), &context, span) {
        eprintln!("{}", line);
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    }
}

fn location(info: &PanicHookInfo<'_>) -> Option<String> {
    info.location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
}

fn crash_report_lines(
    message: &str,
    location: Option<String>,
    context: &RunContext,
    span: Option<String>,
) -> Vec<String> {
    let rule = "═".repeat(WIDTH);
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    let mut lines = vec![
        format!("╔{}╗", rule),
        boxed("FLOODCAST CRASH REPORT"),
        format!("╠{}╣", rule),
        boxed(&format!("Version: {}", VERSION)),
        boxed(&format!("Platform: {}", std::env::consts::OS)),
        boxed(&format!("Time: {}", timestamp)),
        format!("╠{}╣", rule),
        boxed(&format!("PANIC: {}", message)),
    ];
    if let Some(location) = location {
        lines.push(boxed(&format!("Location: {}", location)));
    }

    lines.push(format!("╠{}╣", rule));
    match context.phase {
        Some(phase) => lines.push(boxed(&format!("  Phase: {}", phase))),
        None => lines.push(boxed("  Phase: (not set)")),
    }
    if let Some(span) = span {
        lines.push(boxed(&format!("  Span: {}", span)));
    }
    if let Some(target) = &context.target {
        lines.push(boxed(&format!("  Target: {}", target)));
    }
    if std::env::var("RUST_BACKTRACE").is_err() {
        lines.push(boxed("Run with RUST_BACKTRACE=1 for stack trace"));
    }
    lines.push(format!("╚{}╝", rule));
    lines
}

fn boxed(text: &str) -> String {
    let inner = WIDTH - 2;
    format!("║  {:<inner$}║", truncate(text, inner))
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
