//! Terminal-backed alerts and notifications for the CLI.

use std::io::{self, BufRead, Write};

use super::{Alerts, ExportAction, LocalNotification, Notifier};
use crate::errors::Result;

/// Prints alerts to stdout and reads prompt answers from stdin.
///
/// With a preset answer the prompt is printed but never read. Reading stdin
/// blocks the worker thread, so it needs the multi-threaded runtime.
pub struct ConsoleAlerts {
    preset: Option<ExportAction>,
}

impl ConsoleAlerts {
    pub fn new(preset: Option<ExportAction>) -> Self {
        Self { preset }
    }
}

impl Alerts for ConsoleAlerts {
    fn alert(&self, title: &str, message: &str) {
        println!("[{}] {}", title, message);
    }

    fn prompt(&self, title: &str, message: &str, choices: &[ExportAction]) -> ExportAction {
        println!("[{}] {}", title, message);
        let options: Vec<String> = choices
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}) {}", i + 1, c))
            .collect();
        println!("  {}", options.join("  "));

        if let Some(preset) = self.preset {
            println!("> {}", preset);
            return preset;
        }

        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = tokio::task::block_in_place(|| io::stdin().lock().read_line(&mut line));
        if read.is_err() {
            return ExportAction::Cancel;
        }

        let answer = line.trim();
        if let Ok(index) = answer.parse::<usize>() {
            return choices
                .get(index.wrapping_sub(1))
                .copied()
                .unwrap_or(ExportAction::Cancel);
        }
        answer
            .parse::<ExportAction>()
            .ok()
            .filter(|a| choices.contains(a))
            .unwrap_or(ExportAction::Cancel)
    }
}

/// Shows notifications as a terminal line.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn schedule(&self, notification: &LocalNotification) -> Result<()> {
        tracing::info!(
            id = %notification.id,
            uri = %notification.uri,
            "Notification scheduled"
        );
        println!("* {}: {}", notification.title, notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_answer_skips_stdin() {
        let alerts = ConsoleAlerts::new(Some(ExportAction::Share));
        let answer = alerts.prompt("Download", "What next?", &ExportAction::ALL);
        assert_eq!(answer, ExportAction::Share);
    }
}
