use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Progress events emitted while a scenario runs
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    ScenarioStarted {
        name: String,
        step_count: usize,
    },
    StepStarted {
        index: usize,
        name: String,
    },
    StepPassed {
        index: usize,
        duration_ms: u64,
    },
    StepFailed {
        index: usize,
        note: String,
        duration_ms: u64,
    },
    StepSkipped {
        index: usize,
        name: String,
        reason: String,
    },
    ScenarioFinished {
        name: String,
        passed: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Prints run events to stdout, with a spinner while a request is in flight
pub struct ConsoleListener {
    spinner: Option<ProgressBar>,
    step_text: String,
    interactive: bool,
}

impl ConsoleListener {
    pub fn new() -> Self {
        Self {
            spinner: None,
            step_text: String::new(),
            interactive: std::io::stdout().is_terminal(),
        }
    }

    pub fn handle(&mut self, event: &RunEvent) {
        match event {
            RunEvent::ScenarioStarted { name, step_count } => {
                println!(
                    "\n  {} Scenario: {} ({} steps)",
                    "→".blue(),
                    name.white().bold(),
                    step_count
                );
            }

            RunEvent::StepStarted { index, name } => {
                self.step_text = format!("[{}] {}... ", index + 1, name.dimmed());

                // Piped output gets no spinner, only the final line
                let pb = if self.interactive {
                    ProgressBar::new_spinner()
                } else {
                    ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
                };
                if let Ok(style) = ProgressStyle::default_spinner()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .template("    {spinner} {msg}")
                {
                    pb.set_style(style);
                }
                pb.set_message(self.step_text.clone());
                pb.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(pb);
            }

            RunEvent::StepPassed { duration_ms, .. } => {
                self.clear_spinner();
                println!("    {} {}({}ms)", "✓".green(), self.step_text, duration_ms);
            }

            RunEvent::StepFailed {
                note, duration_ms, ..
            } => {
                self.clear_spinner();
                println!("    {} {}({}ms)", "✗".red(), self.step_text, duration_ms);
                if !note.is_empty() {
                    println!("      {}", note.red());
                }
            }

            RunEvent::StepSkipped {
                index,
                name,
                reason,
            } => {
                println!(
                    "    {} [{}] {} ({})",
                    "○".yellow(),
                    index + 1,
                    name.dimmed(),
                    reason.dimmed()
                );
            }

            RunEvent::ScenarioFinished {
                name,
                passed,
                failed,
                skipped,
            } => {
                let status = if *failed == 0 {
                    "PASSED".green().bold()
                } else {
                    "FAILED".red().bold()
                };
                println!("  {} Scenario {} [{}]", "←".blue(), name, status);
                if *skipped > 0 {
                    println!(
                        "    {} passed, {} failed, {} skipped",
                        passed.to_string().green(),
                        failed.to_string().red(),
                        skipped.to_string().yellow()
                    );
                }
            }
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ConsoleListener {
    fn default() -> Self {
        Self::new()
    }
}
