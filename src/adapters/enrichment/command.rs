use super::prompt::build_prompt;
use super::response::parse_response;
use crate::domain::enrichment::{Enrichment, EnrichmentRequest};
use crate::domain::ports::Enricher;
use anyhow::{Context, Result, anyhow, bail};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Enricher backed by an external command.
///
/// The prompt is written to the command's stdin; stdout must contain one JSON object
/// (see [`parse_response`]). Failed attempts are retried with exponential backoff
/// starting at `base_delay`.
#[derive(Debug, Clone)]
pub struct CommandEnricher {
    program: String,
    args: Vec<String>,
    attempts: u32,
    base_delay: Duration,
}

impl CommandEnricher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            attempts: DEFAULT_ATTEMPTS,
            base_delay: Duration::from_secs(1),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    fn run_once(&self, prompt: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        // Feed stdin from its own thread so stdout and stderr drain concurrently.
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_owned();
            std::thread::spawn(move || stdin.write_all(prompt.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for {}", self.program))?;
        if let Some(writer) = writer {
            match writer.join() {
                // A command may answer without reading the whole prompt.
                Ok(Err(err)) if err.kind() == ErrorKind::BrokenPipe => {
                    debug!("{} closed stdin early", self.program)
                }
                Ok(written) => written
                    .with_context(|| format!("Failed to write to {} stdin", self.program))?,
                Err(_) => bail!("stdin writer for {} panicked", self.program),
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Enricher for CommandEnricher {
    fn provider_id(&self) -> String {
        if self.args.is_empty() {
            format!("command:{}", self.program)
        } else {
            format!("command:{} {}", self.program, self.args.join(" "))
        }
    }

    fn analyze(&self, request: &EnrichmentRequest) -> Result<Enrichment> {
        let prompt = build_prompt(request);
        let mut last_error = anyhow!("no attempts made");

        for attempt in 0..self.attempts {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.saturating_pow(attempt - 1);
                debug!("Retrying {} in {:?}", request.name, delay);
                std::thread::sleep(delay);
            }
            match self.run_once(&prompt).and_then(|raw| parse_response(&raw)) {
                Ok(enrichment) => return Ok(enrichment),
                Err(err) => {
                    warn!(
                        "Attempt {}/{} for {} failed: {:#}",
                        attempt + 1,
                        self.attempts,
                        request.name,
                        err
                    );
                    last_error = err;
                }
            }
        }

        Err(last_error.context(format!(
            "{} gave no usable description for {} after {} attempts",
            self.program, request.name, self.attempts
        )))
    }
}
