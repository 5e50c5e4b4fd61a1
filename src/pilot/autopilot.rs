use std::io::{self, BufRead, Write};
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    config::{PilotConfig, SessionBackendConfig},
    error::Result,
    models::{ChainResult, ExtractResult, TaskResult},
    planner::{GatewayBackend, TaskPlanner},
    prompt::builder::build_extract_prompt,
    session::{BrowserSession, MockFactory, RemoteFactory, SessionFactory},
    utils::StripCodeFence,
};

/// Autonomous web task agent: plans a task, drives a browser session through
/// the automation backend with bounded retries, and settles the outcome into
/// a result record. Public methods never return an error; all failure
/// information travels through the records' `success`/`error` fields.
pub struct AutoPilot {
    config: PilotConfig,
    planner: TaskPlanner,
    sessions: Box<dyn SessionFactory>,
}

impl AutoPilot {
    /// Composition root: backends are chosen here, from configuration alone.
    pub fn new(config: PilotConfig) -> Self {
        let planner = match &config.llm {
            Some(llm) => match GatewayBackend::new(llm) {
                Ok(backend) => TaskPlanner::new(Box::new(backend)),
                Err(e) => {
                    warn!("model gateway initialization failed: {e}");
                    TaskPlanner::disabled()
                }
            },
            None => TaskPlanner::disabled(),
        };

        let sessions: Box<dyn SessionFactory> = match &config.session {
            SessionBackendConfig::Remote { endpoint } => Box::new(RemoteFactory::new(
                endpoint,
                config.headless,
                config.timeout_secs,
            )),
            SessionBackendConfig::Mock => Box::new(MockFactory),
        };

        Self {
            config,
            planner,
            sessions,
        }
    }

    /// Assemble from explicit parts. Used by tests to script collaborators.
    pub fn with_parts(
        config: PilotConfig,
        planner: TaskPlanner,
        sessions: Box<dyn SessionFactory>,
    ) -> Self {
        Self {
            config,
            planner,
            sessions,
        }
    }

    /// Execute a web automation task described in natural language.
    pub async fn execute(
        &self,
        task: &str,
        starting_url: Option<&str>,
        capture_screenshots: bool,
    ) -> TaskResult {
        let clock = Instant::now();
        let mut result = TaskResult::started();

        let plan = self.planner.plan(task).await;
        if plan.human_review_needed {
            warn!("task may require human review");
        }

        match self.sessions.open(starting_url).await {
            Ok(session) => {
                for attempt in 1..=self.config.max_retries {
                    match session.act(task).await {
                        Ok(data) => {
                            result.success = true;
                            result.data = Some(data);
                            result.steps_taken =
                                plan.steps.iter().map(|s| s.action.clone()).collect();

                            if capture_screenshots {
                                // A screenshot is a bonus, never a failure.
                                if let Ok(shot) = session.screenshot().await
                                    && !shot.is_empty()
                                {
                                    result.screenshots.push(shot);
                                }
                            }
                            break;
                        }
                        Err(e) => {
                            warn!("attempt {attempt} failed: {e}");
                            if attempt == self.config.max_retries {
                                result.error = Some(e.to_string());
                            }
                        }
                    }
                }

                // The outcome is settled; a teardown failure is only logged.
                if let Err(e) = session.stop().await {
                    warn!("session teardown failed: {e}");
                }
            }
            Err(e) => {
                error!("task execution failed: {e}");
                result.error = Some(e.to_string());
            }
        }

        result.execution_time = clock.elapsed().as_secs_f64();
        result.completed_at = Some(Utc::now());
        result
    }

    /// Extract structured data from a webpage.
    pub async fn extract(
        &self,
        task: &str,
        starting_url: Option<&str>,
        schema: Option<&Value>,
    ) -> ExtractResult {
        let clock = Instant::now();
        let mut result = ExtractResult::started(starting_url);

        match self.sessions.open(starting_url).await {
            Ok(session) => {
                match Self::pull_data(session.as_ref(), task).await {
                    Ok(data) => {
                        if let Some(schema) = schema {
                            result.schema_validated = schema_conforms(&data, schema);
                        }
                        result.data = data;
                        result.success = true;
                    }
                    Err(e) => {
                        error!("extraction failed: {e}");
                        result.error = Some(e.to_string());
                    }
                }

                if let Err(e) = session.stop().await {
                    warn!("session teardown failed: {e}");
                }
            }
            Err(e) => {
                error!("extraction failed: {e}");
                result.error = Some(e.to_string());
            }
        }

        result.extraction_time = clock.elapsed().as_secs_f64();
        result
    }

    async fn pull_data(session: &dyn BrowserSession, task: &str) -> Result<Value> {
        if session.supports_extraction() {
            return session.act_get(task).await;
        }

        // Backend without structured extraction: ask for JSON in prose and
        // parse a string reply.
        let raw = session.act(&build_extract_prompt(task)).await?;
        match raw {
            Value::String(text) => Ok(serde_json::from_str(text.strip_code_fence())?),
            other => Ok(other),
        }
    }

    /// Execute tasks in sequence. Every task starts a fresh session at the
    /// original starting URL; browser state does not carry across tasks.
    pub async fn chain(
        &self,
        tasks: &[String],
        starting_url: Option<&str>,
        stop_on_failure: bool,
    ) -> ChainResult {
        let clock = Instant::now();
        let mut result = ChainResult::started();

        for task in tasks {
            let task_result = self.execute(task, starting_url, true).await;
            let succeeded = task_result.success;
            result.results.push(task_result);

            if succeeded {
                result.tasks_completed += 1;
            } else {
                result.tasks_failed += 1;
                result.success = false;
                if stop_on_failure {
                    break;
                }
            }
        }

        result.total_execution_time = clock.elapsed().as_secs_f64();
        result
    }

    /// Manual REPL over one long-lived session: each line is dispatched as an
    /// action, `screenshot` captures one, `quit`/`exit` ends the loop.
    pub async fn interactive(&self, starting_url: Option<&str>) -> Result<()> {
        let session = self.sessions.open(starting_url).await?;
        info!("interactive session started, type 'quit' to exit");

        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("task> ");
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let task = line.trim();

            match task.to_lowercase().as_str() {
                "" => continue,
                "quit" | "exit" | "q" => break,
                "screenshot" => match session.screenshot().await {
                    Ok(shot) => println!("screenshot captured ({} bytes)", shot.len()),
                    Err(e) => println!("screenshot failed: {e}"),
                },
                _ => match session.act(task).await {
                    Ok(data) => println!("{data}"),
                    Err(e) => println!("error: {e}"),
                },
            }
        }

        if let Err(e) = session.stop().await {
            warn!("session teardown failed: {e}");
        }
        Ok(())
    }
}

/// True only when the schema compiles and the data conforms. An invalid
/// schema downgrades the flag instead of failing the extraction.
fn schema_conforms(data: &Value, schema: &Value) -> bool {
    let validator = match jsonschema::validator_for(schema) {
        Ok(v) => v,
        Err(e) => {
            warn!("invalid extraction schema: {e}");
            return false;
        }
    };

    let errors: Vec<String> = validator.iter_errors(data).map(|e| e.to_string()).collect();
    if errors.is_empty() {
        return true;
    }

    warn!("schema validation failed: {}", errors.join("; "));
    false
}
