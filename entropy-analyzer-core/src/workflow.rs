// entropy-analyzer-core/src/workflow.rs
//! A small run lifecycle shared by every workflow.
//!
//! [`Workflow::run`] validates the input, executes the workflow body, validates
//! the output and logs each stage under the workflow's id. Failures come back
//! as one of three [`WorkflowError`] classes: validation (input or output),
//! execution (the body returned an error) and unexpected (the body panicked).
//!
//! [`EntropyWorkflow`] is the concrete workflow that scores one
//! [`EntropyRequest`] through an [`EntropyFactory`].
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use uuid::Uuid;

use crate::datum::Datum;
use crate::errors::WorkflowError;
use crate::factory::EntropyFactory;
use crate::strategy::{EntropyStrategy, StrategyKind};

fn stage_log(verbose: bool, message: fmt::Arguments<'_>) {
    if verbose {
        info!("{}", message);
    } else {
        debug!("{}", message);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A unit of work with checked input and output.
pub trait Workflow {
    type Input: fmt::Debug;
    type Output: fmt::Debug;

    fn workflow_id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Logs lifecycle stages at `info` instead of `debug`.
    fn verbose(&self) -> bool {
        false
    }

    fn validate_input(&self, _input: &Self::Input) -> Result<(), String> {
        Ok(())
    }

    fn validate_output(&self, _output: &Self::Output) -> Result<(), String> {
        Ok(())
    }

    /// The workflow body.
    fn run_workflow(&self, input: Self::Input) -> anyhow::Result<Self::Output>;

    /// Runs the full lifecycle.
    fn run(&self, input: Self::Input) -> Result<Self::Output, WorkflowError> {
        let verbose = self.verbose();

        if let Err(reason) = self.validate_input(&input) {
            error!("Input validation failed: {}. Input data: {:?}", reason, input);
            return Err(WorkflowError::Validation(format!("invalid input data: {}", reason)));
        }

        stage_log(verbose, format_args!("Starting workflow: {} ({}).", self.name(), self.workflow_id()));
        stage_log(verbose, format_args!("Input data: {:?}.", input));
        if !self.description().is_empty() {
            stage_log(verbose, format_args!("Description: {}.", self.description()));
        }

        let output = match catch_unwind(AssertUnwindSafe(|| self.run_workflow(input))) {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                error!("Workflow execution failed: {:#}.", err);
                return Err(WorkflowError::Execution(format!("{:#}", err)));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Workflow failed: {}.", message);
                return Err(WorkflowError::Unexpected(message));
            }
        };

        if let Err(reason) = self.validate_output(&output) {
            error!("Output validation failed: {}. Output data: {:?}", reason, output);
            return Err(WorkflowError::Validation(format!("invalid output data: {}", reason)));
        }

        stage_log(verbose, format_args!("Workflow result: {:?}.", output));
        stage_log(verbose, format_args!("Workflow completed successfully: {}.", self.name()));
        Ok(output)
    }
}

/// One scoring job: a strategy token and the data to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyRequest {
    pub strategy: String,
    #[serde(default)]
    pub data: Option<Datum>,
}

impl EntropyRequest {
    pub fn new(strategy: impl Into<String>, data: Option<Datum>) -> Self {
        Self { strategy: strategy.into(), data }
    }
}

/// The result of an [`EntropyWorkflow`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyReport {
    pub workflow_id: String,
    pub strategy: StrategyKind,
    pub score: f64,
}

/// Scores a single [`EntropyRequest`].
#[derive(Debug, Clone)]
pub struct EntropyWorkflow {
    workflow_id: String,
    factory: EntropyFactory,
    verbose: bool,
}

impl EntropyWorkflow {
    /// A workflow with a freshly generated id.
    pub fn new(factory: EntropyFactory) -> Self {
        Self::with_id(None, factory)
    }

    /// A workflow with the given id; a missing or empty id gets a UUID.
    pub fn with_id(workflow_id: Option<String>, factory: EntropyFactory) -> Self {
        let workflow_id = workflow_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            workflow_id,
            factory,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn factory(&self) -> &EntropyFactory {
        &self.factory
    }
}

impl Workflow for EntropyWorkflow {
    type Input = EntropyRequest;
    type Output = EntropyReport;

    fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    fn name(&self) -> &str {
        "entropy"
    }

    fn description(&self) -> &str {
        "Scores one input with the requested entropy strategy"
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn validate_input(&self, input: &EntropyRequest) -> Result<(), String> {
        input
            .strategy
            .parse::<StrategyKind>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn validate_output(&self, output: &EntropyReport) -> Result<(), String> {
        if output.score.is_finite() && (0.0..=1.0).contains(&output.score) {
            Ok(())
        } else {
            Err(format!("score {} is outside [0, 1]", output.score))
        }
    }

    fn run_workflow(&self, input: EntropyRequest) -> anyhow::Result<EntropyReport> {
        let strategy = self.factory.get(Some(input.strategy.as_str()))?;
        let score = strategy.compute_entropy(input.data.as_ref())?;
        Ok(EntropyReport {
            workflow_id: self.workflow_id.clone(),
            strategy: strategy.kind(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanickingWorkflow;

    impl Workflow for PanickingWorkflow {
        type Input = ();
        type Output = ();

        fn workflow_id(&self) -> &str {
            "panic-test"
        }

        fn name(&self) -> &str {
            "panics"
        }

        fn run_workflow(&self, _input: ()) -> anyhow::Result<()> {
            panic!("boom");
        }
    }

    #[test]
    fn generates_an_id_when_none_given() {
        let a = EntropyWorkflow::new(EntropyFactory::default());
        let b = EntropyWorkflow::with_id(Some(String::new()), EntropyFactory::default());
        assert_eq!(a.workflow_id().len(), 36);
        assert_ne!(a.workflow_id(), b.workflow_id());
        let named = EntropyWorkflow::with_id(Some("job-1".into()), EntropyFactory::default());
        assert_eq!(named.workflow_id(), "job-1");
    }

    #[test]
    fn scores_a_request() {
        let workflow = EntropyWorkflow::with_id(Some("job-2".into()), EntropyFactory::default());
        let report = workflow
            .run(EntropyRequest::new("text", Some(Datum::from("abcd"))))
            .unwrap();
        assert_eq!(report.workflow_id, "job-2");
        assert_eq!(report.strategy, StrategyKind::Text);
        assert!((report.score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn request_deserializes_from_json() {
        let request: EntropyRequest = serde_json::from_str(r#"{"strategy": "numerical", "data": [1, 2.5]}"#).unwrap();
        assert_eq!(request.data, Some(Datum::List(vec![Datum::Int(1), Datum::Float(2.5)])));
        let bare: EntropyRequest = serde_json::from_str(r#"{"strategy": "text"}"#).unwrap();
        assert_eq!(bare.data, None);
    }

    #[test]
    fn unknown_strategy_is_a_validation_error() {
        let workflow = EntropyWorkflow::new(EntropyFactory::default());
        let err = workflow.run(EntropyRequest::new("fuzzy", None)).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(ref m) if m.contains("Invalid Strategy Type: fuzzy")));
    }

    #[test]
    fn wrong_shape_is_an_execution_error() {
        let workflow = EntropyWorkflow::new(EntropyFactory::default());
        let err = workflow
            .run(EntropyRequest::new("numerical", Some(Datum::from("oops"))))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Execution(ref m) if m.contains("list of numbers")));
    }

    #[test]
    fn panics_are_unexpected_errors() {
        let err = PanickingWorkflow.run(()).unwrap_err();
        assert!(matches!(err, WorkflowError::Unexpected(ref m) if m == "boom"));
    }
}
