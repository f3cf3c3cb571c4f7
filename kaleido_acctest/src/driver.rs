//! Test driver for the three-phase acceptance protocol.
//!
//! A [`TestCase`] owns its pre-check, steps, and destroy-check; the
//! [`Provider`] that applies configuration is injected per case, so no
//! process-wide registry exists and independent cases can run in parallel
//! under the standard test runner.

use crate::check::CheckFn;
use crate::error::{HarnessError, ProviderError};
use crate::state::State;

/// Applies rendered configuration and tears it down again.
///
/// Implementations are opaque to the harness: a full provisioning engine
/// and a scripted stub are equally valid.
pub trait Provider {
    /// Applies a configuration document, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Surfaces whatever the underlying applier reports; the driver wraps
    /// it with the failing step index.
    fn apply(&mut self, config: &str) -> Result<State, ProviderError>;

    /// Destroys everything the case applied, returning post-destroy state.
    ///
    /// # Errors
    ///
    /// Surfaces whatever the underlying applier reports.
    fn destroy(&mut self) -> Result<State, ProviderError>;
}

/// One apply-then-check step of a test case.
pub struct TestStep {
    /// Configuration document handed to the provider.
    pub config: String,
    /// Composed check run against the applied state.
    pub check: CheckFn,
}

impl TestStep {
    /// Creates a step from a rendered document and a composed check.
    #[must_use]
    pub fn new(config: impl Into<String>, check: CheckFn) -> Self {
        Self {
            config: config.into(),
            check,
        }
    }
}

/// A complete acceptance test case.
#[derive(Default)]
pub struct TestCase {
    pre_check: Option<Box<dyn Fn() -> Result<(), ProviderError>>>,
    steps: Vec<TestStep>,
    check_destroy: Option<CheckFn>,
}

impl TestCase {
    /// Creates an empty case.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sanity check run before anything is applied.
    #[must_use]
    pub fn pre_check(mut self, check: impl Fn() -> Result<(), ProviderError> + 'static) -> Self {
        self.pre_check = Some(Box::new(check));
        self
    }

    /// Appends an apply-then-check step.
    #[must_use]
    pub fn step(mut self, step: TestStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Sets the check run against post-destroy state.
    #[must_use]
    pub fn check_destroy(mut self, check: CheckFn) -> Self {
        self.check_destroy = Some(check);
        self
    }
}

/// Runs a case against a provider.
///
/// The pre-check aborts the run before any apply. Steps execute in order;
/// the first apply or check failure stops further steps. Once anything has
/// been applied, destroy is always attempted so fixtures never leak, and
/// the destroy-check runs against the state destroy returns. The first
/// failure is the one surfaced; a destroy failure is only reported when
/// the case otherwise passed.
///
/// # Errors
///
/// Returns a [`HarnessError`] naming the failing phase.
pub fn run(case: &TestCase, provider: &mut dyn Provider) -> Result<(), HarnessError> {
    if let Some(pre_check) = &case.pre_check {
        pre_check().map_err(|source| HarnessError::PreCheck { source })?;
    }

    let mut outcome = Ok(());
    let mut applied = false;
    for (step_index, step) in case.steps.iter().enumerate() {
        tracing::debug!(step = step_index, "applying configuration");
        match provider.apply(&step.config) {
            Ok(state) => {
                applied = true;
                if let Err(source) = (step.check)(&state) {
                    outcome = Err(HarnessError::Check {
                        step: step_index,
                        source,
                    });
                    break;
                }
            }
            Err(source) => {
                // An apply can fail after partially creating resources,
                // so teardown still runs below.
                applied = true;
                outcome = Err(HarnessError::Apply {
                    step: step_index,
                    source,
                });
                break;
            }
        }
    }

    if !applied {
        return outcome;
    }

    tracing::debug!("destroying applied resources");
    let teardown = match provider.destroy() {
        Ok(state) => match &case.check_destroy {
            Some(check) => {
                check(&state).map_err(|source| HarnessError::CheckDestroy { source })
            }
            None => Ok(()),
        },
        Err(source) => Err(HarnessError::Destroy { source }),
    };

    match (outcome, teardown) {
        (Err(first), _) => Err(first),
        (Ok(()), result) => result,
    }
}
