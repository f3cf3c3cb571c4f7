//! Error types produced by the harness.
//!
//! Three layers map onto the places a test can fail: [`ApiError`] for the
//! remote client, [`CheckError`] for state verification, and
//! [`HarnessError`] for the driver's phases. Every failure is terminal for
//! its test case; nothing here retries.

use std::{error::Error, fmt};

use figment::Error as FigmentError;
use thiserror::Error;

/// Opaque error surfaced by a [`crate::Provider`] implementation.
pub type ProviderError = Box<dyn Error + Send + Sync>;

/// Errors raised by the remote API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The configured API base URL could not be parsed.
    #[error("invalid API base URL '{url}': {source}")]
    Url {
        /// Value that failed to parse.
        url: String,
        /// Underlying parser error.
        #[source]
        source: url::ParseError,
    },

    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Endpoint that was contacted.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Endpoint that produced the body.
        url: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

/// Errors raised while verifying applied state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckError {
    /// No resource with the given logical name exists in state.
    #[error("not found in state: {resource}")]
    NotFound {
        /// Logical resource name that was looked up.
        resource: String,
    },

    /// The resource exists but has no primary identifier.
    #[error("no resource instance for {resource}")]
    MissingInstance {
        /// Logical resource name whose instance is empty.
        resource: String,
    },

    /// The `id` attribute diverged from the primary identifier.
    #[error("id mismatch for environment: attribute {attribute}, primary {primary}")]
    IdMismatch {
        /// Value of the `id` attribute in state.
        attribute: String,
        /// Primary identifier recorded for the instance.
        primary: String,
    },

    /// A stored attribute did not hold the expected value.
    #[error("attribute mismatch for {resource}.{key}: expected '{expected}', got '{actual}'")]
    AttrMismatch {
        /// Logical resource name.
        resource: String,
        /// Attribute key.
        key: String,
        /// Expected attribute value.
        expected: String,
        /// Value found in state, empty when the attribute is absent.
        actual: String,
    },

    /// A resource was still present in post-destroy state.
    #[error("resource survived destroy: {resource}")]
    ResourceSurvived {
        /// Logical resource name that survived teardown.
        resource: String,
    },

    /// The remote API client failed before a status was available.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The remote fetch returned a status other than 200.
    #[error("expected environment with id {id}, status was: {status}")]
    UnexpectedStatus {
        /// Environment identifier that was fetched.
        id: String,
        /// HTTP status code the API returned.
        status: u16,
    },

    /// Multiple checks failed within one composed check.
    #[error("multiple check failures:\n{0}")]
    Aggregate(Box<AggregatedCheckErrors>),
}

impl CheckError {
    /// Folds a batch of failures into a single error.
    ///
    /// A single failure is returned unchanged; two or more are wrapped in
    /// [`CheckError::Aggregate`] so every one stays visible in the report.
    /// An empty batch yields an empty aggregate.
    #[must_use]
    pub fn aggregate(mut errors: Vec<Self>) -> Self {
        if errors.len() == 1 {
            if let Some(only) = errors.pop() {
                return only;
            }
        }
        Self::Aggregate(Box::new(AggregatedCheckErrors::new(errors)))
    }
}

/// Collection of [`CheckError`]s produced by one composed check run.
#[derive(Debug, Default)]
pub struct AggregatedCheckErrors(Vec<CheckError>);

impl AggregatedCheckErrors {
    /// Creates a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<CheckError>) -> Self {
        Self(errors)
    }

    /// Iterates over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &CheckError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedCheckErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedCheckErrors {}

/// Errors raised by the test driver's phases.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// Acceptance settings could not be gathered from the environment.
    #[error("failed to gather harness settings: {0}")]
    Settings(#[from] Box<FigmentError>),

    /// The pre-check rejected the run before anything was applied.
    #[error("pre-check failed: {source}")]
    PreCheck {
        /// Underlying pre-check error.
        #[source]
        source: ProviderError,
    },

    /// The provider failed to apply a step's configuration.
    #[error("apply failed at step {step}: {source}")]
    Apply {
        /// Zero-based index of the failing step.
        step: usize,
        /// Underlying provider error.
        #[source]
        source: ProviderError,
    },

    /// A step's composed check rejected the applied state.
    #[error("check failed at step {step}: {source}")]
    Check {
        /// Zero-based index of the failing step.
        step: usize,
        /// Underlying check error.
        #[source]
        source: CheckError,
    },

    /// The provider failed to tear the fixtures down.
    #[error("destroy failed: {source}")]
    Destroy {
        /// Underlying provider error.
        #[source]
        source: ProviderError,
    },

    /// The destroy-check found resources surviving teardown.
    #[error("destroy check failed: {source}")]
    CheckDestroy {
        /// Underlying check error.
        #[source]
        source: CheckError,
    },
}

#[cfg(test)]
mod tests {
    use super::{AggregatedCheckErrors, CheckError};

    fn not_found(resource: &str) -> CheckError {
        CheckError::NotFound {
            resource: resource.into(),
        }
    }

    #[test]
    fn single_failure_is_returned_unwrapped() {
        let folded = CheckError::aggregate(vec![not_found("kaleido_environment.basicEnv")]);
        assert!(matches!(folded, CheckError::NotFound { .. }));
    }

    #[test]
    fn multiple_failures_aggregate_and_enumerate() {
        let folded = CheckError::aggregate(vec![
            not_found("kaleido_environment.basicEnv"),
            CheckError::UnexpectedStatus {
                id: "env1".into(),
                status: 404,
            },
        ]);
        let CheckError::Aggregate(agg) = folded else {
            panic!("expected Aggregate, got {folded:?}");
        };
        assert_eq!(agg.len(), 2);
        let rendered = agg.to_string();
        assert!(rendered.starts_with("1: "));
        assert!(rendered.contains("\n2: "));
    }

    #[test]
    fn unexpected_status_display_names_id_and_status() {
        let err = CheckError::UnexpectedStatus {
            id: "env1".into(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "expected environment with id env1, status was: 500"
        );
    }

    #[test]
    fn empty_aggregate_is_empty() {
        let agg = AggregatedCheckErrors::new(Vec::new());
        assert!(agg.is_empty());
        assert_eq!(agg.iter().count(), 0);
    }
}
