//! Check functions run against applied state.
//!
//! A check is a boxed closure over [`State`]; the driver runs a step's
//! composed check after every apply. [`check_environment_exists`] is the
//! substantive verifier: a straight-line chain with no loops and no
//! retries, ending in a remote fetch through [`EnvironmentApi`].

use std::sync::Arc;

use crate::client::EnvironmentApi;
use crate::error::CheckError;
use crate::state::{ResourceInstance, State};

/// A single assertion over applied state.
pub type CheckFn = Box<dyn Fn(&State) -> Result<(), CheckError>>;

/// Composes checks so that all of them run and every failure is reported.
///
/// One failure is surfaced as-is; several fold into
/// [`CheckError::Aggregate`].
#[must_use]
pub fn compose_aggregate(checks: Vec<CheckFn>) -> CheckFn {
    Box::new(move |state| {
        let failures: Vec<CheckError> = checks
            .iter()
            .filter_map(|check| check(state).err())
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(CheckError::aggregate(failures))
        }
    })
}

/// Asserts that a resource's stored attribute holds an exact value.
///
/// A missing resource fails as not-found; a missing attribute compares as
/// the empty string.
#[must_use]
pub fn check_resource_attr(
    resource: impl Into<String>,
    key: impl Into<String>,
    expected: impl Into<String>,
) -> CheckFn {
    let resource = resource.into();
    let key = key.into();
    let expected = expected.into();
    Box::new(move |state| {
        let instance = state.resource(&resource).ok_or_else(|| CheckError::NotFound {
            resource: resource.clone(),
        })?;
        let actual = instance.attribute(&key).unwrap_or_default();
        if actual == expected {
            Ok(())
        } else {
            Err(CheckError::AttrMismatch {
                resource: resource.clone(),
                key: key.clone(),
                expected: expected.clone(),
                actual: actual.to_owned(),
            })
        }
    })
}

/// Asserts that no resources survive in post-destroy state.
#[must_use]
pub fn check_state_empty() -> CheckFn {
    Box::new(|state| {
        let mut survivors = state.names();
        match survivors.next() {
            None => Ok(()),
            Some(name) => Err(CheckError::ResourceSurvived {
                resource: name.to_owned(),
            }),
        }
    })
}

/// Asserts that an applied environment exists both in state and remotely.
///
/// The chain: environment lookup, consortium lookup, `id` attribute versus
/// primary identifier, then a remote fetch through `api` that must return
/// status 200. Each step's failure is terminal.
#[must_use]
pub fn check_environment_exists(
    env_resource: impl Into<String>,
    consortium_resource: impl Into<String>,
    api: Arc<dyn EnvironmentApi>,
) -> CheckFn {
    let env_resource = env_resource.into();
    let consortium_resource = consortium_resource.into();
    Box::new(move |state| {
        let environment = lookup_instance(state, &env_resource)?;
        let consortium = lookup_instance(state, &consortium_resource)?;

        let env_id = environment.attribute("id").unwrap_or_default();
        if env_id != environment.id() {
            return Err(CheckError::IdMismatch {
                attribute: env_id.to_owned(),
                primary: environment.id().to_owned(),
            });
        }

        let response = api.get_environment(consortium.id(), env_id)?;
        if response.status_code() == 200 {
            Ok(())
        } else {
            Err(CheckError::UnexpectedStatus {
                id: env_id.to_owned(),
                status: response.status_code(),
            })
        }
    })
}

fn lookup_instance<'s>(
    state: &'s State,
    resource: &str,
) -> Result<&'s ResourceInstance, CheckError> {
    let instance = state.resource(resource).ok_or_else(|| CheckError::NotFound {
        resource: resource.to_owned(),
    })?;
    if instance.id().is_empty() {
        return Err(CheckError::MissingInstance {
            resource: resource.to_owned(),
        });
    }
    Ok(instance)
}
