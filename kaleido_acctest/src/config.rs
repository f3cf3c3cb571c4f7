//! HCL configuration rendering for consortium and environment resources.
//!
//! Each rendered document declares one `kaleido_consortium` block and one
//! dependent `kaleido_environment` block. The environment references its
//! parent symbolically (`${kaleido_consortium.<label>.id}`) because the
//! real identifier only exists after the apply phase. Fixture values pass
//! through verbatim; callers own their escaping.

use std::fmt::Write as _;

use crate::model::{Consortium, Environment};

/// Renders the two-block document for a consortium label, an environment
/// label, and their fixtures.
///
/// A `release_id` line is emitted only when the environment fixture is
/// pinned to a release.
#[must_use]
pub fn environment_config(
    consortium_label: &str,
    consortium: &Consortium,
    environment_label: &str,
    environment: &Environment,
) -> String {
    let mut doc = format!(
        r#"resource "kaleido_consortium" "{consortium_label}" {{
  name = "{name}"
  description = "{description}"
  mode = "{mode}"
}}
resource "kaleido_environment" "{environment_label}" {{
  consortium_id = "${{kaleido_consortium.{consortium_label}.id}}"
  name = "{env_name}"
  description = "{env_description}"
  env_type = "{env_type}"
  consensus_type = "{consensus_type}"
"#,
        name = consortium.name,
        description = consortium.description,
        mode = consortium.mode,
        env_name = environment.name,
        env_description = environment.description,
        env_type = environment.provider,
        consensus_type = environment.consensus_type,
    );
    if let Some(release_id) = &environment.release_id {
        // Infallible for String, but the lint table denies unwrap.
        let _unused = writeln!(doc, "  release_id = \"{release_id}\"");
    }
    doc.push_str("}\n");
    doc
}

/// Renders the basic variant without a release pin, regardless of the
/// fixture's `release_id`.
#[must_use]
pub fn environment_config_basic(
    consortium_label: &str,
    consortium: &Consortium,
    environment_label: &str,
    environment: &Environment,
) -> String {
    let unpinned = Environment {
        release_id: None,
        ..environment.clone()
    };
    environment_config(consortium_label, consortium, environment_label, &unpinned)
}

/// Renders the variant that pins the environment to `release_id`.
#[must_use]
pub fn environment_config_with_release(
    consortium_label: &str,
    consortium: &Consortium,
    environment_label: &str,
    environment: &Environment,
    release_id: &str,
) -> String {
    let pinned = environment.clone().with_release(release_id);
    environment_config(consortium_label, consortium, environment_label, &pinned)
}
