//! Flat `NAME=value` rendering of config maps, and mirroring them into an
//! [`Environment`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::env::Environment;
use crate::error::{EnvVarFailure, EnvfigError};
use crate::types::{FieldDescriptor, FieldValue};

/// Variable name to value; `None` means the variable is absent.
pub type ConfigMap = BTreeMap<String, Option<String>>;

/// Render one `name=value` line per present entry, sorted by name.
///
/// Values are written verbatim: no quoting or escaping.
pub fn encode(map: &ConfigMap) -> String {
    map.iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}={v}\n")))
        .collect()
}

/// Set present entries and remove absent ones.
///
/// Every entry is attempted; failures are reported together afterwards.
/// Entries that were applied before a failure stay applied.
pub fn apply<E: Environment + ?Sized>(env: &mut E, map: &ConfigMap) -> Result<(), EnvfigError> {
    let failures: Vec<EnvVarFailure> = map
        .iter()
        .filter_map(|(name, value)| {
            let result = match value {
                Some(v) => env.set(name, v),
                None => env.remove(name),
            };
            result.err().map(|e| EnvVarFailure {
                name: name.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    if failures.is_empty() {
        debug!(count = map.len(), "applied config map to environment");
        Ok(())
    } else {
        Err(EnvfigError::EnvironmentUpdate { failures })
    }
}

/// Build a config map from introspected fields. Absent values map to `None`;
/// fields with no flat text are left out.
pub fn config_map(descriptors: &[FieldDescriptor]) -> ConfigMap {
    descriptors
        .iter()
        .filter_map(|d| match &d.value {
            FieldValue::Opaque => {
                debug!(name = %d.name, kind = %d.kind, "skipping field with no text form");
                None
            }
            value => Some((d.name.clone(), value.to_text())),
        })
        .collect()
}
