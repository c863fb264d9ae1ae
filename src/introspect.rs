//! Field discovery: join a struct's bindings with its serialized values.

use crate::binding::{self, EnvConfig};
use crate::capture::{self, Captured};
use crate::error::EnvfigError;
use crate::types::FieldDescriptor;

/// List the environment-bound fields of `config`, in declaration order.
///
/// A field is listed when it carries a non-empty `env` binding and is visible
/// to serialization. Fields hidden from serde are skipped without error.
pub fn fields<C: EnvConfig>(config: &C) -> Result<Vec<FieldDescriptor>, EnvfigError> {
    let captured = capture::capture(config)?;

    let descriptors = binding::bindings::<C>()
        .into_iter()
        .filter_map(|b| {
            let Captured { kind, value } = lookup(&captured, b.field)?.clone();
            Some(FieldDescriptor {
                name: b.tag.name,
                field: b.field,
                kind,
                value,
                secrecy: b.tag.secrecy,
            })
        })
        .collect();

    Ok(descriptors)
}

pub(crate) fn lookup<'a>(
    captured: &'a [(&'static str, Captured)],
    field: &str,
) -> Option<&'a Captured> {
    captured
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, c)| c)
}
