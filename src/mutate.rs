//! Write a textual value into the field bound to an environment variable.
//!
//! The text is parsed at the field's declared type and stored through
//! [`EnvConfig::field_mut`]. No other field is read back or rewritten.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use crate::binding::{self, EnvConfig, FieldMut};
use crate::capture;
use crate::error::EnvfigError;
use crate::introspect::lookup;
use crate::types::ValueKind;

/// Set the field bound to `name` from `text`.
///
/// Fails with [`EnvfigError::FieldNotFound`] when no field is bound to
/// `name`, [`EnvfigError::NotSettable`] when the field is hidden from
/// serialization or not handed out by `field_mut`, and
/// [`EnvfigError::Parse`] / [`EnvfigError::UnsupportedKind`] when `text`
/// can't be stored. `config` is unchanged on error.
pub fn set_field<C: EnvConfig>(config: &mut C, name: &str, text: &str) -> Result<(), EnvfigError> {
    let binding =
        binding::find_binding::<C>(name).ok_or_else(|| EnvfigError::FieldNotFound(name.into()))?;

    let captured = capture::capture(&*config)?;
    let kind = lookup(&captured, binding.field)
        .map(|c| c.kind)
        .ok_or_else(|| EnvfigError::NotSettable(name.into()))?;
    if let ValueKind::Unsupported(_) = kind {
        return Err(EnvfigError::UnsupportedKind {
            name: name.into(),
            kind,
        });
    }

    let slot = config
        .field_mut(binding.field)
        .ok_or_else(|| EnvfigError::NotSettable(name.into()))?;
    store(name, slot, text)
}

fn store(name: &str, slot: FieldMut<'_>, text: &str) -> Result<(), EnvfigError> {
    let kind = slot.kind();
    let parse_err = |reason: String| EnvfigError::Parse {
        name: name.into(),
        value: text.into(),
        kind,
        reason,
    };

    match slot {
        FieldMut::String(v) => *v = text.to_string(),
        FieldMut::Bool(v) => {
            *v = parse_bool(text).ok_or_else(|| {
                parse_err("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False".into())
            })?
        }
        FieldMut::I8(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::I16(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::I32(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::I64(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::Isize(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::U8(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::U16(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::U32(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::U64(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::Usize(v) => *v = parse_int(text).map_err(parse_err)?,
        FieldMut::F32(v) => *v = parse_float(text).map_err(parse_err)?,
        FieldMut::F64(v) => *v = parse_float(text).map_err(parse_err)?,
    }
    Ok(())
}

fn parse_int<T: FromStr<Err = ParseIntError>>(text: &str) -> Result<T, String> {
    text.parse().map_err(|e: ParseIntError| e.to_string())
}

/// Parse at the width of `T`. `inf`, `infinity` and `nan` are accepted as
/// written; finite text that overflows the width is rejected.
fn parse_float<T: FromStr<Err = ParseFloatError> + Into<f64> + Copy>(
    text: &str,
) -> Result<T, String> {
    let value: T = text.parse().map_err(|e: ParseFloatError| e.to_string())?;
    if value.into().is_infinite() && !names_infinity(text) {
        return Err("value out of range".into());
    }
    Ok(value)
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Accepts exactly `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
