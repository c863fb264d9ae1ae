//! Environment bindings declared on a config struct.
//!
//! The variable name, default and required-ness come from confique's
//! `#[config(env = "...", default = ...)]` attributes, read back through
//! `C::META`. Secrecy is declared separately through [`EnvConfig::SECRETS`].

use confique::Config;
use confique::meta::{FieldKind, LeafKind, Meta};
use serde::Serialize;

use crate::types::{SecrecyMode, ValueKind};

/// A config struct whose fields can be bound to environment variables,
/// listed, edited, and saved.
///
/// ```ignore
/// #[derive(Config, Serialize)]
/// struct AppConfig {
///     #[config(env = "ACCESS_KEY")]
///     access_key: String,
///     #[config(env = "RATE", default = 2.5)]
///     rate: f32,
/// }
///
/// impl EnvConfig for AppConfig {
///     const SECRETS: &'static [(&'static str, &'static str)] = &[("access_key", "hide")];
///
///     fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>> {
///         Some(match field {
///             "access_key" => (&mut self.access_key).into(),
///             "rate" => (&mut self.rate).into(),
///             _ => return None,
///         })
///     }
/// }
/// ```
///
/// Values are read through `Serialize` and written through
/// [`field_mut`](Self::field_mut), one field at a time. Fields marked
/// `#[serde(skip)]` are invisible to listing and editing.
pub trait EnvConfig: Config + Serialize {
    /// `(field, tag)` pairs keyed by Rust field name. A tag of `"mask"` masks
    /// the value; `"true"`, `"hide"` or any other non-empty tag hides it.
    const SECRETS: &'static [(&'static str, &'static str)] = &[];

    /// Mutable access to the field with Rust name `field`. Fields left out
    /// here are not settable.
    fn field_mut(&mut self, field: &str) -> Option<FieldMut<'_>>;
}

/// A mutable reference to one field, tagged with the field's type.
#[derive(Debug)]
pub enum FieldMut<'a> {
    String(&'a mut String),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
}

impl FieldMut<'_> {
    /// The kind the field serializes as.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldMut::String(_) => ValueKind::String,
            FieldMut::Bool(_) => ValueKind::Bool,
            FieldMut::I8(_) => ValueKind::I8,
            FieldMut::I16(_) => ValueKind::I16,
            FieldMut::I32(_) => ValueKind::I32,
            FieldMut::I64(_) | FieldMut::Isize(_) => ValueKind::I64,
            FieldMut::U8(_) => ValueKind::U8,
            FieldMut::U16(_) => ValueKind::U16,
            FieldMut::U32(_) => ValueKind::U32,
            FieldMut::U64(_) | FieldMut::Usize(_) => ValueKind::U64,
            FieldMut::F32(_) => ValueKind::F32,
            FieldMut::F64(_) => ValueKind::F64,
        }
    }
}

macro_rules! field_mut_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for FieldMut<'a> {
                fn from(slot: &'a mut $ty) -> Self {
                    FieldMut::$variant(slot)
                }
            }
        )*
    };
}

field_mut_from! {
    String => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

/// Parsed binding of one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTag {
    /// Environment variable name.
    pub name: String,
    /// No default and not optional: the loader fails when the variable is missing.
    pub required: bool,
    pub has_default: bool,
    pub secrecy: SecrecyMode,
}

impl BindingTag {
    /// Parse the `env` attribute. Only the first comma-separated segment names
    /// the variable; empty names yield `None`.
    pub fn from_env_attr(env: &str) -> Option<Self> {
        let name = env.split(',').next().unwrap_or_default().trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            required: false,
            has_default: false,
            secrecy: SecrecyMode::None,
        })
    }
}

/// A struct field paired with its binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Rust field name.
    pub field: &'static str,
    pub tag: BindingTag,
}

/// All bound top-level fields of `C`, in declaration order.
///
/// Nested sections and leaves without an `env` attribute are not bound.
pub fn bindings<C: EnvConfig>() -> Vec<Binding> {
    bindings_from_meta(&C::META, C::SECRETS)
}

fn bindings_from_meta(meta: &Meta, secrets: &[(&str, &str)]) -> Vec<Binding> {
    meta.fields
        .iter()
        .filter_map(|field| {
            let FieldKind::Leaf { env, kind, .. } = &field.kind else {
                return None;
            };
            let mut tag = BindingTag::from_env_attr((*env)?)?;
            if let LeafKind::Required { default, .. } = kind {
                tag.has_default = default.is_some();
                tag.required = default.is_none();
            }
            tag.secrecy = secrets
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, secret)| SecrecyMode::from(*secret))
                .unwrap_or_default();
            Some(Binding {
                field: field.name,
                tag,
            })
        })
        .collect()
}

/// The first binding whose variable name is `name`.
pub fn find_binding<C: EnvConfig>(name: &str) -> Option<Binding> {
    bindings::<C>().into_iter().find(|b| b.tag.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{EditConfig, GuardedConfig, KindsConfig};

    #[test]
    fn env_attr_first_segment_is_name() {
        let tag = BindingTag::from_env_attr("V_S2,default=Maybe").unwrap();
        assert_eq!(tag.name, "V_S2");
        assert!(BindingTag::from_env_attr("").is_none());
        assert!(BindingTag::from_env_attr(" ,required").is_none());
    }

    #[test]
    fn bindings_follow_declaration_order() {
        let names: Vec<String> = bindings::<EditConfig>()
            .into_iter()
            .map(|b| b.tag.name)
            .collect();
        assert_eq!(
            names,
            vec!["V_S1", "V_S2", "V_S3", "V_S4", "V_S5", "YESNO"]
        );
    }

    #[test]
    fn untagged_and_nested_fields_are_unbound() {
        let fields: Vec<&str> = bindings::<GuardedConfig>()
            .into_iter()
            .map(|b| b.field)
            .collect();
        assert!(!fields.contains(&"untagged"));
        assert!(!fields.contains(&"section"));
        assert!(fields.contains(&"visible"));
        assert!(fields.contains(&"internal"));
    }

    #[test]
    fn required_and_default_flags() {
        let all = bindings::<EditConfig>();
        let s1 = &all[0].tag;
        assert!(s1.required);
        assert!(!s1.has_default);

        let s2 = &all[1].tag;
        assert!(!s2.required);
        assert!(s2.has_default);
    }

    #[test]
    fn secrecy_from_secret_tags() {
        let all = bindings::<EditConfig>();
        assert_eq!(all[0].tag.secrecy, SecrecyMode::None);
        assert_eq!(all[2].tag.secrecy, SecrecyMode::Hide);
        assert_eq!(all[3].tag.secrecy, SecrecyMode::Mask);
        assert_eq!(all[4].tag.secrecy, SecrecyMode::Hide);
    }

    #[test]
    fn field_mut_reports_declared_kind() {
        let mut config = KindsConfig::default();
        assert_eq!(config.field_mut("s").unwrap().kind(), ValueKind::String);
        assert_eq!(config.field_mut("isizev").unwrap().kind(), ValueKind::I64);
        assert_eq!(config.field_mut("usizev").unwrap().kind(), ValueKind::U64);
        assert_eq!(config.field_mut("f32v").unwrap().kind(), ValueKind::F32);
        assert!(config.field_mut("opt").is_none());
    }

    #[test]
    fn find_binding_by_env_name() {
        let binding = find_binding::<EditConfig>("YESNO").unwrap();
        assert_eq!(binding.field, "b6");
        assert!(find_binding::<EditConfig>("b6").is_none());
    }
}
