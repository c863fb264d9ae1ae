use std::fmt;
use std::path::PathBuf;

/// Glyph used to render masked input and masked values.
pub const MASK_GLYPH: char = '*';

/// How a field is displayed while editing or listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecrecyMode {
    /// Shown as-is.
    #[default]
    None,
    /// Never echoed; not editable in place.
    Hide,
    /// Echoed as [`MASK_GLYPH`]; not editable in place.
    Mask,
}

impl From<&str> for SecrecyMode {
    /// `"mask"` masks, any other non-empty tag (`"true"`, `"hide"`, ...) hides.
    fn from(tag: &str) -> Self {
        match tag.trim() {
            "" => SecrecyMode::None,
            "mask" => SecrecyMode::Mask,
            _ => SecrecyMode::Hide,
        }
    }
}

/// Declared kind of a bound field, as reported by its `Serialize` impl.
///
/// `isize`/`usize` serialize as 64-bit integers and show up as `I64`/`U64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Anything without a flat textual form: options, sequences, maps,
    /// nested structs, enums, chars.
    Unsupported(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Unsupported(label) => *label,
        };
        f.write_str(name)
    }
}

/// Current value of a bound field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `Option::None`.
    Absent,
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// A compound value with no flat textual form.
    Opaque,
}

impl FieldValue {
    /// Textual form used for prompts and the env file. `None` for values that
    /// have no text (absent or opaque).
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Absent | FieldValue::Opaque => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent | FieldValue::Opaque => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Uint(u) => write!(f, "{u}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::Str(s) => f.write_str(s),
        }
    }
}

/// One environment-bound field found on a config struct.
///
/// Built fresh by every call to [`fields`](crate::fields); never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Environment variable name.
    pub name: String,
    /// Rust field name.
    pub field: &'static str,
    pub kind: ValueKind,
    pub value: FieldValue,
    pub secrecy: SecrecyMode,
}

impl FieldDescriptor {
    /// The value as it may be shown to a user: `<suppressed>` for hidden
    /// fields, one mask glyph per character for masked fields.
    pub fn display_value(&self) -> String {
        let text = self.value.to_string();
        match self.secrecy {
            SecrecyMode::None => text,
            SecrecyMode::Hide => "<suppressed>".to_string(),
            SecrecyMode::Mask => MASK_GLYPH.to_string().repeat(text.chars().count()),
        }
    }
}

/// Where the env file lives.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FileLocation {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    #[default]
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Load and list the current values.
    Show,
    /// Load, edit interactively, save, and list the result.
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrecy_from_tag() {
        assert_eq!(SecrecyMode::from(""), SecrecyMode::None);
        assert_eq!(SecrecyMode::from("true"), SecrecyMode::Hide);
        assert_eq!(SecrecyMode::from("hide"), SecrecyMode::Hide);
        assert_eq!(SecrecyMode::from("mask"), SecrecyMode::Mask);
        assert_eq!(SecrecyMode::from("anything"), SecrecyMode::Hide);
    }

    #[test]
    fn value_text() {
        assert_eq!(FieldValue::Str("a b".into()).to_text().as_deref(), Some("a b"));
        assert_eq!(FieldValue::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Int(-8).to_text().as_deref(), Some("-8"));
        assert_eq!(FieldValue::F32(2.5).to_text().as_deref(), Some("2.5"));
        assert_eq!(FieldValue::Absent.to_text(), None);
        assert_eq!(FieldValue::Opaque.to_text(), None);
    }

    fn descriptor(value: &str, secrecy: SecrecyMode) -> FieldDescriptor {
        FieldDescriptor {
            name: "SSN".into(),
            field: "ssn",
            kind: ValueKind::String,
            value: FieldValue::Str(value.into()),
            secrecy,
        }
    }

    #[test]
    fn display_value_applies_secrecy() {
        assert_eq!(descriptor("1234", SecrecyMode::None).display_value(), "1234");
        assert_eq!(descriptor("1234", SecrecyMode::Mask).display_value(), "****");
        assert_eq!(
            descriptor("1234", SecrecyMode::Hide).display_value(),
            "<suppressed>"
        );
    }
}
