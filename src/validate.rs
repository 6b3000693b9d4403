use crate::config::ShapeOptions;
use crate::error::{IdentifierIssue, NameKind, RecordError};
use rustc_hash::FxHashSet;
use smol_str::{SmolStr, format_smolstr};

// ─── Reserved identifiers ───────────────────────────────────────────────────

/// Rust keywords that cannot be used as plain identifiers.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords of the languages records are commonly exchanged with.
const FOREIGN_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "assert", "class", "def", "del", "elif", "except", "exec",
    "finally", "from", "global", "import", "is", "lambda", "nonlocal", "not", "or", "pass",
    "print", "raise", "with", "null", "function", "var", "new", "this", "switch", "case",
    "default", "catch", "throw", "void",
];

/// Whether `name` is one of the built-in reserved identifiers.
pub fn is_reserved(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name) || FOREIGN_KEYWORDS.contains(&name)
}

// ─── FieldNames ─────────────────────────────────────────────────────────────

/// Field names as supplied to a factory: either one delimited string
/// (`"x y"`, `"x, y"`) or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNames {
    Delimited(String),
    List(Vec<String>),
}

impl FieldNames {
    /// Split into individual names. Delimited input is split on commas and whitespace.
    pub fn into_names(self) -> Vec<String> {
        match self {
            FieldNames::Delimited(s) => s
                .replace(',', " ")
                .split_whitespace()
                .map(str::to_owned)
                .collect(),
            FieldNames::List(names) => names,
        }
    }
}

impl From<&str> for FieldNames {
    fn from(s: &str) -> Self {
        FieldNames::Delimited(s.to_owned())
    }
}

impl From<String> for FieldNames {
    fn from(s: String) -> Self {
        FieldNames::Delimited(s)
    }
}

impl From<&[&str]> for FieldNames {
    fn from(names: &[&str]) -> Self {
        FieldNames::List(names.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldNames {
    fn from(names: [&str; N]) -> Self {
        FieldNames::List(names.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl From<Vec<&str>> for FieldNames {
    fn from(names: Vec<&str>) -> Self {
        FieldNames::List(names.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for FieldNames {
    fn from(names: Vec<String>) -> Self {
        FieldNames::List(names)
    }
}

impl From<Vec<SmolStr>> for FieldNames {
    fn from(names: Vec<SmolStr>) -> Self {
        FieldNames::List(names.into_iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[SmolStr]> for FieldNames {
    fn from(names: &[SmolStr]) -> Self {
        FieldNames::List(names.iter().map(|s| s.to_string()).collect())
    }
}

// ─── Validation ─────────────────────────────────────────────────────────────

fn identifier_issue(name: &str, options: &ShapeOptions) -> Option<IdentifierIssue> {
    let Some(first) = name.chars().next() else {
        return Some(IdentifierIssue::Empty);
    };
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some(IdentifierIssue::InvalidCharacters);
    }
    if is_reserved(name) || options.is_extra_reserved(name) {
        return Some(IdentifierIssue::ReservedKeyword);
    }
    if first.is_ascii_digit() {
        return Some(IdentifierIssue::LeadingDigit);
    }
    None
}

fn check_identifier(kind: NameKind, name: &str, options: &ShapeOptions) -> Result<(), RecordError> {
    match identifier_issue(name, options) {
        Some(reason) => Err(RecordError::invalid(kind, name, reason)),
        None => Ok(()),
    }
}

/// Replace every unusable name with its positional placeholder `_<index>`.
fn rename_fields(names: &mut [String], options: &ShapeOptions) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for (index, name) in names.iter_mut().enumerate() {
        let original = name.clone();
        if identifier_issue(name, options).is_some()
            || name.starts_with('_')
            || seen.contains(name.as_str())
        {
            let placeholder = format!("_{index}");
            log::debug!("renaming field {original:?} to {placeholder}");
            *name = placeholder;
        }
        seen.insert(original);
    }
}

/// Validate a typename together with its field names.
///
/// Returns the final, ordered field names. With `options.rename` set, unusable
/// field names are replaced by `_<index>` placeholders; otherwise the first
/// offending name is reported. The typename is never renamed.
pub fn validate_shape(
    typename: &str,
    field_names: FieldNames,
    options: &ShapeOptions,
) -> Result<(SmolStr, Vec<SmolStr>), RecordError> {
    let mut names = field_names.into_names();
    if options.rename {
        rename_fields(&mut names, options);
    }

    check_shape(typename, &names, options, false)?;

    Ok((
        SmolStr::new(typename),
        names.iter().map(SmolStr::new).collect(),
    ))
}

/// Validate a shape read back from serialized form.
///
/// Same rules as [`validate_shape`] without renaming, except that an
/// underscore name is accepted when it is exactly the `_<index>` placeholder
/// renaming would have put at that position.
pub(crate) fn validate_restored_shape(
    typename: &str,
    names: Vec<SmolStr>,
) -> Result<(SmolStr, Vec<SmolStr>), RecordError> {
    check_shape(typename, &names, &ShapeOptions::default(), true)?;
    Ok((SmolStr::new(typename), names))
}

fn is_placeholder(name: &str, index: usize) -> bool {
    name.strip_prefix('_') == Some(index.to_string().as_str())
}

fn check_shape<S: AsRef<str>>(
    typename: &str,
    names: &[S],
    options: &ShapeOptions,
    allow_placeholders: bool,
) -> Result<(), RecordError> {
    check_identifier(NameKind::Typename, typename, options)?;
    for name in names {
        check_identifier(NameKind::Field, name.as_ref(), options)?;
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for (index, name) in names.iter().enumerate() {
        let name = name.as_ref();
        if name.starts_with('_')
            && !options.rename
            && !(allow_placeholders && is_placeholder(name, index))
        {
            return Err(RecordError::ReservedFieldName(SmolStr::new(name)));
        }
        if !seen.insert(name) {
            return Err(RecordError::DuplicateField(SmolStr::new(name)));
        }
    }
    Ok(())
}

/// Argument list rendering used by docs and verbose logging: `x, y`.
pub(crate) fn signature(fields: &[SmolStr]) -> SmolStr {
    format_smolstr!("{}", fields.join(", "))
}
