use crate::error::RecordError;
use crate::record_value::RecordValue;
use smol_str::SmolStr;

/// Positional and keyword arguments for a record constructor.
///
/// ```
/// use named_record::Args;
/// let args = Args::new().pos(11).kw("y", 22);
/// assert_eq!(args.positional_len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<RecordValue>,
    keywords: Vec<(SmolStr, RecordValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only positional values, in order.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RecordValue>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: Vec::new(),
        }
    }

    /// Only keyword values. A repeated key keeps the last value.
    pub fn keywords<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<RecordValue>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |args, (k, v)| args.kw(k, v))
    }

    pub fn pos(mut self, value: impl Into<RecordValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kw(mut self, name: impl Into<SmolStr>, value: impl Into<RecordValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.keywords.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.keywords.push((name, value)),
        }
        self
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn keyword_len(&self) -> usize {
        self.keywords.len()
    }
}

// ─── Binding ────────────────────────────────────────────────────────────────

/// Bind constructor arguments to the declared fields.
///
/// A single positional `Array` is unpacked as the full positional list.
/// Positionals fill fields in order, the remaining fields are taken from the
/// keywords, and any keyword left over is reported in one error.
pub(crate) fn bind_args(
    typename: &str,
    fields: &[SmolStr],
    args: Args,
) -> Result<Vec<RecordValue>, RecordError> {
    let Args {
        mut positional,
        mut keywords,
    } = args;

    if positional.len() == 1 && matches!(positional[0], RecordValue::Array(_)) {
        if let Some(RecordValue::Array(inner)) = positional.pop() {
            positional = inner;
        }
    }

    if positional.len() > fields.len() {
        log::trace!("{typename}: {} positional arguments for {} fields", positional.len(), fields.len());
        return Err(RecordError::ArityError {
            typename: SmolStr::new(typename),
            expected: fields.len(),
            actual: positional.len(),
        });
    }

    let mut values = positional;
    values.reserve(fields.len() - values.len());
    for field in &fields[values.len()..] {
        match keywords.iter().position(|(k, _)| k == field) {
            Some(pos) => values.push(keywords.remove(pos).1),
            None => {
                log::trace!("{typename}: missing parameter {field}");
                return Err(RecordError::MissingField {
                    typename: SmolStr::new(typename),
                    field: field.clone(),
                });
            }
        }
    }

    if !keywords.is_empty() {
        return Err(unexpected(typename, keywords));
    }
    Ok(values)
}

/// Copy `current`, overriding the named fields. Unknown override keys fail
/// the whole replacement.
pub(crate) fn replace_values<I, K, V>(
    typename: &str,
    fields: &[SmolStr],
    current: &[RecordValue],
    overrides: I,
) -> Result<Vec<RecordValue>, RecordError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<SmolStr>,
    V: Into<RecordValue>,
{
    let mut values = current.to_vec();
    let mut unknown = Vec::new();
    for (name, value) in overrides {
        let name = name.into();
        match fields.iter().position(|f| *f == name) {
            Some(i) => values[i] = value.into(),
            None => unknown.push((name, value.into())),
        }
    }
    if !unknown.is_empty() {
        return Err(unexpected(typename, unknown));
    }
    Ok(values)
}

fn unexpected(typename: &str, leftover: Vec<(SmolStr, RecordValue)>) -> RecordError {
    let fields: Vec<SmolStr> = leftover.into_iter().map(|(k, _)| k).collect();
    log::trace!("{typename}: unexpected parameters {fields:?}");
    RecordError::UnexpectedField {
        typename: SmolStr::new(typename),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> Vec<SmolStr> {
        vec![SmolStr::new("x"), SmolStr::new("y")]
    }

    #[test]
    fn test_positional_then_keyword() {
        let values = bind_args("Point", &xy(), Args::new().pos(11).kw("y", 22)).unwrap();
        assert_eq!(values, vec![RecordValue::from(11), RecordValue::from(22)]);
    }

    #[test]
    fn test_keyword_order_does_not_matter() {
        let values = bind_args("Point", &xy(), Args::new().kw("y", 22).kw("x", 11)).unwrap();
        assert_eq!(values, vec![RecordValue::from(11), RecordValue::from(22)]);
    }

    #[test]
    fn test_single_array_is_unpacked() {
        let args = Args::new().pos(vec![11i64, 22]);
        let values = bind_args("Point", &xy(), args).unwrap();
        assert_eq!(values, vec![RecordValue::from(11), RecordValue::from(22)]);
    }

    #[test]
    fn test_too_many_positional() {
        let err = bind_args("Point", &xy(), Args::positional([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            RecordError::ArityError {
                typename: "Point".into(),
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_missing_keyword() {
        let err = bind_args("Point", &xy(), Args::positional([1])).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                typename: "Point".into(),
                field: "y".into()
            }
        );
    }

    #[test]
    fn test_unexpected_keywords_are_all_reported() {
        let args = Args::new().kw("x", 1).kw("y", 2).kw("z", 3).kw("w", 4);
        let err = bind_args("Point", &xy(), args).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnexpectedField {
                typename: "Point".into(),
                fields: vec!["z".into(), "w".into()]
            }
        );
    }

    #[test]
    fn test_keyword_for_positional_field_is_unexpected() {
        let args = Args::new().pos(1).kw("x", 5).kw("y", 2);
        let err = bind_args("Point", &xy(), args).unwrap_err();
        assert!(matches!(err, RecordError::UnexpectedField { ref fields, .. } if fields == &["x"]));
    }

    #[test]
    fn test_missing_reported_before_unexpected() {
        let args = Args::new().kw("x", 1).kw("XXX", 2);
        let err = bind_args("Point", &xy(), args).unwrap_err();
        assert!(matches!(err, RecordError::MissingField { .. }));
    }

    #[test]
    fn test_repeated_keyword_keeps_last() {
        let args = Args::keywords([("x", 1), ("y", 2), ("x", 3)]);
        assert_eq!(args.keyword_len(), 2);
        let values = bind_args("Point", &xy(), args).unwrap();
        assert_eq!(values[0], RecordValue::from(3));
    }

    #[test]
    fn test_replace_values() {
        let current = vec![RecordValue::from(1), RecordValue::from(2)];
        let values = replace_values("Point", &xy(), &current, [("x", 100)]).unwrap();
        assert_eq!(values, vec![RecordValue::from(100), RecordValue::from(2)]);
        let err = replace_values("Point", &xy(), &current, [("x", 1), ("error", 2)]).unwrap_err();
        assert!(matches!(err, RecordError::UnexpectedField { ref fields, .. } if fields == &["error"]));
    }
}
