use smol_str::SmolStr;

/// Options accepted by both record factories.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    /// Replace invalid field names with positional placeholders (`_0`, `_1`, ...)
    /// instead of failing.
    pub rename: bool,
    /// Log the generated shape definition at `info` level.
    pub verbose: bool,
    /// Additional identifiers to reject on top of the built-in keyword set.
    pub reserved: Vec<SmolStr>,
}

impl ShapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, rename: bool) -> Self {
        self.rename = rename;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn reserve(mut self, word: impl Into<SmolStr>) -> Self {
        self.reserved.push(word.into());
        self
    }

    pub(crate) fn is_extra_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|w| w == name)
    }
}
