/// Family used when a font declaration names none.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue";

/// Size used when a font declaration has no (or a zero) size.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Extraction settings, fixed for the lifetime of an
/// [`ExtractContext`](crate::ExtractContext).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub default_font_family: String,
    pub default_font_size: f32,
    /// Maximum number of memoized font shorthands.
    ///
    /// `None` keeps every entry for the lifetime of the context. When set, the
    /// least recently used entry is evicted first.
    pub font_cache_capacity: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
            default_font_size: DEFAULT_FONT_SIZE,
            font_cache_capacity: None,
        }
    }
}

impl ExtractConfig {
    pub fn with_font_cache_capacity(mut self, capacity: usize) -> Self {
        self.font_cache_capacity = Some(capacity);
        self
    }

    pub fn with_default_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.default_font_family = family.into();
        self.default_font_size = size;
        self
    }
}
