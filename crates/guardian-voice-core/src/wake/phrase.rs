use crate::wake::normalize;

/// The two ordered tokens that make up the wake phrase, already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakePhrase {
    first: String,
    second: String,
}

impl WakePhrase {
    /// Build a phrase from raw tokens. Either token may normalize to empty,
    /// in which case the phrase is inert.
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: normalize(first),
            second: normalize(second),
        }
    }

    /// Build a phrase only if both tokens survive normalization.
    pub fn try_new(first: &str, second: &str) -> Option<Self> {
        let phrase = Self::new(first, second);
        (!phrase.is_inert()).then_some(phrase)
    }

    /// A phrase with a blank token never matches anything.
    pub fn is_inert(&self) -> bool {
        self.first.is_empty() || self.second.is_empty()
    }

    /// Normalized first token.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Normalized second token.
    pub fn second(&self) -> &str {
        &self.second
    }

    pub(crate) fn has_first(&self, heard: &str) -> bool {
        heard.contains(self.first.as_str())
    }

    pub(crate) fn has_second(&self, heard: &str) -> bool {
        heard.contains(self.second.as_str())
    }

    /// Whether `heard` carries the first token followed, after its end, by
    /// the second token.
    pub(crate) fn in_order(&self, heard: &str) -> bool {
        let Some(start) = heard.find(self.first.as_str()) else {
            return false;
        };
        // Normalized text is ASCII, so byte offsets are char boundaries.
        heard
            .get(start + self.first.len()..)
            .is_some_and(|rest| rest.contains(self.second.as_str()))
    }
}
