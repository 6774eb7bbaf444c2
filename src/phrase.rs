//! Phrase list for cycle playback.

use crate::options::OptionsError;

/// An ordered, non-empty list of phrases with wrapping index access.
///
/// The list is read-only after construction. Index arithmetic always
/// wraps modulo the list length, so any index is valid.
///
/// ## Example
///
/// ```rust
/// use typecycle::PhraseList;
///
/// let phrases = PhraseList::new(vec!["Hi".into(), "Go".into()]).unwrap();
/// assert_eq!(phrases.len(), 2);
/// assert_eq!(phrases.get(0), "Hi");
/// assert_eq!(phrases.get(3), "Go"); // wraps: 3 % 2 == 1
/// assert_eq!(phrases.next_index(1), 0);
/// ```
#[derive(Clone, Debug)]
pub struct PhraseList {
    phrases: Vec<String>,
}

impl PhraseList {
    /// Create a phrase list from the given phrases.
    ///
    /// Returns `OptionsError::EmptyPhraseList` when `phrases` is empty.
    pub fn new(phrases: Vec<String>) -> Result<Self, OptionsError> {
        if phrases.is_empty() {
            return Err(OptionsError::EmptyPhraseList);
        }
        Ok(Self { phrases })
    }

    /// Create a single-phrase list.
    ///
    /// A one-element list cycles the same phrase indefinitely.
    pub fn single(phrase: impl Into<String>) -> Self {
        Self {
            phrases: vec![phrase.into()],
        }
    }

    /// Number of phrases in the list. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always false; the list is non-empty by construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get the phrase at `index`, wrapping modulo the list length.
    #[inline]
    pub fn get(&self, index: usize) -> &str {
        &self.phrases[index % self.phrases.len()]
    }

    /// The index following `index`, wrapping back to 0 at the end.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phrases.len()
    }

    /// Iterate the phrases in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }
}
