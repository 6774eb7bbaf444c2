//! Timing and host configuration for cycle playback.

use crate::phrase::PhraseList;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The phrase list contains no phrases
    EmptyPhraseList,
    /// The container identifier is empty
    EmptyContainerId,
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::EmptyPhraseList => {
                write!(f, "Phrase list must contain at least one phrase")
            }
            OptionsError::EmptyContainerId => {
                write!(f, "Container identifier must not be empty")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Per-step and per-phase delays for one controller instance.
///
/// All values are milliseconds and fixed for the lifetime of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleTiming {
    /// Delay between appended characters while typing
    pub type_delay_ms: u64,
    /// Delay between removed characters while deleting
    pub delete_delay_ms: u64,
    /// Pause with the full phrase visible before deleting begins
    pub phrase_wait_ms: u64,
    /// Reschedule delay after a phrase finishes typing
    pub restart_delay_ms: u64,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            type_delay_ms: 80,
            delete_delay_ms: 30,
            phrase_wait_ms: 3000,
            restart_delay_ms: 1000,
        }
    }
}

impl CycleTiming {
    /// Create a timing configuration with the default delays.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Host configuration for starting a cycle: which container to animate,
/// the phrases to rotate through, and the timing.
///
/// ## Example
///
/// ```rust
/// use typecycle::CycleOptions;
///
/// let options = CycleOptions::new("hero-text", vec!["Hi".into(), "Go".into()]);
/// assert_eq!(options.timing.type_delay_ms, 80);
/// assert!(options.phrase_list().is_ok());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleOptions {
    /// Identifier of the target container
    pub container_id: String,
    /// Phrases to cycle through, in order
    pub phrases: Vec<String>,
    /// Step and phase delays
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: CycleTiming,
}

impl CycleOptions {
    /// Create options with default timing.
    pub fn new(container_id: impl Into<String>, phrases: Vec<String>) -> Self {
        Self {
            container_id: container_id.into(),
            phrases,
            timing: CycleTiming::default(),
        }
    }

    /// Replace the timing configuration.
    pub fn with_timing(mut self, timing: CycleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Parse options from a TOML string.
    ///
    /// ```toml
    /// container_id = "hero-text"
    /// phrases = ["Developer", "Designer"]
    ///
    /// [timing]
    /// type_delay_ms = 80
    /// phrase_wait_ms = 3000
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.container_id.is_empty() {
            return Err(OptionsError::EmptyContainerId);
        }
        if self.phrases.is_empty() {
            return Err(OptionsError::EmptyPhraseList);
        }
        Ok(())
    }

    /// Build the validated phrase list.
    pub fn phrase_list(&self) -> Result<PhraseList, OptionsError> {
        self.validate()?;
        PhraseList::new(self.phrases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = CycleTiming::default();
        assert_eq!(timing.type_delay_ms, 80);
        assert_eq!(timing.delete_delay_ms, 30);
        assert_eq!(timing.phrase_wait_ms, 3000);
        assert_eq!(timing.restart_delay_ms, 1000);
    }

    #[test]
    fn test_validate_empty_phrases() {
        let options = CycleOptions::new("hero", vec![]);
        assert_eq!(options.validate(), Err(OptionsError::EmptyPhraseList));
        assert!(options.phrase_list().is_err());
    }

    #[test]
    fn test_validate_empty_container_id() {
        let options = CycleOptions::new("", vec!["x".into()]);
        assert_eq!(options.validate(), Err(OptionsError::EmptyContainerId));
    }

    #[test]
    fn test_with_timing() {
        let timing = CycleTiming {
            type_delay_ms: 10,
            delete_delay_ms: 5,
            phrase_wait_ms: 100,
            restart_delay_ms: 50,
        };
        let options = CycleOptions::new("hero", vec!["a".into()]).with_timing(timing);
        assert_eq!(options.timing, timing);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str() {
        let options = CycleOptions::from_toml_str(
            r#"
            container_id = "hero-text"
            phrases = ["Developer", "Designer"]

            [timing]
            type_delay_ms = 40
            "#,
        )
        .unwrap();

        assert_eq!(options.container_id, "hero-text");
        assert_eq!(options.phrases.len(), 2);
        assert_eq!(options.timing.type_delay_ms, 40);
        // Unspecified timing fields fall back to defaults
        assert_eq!(options.timing.phrase_wait_ms, 3000);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str_missing_timing_table() {
        let options = CycleOptions::from_toml_str(
            r#"
            container_id = "hero-text"
            phrases = ["One"]
            "#,
        )
        .unwrap();
        assert_eq!(options.timing, CycleTiming::default());
    }
}
