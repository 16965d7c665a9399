//! Configuration for the preserve workflow.
//!
//! Options can be built in code or loaded from a YAML document; missing keys
//! take their default values.

use super::gate::LISTED_SHAPE_LIMIT;
use super::restore::LeadEffect;
use crate::common::{Error, Result, TriggerKind};
use serde::{Deserialize, Serialize};

/// Options for [`preserve_animations`](super::preserve::preserve_animations).
///
/// # Examples
///
/// ```rust
/// use anim_keeper::timeline::PreserveOptions;
/// use anim_keeper::common::TriggerKind;
///
/// // Create with defaults
/// let options = PreserveOptions::default();
///
/// // Or customize
/// let options = PreserveOptions::new()
///     .with_clean_orphans(false)
///     .with_lead_trigger(TriggerKind::WithPrevious)
///     .with_lead_delay(0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreserveOptions {
    /// Remove media effects whose shape is gone before capturing
    pub clean_orphans: bool,
    /// Insert and restore even when text animations would be lost
    pub proceed_with_text_animations: bool,
    /// Number of shape names listed in the gate's reason
    pub listed_shape_limit: usize,
    /// Trigger of the lead media effect
    pub lead_trigger: TriggerKind,
    /// Delay of the lead media effect, in seconds
    pub lead_delay: f64,
}

impl Default for PreserveOptions {
    fn default() -> Self {
        Self {
            clean_orphans: true,
            proceed_with_text_animations: false,
            listed_shape_limit: LISTED_SHAPE_LIMIT,
            lead_trigger: TriggerKind::AfterPrevious,
            lead_delay: 0.0,
        }
    }
}

impl PreserveOptions {
    /// Create a new `PreserveOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether orphaned media effects are removed before capture.
    #[inline]
    pub fn with_clean_orphans(mut self, clean: bool) -> Self {
        self.clean_orphans = clean;
        self
    }

    /// Set whether to go ahead when the slide has text animations.
    ///
    /// Text-scoped effects are still not replayed; they are reported through
    /// [`RestoreReport::notice`](super::restore::RestoreReport::notice).
    #[inline]
    pub fn with_proceed_with_text_animations(mut self, proceed: bool) -> Self {
        self.proceed_with_text_animations = proceed;
        self
    }

    #[inline]
    pub fn with_listed_shape_limit(mut self, limit: usize) -> Self {
        self.listed_shape_limit = limit;
        self
    }

    #[inline]
    pub fn with_lead_trigger(mut self, trigger: TriggerKind) -> Self {
        self.lead_trigger = trigger;
        self
    }

    #[inline]
    pub fn with_lead_delay(mut self, delay: f64) -> Self {
        self.lead_delay = delay;
        self
    }

    /// Lead effect timing for restore.
    pub fn lead_effect(&self) -> LeadEffect {
        LeadEffect {
            trigger: self.lead_trigger,
            delay: self.lead_delay,
        }
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.listed_shape_limit == 0 {
            return Err(Error::Config(
                "listed_shape_limit must be at least 1".to_string(),
            ));
        }
        if !self.lead_delay.is_finite() || self.lead_delay < 0.0 {
            return Err(Error::Config(format!(
                "lead_delay must be a non-negative number of seconds, got {}",
                self.lead_delay
            )));
        }
        Ok(())
    }

    /// Load options from a YAML document and validate them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anim_keeper::timeline::PreserveOptions;
    ///
    /// let options = PreserveOptions::from_yaml_str("clean_orphans: false\nlead_delay: 0.5\n").unwrap();
    /// assert!(!options.clean_orphans);
    /// assert_eq!(options.listed_shape_limit, 3);
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse preserve options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PreserveOptions::new();
        assert!(options.clean_orphans);
        assert!(!options.proceed_with_text_animations);
        assert_eq!(options.listed_shape_limit, 3);
        assert_eq!(options.lead_effect(), LeadEffect::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = PreserveOptions::new()
            .with_clean_orphans(false)
            .with_proceed_with_text_animations(true)
            .with_listed_shape_limit(5)
            .with_lead_trigger(TriggerKind::OnClick)
            .with_lead_delay(1.5);

        assert!(!options.clean_orphans);
        assert!(options.proceed_with_text_animations);
        assert_eq!(options.listed_shape_limit, 5);
        assert_eq!(
            options.lead_effect(),
            LeadEffect {
                trigger: TriggerKind::OnClick,
                delay: 1.5
            }
        );
    }

    #[test]
    fn test_validation() {
        let zero_limit = PreserveOptions::new().with_listed_shape_limit(0);
        assert!(matches!(zero_limit.validate(), Err(Error::Config(_))));

        let negative = PreserveOptions::new().with_lead_delay(-1.0);
        assert!(matches!(negative.validate(), Err(Error::Config(_))));

        let nan = PreserveOptions::new().with_lead_delay(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_partial() {
        let yaml = "proceed_with_text_animations: true\nlead_trigger: 2\n";
        let options = PreserveOptions::from_yaml_str(yaml).unwrap();
        assert!(options.proceed_with_text_animations);
        assert!(options.clean_orphans);
        assert_eq!(options.lead_trigger, TriggerKind::WithPrevious);
        assert_eq!(options.lead_delay, 0.0);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_rejects_bad_input() {
        assert!(matches!(
            PreserveOptions::from_yaml_str("clean_orphan: false\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PreserveOptions::from_yaml_str("listed_shape_limit: 0\n"),
            Err(Error::Config(_))
        ));
        assert!(PreserveOptions::from_yaml_str("lead_delay: [1, 2]\n").is_err());
    }
}
