use crate::types::Label;

/// Configuration shared by both conversion directions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Emit label tuples; when false a multi-label span is an error.
    pub multi_label: bool,
    /// Label marking unlabeled text.
    pub none_value: Label,
    /// Keep predicted boundaries as-is instead of snapping them to whole words.
    pub subtoken_predictions: bool,
    /// Keep annotation boundaries as-is instead of widening them to whole subword tokens.
    pub subtoken_labels: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            multi_label: true,
            none_value: Label::default(),
            subtoken_predictions: false,
            subtoken_labels: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multi_label(mut self, enabled: bool) -> Self {
        self.multi_label = enabled;
        self
    }

    pub fn with_none_value(mut self, none_value: impl Into<Label>) -> Self {
        self.none_value = none_value.into();
        self
    }

    pub fn with_subtoken_predictions(mut self, enabled: bool) -> Self {
        self.subtoken_predictions = enabled;
        self
    }

    pub fn with_subtoken_labels(mut self, enabled: bool) -> Self {
        self.subtoken_labels = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::default();
        assert!(config.multi_label);
        assert_eq!(config.none_value, Label::from("<PAD>"));
        assert!(!config.subtoken_predictions);
        assert!(config.subtoken_labels);
    }

    #[test]
    fn test_builder() {
        let config = ConversionConfig::new()
            .with_multi_label(false)
            .with_none_value(-1i64)
            .with_subtoken_predictions(true)
            .with_subtoken_labels(false);

        assert!(!config.multi_label);
        assert_eq!(config.none_value, Label::Id(-1));
        assert!(config.subtoken_predictions);
        assert!(!config.subtoken_labels);
    }
}
