//! Runtime feature-flag handling.
//!
//! A carrier integration is live only when its `use_*` flag is set *and* its
//! configuration section is present; handlers check this before touching the
//! carrier config.

use shipflow_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the MRW carrier integration is enabled at runtime.
pub fn is_mrw_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_mrw, config.mrw.as_ref())
}

#[cfg(test)]
mod tests {
    use super::is_feature_enabled;

    #[test]
    fn flag_and_section_must_both_be_present() {
        assert!(is_feature_enabled(true, Some(&())));
        assert!(!is_feature_enabled(true, None::<&()>));
        assert!(!is_feature_enabled(false, Some(&())));
    }
}
