use crate::abstract_trait::{NavigatorTrait, Notice};
use shared::errors::ClientError;

/// Shows the notices for a failed call. `401`s are skipped because the
/// session-expiry handler already told the user.
pub fn report_error(navigator: &dyn NavigatorTrait, err: &ClientError) {
    if err.is_unauthorized() {
        return;
    }

    for message in err.notices() {
        navigator.notify(Notice::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingNavigator;
    use std::collections::BTreeMap;

    #[test]
    fn validation_errors_become_separate_notices() {
        let navigator = RecordingNavigator::default();
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), vec!["is required".to_string()]);
        fields.insert(
            "slug".to_string(),
            vec!["is taken".to_string(), "is too long".to_string()],
        );

        report_error(&navigator, &ClientError::Validation(fields));

        let messages: Vec<String> = navigator
            .notices
            .lock()
            .iter()
            .map(|n| n.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec!["slug: is taken", "slug: is too long", "title: is required"]
        );
    }

    #[test]
    fn unauthorized_is_not_reported_twice() {
        let navigator = RecordingNavigator::default();
        report_error(&navigator, &ClientError::Unauthorized);
        assert!(navigator.notices.lock().is_empty());
    }
}
