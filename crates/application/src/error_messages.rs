use softmobile_core::AppError;

/// Converts an application error into operator-facing text.
#[must_use]
pub fn friendly_error_message(error: &AppError) -> String {
    match error {
        AppError::Validation(message) => message.clone(),
        AppError::NotFound(message) => format!("The requested record was not found: {message}"),
        AppError::Conflict(message) => {
            format!("The operation conflicts with the current data: {message}")
        }
        AppError::Unauthorized(_) => "Your session expired. Sign in again to continue.".to_owned(),
        AppError::Forbidden(_) => "You do not have permission to perform this action.".to_owned(),
        AppError::Unavailable(_) => {
            "Could not reach the Softmobile server. Check the connection and try again.".to_owned()
        }
        AppError::Internal(message) => format!("Unexpected error: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use softmobile_core::AppError;

    use super::friendly_error_message;

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let message = friendly_error_message(&AppError::Validation(
            "corporate reason must have at least 5 characters".to_owned(),
        ));
        assert_eq!(message, "corporate reason must have at least 5 characters");
    }

    #[test]
    fn transport_details_are_hidden() {
        let message = friendly_error_message(&AppError::Unavailable(
            "error sending request for url (http://10.0.0.4:8000/sync/outbox)".to_owned(),
        ));
        assert!(!message.contains("10.0.0.4"));
    }
}
