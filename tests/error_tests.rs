#[cfg(test)]
mod error_tests {
    use tagsmith::{MalformedKind, Result, TagsmithError};

    #[test]
    fn test_credential_missing_message() {
        let err = TagsmithError::CredentialMissing;
        assert_eq!(
            format!("{}", err),
            "API key is not set. Please add your API key in the settings."
        );
    }

    #[test]
    fn test_credential_invalid_message() {
        let err = TagsmithError::CredentialInvalid;
        assert_eq!(
            format!("{}", err),
            "Your API key is not valid. Please check it in the settings."
        );
    }

    #[test]
    fn test_malformed_response_messages() {
        let err = TagsmithError::MalformedResponse(MalformedKind::InvalidJson);
        assert_eq!(
            format!("{}", err),
            "The model reply could not be read as metadata: invalid JSON."
        );

        let err = TagsmithError::MalformedResponse(MalformedKind::SchemaViolation);
        assert_eq!(
            format!("{}", err),
            "The model reply could not be read as metadata: schema violation."
        );
    }

    #[test]
    fn test_transport_failure_hides_detail() {
        let err = TagsmithError::TransportFailure {
            detail: "connection reset by peer".to_string(),
        };
        let message = format!("{}", err);
        assert_eq!(
            message,
            "Failed to generate metadata from the image. Please try again."
        );
        // The technical cause stays out of the user-facing message.
        assert!(!message.contains("connection reset"));
    }

    #[test]
    fn test_credential_store_message() {
        let err = TagsmithError::CredentialStore("permission denied".to_string());
        assert_eq!(
            format!("{}", err),
            "Could not access the stored API key: permission denied"
        );
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        assert_ne!(
            TagsmithError::CredentialInvalid,
            TagsmithError::CredentialMissing
        );
        assert_ne!(
            TagsmithError::MalformedResponse(MalformedKind::InvalidJson),
            TagsmithError::MalformedResponse(MalformedKind::SchemaViolation)
        );
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert_eq!(ok_result, Ok(42));

        let err_result: Result<i32> = Err(TagsmithError::CredentialMissing);
        assert!(err_result.is_err());
    }
}
