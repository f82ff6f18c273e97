/*!
 * Error Handling for the QaSa GCM Engine
 *
 * Provides error types with error codes, user-friendly messages, technical
 * details and suggested remediation for every failure the engine reports.
 *
 * A tag mismatch on the streaming API is deliberately *not* an error:
 * `good()` / `verify()` return `false`. Only the one-shot helpers, which
 * buffer the whole plaintext, turn a mismatch into
 * [`GcmError::AuthenticationFailed`].
 */

use std::collections::HashMap;
use thiserror::Error;

use crate::gcm::SessionState;

/// Error type for all GCM engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcmError {
    #[error("Invalid key length: expected {expected} - got {actual} bytes")]
    InvalidKeyLength {
        expected: String,
        actual: usize,
        error_code: u32,
    },

    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Invalid state: {operation} is not permitted while {state}")]
    InvalidState {
        operation: String,
        state: SessionState,
        error_code: u32,
    },

    #[error("Authentication failed: {operation} - {cause}")]
    AuthenticationFailed {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },
}

/// Error code constants for different error categories
pub mod error_codes {
    // AES / GCM errors: 3000-3999
    pub const AES_INVALID_KEY_SIZE: u32 = 3003;
    pub const AES_INVALID_NONCE_SIZE: u32 = 3004;
    pub const AES_AUTHENTICATION_FAILED: u32 = 3005;
    pub const GCM_INVALID_TAG_SIZE: u32 = 3006;
    pub const GCM_INVALID_CIPHERTEXT: u32 = 3007;
    pub const GCM_KEY_NOT_SET: u32 = 3008;
    pub const GCM_NONCE_NOT_SET: u32 = 3009;

    // Security errors: 5000-5999
    pub const INSUFFICIENT_ENTROPY: u32 = 5002;

    // Protocol errors: 8000-8999
    pub const PROTOCOL_STATE_INVALID: u32 = 8002;
}

impl GcmError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            GcmError::InvalidKeyLength { error_code, .. } => *error_code,
            GcmError::InvalidParameter { error_code, .. } => *error_code,
            GcmError::InvalidState { error_code, .. } => *error_code,
            GcmError::AuthenticationFailed { error_code, .. } => *error_code,
            GcmError::RandomGenerationError { error_code, .. } => *error_code,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            GcmError::InvalidKeyLength { .. } => "InvalidKeyLength",
            GcmError::InvalidParameter { .. } => "InvalidParameter",
            GcmError::InvalidState { .. } => "InvalidState",
            GcmError::AuthenticationFailed { .. } => "AuthenticationFailed",
            GcmError::RandomGenerationError { .. } => "RandomGenerationError",
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            GcmError::InvalidKeyLength { actual, .. } => format!(
                "A {}-byte key cannot be used. AES-GCM keys must be 16, 24 or 32 bytes.",
                actual
            ),
            GcmError::InvalidParameter {
                parameter,
                expected,
                ..
            } => format!(
                "Invalid parameter '{}'. Expected '{}'.",
                parameter, expected
            ),
            GcmError::InvalidState {
                operation, state, ..
            } => format!(
                "Operation '{}' was called out of order (session is {}).",
                operation, state
            ),
            GcmError::AuthenticationFailed { .. } => {
                "Message authentication failed. The data was tampered with or the wrong key, nonce or associated data was used."
                    .to_string()
            }
            GcmError::RandomGenerationError { .. } => {
                "Random number generation failed. A nonce could not be produced.".to_string()
            }
        }
    }

    /// Get technical details for debugging
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());
        details.insert("timestamp".to_string(), chrono::Utc::now().to_rfc3339());

        match self {
            GcmError::InvalidKeyLength {
                expected, actual, ..
            } => {
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.to_string());
            }
            GcmError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            GcmError::InvalidState {
                operation, state, ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("state".to_string(), state.to_string());
            }
            GcmError::AuthenticationFailed {
                operation, cause, ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("cause".to_string(), cause.clone());
            }
            GcmError::RandomGenerationError { cause, .. } => {
                details.insert("cause".to_string(), cause.clone());
            }
        }

        details
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            GcmError::InvalidKeyLength { .. } => Some(
                "Supply a 128, 192 or 256-bit key, e.g. from a KDF or key exchange.".to_string(),
            ),
            GcmError::InvalidParameter { error_code, .. } => match *error_code {
                error_codes::GCM_INVALID_TAG_SIZE => Some(
                    "Pass the full 16-byte authentication tag; truncated tags are not accepted."
                        .to_string(),
                ),
                error_codes::AES_INVALID_NONCE_SIZE => Some(
                    "Use a non-empty nonce; 12 bytes is the recommended length.".to_string(),
                ),
                _ => None,
            },
            GcmError::InvalidState { error_code, .. } => match *error_code {
                error_codes::GCM_KEY_NOT_SET => {
                    Some("Call set_key before encrypt or decrypt.".to_string())
                }
                error_codes::GCM_NONCE_NOT_SET => {
                    Some("Call set_nonce before encrypt or decrypt.".to_string())
                }
                _ => Some(
                    "Follow the call order: set_key, add_authdata, set_nonce, encrypt/decrypt, update, authtag/good."
                        .to_string(),
                ),
            },
            GcmError::AuthenticationFailed { .. } => Some(
                "Discard the message. Check that key, nonce and associated data match the sender's."
                    .to_string(),
            ),
            GcmError::RandomGenerationError { .. } => Some(
                "Check system entropy sources. Consider using hardware RNG if available."
                    .to_string(),
            ),
        }
    }
}

/// Convenience constructors for common error types
impl GcmError {
    pub fn invalid_key_length(actual: usize) -> Self {
        GcmError::InvalidKeyLength {
            expected: "16, 24 or 32".to_string(),
            actual,
            error_code: error_codes::AES_INVALID_KEY_SIZE,
        }
    }

    pub fn invalid_parameter(
        parameter: &str,
        expected: &str,
        actual: &str,
        error_code: u32,
    ) -> Self {
        GcmError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    pub fn invalid_state(operation: &str, state: SessionState) -> Self {
        Self::invalid_state_with_code(operation, state, error_codes::PROTOCOL_STATE_INVALID)
    }

    pub fn invalid_state_with_code(operation: &str, state: SessionState, error_code: u32) -> Self {
        GcmError::InvalidState {
            operation: operation.to_string(),
            state,
            error_code,
        }
    }

    pub fn authentication_failed(operation: &str, cause: &str) -> Self {
        GcmError::AuthenticationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code: error_codes::AES_AUTHENTICATION_FAILED,
        }
    }
}

/// Result type alias for GCM operations
pub type GcmResult<T> = Result<T, GcmError>;
