//! Registration request body.

use serde::{Deserialize, Serialize};

/// JSON body posted to the registration endpoint.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Account email.
    #[serde(default = "default_email")]
    pub email: String,
    /// Plain-text password.
    #[serde(default = "default_password")]
    pub password: String,
    /// Given name.
    #[serde(default = "default_first_name")]
    pub first_name: String,
    /// Family name.
    #[serde(default = "default_last_name")]
    pub last_name: String,
    /// Phone number in international format.
    #[serde(default = "default_phone")]
    pub phone: String,
}

fn default_email() -> String {
    "testuser@example.com".to_string()
}

fn default_password() -> String {
    "password123".to_string()
}

fn default_first_name() -> String {
    "Test".to_string()
}

fn default_last_name() -> String {
    "User".to_string()
}

fn default_phone() -> String {
    "+1234567890".to_string()
}

impl Default for RegistrationPayload {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
            first_name: default_first_name(),
            last_name: default_last_name(),
            phone: default_phone(),
        }
    }
}
