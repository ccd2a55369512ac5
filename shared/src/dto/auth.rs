use serde::{Deserialize, Serialize};

/// Token login request (`POST /token/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Signup request (`POST /signup/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Signup response: the new account's token and public profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub token: String,
    pub user: User,
}

/// User record as returned by `/users/` and `/users/me/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
}

impl User {
    /// Role label shown in the admin users table
    pub fn role_label(&self) -> &'static str {
        if self.is_staff {
            "Admin"
        } else {
            "User"
        }
    }
}

/// Error body used by the API for every failure it explains
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_missing_optional_fields_default() {
        let user: User = serde_json::from_str(r#"{"id":7,"username":"bob"}"#).unwrap();
        assert_eq!(user.email, "");
        assert!(!user.is_staff);
        assert_eq!(user.role_label(), "User");
    }

    #[test]
    fn test_signup_response_parses_nested_user() {
        let body = r#"{"token":"abc","user":{"id":1,"username":"root","email":"r@x.io","is_staff":true}}"#;
        let resp: SignupResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.user.role_label(), "Admin");
    }
}
