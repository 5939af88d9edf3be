use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default, rename = "rememberMe")]
    pub remember_me: bool,
}

/// Request body for the forgot-password flow.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for the reset-password flow.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: &'static str,
    pub token: String,
    pub username: String,
    pub userid: Uuid,
}

/// Response for the protected checkUser route.
#[derive(Debug, Serialize)]
pub struct CheckUserResponse {
    pub message: &'static str,
    pub username: String,
    pub userid: Uuid,
}

/// Generic single-message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_accepts_remember_me_camel_case() {
        let req: LoginRequest = serde_json::from_str(
            r#"{"email":"a@b.co","password":"pw","rememberMe":true}"#,
        )
        .unwrap();
        assert!(req.remember_me);
    }

    #[test]
    fn login_request_defaults_remember_me_to_false() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":"pw"}"#).unwrap();
        assert!(!req.remember_me);
    }

    #[test]
    fn reset_request_uses_new_password_camel_case() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"email":"a@b.co","otp":"12345678","newPassword":"longenough"}"#,
        )
        .unwrap();
        assert_eq!(req.new_password, "longenough");
    }

    #[test]
    fn login_response_serialization() {
        let res = LoginResponse {
            msg: "user login successful",
            token: "tok".into(),
            username: "alice".into(),
            userid: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"token\""));
        assert!(json.contains("\"userid\""));
        assert!(json.contains("user login successful"));
    }
}
