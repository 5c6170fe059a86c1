use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Tokens + identity returned by /auth/login and /auth/register
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Envelope;

    #[test]
    fn login_response_unwraps_session() {
        let body = r#"{
            "success": true,
            "data": {
                "accessToken": "eyJ.access",
                "refreshToken": "eyJ.refresh",
                "user": {"id": "u-17", "email": "mia@example.com", "name": "Mia Nguyen"}
            }
        }"#;
        let envelope: Envelope<Session> = serde_json::from_str(body).unwrap();
        let session = envelope.data;
        assert_eq!(session.access_token, "eyJ.access");
        assert_eq!(session.user.email, "mia@example.com");
        assert_eq!(session.user.name, "Mia Nguyen");
    }

    #[test]
    fn register_request_uses_plain_field_names() {
        let request = RegisterRequest {
            email: "mia@example.com".into(),
            name: "Mia".into(),
            password: "hunter22".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "mia@example.com");
        assert_eq!(json["name"], "Mia");
        assert_eq!(json["password"], "hunter22");
    }
}
