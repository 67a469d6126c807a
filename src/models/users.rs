use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Record;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Editor,
    Journalist,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            Self::Editor => "editor",
            Self::Journalist => "journalist",
        }
    }

    /// Journalists are bound to a state and district; editors are not.
    pub fn requires_region(&self) -> bool {
        matches!(self, Self::Journalist)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "editor" => Ok(Self::Editor),
            "journalist" | "reporter" => Ok(Self::Journalist),
            other => Err(format!("unknown role {other:?}")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub state: String,
    pub district: String,
    pub status: UserStatus,
}

impl TryFrom<Map<String, Value>> for User {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let record = Record(&raw);
        let status = match record.first(&["status", "isActive"]) {
            Some(Value::Bool(false)) => UserStatus::Inactive,
            Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("inactive") => {
                UserStatus::Inactive
            }
            _ => UserStatus::Active,
        };

        Ok(Self {
            id: record.id(&["id", "_id"])?,
            name: record.text(&["name", "fullName"]),
            phone: record.text(&["phone", "mobile", "phoneNumber"]),
            email: record.text(&["email"]),
            role: record.opt_text(&["role"]).and_then(|r| r.parse().ok()),
            state: record.text(&["state"]),
            district: record.text(&["district"]),
            status,
        })
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 80, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 10, max = 13, message = "Phone number must be 10 digits"))]
    pub phone: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_user_variants() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "name": "Asha",
            "mobile": 9876543210u64,
            "email": "asha@example.com",
            "role": "Journalist",
            "state": "bihar",
            "district": "patna",
            "status": false
        }))
        .unwrap();

        assert_eq!(user.phone, "9876543210");
        assert_eq!(user.role, Some(UserRole::Journalist));
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn both_id_spellings_and_phone_aliases() {
        let user: User = serde_json::from_value(json!({
            "id": "u2",
            "_id": "u2",
            "phone": "",
            "phoneNumber": "9123456780",
            "role": "reporter"
        }))
        .unwrap();

        assert_eq!(user.id, "u2");
        assert_eq!(user.phone, "9123456780");
        assert_eq!(user.role, Some(UserRole::Journalist));
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn editor_payload_omits_region() {
        let dto = CreateUserDto {
            name: "Ed".into(),
            phone: "9876543210".into(),
            email: "ed@example.com".into(),
            password: "secret1".into(),
            role: UserRole::Editor,
            state: None,
            district: None,
        };
        let body = serde_json::to_value(&dto).unwrap();
        assert!(body.get("state").is_none());
        assert_eq!(body["role"], "editor");
    }

    #[test]
    fn login_requires_email_and_password() {
        let dto = LoginUserDto {
            email: "".into(),
            password: "".into(),
        };
        assert!(dto.validate().is_err());
    }
}
