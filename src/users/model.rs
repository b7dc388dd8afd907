use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::onboarding::ProfileFields;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String, // Argon2 hash, never serialized
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub country: Option<String>,
    pub receive_notifications: bool,
    pub receive_updates: bool,
    pub completed_onboarding: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub country: Option<String>,
    pub receive_notifications: bool,
    pub receive_updates: bool,
    pub completed_onboarding: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            photo_url: user.photo_url,
            country: user.country,
            receive_notifications: user.receive_notifications,
            receive_updates: user.receive_updates,
            completed_onboarding: user.completed_onboarding,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// The mutable profile surface, addressed by wire name.
///
/// Wider than the onboarding form: `photoUrl` is settable here but never
/// produced by it. A value of the wrong shape for a field is ignored;
/// callers are expected to have validated first.
impl ProfileFields for User {
    fn has_field(&self, name: &str) -> bool {
        matches!(
            name,
            "firstName"
                | "lastName"
                | "bio"
                | "photoUrl"
                | "country"
                | "receiveNotifications"
                | "receiveUpdates"
                | "completedOnboarding"
        )
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        fn text(v: &Option<String>) -> Value {
            v.clone().map(Value::String).unwrap_or(Value::Null)
        }
        match name {
            "firstName" => Some(text(&self.first_name)),
            "lastName" => Some(text(&self.last_name)),
            "bio" => Some(text(&self.bio)),
            "photoUrl" => Some(text(&self.photo_url)),
            "country" => Some(text(&self.country)),
            "receiveNotifications" => Some(Value::Bool(self.receive_notifications)),
            "receiveUpdates" => Some(Value::Bool(self.receive_updates)),
            "completedOnboarding" => Some(Value::Bool(self.completed_onboarding)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("firstName", Value::String(s)) => self.first_name = Some(s),
            ("lastName", Value::String(s)) => self.last_name = Some(s),
            ("bio", Value::String(s)) => self.bio = Some(s),
            ("photoUrl", Value::String(s)) => self.photo_url = Some(s),
            ("country", Value::String(s)) => self.country = Some(s),
            ("receiveNotifications", Value::Bool(b)) => self.receive_notifications = b,
            ("receiveUpdates", Value::Bool(b)) => self.receive_updates = b,
            ("completedOnboarding", Value::Bool(b)) => self.completed_onboarding = b,
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) fn test_user() -> User {
    use time::macros::datetime;

    User {
        id: Uuid::new_v4(),
        username: "ada".into(),
        email: "ada@example.com".into(),
        password_hash: "$argon2$fake".into(),
        first_name: None,
        last_name: None,
        bio: None,
        photo_url: None,
        country: None,
        receive_notifications: false,
        receive_updates: false,
        completed_onboarding: false,
        created_at: datetime!(2026-01-15 09:30 UTC),
        updated_at: datetime!(2026-01-15 09:30 UTC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_camel_case_with_rfc3339_timestamps() {
        let public = PublicUser::from(test_user());
        let json = serde_json::to_value(&public).expect("serialize public user");

        assert_eq!(json["username"], "ada");
        assert_eq!(json["firstName"], Value::Null);
        assert_eq!(json["photoUrl"], Value::Null);
        assert_eq!(json["receiveNotifications"], false);
        assert_eq!(json["completedOnboarding"], false);
        assert_eq!(json["createdAt"], "2026-01-15T09:30:00Z");
        assert_eq!(json["updatedAt"], "2026-01-15T09:30:00Z");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn profile_fields_cover_the_wire_names() {
        let user = test_user();
        for name in [
            "firstName",
            "lastName",
            "bio",
            "photoUrl",
            "country",
            "receiveNotifications",
            "receiveUpdates",
            "completedOnboarding",
        ] {
            assert!(user.has_field(name), "expected field {name}");
            assert!(user.get_field(name).is_some());
        }
        assert!(!user.has_field("email"));
        assert!(!user.has_field("id"));
        assert!(user.get_field("age").is_none());
    }

    #[test]
    fn set_field_applies_matching_values() {
        let mut user = test_user();
        user.set_field("firstName", Value::String("Ada".into()));
        user.set_field("receiveUpdates", Value::Bool(true));

        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert!(user.receive_updates);
    }

    #[test]
    fn set_field_ignores_wrong_shapes_and_unknown_names() {
        let mut user = test_user();
        user.set_field("firstName", Value::Bool(true));
        user.set_field("receiveUpdates", Value::String("yes".into()));
        user.set_field("age", Value::String("37".into()));

        assert_eq!(user.first_name, None);
        assert!(!user.receive_updates);
    }
}
