use serde::{Deserialize, Serialize};

/// The authenticated account, as returned by `GET /api/users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl CurrentUser {
    /// The profile user id that timesheets are filed under, if a profile exists.
    pub fn profile_user_id(&self) -> Option<i64> {
        self.profile.as_ref().and_then(|p| p.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// One row of `GET /api/users/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_user_id_is_read_from_nested_profile() {
        let raw = r#"{"id": 3, "role": "ROLE_USER", "profile": {"userId": 7}}"#;
        let user: CurrentUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.profile_user_id(), Some(7));
    }

    #[test]
    fn missing_profile_yields_none() {
        let raw = r#"{"id": 1, "role": "ROLE_ADMIN"}"#;
        let user: CurrentUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.profile_user_id(), None);
        assert_eq!(user.role.as_deref(), Some("ROLE_ADMIN"));
    }

    #[test]
    fn user_summary_tolerates_missing_names() {
        let raw = r#"[{"userId": 4, "firstName": "Ada"}, {"userId": 5}]"#;
        let users: Vec<UserSummary> = serde_json::from_str(raw).unwrap();

        assert_eq!(users[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(users[1].user_id, 5);
        assert_eq!(users[1].email, None);
    }
}
