use serde::{Deserialize, Serialize};
use std::fmt;

/// The two principal tracks this backend knows about.
///
/// Role separation drives which credential collection a request is
/// resolved against and which message templates the mailer picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum Role {
    GymOwner = 0,
    Admin = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::GymOwner => "gymOwner",
            Role::Admin => "admin",
        }
    }

    /// Human wording used in authorization failure messages
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Role::GymOwner => "gym owner",
            Role::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::GymOwner),
            1 => Some(Role::Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gymOwner" => Some(Role::GymOwner),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::GymOwner));
        assert_eq!(Role::from_id(1), Some(Role::Admin));
        assert_eq!(Role::from_id(2), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("gymOwner"), Some(Role::GymOwner));
        assert_eq!(Role::from_code("admin"), Some(Role::Admin));
        assert_eq!(Role::from_code("superAdmin"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::GymOwner.to_string(), "gymOwner");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(
            serde_json::to_string(&Role::GymOwner).unwrap(),
            "\"gymOwner\""
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_role_checks() {
        assert!(!Role::GymOwner.is_admin());
        assert!(Role::Admin.is_admin());
    }
}
