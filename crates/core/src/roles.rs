//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the initial
//! migration.

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_FREELANCER: &str = "freelancer";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_CLIENT, ROLE_FREELANCER, ROLE_ADMIN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_accepted() {
        assert!(validate_role(ROLE_CLIENT).is_ok());
        assert!(validate_role(ROLE_FREELANCER).is_ok());
        assert!(validate_role(ROLE_ADMIN).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(validate_role("superuser").is_err());
    }
}
