//! Domain validation tests for identity scalar types.

use crate::identity::domain::{IdentityDomainError, OpenId, UserRole};
use rstest::rstest;

#[rstest]
#[case(UserRole::User, "user")]
#[case(UserRole::Admin, "admin")]
fn user_role_round_trips_through_storage_form(#[case] role: UserRole, #[case] text: &str) {
    assert_eq!(role.as_str(), text);
    assert_eq!(UserRole::try_from(text), Ok(role));
}

#[test]
fn user_role_parsing_normalizes_case_and_whitespace() {
    assert_eq!(UserRole::try_from(" Admin "), Ok(UserRole::Admin));
}

#[test]
fn user_role_rejects_unknown_values() {
    assert!(UserRole::try_from("superuser").is_err());
}

#[test]
fn user_role_defaults_to_user() {
    assert_eq!(UserRole::default(), UserRole::User);
}

#[test]
fn open_id_rejects_empty_values() {
    assert_eq!(OpenId::new("   "), Err(IdentityDomainError::EmptyOpenId));
}

#[test]
fn open_id_rejects_values_wider_than_the_column() {
    let wide = "x".repeat(65);
    assert_eq!(OpenId::new(wide), Err(IdentityDomainError::OpenIdTooLong(65)));
}

#[test]
fn open_id_trims_surrounding_whitespace() {
    let open_id = OpenId::new("  oauth|42  ").expect("valid open id");
    assert_eq!(open_id.as_str(), "oauth|42");
}
