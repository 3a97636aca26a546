use super::*;
use crate::Role;

fn identity(role: Role) -> Identity {
    Identity {
        id: 3,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@company.com".to_string(),
        role,
    }
}

#[test]
fn starts_anonymous() {
    let session = Session::anonymous();
    assert!(!session.is_authenticated());
    assert_eq!(session.current_identity(), None);
    assert_eq!(session.credential(), None);
    assert_eq!(session.role(), None);
}

#[test]
fn authenticate_sets_identity_and_credential_together() {
    let session = Session::authenticated(identity(Role::Employee), "tok-123");
    assert!(session.is_authenticated());
    assert_eq!(session.credential(), Some("tok-123"));
    assert_eq!(
        session.current_identity().map(|i| i.display_name()),
        Some("Jane Doe".to_string())
    );
    assert_eq!(session.role(), Some(Role::Employee));
}

#[test]
fn clear_drops_both_and_is_idempotent() {
    let mut session = Session::authenticated(identity(Role::Admin), "tok-123");
    session.clear();
    assert_eq!(session.current_identity(), None);
    assert_eq!(session.credential(), None);

    // 强制终止可能与登出先后到达，重复清除不应出错
    session.clear();
    assert!(!session.is_authenticated());
}

#[test]
fn restore_roundtrips_through_storage() {
    let original = Session::authenticated(identity(Role::Admin), "tok-456");
    let (user_json, token) = original.to_stored().unwrap();

    let restored = Session::restore(Some(user_json.as_str()), Some(token.as_str()));
    assert_eq!(restored, original);
}

#[test]
fn restore_requires_both_keys() {
    let (user_json, token) = Session::authenticated(identity(Role::Employee), "tok-789")
        .to_stored()
        .unwrap();

    // 凭据存在 => 身份也必须存在；半份存储视为损坏
    assert!(!Session::restore(Some(user_json.as_str()), None).is_authenticated());
    assert!(!Session::restore(None, Some(token.as_str())).is_authenticated());
    assert!(!Session::restore(None, None).is_authenticated());
}

#[test]
fn restore_rejects_corrupt_identity_json() {
    let restored = Session::restore(Some("{not json"), Some("tok"));
    assert!(!restored.is_authenticated());
    assert_eq!(restored.credential(), None);
}

#[test]
fn anonymous_has_nothing_to_store() {
    assert_eq!(Session::anonymous().to_stored(), None);
}
