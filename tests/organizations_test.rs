//! Organization lifecycle: creation, seats, member guards, invitations.

use claimdeck::AppError;
use claimdeck::organizations::{InviteManager, MemberRole, NewMember, OrgStore};
use claimdeck::testing::{TestDb, seed_member, seed_org, seed_org_named};

#[tokio::test]
async fn creating_an_org_creates_slug_and_admin_owner() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, owner) = seed_org_named(&db, "Acme Adjusters LLC").await.unwrap();

    assert_eq!(org.slug, "acme-adjusters-llc");
    assert_eq!(org.plan_tier, "starter");
    assert_eq!(owner.organization_id, org.id);
    assert_eq!(owner.role, "ADMIN");
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let db = TestDb::new().await.unwrap().connection;
    seed_org_named(&db, "Acme Adjusters").await.unwrap();

    let err = seed_org_named(&db, "acme adjusters").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn starter_plan_caps_members_at_three_seats() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = OrgStore::new(db.clone());

    // Owner occupies seat one.
    seed_member(&db, org.id, "Second").await.unwrap();
    seed_member(&db, org.id, "Third").await.unwrap();
    assert_eq!(store.member_count(org.id).await.unwrap(), 3);

    // The store itself does not enforce seats; the invite path does.
    let invites = InviteManager::new(db.clone());
    let issued = invites
        .issue(org.id, "fourth@example.com".to_string(), MemberRole::Agent, None)
        .await
        .unwrap();

    let err = invites.accept(&issued.token, None).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn extra_seats_raise_the_limit() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();
    let store = OrgStore::new(db.clone());

    seed_member(&db, org.id, "Second").await.unwrap();
    seed_member(&db, org.id, "Third").await.unwrap();

    // starter (3) + 1 extra seat
    store
        .update(org.id, None, None, None, Some(1))
        .await
        .unwrap();

    let invites = InviteManager::new(db.clone());
    let issued = invites
        .issue(org.id, "fourth@example.com".to_string(), MemberRole::Agent, None)
        .await
        .unwrap();
    let member = invites.accept(&issued.token, None).await.unwrap();

    assert_eq!(member.email.as_deref(), Some("fourth@example.com"));
    assert_eq!(store.member_count(org.id).await.unwrap(), 4);
}

#[tokio::test]
async fn invite_acceptance_is_single_shot() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();

    let invites = InviteManager::new(db.clone());
    let issued = invites
        .issue(org.id, "new@example.com".to_string(), MemberRole::CoAdmin, None)
        .await
        .unwrap();

    let member = invites
        .accept(&issued.token, Some("New Member".to_string()))
        .await
        .unwrap();
    assert_eq!(member.role, "CO_ADMIN");
    assert_eq!(member.display_name, "New Member");

    let err = invites.accept(&issued.token, None).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn revoked_invite_cannot_be_accepted() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();

    let invites = InviteManager::new(db.clone());
    let issued = invites
        .issue(org.id, "gone@example.com".to_string(), MemberRole::Agent, None)
        .await
        .unwrap();
    invites.revoke(org.id, issued.invite.id).await.unwrap();

    let err = invites.accept(&issued.token, None).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn pending_invite_for_same_email_is_a_conflict() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, _) = seed_org(&db).await.unwrap();

    let invites = InviteManager::new(db.clone());
    invites
        .issue(org.id, "dup@example.com".to_string(), MemberRole::Agent, None)
        .await
        .unwrap();

    let err = invites
        .issue(org.id, "Dup@Example.com".to_string(), MemberRole::Agent, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn last_admin_cannot_be_demoted_or_removed() {
    let db = TestDb::new().await.unwrap().connection;
    let (org, owner) = seed_org(&db).await.unwrap();
    let store = OrgStore::new(db.clone());

    let err = store
        .update_member_role(org.id, owner.id, MemberRole::Agent)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = store.delete_member(org.id, owner.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // With a second admin in place, the original owner can step down.
    store
        .create_member(
            org.id,
            NewMember {
                display_name: "Second Admin".to_string(),
                email: None,
                role: MemberRole::Admin,
            },
        )
        .await
        .unwrap();
    store
        .update_member_role(org.id, owner.id, MemberRole::Agent)
        .await
        .unwrap();
}

#[tokio::test]
async fn members_are_scoped_to_their_organization() {
    let db = TestDb::new().await.unwrap().connection;
    let (org_a, _) = seed_org_named(&db, "Org A").await.unwrap();
    let (org_b, member_b) = seed_org_named(&db, "Org B").await.unwrap();

    let store = OrgStore::new(db.clone());
    let err = store.get_member(org_a.id, member_b.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(store.list_members(org_b.id).await.unwrap().len(), 1);
}
