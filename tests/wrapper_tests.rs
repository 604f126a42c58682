mod support;

use scopetime::api::{AppointmentId, PageRequest, UserId};
use scopetime::contracts::appointment::Decision;
use scopetime::contracts::{Command, ErrorTag};
use scopetime::models::Role;
use scopetime::security::AccessReport;

use support::{
    admin_session, base_time, factory, member_session, request_between, researcher_session,
    seeded_repository, wrapper,
};

use chrono::Duration;

#[tokio::test]
async fn test_unauthenticated_caller_is_reported_as_missing_user_role() {
    let repo = seeded_repository();
    let gate = wrapper(repo);

    let denial = gate
        .create(None, request_between(1, 0, 30))
        .await
        .expect_err("anonymous create must be denied");
    assert_eq!(denial, AccessReport::MissingRoles(vec![Role::User]));
}

#[tokio::test]
async fn test_owner_may_manage_their_own_appointment() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);

    let id = gate
        .create(Some(&alice), request_between(1, 0, 30))
        .await
        .expect("authorized")
        .expect("valid");
    gate.update(Some(&alice), id, request_between(1, 60, 90))
        .await
        .expect("authorized")
        .expect("valid");
    gate.cancel(Some(&alice), id)
        .await
        .expect("authorized")
        .expect("valid");
}

#[tokio::test]
async fn test_non_owner_without_elevated_role_is_denied() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);
    let bob = member_session(2);

    let id = gate
        .create(Some(&alice), request_between(1, 0, 30))
        .await
        .expect("authorized")
        .expect("valid");

    let denial = gate
        .cancel(Some(&bob), id)
        .await
        .expect_err("bob does not own alice's appointment");
    assert_eq!(
        denial,
        AccessReport::MissingRoles(vec![Role::Admin, Role::Alumni])
    );
}

#[tokio::test]
async fn test_admin_may_manage_another_users_appointment() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);
    let admin = admin_session(9);

    let id = gate
        .create(Some(&alice), request_between(1, 0, 30))
        .await
        .expect("authorized")
        .expect("valid");
    gate.cancel(Some(&admin), id)
        .await
        .expect("admins act on any appointment")
        .expect("valid");
}

#[tokio::test]
async fn test_unknown_target_reports_invalid_resource_before_roles() {
    let repo = seeded_repository();
    let gate = wrapper(repo);

    // Even an anonymous caller learns the id does not resolve; the
    // existence check runs ahead of authentication.
    let denial = gate
        .cancel(None, AppointmentId::new(404))
        .await
        .expect_err("unknown id");
    assert_eq!(
        denial,
        AccessReport::InvalidResourceId {
            resource: "appointment",
            id: 404,
        }
    );
}

#[tokio::test]
async fn test_approve_deny_requires_admin_even_for_owner() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);
    let admin = admin_session(9);

    let id = gate
        .request(Some(&alice), request_between(1, 0, 30))
        .await
        .expect("authorized")
        .expect("valid");

    let denial = gate
        .approve_deny(Some(&alice), id, Decision::Approve)
        .await
        .expect_err("owners cannot rule on their own requests");
    assert_eq!(denial, AccessReport::MissingRoles(vec![Role::Admin]));

    gate.approve_deny(Some(&admin), id, Decision::Approve)
        .await
        .expect("authorized")
        .expect("valid");
}

#[tokio::test]
async fn test_publishing_own_appointment_takes_standing() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);

    let mut request = request_between(1, 0, 30);
    request.is_public = false;
    let id = gate
        .create(Some(&alice), request)
        .await
        .expect("authorized")
        .expect("valid");

    let denial = gate
        .make_public(Some(&alice), id)
        .await
        .expect_err("plain members cannot publish");
    assert_eq!(
        denial,
        AccessReport::MissingRoles(vec![Role::Researcher, Role::Admin, Role::Alumni])
    );

    let alice_researcher = researcher_session(1);
    gate.make_public(Some(&alice_researcher), id)
        .await
        .expect("researchers publish their own work")
        .expect("valid");
}

#[tokio::test]
async fn test_listing_another_users_appointments_is_denied() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let bob = member_session(2);

    let denial = gate
        .user_list(Some(&bob), UserId::new(1), PageRequest::default())
        .await
        .expect_err("bob cannot list alice's appointments");
    assert!(matches!(denial, AccessReport::MissingRoles(_)));

    gate.user_list(Some(&bob), UserId::new(2), PageRequest::default())
        .await
        .expect("own list is self-service")
        .expect("valid");
}

#[tokio::test]
async fn test_calendar_and_search_need_only_authentication() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let bob = member_session(2);

    gate.list_between_dates(Some(&bob), base_time(), base_time() + Duration::hours(1))
        .await
        .expect("any authenticated user reads the calendar")
        .expect("valid");

    let denial = gate
        .search(None, vec![], PageRequest::default())
        .await
        .expect_err("anonymous search is denied before validation runs");
    assert_eq!(denial, AccessReport::MissingRoles(vec![Role::User]));
}

#[tokio::test]
async fn test_denied_command_still_returns_inner_errors() {
    let repo = seeded_repository();
    let gate = wrapper(repo);
    let alice = member_session(1);

    gate.create(Some(&alice), request_between(1, 0, 30))
        .await
        .expect("authorized")
        .expect("valid");

    // Access passes, validation fails: outer Ok, inner Err.
    let errors = gate
        .create(Some(&alice), request_between(1, 15, 45))
        .await
        .expect("authorized")
        .expect_err("overlap");
    assert!(errors.contains(ErrorTag::Overlap));
}

#[tokio::test]
async fn test_retrieve_of_foreign_appointment_needs_elevated_role() {
    let repo = seeded_repository();
    let gate = wrapper(repo.clone());
    let commands = factory(repo);
    let bob = member_session(2);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("seed booking");

    let denial = gate
        .retrieve(Some(&bob), id)
        .await
        .expect_err("foreign private details are gated");
    assert!(matches!(denial, AccessReport::MissingRoles(_)));
}
