mod support;

use chrono::{Duration, Utc};

use scopetime::api::{AppointmentId, PageRequest, TelescopeId, UserId};
use scopetime::contracts::appointment::{CoordinateRequest, Decision, TargetRequest};
use scopetime::contracts::{Command, ErrorTag};
use scopetime::db::models::SearchCriterion;
use scopetime::db::repository::{AllottedTimeCapRepository, AppointmentRepository, NewAppointment};
use scopetime::models::{
    AllottedTimeCap, AppointmentStatus, AppointmentTarget, Coordinate,
};

use support::{base_time, factory, request_between, seeded_repository};

#[tokio::test]
async fn test_create_schedules_a_valid_appointment() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("valid request should schedule");

    let stored = repo
        .find_appointment(id)
        .await
        .expect("lookup")
        .expect("persisted");
    assert_eq!(stored.status, AppointmentStatus::Scheduled);
    assert_eq!(stored.user_id, UserId::new(1));
    assert_eq!(stored.duration(), Duration::minutes(30));
}

#[tokio::test]
async fn test_request_files_for_approval() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    let id = commands
        .request(request_between(1, 0, 30))
        .execute()
        .await
        .expect("valid request");

    let stored = repo.find_appointment(id).await.expect("lookup").expect("persisted");
    assert_eq!(stored.status, AppointmentStatus::Requested);
}

#[tokio::test]
async fn test_overlapping_window_is_rejected() {
    let repo = seeded_repository();
    let commands = factory(repo);

    commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("first booking");

    let errors = commands
        .create(request_between(2, 15, 45))
        .execute()
        .await
        .expect_err("overlap must be rejected");
    assert!(errors.contains(ErrorTag::Overlap));
}

#[tokio::test]
async fn test_back_to_back_windows_do_not_conflict() {
    let repo = seeded_repository();
    let commands = factory(repo);

    commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("first booking");

    // Half-open windows: [10:00, 10:30) and [10:30, 11:00) share no instant.
    commands
        .create(request_between(2, 30, 60))
        .execute()
        .await
        .expect("adjacent booking should schedule");
}

#[tokio::test]
async fn test_other_telescope_does_not_conflict() {
    let repo = seeded_repository();
    let commands = factory(repo);

    commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("first booking");

    let mut request = request_between(2, 0, 30);
    request.telescope_id = TelescopeId::new(2);
    commands
        .create(request)
        .execute()
        .await
        .expect("same window on another telescope");
}

#[tokio::test]
async fn test_canceled_appointment_releases_its_window() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("first booking");
    commands.cancel(id).execute().await.expect("cancel");

    commands
        .create(request_between(2, 0, 30))
        .execute()
        .await
        .expect("window is free after cancel");
}

#[tokio::test]
async fn test_cancel_of_canceled_appointment_is_a_status_error() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("booking");
    commands.cancel(id).execute().await.expect("first cancel");

    let errors = commands
        .cancel(id)
        .execute()
        .await
        .expect_err("second cancel is not idempotent");
    assert!(errors.contains(ErrorTag::Status));
}

#[tokio::test]
async fn test_cancel_unknown_appointment_reports_id() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let errors = commands
        .cancel(AppointmentId::new(404))
        .execute()
        .await
        .expect_err("unknown id");
    assert!(errors.contains(ErrorTag::AppointmentId));
}

#[tokio::test]
async fn test_validation_accumulates_independent_violations() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let mut request = request_between(1, 30, 0); // end before start
    request.target = TargetRequest::Point(CoordinateRequest {
        hours: 30,
        minutes: 0,
        seconds: 0,
        declination: 95.0,
    });

    let errors = commands.create(request).execute().await.expect_err("invalid");
    assert!(errors.contains(ErrorTag::EndTime));
    assert!(errors.contains(ErrorTag::Hours));
    assert!(errors.contains(ErrorTag::Declination));
}

#[tokio::test]
async fn test_missing_user_short_circuits_domain_checks() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let mut request = request_between(77, 30, 0); // also end before start
    request.user_id = UserId::new(77);

    let errors = commands.create(request).execute().await.expect_err("invalid");
    assert!(errors.contains(ErrorTag::UserId));
    assert!(!errors.contains(ErrorTag::EndTime));
}

#[tokio::test]
async fn test_raster_scan_requires_two_corners() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let mut request = request_between(1, 0, 30);
    request.target = TargetRequest::RasterScan(vec![CoordinateRequest {
        hours: 5,
        minutes: 0,
        seconds: 0,
        declination: 10.0,
    }]);

    let errors = commands.create(request).execute().await.expect_err("invalid");
    assert!(errors.contains(ErrorTag::Coordinates));
}

#[tokio::test]
async fn test_quota_rejects_when_projected_total_exceeds_cap() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    // 90 minutes already scheduled against a 100-minute cap.
    repo.set_cap(AllottedTimeCap::limited(UserId::new(1), 100 * 60))
        .await
        .expect("set cap");
    commands
        .create(request_between(1, 0, 90))
        .execute()
        .await
        .expect("within cap");

    let errors = commands
        .create(request_between(1, 120, 140))
        .execute()
        .await
        .expect_err("20 more minutes would exceed the cap");
    assert!(errors.contains(ErrorTag::AvailableTime));

    commands
        .create(request_between(1, 120, 130))
        .execute()
        .await
        .expect("10 more minutes lands exactly on the cap");
}

#[tokio::test]
async fn test_zero_cap_means_unlimited() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    repo.set_cap(AllottedTimeCap::limited(UserId::new(1), 0))
        .await
        .expect("set cap");

    commands
        .create(request_between(1, 0, 600))
        .execute()
        .await
        .expect("zero cap never rejects");
}

#[tokio::test]
async fn test_update_does_not_count_its_own_current_duration() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    repo.set_cap(AllottedTimeCap::limited(UserId::new(1), 60 * 60))
        .await
        .expect("set cap");
    let id = commands
        .create(request_between(1, 0, 60))
        .execute()
        .await
        .expect("fills the cap");

    // Moving the hour-long booking stays within quota because its current
    // duration is released before the proposed one is counted.
    commands
        .update(id, request_between(1, 120, 180))
        .execute()
        .await
        .expect("replacement window within cap");
}

#[tokio::test]
async fn test_update_cannot_reassign_ownership() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    repo.set_cap(AllottedTimeCap::limited(UserId::new(1), 60 * 60))
        .await
        .expect("set cap");
    let id = commands
        .create(request_between(1, 0, 60))
        .execute()
        .await
        .expect("fills the cap");

    // Naming another user must not let the owner outgrow their own cap.
    let errors = commands
        .update(id, request_between(2, 0, 120))
        .execute()
        .await
        .expect_err("ownership is fixed at creation");
    assert!(errors.contains(ErrorTag::UserId));

    let stored = repo.find_appointment(id).await.expect("lookup").expect("persisted");
    assert_eq!(stored.user_id, UserId::new(1));
    assert_eq!(stored.duration(), Duration::hours(1));
}

#[tokio::test]
async fn test_update_excludes_itself_from_conflict_detection() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("booking");

    commands
        .update(id, request_between(1, 15, 45))
        .execute()
        .await
        .expect("shifting within its own window is not a conflict");
}

#[tokio::test]
async fn test_update_of_terminal_appointment_is_a_status_error() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("booking");
    commands.cancel(id).execute().await.expect("cancel");

    let errors = commands
        .update(id, request_between(1, 60, 90))
        .execute()
        .await
        .expect_err("terminal appointments are immutable");
    assert!(errors.contains(ErrorTag::Status));
}

#[tokio::test]
async fn test_approve_moves_requested_to_scheduled() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    let id = commands
        .request(request_between(1, 0, 30))
        .execute()
        .await
        .expect("request");
    commands
        .approve_deny(id, Decision::Approve)
        .execute()
        .await
        .expect("approve");

    let stored = repo.find_appointment(id).await.expect("lookup").expect("persisted");
    assert_eq!(stored.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn test_deny_is_terminal() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    let id = commands
        .request(request_between(1, 0, 30))
        .execute()
        .await
        .expect("request");
    commands
        .approve_deny(id, Decision::Deny)
        .execute()
        .await
        .expect("deny");

    let errors = commands
        .approve_deny(id, Decision::Approve)
        .execute()
        .await
        .expect_err("a denied appointment cannot be ruled on again");
    assert!(errors.contains(ErrorTag::Status));

    let stored = repo.find_appointment(id).await.expect("lookup").expect("persisted");
    assert_eq!(stored.status, AppointmentStatus::Denied);
}

#[tokio::test]
async fn test_pending_request_holds_its_window() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let requested = commands
        .request(request_between(1, 0, 30))
        .execute()
        .await
        .expect("request");

    // A pending request occupies telescope time like a scheduled booking.
    let errors = commands
        .create(request_between(2, 15, 45))
        .execute()
        .await
        .expect_err("window is held while the request is pending");
    assert!(errors.contains(ErrorTag::Overlap));

    commands
        .approve_deny(requested, Decision::Approve)
        .execute()
        .await
        .expect("the holder's own approval goes through");
}

#[tokio::test]
async fn test_denied_request_releases_its_window() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let requested = commands
        .request(request_between(1, 0, 30))
        .execute()
        .await
        .expect("request");
    commands
        .approve_deny(requested, Decision::Deny)
        .execute()
        .await
        .expect("deny");

    commands
        .create(request_between(2, 0, 30))
        .execute()
        .await
        .expect("window is free after denial");
}

#[tokio::test]
async fn test_approve_of_scheduled_appointment_is_a_status_error() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("booking");

    let errors = commands
        .approve_deny(id, Decision::Approve)
        .execute()
        .await
        .expect_err("only requested appointments take a ruling");
    assert!(errors.contains(ErrorTag::Status));
}

#[tokio::test]
async fn test_make_public_flips_private_appointment() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    let mut request = request_between(1, 0, 30);
    request.is_public = false;
    let id = commands.create(request).execute().await.expect("booking");

    commands.make_public(id).execute().await.expect("publish");
    let stored = repo.find_appointment(id).await.expect("lookup").expect("persisted");
    assert!(stored.is_public);

    let errors = commands
        .make_public(id)
        .execute()
        .await
        .expect_err("already public");
    assert!(errors.contains(ErrorTag::Public));
}

#[tokio::test]
async fn test_retrieve_returns_info_with_coordinates() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let id = commands
        .create(request_between(1, 0, 30))
        .execute()
        .await
        .expect("booking");

    let info = commands.retrieve(id).execute().await.expect("retrieve");
    assert_eq!(info.id, id);
    assert_eq!(info.coordinates.len(), 1);
    assert!(info.celestial_body_id.is_none());
}

#[tokio::test]
async fn test_user_list_rejects_unknown_user() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let errors = commands
        .user_list(UserId::new(404), PageRequest::default())
        .execute()
        .await
        .expect_err("unknown user");
    assert!(errors.contains(ErrorTag::UserId));
}

#[tokio::test]
async fn test_user_list_pages_in_start_order() {
    let repo = seeded_repository();
    let commands = factory(repo);

    // Inserted out of order; listing must come back by start time.
    commands.create(request_between(1, 60, 90)).execute().await.expect("late");
    commands.create(request_between(1, 0, 30)).execute().await.expect("early");

    let page = commands
        .user_list(UserId::new(1), PageRequest::new(0, 10))
        .execute()
        .await
        .expect("list");
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].start_time, base_time());
}

#[tokio::test]
async fn test_future_list_excludes_past_appointments() {
    let repo = seeded_repository();
    let commands = factory(repo.clone());

    // Past appointments enter through storage, never through create.
    repo.save(NewAppointment {
        user_id: UserId::new(1),
        telescope_id: TelescopeId::new(1),
        start_time: Utc::now() - Duration::hours(2),
        end_time: Utc::now() - Duration::hours(1),
        is_public: true,
        status: AppointmentStatus::Completed,
        target: AppointmentTarget::Point(Coordinate::new(1, 0, 0, 0.0)),
    })
    .await
    .expect("seed past appointment");

    commands.create(request_between(1, 0, 30)).execute().await.expect("future");

    let upcoming = commands
        .user_future_list(UserId::new(1), PageRequest::default())
        .execute()
        .await
        .expect("list");
    assert_eq!(upcoming.total, 1);
    assert_eq!(upcoming.items[0].start_time, base_time());

    let all = commands
        .user_list(UserId::new(1), PageRequest::default())
        .execute()
        .await
        .expect("list");
    assert_eq!(all.total, 2);
}

#[tokio::test]
async fn test_list_between_dates_rejects_inverted_range() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let errors = commands
        .list_between_dates(base_time(), base_time() - Duration::hours(1))
        .execute()
        .await
        .expect_err("inverted range");
    assert!(errors.contains(ErrorTag::EndTime));
}

#[tokio::test]
async fn test_list_between_dates_returns_window_contents() {
    let repo = seeded_repository();
    let commands = factory(repo);

    commands.create(request_between(1, 0, 30)).execute().await.expect("inside");
    commands.create(request_between(1, 600, 630)).execute().await.expect("outside");

    let listed = commands
        .list_between_dates(base_time(), base_time() + Duration::hours(1))
        .execute()
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_search_requires_criteria() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let errors = commands
        .search(vec![], PageRequest::default())
        .execute()
        .await
        .expect_err("empty criteria");
    assert!(errors.contains(ErrorTag::Search));
}

#[tokio::test]
async fn test_search_conjoins_criteria() {
    let repo = seeded_repository();
    let commands = factory(repo);

    commands.create(request_between(1, 0, 30)).execute().await.expect("a");
    let mut private_request = request_between(2, 60, 90);
    private_request.is_public = false;
    commands.create(private_request).execute().await.expect("b");

    let page = commands
        .search(
            vec![
                SearchCriterion::User(UserId::new(2)),
                SearchCriterion::IsPublic(false),
            ],
            PageRequest::default(),
        )
        .execute()
        .await
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].user_id, UserId::new(2));

    let none = commands
        .search(
            vec![
                SearchCriterion::User(UserId::new(1)),
                SearchCriterion::IsPublic(false),
            ],
            PageRequest::default(),
        )
        .execute()
        .await
        .expect("search");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_celestial_body_target_round_trips_through_info() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let mut request = request_between(1, 0, 30);
    request.target = TargetRequest::CelestialBody(scopetime::api::CelestialBodyId::new(3));
    let id = commands.create(request).execute().await.expect("booking");

    let info = commands.retrieve(id).execute().await.expect("retrieve");
    assert_eq!(info.celestial_body_id, Some(scopetime::api::CelestialBodyId::new(3)));
    assert!(info.coordinates.is_empty());
}

#[tokio::test]
async fn test_free_control_target_is_bounds_checked() {
    let repo = seeded_repository();
    let commands = factory(repo);

    let mut request = request_between(1, 0, 30);
    request.target = TargetRequest::FreeControl(CoordinateRequest {
        hours: 5,
        minutes: 75,
        seconds: 0,
        declination: 0.0,
    });

    let errors = commands.create(request).execute().await.expect_err("invalid");
    assert!(errors.contains(ErrorTag::Minutes));
}
