use gym_buddy::model::{User, UserId, Workout};
use gym_buddy::pages::{DashboardPage, DashboardStats, WorkoutsPage, UNKNOWN_USER, WORKOUTS_EMPTY};
use resource_sync::mock::MockClient;
use resource_sync::{ListView, MutationError, Outcome, RequestKind, Submit, TransportError};
use tokio::task::LocalSet;

fn alice() -> User {
    User::new("alice", "alice@example.com").with_id(1)
}

fn bob() -> User {
    User::new("bob", "bob@example.com").with_id(2)
}

fn leg_day() -> Workout {
    Workout::new(UserId(1), "Leg day")
        .with_id(1)
        .with_duration(45)
        .with_exercises(0)
}

/// Owners are looked up in the user list; unknown owners get a placeholder.
#[tokio::test]
async fn test_workouts_show_their_owner() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_ok(vec![alice()]);
            let mut workouts = MockClient::<Workout>::new();
            let orphan = Workout::new(UserId(7), "Swim").with_id(2);
            workouts.expect_list().return_ok(vec![leg_day(), orphan]);

            let page = WorkoutsPage::new(users.transport(), workouts.transport());
            page.enter();
            page.settled().await;

            assert_eq!(page.user_name(UserId(1)), "alice");
            assert_eq!(page.user_name(UserId(7)), UNKNOWN_USER);
            assert_eq!(
                page.render(),
                [
                    "Workouts",
                    "Leg day",
                    "  User: alice | Duration: 45 min | Exercises: 0",
                    "Swim",
                    "  User: Unknown User | Duration: 0 min | Exercises: 0",
                ]
            );
            users.verify();
            workouts.verify();
        })
        .await;
}

#[tokio::test]
async fn test_owner_select_lists_every_user() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_ok(vec![alice(), bob()]);
            let mut workouts = MockClient::<Workout>::new();
            workouts.expect_list().return_ok(vec![]);

            let page = WorkoutsPage::new(users.transport(), workouts.transport());
            page.enter();
            page.settled().await;

            let options = page.user_options();
            let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();
            assert_eq!(labels, ["Select User", "alice", "bob"]);
            assert_eq!(options[0].0, "");
            assert_eq!(options[2].0, "2");
            assert_eq!(page.render(), ["Workouts", WORKOUTS_EMPTY]);
        })
        .await;
}

/// The user list failing leaves the workouts usable.
#[tokio::test]
async fn test_owner_lookup_survives_a_failed_user_load() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_err(TransportError::Closed);
            let mut workouts = MockClient::<Workout>::new();
            workouts.expect_list().return_ok(vec![leg_day()]);

            let page = WorkoutsPage::new(users.transport(), workouts.transport());
            page.enter();
            page.settled().await;

            assert_eq!(page.view(), ListView::Ready(vec![leg_day()]));
            assert_eq!(page.user_name(UserId(1)), UNKNOWN_USER);
            assert_eq!(page.user_options().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_create_workout_for_selected_user() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_ok(vec![alice()]);
            let mut workouts = MockClient::<Workout>::new();
            workouts.expect_list().return_ok(vec![]);
            workouts.expect_create().return_ok(leg_day());
            workouts.expect_list().return_ok(vec![leg_day()]);

            let page = WorkoutsPage::new(users.transport(), workouts.transport());
            page.enter();
            page.settled().await;

            page.show_form();
            page.form().set_value("name", "Leg day");
            assert!(!page.can_submit(), "no owner selected yet");
            assert!(matches!(page.create_workout(), Submit::Invalid));
            assert_eq!(
                page.form().visible_error("userId").as_deref(),
                Some("Select a user.")
            );

            page.form().set_value("userId", "1");
            page.form().set_value("durationMinutes", "45");
            let outcome = page.create_workout().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            assert!(!page.is_form_open());

            page.settled().await;
            assert_eq!(page.workouts(), vec![leg_day()]);
            assert_eq!(workouts.request_count(RequestKind::Create), 1);
            workouts.verify();
        })
        .await;
}

/// A duration that cannot be sent is refused and shown on the form.
#[tokio::test]
async fn test_bad_duration_is_shown_and_not_sent() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_ok(vec![alice()]);
            let mut workouts = MockClient::<Workout>::new();
            workouts.expect_list().return_ok(vec![]);

            let page = WorkoutsPage::new(users.transport(), workouts.transport());
            page.enter();
            page.settled().await;

            page.show_form();
            page.form().set_value("userId", "1");
            page.form().set_value("name", "Leg day");
            page.form().set_value("durationMinutes", "abc");
            assert!(page.can_submit());
            assert!(!page.form().touched("durationMinutes"));

            assert!(matches!(page.create_workout(), Submit::Invalid));

            assert!(page.form().touched("durationMinutes"));
            assert_eq!(
                page.form().visible_error("durationMinutes").as_deref(),
                Some("Duration must be a whole number.")
            );
            assert!(matches!(
                page.mutations().last_error(),
                Some(MutationError::InvalidPayload { .. })
            ));
            assert!(page.is_form_open());
            assert_eq!(page.form().value("durationMinutes"), "abc");
            assert_eq!(workouts.request_count(RequestKind::Create), 0);
            workouts.verify();
        })
        .await;
}

/// Dashboard totals follow both lists; a failed list counts as empty.
#[tokio::test]
async fn test_dashboard_totals() {
    LocalSet::new()
        .run_until(async {
            let mut users = MockClient::<User>::new();
            users.expect_list().return_ok(vec![alice(), bob()]);
            users.expect_list().return_ok(vec![alice(), bob()]);
            let mut workouts = MockClient::<Workout>::new();
            workouts.expect_list().return_ok(vec![
                leg_day().with_exercises(3),
                Workout::new(UserId(2), "Push").with_id(2).with_exercises(2),
                Workout::new(UserId(2), "Rest").with_id(3),
            ]);
            workouts.expect_list().return_err(TransportError::Closed);

            let page = DashboardPage::new(users.transport(), workouts.transport());
            assert_eq!(page.stats(), DashboardStats::default());

            page.enter();
            page.settled().await;
            assert_eq!(
                page.stats(),
                DashboardStats {
                    total_users: 2,
                    total_workouts: 3,
                    total_exercises: 5,
                }
            );
            assert_eq!(
                page.render(),
                [
                    "Gym Buddy",
                    "Total Users: 2",
                    "Workouts Logged: 3",
                    "Exercises Completed: 5",
                ]
            );

            page.enter();
            page.settled().await;
            assert_eq!(page.stats().total_workouts, 0);
            assert_eq!(page.stats().total_exercises, 0);
            assert_eq!(page.stats().total_users, 2);
        })
        .await;
}
