use gym_buddy::clients::ApiClient;
use gym_buddy::config::AppConfig;
use gym_buddy::lifecycle::GymSystem;
use gym_buddy::model::{UserCreate, UserId, UserUpdate, WorkoutCreate};
use gym_buddy::pages::{DashboardPage, UsersPage, WorkoutsPage};
use gym_buddy::user_actor::UserError;
use gym_buddy::workout_actor::WorkoutError;
use resource_sync::{ListView, MutationError, MutationKind, Outcome, TransportError};
use tokio::task::LocalSet;

/// Full end-to-end flow: pages driving the real in-memory backends.
#[tokio::test]
async fn test_pages_against_the_backends() {
    let system = GymSystem::new(&AppConfig::default());

    LocalSet::new()
        .run_until(async {
            let users = UsersPage::new(system.user_transport());
            users.enter();
            users.settled().await;
            assert_eq!(users.view(), ListView::Empty);

            users.show_form();
            users.form().set_value("username", "alice");
            users.form().set_value("email", "alice@example.com");
            let outcome = users.create_user().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            users.settled().await;

            let alice = users.users()[0].clone();
            assert_eq!(alice.id, Some(UserId(1)));
            assert_eq!(alice.username, "alice");

            // Edit the email through the same form.
            users.edit_user(&alice);
            users.form().set_value("email", "alice@gym.example");
            let outcome = users.update_user().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            users.settled().await;
            assert_eq!(users.users()[0].email, "alice@gym.example");

            let workouts = WorkoutsPage::new(system.user_transport(), system.workout_transport());
            workouts.enter();
            workouts.settled().await;

            workouts.show_form();
            workouts.form().set_value("userId", "1");
            workouts.form().set_value("name", "Leg day");
            workouts.form().set_value("durationMinutes", "45");
            let outcome = workouts.create_workout().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            workouts.settled().await;

            let logged = workouts.workouts();
            assert_eq!(logged.len(), 1);
            assert_eq!(logged[0].exercise_count, Some(0));
            assert_eq!(logged[0].duration_minutes, Some(45));
            assert_eq!(workouts.user_name(logged[0].user_id), "alice");

            // The backend refuses a workout for a user it does not know.
            workouts.show_form();
            workouts.form().set_value("userId", "99");
            workouts.form().set_value("name", "Ghost run");
            let outcome = workouts.create_workout().outcome().await;
            assert_eq!(
                outcome,
                Some(Outcome::Failed(MutationError::Transport {
                    kind: MutationKind::Create,
                    source: TransportError::Rejected("User not found: 99".into()),
                }))
            );
            assert!(workouts.is_form_open());
            assert_eq!(workouts.form().value("name"), "Ghost run");
            workouts.cancel_form();

            let dashboard = DashboardPage::new(system.user_transport(), system.workout_transport());
            dashboard.enter();
            dashboard.settled().await;
            assert_eq!(dashboard.stats().total_users, 1);
            assert_eq!(dashboard.stats().total_workouts, 1);

            let outcome = workouts.delete_workout(&logged[0]).outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            workouts.settled().await;
            assert_eq!(workouts.view(), ListView::Empty);
        })
        .await;

    system.shutdown().await.expect("Failed to shutdown system");
}

/// The typed clients talk to the backends directly and map their errors.
#[tokio::test]
async fn test_clients_enforce_backend_rules() {
    let system = GymSystem::new(&AppConfig::default());

    let alice = system
        .user_client
        .create_user(UserCreate {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .expect("Failed to create user");
    let id = alice.id.expect("stored users have an id");

    let fetched = system
        .user_client
        .get(id)
        .await
        .expect("Failed to get user")
        .expect("User not found");
    assert_eq!(fetched, alice);

    let result = system
        .user_client
        .create_user(UserCreate {
            username: "bob".to_string(),
            email: "bob.example.com".to_string(),
        })
        .await;
    assert_eq!(
        result,
        Err(UserError::Communication(
            "Rejected by backend: Email must be valid".to_string()
        ))
    );

    let result = system
        .user_client
        .update_user(UserId(42), UserUpdate::default())
        .await;
    assert_eq!(result, Err(UserError::NotFound(UserId(42))));

    let workout = system
        .workout_client
        .create_workout(WorkoutCreate {
            user_id: id,
            name: "Push".to_string(),
            description: None,
            duration_minutes: Some(30),
        })
        .await
        .expect("Failed to create workout");
    assert_eq!(workout.exercise_count, Some(0));

    let result = system
        .workout_client
        .create_workout(WorkoutCreate {
            user_id: UserId(0),
            name: "Pull".to_string(),
            description: None,
            duration_minutes: None,
        })
        .await;
    assert_eq!(
        result,
        Err(WorkoutError::Communication(
            "Rejected by backend: User ID must be valid".to_string()
        ))
    );

    assert_eq!(system.workout_client.list().await, Ok(vec![workout]));

    system.shutdown().await.expect("Failed to shutdown system");
}
