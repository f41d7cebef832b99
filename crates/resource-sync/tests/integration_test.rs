use async_trait::async_trait;
use resource_sync::mock::{create_mock_client, expect_list};
use resource_sync::{
    dispatch, FormEntity, FormModel, FormSchema, ListView, LoadError, MutationCoordinator,
    MutationError, MutationKind, Outcome, Resource, ResourceActor, ResourceOptions, Settlement,
    Status, SyncEntity, TransportError,
};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Exercise {
    id: Option<u32>,
    name: String,
    sets: u32,
}

#[derive(Clone, Debug)]
struct ExerciseCreate {
    name: String,
    sets: u32,
}

#[derive(Clone, Debug)]
struct ExerciseUpdate {
    name: Option<String>,
    sets: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
#[error("Exercise needs at least one set")]
struct NoSets;

#[async_trait]
impl SyncEntity for Exercise {
    type Id = u32;
    type Create = ExerciseCreate;
    type Update = ExerciseUpdate;
    type Context = ();
    type Error = NoSets;

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn from_create(id: u32, params: ExerciseCreate) -> Result<Self, NoSets> {
        if params.sets == 0 {
            return Err(NoSets);
        }
        Ok(Self {
            id: Some(id),
            name: params.name,
            sets: params.sets,
        })
    }

    async fn on_update(&mut self, update: ExerciseUpdate, _ctx: &()) -> Result<(), NoSets> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sets) = update.sets {
            self.sets = sets;
        }
        if self.sets == 0 {
            return Err(NoSets);
        }
        Ok(())
    }
}

fn parse_sets(model: &FormModel) -> Result<u32, String> {
    model
        .value("sets")
        .parse()
        .map_err(|_| "sets must be a number".to_string())
}

impl FormEntity for Exercise {
    fn schema() -> FormSchema {
        FormSchema::new()
            .field("name", "")
            .field("sets", "3")
            .required("name", "Name is required.")
            .required("sets", "Sets are required.")
            .integer("sets", "Sets must be a whole number.")
    }

    fn create_params(model: &FormModel) -> Result<ExerciseCreate, String> {
        Ok(ExerciseCreate {
            name: model.value("name").to_string(),
            sets: parse_sets(model)?,
        })
    }

    fn update_params(model: &FormModel) -> Result<ExerciseUpdate, String> {
        Ok(ExerciseUpdate {
            name: Some(model.value("name").to_string()),
            sets: Some(parse_sets(model)?),
        })
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone()), ("sets", self.sets.to_string())]
    }
}

/// Log output for failing tests: `RUST_LOG=resource_sync=debug cargo test`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn exercise(id: u32, name: &str, sets: u32) -> Exercise {
    Exercise {
        id: Some(id),
        name: name.to_string(),
        sets,
    }
}

/// A list page wired to a real backend actor: create, edit, a rejected edit, delete.
#[tokio::test]
async fn test_coordinator_against_backend_actor() {
    init_tracing();
    let (actor, client) = ResourceActor::<Exercise>::new(8);
    let backend = tokio::spawn(actor.run(()));

    LocalSet::new()
        .run_until(async {
            let transport: Rc<dyn resource_sync::Transport<Exercise>> = Rc::new(client);
            let exercises = Resource::with_options(Vec::new(), ResourceOptions::named("exercises"));
            exercises.bind(Rc::clone(&transport));
            let page = MutationCoordinator::new(transport, exercises.clone());

            exercises.reload();
            exercises.settled().await;
            assert_eq!(dispatch(&exercises.snapshot()), ListView::Empty);

            // Create
            page.open_form();
            page.form().set_value("name", "Squat");
            let outcome = page.submit_create().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            assert!(!page.is_open());
            assert!(page.form().is_default());
            exercises.settled().await;
            assert_eq!(exercises.value(), vec![exercise(1, "Squat", 3)]);

            // Edit
            page.open_edit(&exercises.value()[0]);
            assert_eq!(page.editing(), Some(1));
            assert_eq!(page.form().value("sets"), "3");
            page.form().set_value("sets", "5");
            let outcome = page.submit_update().outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            assert_eq!(page.editing(), None);
            exercises.settled().await;
            assert_eq!(exercises.value(), vec![exercise(1, "Squat", 5)]);

            // The backend refuses zero sets; the form keeps what was typed.
            page.open_edit(&exercises.value()[0]);
            page.form().set_value("sets", "0");
            let outcome = page.submit_update().outcome().await;
            assert_eq!(
                outcome,
                Some(Outcome::Failed(MutationError::Transport {
                    kind: MutationKind::Update,
                    source: TransportError::Rejected("Exercise needs at least one set".into()),
                }))
            );
            assert!(page.is_open());
            assert_eq!(page.form().value("sets"), "0");
            assert_eq!(exercises.value(), vec![exercise(1, "Squat", 5)]);
            page.cancel_form();

            // Delete
            let outcome = page.delete(1).outcome().await;
            assert_eq!(outcome, Some(Outcome::Succeeded));
            exercises.settled().await;
            assert_eq!(exercises.status(), Status::Success);
            assert!(exercises.value().is_empty());
        })
        .await;

    backend.await.expect("backend task failed");
}

/// Two reloads in quick succession: the first answer arrives last and must be ignored.
#[tokio::test]
async fn test_slow_first_reload_is_superseded() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (client, mut receiver) = create_mock_client::<Exercise>(8);
            let exercises = Resource::new(Vec::new());
            exercises.bind(Rc::new(client));

            let first = exercises.reload();
            let second = exercises.reload();
            assert_eq!(exercises.generation(), 2);

            let slow = expect_list(&mut receiver).await.expect("first list request");
            let fast = expect_list(&mut receiver).await.expect("second list request");

            fast.send(Ok(vec![exercise(2, "Deadlift", 5)])).unwrap();
            assert_eq!(second.await.unwrap(), Settlement::Accepted);
            assert_eq!(exercises.value(), vec![exercise(2, "Deadlift", 5)]);

            slow.send(Ok(vec![exercise(1, "Squat", 3)])).unwrap();
            assert_eq!(first.await.unwrap(), Settlement::Superseded);

            assert_eq!(exercises.status(), Status::Success);
            assert_eq!(exercises.value(), vec![exercise(2, "Deadlift", 5)]);
        })
        .await;
}

/// A load that never answers settles as a timeout and falls back to the default value.
#[tokio::test]
async fn test_load_timeout_settles_as_error() {
    init_tracing();
    LocalSet::new()
        .run_until(async {
            let (client, mut receiver) = create_mock_client::<Exercise>(8);
            let limit = Duration::from_millis(20);
            let exercises = Resource::with_options(
                vec![exercise(9, "Stale", 1)],
                ResourceOptions::named("exercises").with_timeout(Some(limit)),
            );
            exercises.bind(Rc::new(client));

            let load = exercises.reload();
            // Keep the request unanswered until the timeout fires.
            let _pending = expect_list(&mut receiver).await.expect("list request");

            assert_eq!(load.await.unwrap(), Settlement::Accepted);
            assert_eq!(exercises.status(), Status::Error);
            assert_eq!(exercises.error(), Some(LoadError::Timeout(limit)));
            assert_eq!(exercises.value(), vec![exercise(9, "Stale", 1)]);
        })
        .await;
}
