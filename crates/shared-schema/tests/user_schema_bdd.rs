//! Behavioural tests for the shared user schema.
//!
//! These scenarios exercise the length bounds on `name` and the
//! required-field checks through the runtime validator.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use shared_schema::{IssueCode, SchemaError, User, UserSchema};

/// Test world holding the candidate payload and validation outcome.
#[derive(Default, ScenarioState)]
struct World {
    payload: Slot<Value>,
    outcome: Slot<Result<User, SchemaError>>,
}

impl World {
    fn outcome(&self) -> Result<User, SchemaError> {
        self.outcome.get().expect("payload should be validated")
    }

    fn error(&self) -> SchemaError {
        match self.outcome() {
            Ok(user) => panic!("expected validation to fail, got {user:?}"),
            Err(error) => error,
        }
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a user payload with a name of {length:usize} characters")]
fn a_user_payload_with_a_name_of_length(world: &World, length: usize) {
    world
        .payload
        .set(json!({"id": "user-1", "name": "n".repeat(length)}));
}

#[given("a user payload without an id")]
fn a_user_payload_without_an_id(world: &World) {
    world.payload.set(json!({"name": "Ada"}));
}

#[given("an empty user payload")]
fn an_empty_user_payload(world: &World) {
    world.payload.set(json!({}));
}

#[when("the payload is validated")]
fn the_payload_is_validated(world: &World) {
    let payload = world.payload.get().expect("payload should be set");
    world.outcome.set(UserSchema::parse(&payload));
}

#[then("validation succeeds")]
fn validation_succeeds(world: &World) {
    let outcome = world.outcome();
    assert!(outcome.is_ok(), "expected success: {outcome:?}");
}

#[then("validation fails with a too small issue on name")]
fn validation_fails_too_small(world: &World) {
    let error = world.error();
    let issue = error.issue_for("name").expect("name issue");
    assert!(matches!(issue.code(), IssueCode::TooSmall { minimum: 1, .. }));
}

#[then("validation fails with a too big issue on name")]
fn validation_fails_too_big(world: &World) {
    let error = world.error();
    let issue = error.issue_for("name").expect("name issue");
    assert!(matches!(issue.code(), IssueCode::TooBig { maximum: 200, .. }));
}

#[then("validation fails with a required issue on {field}")]
fn validation_fails_required(world: &World, field: String) {
    let error = world.error();
    let issue = error
        .issue_for(&field)
        .unwrap_or_else(|| panic!("missing issue for {field}: {error}"));
    assert_eq!(issue.code(), &IssueCode::Required);
}

#[scenario(
    path = "tests/features/user_schema.feature",
    name = "A user with a name inside the bounds validates"
)]
fn a_user_with_a_name_inside_the_bounds_validates(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_schema.feature",
    name = "An empty name is rejected"
)]
fn an_empty_name_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_schema.feature",
    name = "An overlong name is rejected"
)]
fn an_overlong_name_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_schema.feature",
    name = "A missing identifier is rejected"
)]
fn a_missing_identifier_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/user_schema.feature",
    name = "Every failing field is reported"
)]
fn every_failing_field_is_reported(world: World) {
    let _ = world;
}
