//! End-to-end authentication flow tests.

use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use turnstile::chain;
use turnstile::core::{Outcome, RejectReason, RequestContext, Stage, StageError};
use turnstile::pipeline::PipelineBuilder;
use turnstile::service::{AuthResult, AuthService};
use turnstile::stages::{ClaimStage, ExistenceStage, RoleStage, SecretStage};
use turnstile::store::{CredentialStore, MemoryStore, StoreError};

/// Spy stage recording the order it was evaluated in.
struct OrderSpy {
    name: String,
    outcome: Outcome,
    log: Arc<Mutex<Vec<String>>>,
}

impl OrderSpy {
    fn new(name: &str, outcome: Outcome, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            log,
        }
    }
}

impl Stage for OrderSpy {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, _ctx: &mut RequestContext) -> Result<Outcome, StageError> {
        self.log.lock().unwrap().push(self.name.clone());
        Ok(self.outcome.clone())
    }
}

fn fixture_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_credential("admin", "1234"))
}

fn login_service(store: Arc<MemoryStore>) -> AuthService {
    let pipeline = PipelineBuilder::new()
        .name("login")
        .stage(ExistenceStage::new(store.clone()))
        .stage(SecretStage::new(store))
        .build()
        .unwrap();
    AuthService::new(pipeline)
}

#[test]
fn admin_scenario_matches_the_contract() {
    let service = login_service(fixture_store());

    assert_eq!(
        service.authenticate("admin", "1234").unwrap(),
        AuthResult::accepted()
    );
    assert_eq!(
        service.authenticate("admin", "wrong").unwrap(),
        AuthResult::rejected("secret mismatch")
    );
    assert_eq!(
        service.authenticate("ghost", "x").unwrap(),
        AuthResult::rejected("principal not found")
    );
}

#[test]
fn stages_evaluate_in_construction_order_and_stop_at_rejection() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let pipeline = PipelineBuilder::new()
        .stage(OrderSpy::new("first", Outcome::Continue, log.clone()))
        .stage(OrderSpy::new(
            "second",
            Outcome::Reject(RejectReason::Custom {
                message: "stop here".to_string(),
            }),
            log.clone(),
        ))
        .stage(OrderSpy::new("third", Outcome::Continue, log.clone()))
        .build()
        .unwrap();

    let mut ctx = RequestContext::new("admin", "1234");
    let decision = pipeline.run(&mut ctx).unwrap();

    assert_eq!(decision.reason().unwrap().to_string(), "stop here");
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn role_pipeline_admits_claimed_operators_only() {
    let store = fixture_store();

    let pipeline = chain![
        ExistenceStage::new(store.clone()),
        SecretStage::new(store),
        ClaimStage::new("role", json!("operator")),
        RoleStage::new(["operator"]),
    ]
    .unwrap();
    let service = AuthService::new(pipeline);

    assert!(service.authenticate("admin", "1234").unwrap().success);
    assert_eq!(
        service.authenticate("admin", "wrong").unwrap(),
        AuthResult::rejected("secret mismatch")
    );
}

#[test]
fn unclaimed_attempts_fall_back_to_guest_and_are_refused() {
    let store = fixture_store();

    let pipeline = chain![
        ExistenceStage::new(store.clone()),
        SecretStage::new(store),
        RoleStage::new(["operator"]),
    ]
    .unwrap();
    let service = AuthService::new(pipeline);

    assert_eq!(
        service.authenticate("admin", "1234").unwrap(),
        AuthResult::rejected("role not authorized")
    );
}

#[test]
fn stage_order_decides_which_rejection_the_caller_sees() {
    let store = fixture_store();

    let role_first = AuthService::new(
        chain![RoleStage::new(["operator"]), ExistenceStage::new(store.clone())].unwrap(),
    );
    let existence_first = AuthService::new(
        chain![ExistenceStage::new(store), RoleStage::new(["operator"])].unwrap(),
    );

    assert_eq!(
        role_first.authenticate("ghost", "x").unwrap(),
        AuthResult::rejected("role not authorized")
    );
    assert_eq!(
        existence_first.authenticate("ghost", "x").unwrap(),
        AuthResult::rejected("principal not found")
    );
}

#[test]
fn concurrent_attempts_match_sequential_results() {
    let service = Arc::new(login_service(fixture_store()));

    let attempts = [
        ("admin", "1234"),
        ("admin", "wrong"),
        ("ghost", "x"),
        ("admin", ""),
    ];

    let sequential: Vec<AuthResult> = attempts
        .iter()
        .map(|(p, s)| service.authenticate(p, s).unwrap())
        .collect();

    thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&service);
            handles.push(scope.spawn(move || {
                attempts
                    .iter()
                    .map(|(p, s)| service.authenticate(p, s).unwrap())
                    .collect::<Vec<AuthResult>>()
            }));
        }

        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}

#[test]
fn store_outage_surfaces_as_a_fault_not_a_rejection() {
    /// Store whose backend fails after a configurable number of calls.
    struct FlakyStore {
        inner: MemoryStore,
        remaining: AtomicUsize,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore, calls_before_outage: usize) -> Self {
            Self {
                inner,
                remaining: AtomicUsize::new(calls_before_outage),
            }
        }

        fn take_budget(&self) -> Result<(), StoreError> {
            if self.remaining.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_err() {
                return Err(StoreError::Unavailable("backend went away".to_string()));
            }
            Ok(())
        }
    }

    impl CredentialStore for FlakyStore {
        fn exists(&self, principal: &str) -> Result<bool, StoreError> {
            self.take_budget()?;
            self.inner.exists(principal)
        }

        fn matches(&self, principal: &str, secret: &str) -> Result<bool, StoreError> {
            self.take_budget()?;
            self.inner.matches(principal, secret)
        }
    }

    let store = Arc::new(FlakyStore::new(
        MemoryStore::new().with_credential("admin", "1234"),
        2,
    ));
    let pipeline = PipelineBuilder::new()
        .stage(ExistenceStage::new(store.clone()))
        .stage(SecretStage::new(store))
        .build()
        .unwrap();
    let service = AuthService::new(pipeline);

    // First attempt consumes the budget and succeeds normally.
    assert!(service.authenticate("admin", "1234").unwrap().success);

    // Second attempt hits the outage: an error, never "secret mismatch".
    let err = service.authenticate("admin", "1234").unwrap_err();
    assert_eq!(
        err,
        StageError::Store(StoreError::Unavailable("backend went away".to_string()))
    );
}
