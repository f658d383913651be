use super::*;
use std::sync::atomic::AtomicBool;

// =========================================================
// In-memory storage mock
// =========================================================

#[derive(Default)]
struct TestContext {
    values: Mutex<BTreeMap<String, String>>,
    ops: Mutex<Vec<String>>,
    deny_writes: AtomicBool,
}

impl TestContext {
    fn seed(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

struct TestStorage {
    ctx: Arc<TestContext>,
}

impl SessionStorage for TestStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.ctx.value(key)
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.ctx
            .ops
            .lock()
            .unwrap()
            .push(format!("write:{key}={value}"));
        if self.ctx.deny_writes.load(Ordering::Relaxed) {
            return false;
        }
        self.ctx.seed(key, value);
        true
    }

    fn remove(&self, key: &str) {
        self.ctx.ops.lock().unwrap().push(format!("remove:{key}"));
        self.ctx.values.lock().unwrap().remove(key);
    }
}

fn make_service() -> (SessionService<TestStorage>, Arc<TestContext>) {
    let ctx = Arc::new(TestContext::default());
    let service = SessionService::new(TestStorage { ctx: ctx.clone() });
    (service, ctx)
}

/// Collects every session the subscription delivers.
fn record_events(service: &SessionService<TestStorage>) -> (Subscription, Arc<Mutex<Vec<Session>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = service.subscribe(move |session| sink.lock().unwrap().push(session.clone()));
    (subscription, seen)
}

// =========================================================
// Service behavior
// =========================================================

#[test]
fn starts_unauthenticated_with_empty_storage() {
    let (service, _ctx) = make_service();
    assert_eq!(service.current(), Session::default());
    assert!(!service.current().is_authenticated());
}

#[test]
fn restores_persisted_session_on_construction() {
    let ctx = Arc::new(TestContext::default());
    ctx.seed(TOKEN_KEY, "t1");
    ctx.seed(DISPLAY_NAME_KEY, "A");

    let service = SessionService::new(TestStorage { ctx });
    let session = service.current();
    assert!(session.is_authenticated());
    assert_eq!(session.display_name(), "A");
}

#[test]
fn sign_in_persists_and_notifies() {
    let (service, ctx) = make_service();
    let (_subscription, seen) = record_events(&service);

    // 1. Sign in with the credentials from a login response
    service.sign_in("t1", "A");

    // 2. Both fields hit storage, token first
    assert_eq!(ctx.ops(), vec!["write:token=t1", "write:userName=A"]);
    assert_eq!(ctx.value(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(ctx.value(DISPLAY_NAME_KEY).as_deref(), Some("A"));

    // 3. Cache reports authenticated and subscribers saw exactly one event
    assert!(service.current().is_authenticated());
    let events = seen.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], Session::authenticated("t1", "A"));
}

#[test]
fn sign_out_clears_and_notifies() {
    let (service, ctx) = make_service();
    service.sign_in("t1", "A");
    let (_subscription, seen) = record_events(&service);

    service.sign_out();

    assert_eq!(ctx.value(TOKEN_KEY), None);
    assert_eq!(ctx.value(DISPLAY_NAME_KEY), None);
    assert!(!service.current().is_authenticated());
    assert_eq!(seen.lock().unwrap().as_slice(), &[Session::default()]);
}

#[test]
fn dropped_subscription_stops_receiving() {
    let (service, _ctx) = make_service();
    let (dropped, dropped_seen) = record_events(&service);
    let (_kept, kept_seen) = record_events(&service);

    dropped.unsubscribe();
    service.sign_in("t1", "A");

    assert!(dropped_seen.lock().unwrap().is_empty());
    assert_eq!(kept_seen.lock().unwrap().len(), 1);
}

#[test]
fn reload_emits_only_on_difference() {
    let (service, ctx) = make_service();
    service.sign_in("t1", "A");
    let (_subscription, seen) = record_events(&service);

    // 1. Nothing changed in storage: no event
    service.reload();
    assert!(seen.lock().unwrap().is_empty());

    // 2. Another tab signs the user out
    ctx.values.lock().unwrap().clear();
    service.reload();

    let events = seen.lock().unwrap();
    assert_eq!(events.as_slice(), &[Session::default()]);
    assert!(!service.current().is_authenticated());
}

#[test]
fn rejected_writes_keep_the_tab_session() {
    let (service, ctx) = make_service();
    ctx.deny_writes.store(true, Ordering::Relaxed);

    service.sign_in("t1", "A");

    // Nothing persisted, but this tab still has a live session
    assert_eq!(ctx.value(TOKEN_KEY), None);
    assert!(service.current().is_authenticated());
    assert_eq!(service.current().display_name(), "A");
}

#[test]
fn blank_stored_values_count_as_absent() {
    let ctx = Arc::new(TestContext::default());
    ctx.seed(TOKEN_KEY, "");
    ctx.seed(DISPLAY_NAME_KEY, "");

    let service = SessionService::new(TestStorage { ctx });
    assert_eq!(service.current(), Session::default());
}

#[test]
fn subscription_outliving_the_service_is_harmless() {
    let (service, _ctx) = make_service();
    let (subscription, _seen) = record_events(&service);

    drop(service);
    drop(subscription);
}

// =========================================================
// Session snapshot
// =========================================================

#[test]
fn initial_uppercases_the_first_letter() {
    assert_eq!(Session::authenticated("t", "alice").initial(), Some('A'));
    assert_eq!(Session::authenticated("t", "  bob").initial(), Some('B'));
    assert_eq!(Session::default().initial(), None);
}

#[test]
fn authenticated_filters_blank_fields() {
    let session = Session::authenticated("", "");
    assert!(!session.is_authenticated());
    assert_eq!(session.display_name(), "");
}
