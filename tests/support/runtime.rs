//! Tokio runtime and mock server plumbing shared by the behavioural tests.
//!
//! Step functions are synchronous, so each scenario owns a runtime and
//! drives async work through [`SharedRuntime::block_on`].

use std::cell::RefCell;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Runtime handle that can live in an `rstest-bdd` slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Returns the scenario runtime, starting it and the mock server on first
/// use.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> SharedRuntime {
    if runtime.with_ref(|_| ()).is_none() {
        let created = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        runtime.set(SharedRuntime::new(created));
    }

    let shared_runtime = runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Mounts `mock` on the scenario's server.
pub fn mount(runtime: &SharedRuntime, server: &Slot<MockServer>, mock: Mock) {
    server
        .with_ref(|mock_server| runtime.block_on(mock.mount(mock_server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Base URI of the scenario's server.
pub fn server_uri(server: &Slot<MockServer>) -> String {
    server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server not initialised"))
}
