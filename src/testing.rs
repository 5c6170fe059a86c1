//! In-memory stand-ins for the browser collaborators.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::models::{Session, User};
use crate::routing::Navigator;
use crate::services::{ApiClient, ApiRequest, ApiResponse, FileSaver, HttpTransport};
use crate::state::SessionStore;
use crate::utils::MemoryStore;

pub fn sample_session() -> Session {
    Session {
        access_token: "access-1".into(),
        refresh_token: "refresh-1".into(),
        user: User {
            id: "u-17".into(),
            email: "mia@example.com".into(),
            name: "Mia Nguyen".into(),
        },
    }
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct FakeTransport {
    queue: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    seen: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn respond_json(&self, status: u16, body: &str) {
        self.respond_bytes(status, body.as_bytes().to_vec());
    }

    pub fn respond_bytes(&self, status: u16, body: Vec<u8>) {
        self.queue
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body }));
    }

    pub fn fail(&self, error: ApiError) {
        self.queue.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.borrow_mut().push(request.clone());
        self.queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no response queued for {}", request.url))
    }
}

#[derive(Default)]
pub struct FakeNavigator {
    path: RefCell<String>,
    pushed: RefCell<Vec<String>>,
    replaced: RefCell<Vec<String>>,
}

impl FakeNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            ..Default::default()
        }
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }
}

impl Navigator for FakeNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn push(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
        self.pushed.borrow_mut().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
        self.replaced.borrow_mut().push(path.to_string());
    }
}

/// Records saved files; `refuse` makes the next saves fail
#[derive(Default)]
pub struct RecordingSaver {
    pub saved: RefCell<Vec<(String, Vec<u8>, String)>>,
    pub refuse: Cell<bool>,
}

impl FileSaver for RecordingSaver {
    fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
        if self.refuse.get() {
            return Err("Blob creation failed".to_string());
        }
        self.saved
            .borrow_mut()
            .push((filename.to_string(), bytes.to_vec(), mime.to_string()));
        Ok(())
    }
}

/// A full AppContext over fakes, starting at `path`
pub struct Harness {
    pub transport: Rc<FakeTransport>,
    pub navigator: Rc<FakeNavigator>,
    pub saver: Rc<RecordingSaver>,
    pub storage: Rc<MemoryStore>,
    pub session: SessionStore,
    pub api: ApiClient,
    pub ctx: AppContext,
}

impl Harness {
    pub fn new(path: &str) -> Self {
        let transport = Rc::new(FakeTransport::default());
        let navigator = Rc::new(FakeNavigator::at(path));
        let saver = Rc::new(RecordingSaver::default());
        let storage = Rc::new(MemoryStore::new());
        let session = SessionStore::restore(storage.clone());
        let api = ApiClient::with_base_url(
            "http://api.test/",
            transport.clone(),
            session.clone(),
            navigator.clone(),
        );
        let ctx = AppContext {
            session: session.clone(),
            api: api.clone(),
            navigator: navigator.clone(),
            files: saver.clone(),
        };
        Self {
            transport,
            navigator,
            saver,
            storage,
            session,
            api,
            ctx,
        }
    }

    pub fn signed_in(path: &str) -> Self {
        let harness = Self::new(path);
        harness.session.login(sample_session());
        harness
    }
}
