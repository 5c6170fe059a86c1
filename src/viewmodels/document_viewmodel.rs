// ============================================================================
// DOCUMENT VIEWMODEL - View, edit, publish, download and delete one generation
// ============================================================================

use crate::context::AppContext;
use crate::models::{GenerationView, DEFAULT_FILENAME};
use crate::routing::Route;
use crate::services::mime_for;
use crate::state::ReactiveState;

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub loading: bool,
    /// Replaces the whole page
    pub load_error: Option<String>,
    /// Banner above the document; the page stays usable
    pub action_error: Option<String>,

    pub content: String,
    pub edited_content: String,
    pub filename: String,
    pub is_owner: bool,

    pub issue_key: Option<String>,
    pub project_key: Option<String>,
    pub current_version: u32,
    pub last_updated_by: Option<String>,
    pub updated_at: Option<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub published_by: Option<String>,

    pub is_editing: bool,
    pub saving: bool,
    pub publishing: bool,
    pub downloading: bool,
    pub show_delete_modal: bool,
    pub deleting: bool,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            loading: true,
            load_error: None,
            action_error: None,
            content: String::new(),
            edited_content: String::new(),
            filename: DEFAULT_FILENAME.to_string(),
            is_owner: false,
            issue_key: None,
            project_key: None,
            current_version: 1,
            last_updated_by: None,
            updated_at: None,
            published: false,
            published_at: None,
            published_by: None,
            is_editing: false,
            saving: false,
            publishing: false,
            downloading: false,
            show_delete_modal: false,
            deleting: false,
        }
    }
}

impl DocumentState {
    /// "{issueKey}'s test cases", or the file name when there is no issue key
    pub fn title(&self) -> String {
        match self.issue_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => format!("{}'s test cases", key),
            None => self.filename.clone(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.is_editing && !self.saving && self.edited_content != self.content
    }

    pub fn can_publish(&self) -> bool {
        self.is_owner && self.has_content() && !self.publishing
    }

    fn apply(&mut self, view: GenerationView, me: Option<&str>) {
        self.is_owner = match (view.email.as_deref(), me) {
            (Some(owner), Some(me)) => owner == me,
            _ => false,
        };
        self.edited_content = view.content.clone();
        self.content = view.content;
        self.filename = view.filename;
        self.issue_key = view.issue_key;
        self.project_key = view.project_key;
        self.current_version = view.current_version;
        self.last_updated_by = view.last_updated_by;
        self.updated_at = view.updated_at;
        self.published = view.published;
        self.published_at = view.published_at;
        self.published_by = view.published_by;
    }
}

pub struct DocumentViewModel {
    ctx: AppContext,
    id: String,
    pub state: ReactiveState<DocumentState>,
}

impl DocumentViewModel {
    pub fn new(ctx: AppContext, id: impl Into<String>) -> Self {
        Self {
            ctx,
            id: id.into(),
            state: ReactiveState::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Initial load, with the full-page spinner
    pub async fn load(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.load_error = None;
        });
        self.fetch().await;
    }

    /// Re-read after a mutation, without the spinner
    async fn refresh(&self) {
        self.fetch().await;
    }

    async fn fetch(&self) {
        log::info!("📄 [DOCUMENT] Loading {}", self.id);
        let result = self.ctx.api.view_generation(&self.id).await;
        let me = self.ctx.session.user_email();
        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(view) => s.apply(view, me.as_deref()),
                Err(e) => {
                    log::error!("❌ [DOCUMENT] Load failed: {}", e);
                    s.load_error = Some(e.server_message_or("Failed to load content"));
                    s.content.clear();
                    s.edited_content.clear();
                }
            }
        });
    }

    pub fn begin_edit(&self) {
        self.state.update(|s| {
            if s.is_owner {
                s.edited_content = s.content.clone();
                s.is_editing = true;
                s.action_error = None;
            }
        });
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| {
            s.edited_content = s.content.clone();
            s.is_editing = false;
            s.action_error = None;
        });
    }

    /// Keystroke in the editor
    pub fn edit(&self, value: String) {
        self.state.update_silent(|s| s.edited_content = value);
    }

    pub async fn save(&self) {
        if !self.state.with(DocumentState::can_save) {
            return;
        }
        let content = self.state.with(|s| s.edited_content.clone());
        self.state.update(|s| {
            s.saving = true;
            s.action_error = None;
        });

        match self.ctx.api.update_content(&self.id, &content).await {
            Ok(update) => {
                log::info!("✅ [DOCUMENT] Saved {}", self.id);
                self.state.update(|s| {
                    s.edited_content = update.content.clone();
                    s.content = update.content;
                    if let Some(version) = update.current_version {
                        s.current_version = version;
                    }
                    s.is_editing = false;
                    s.saving = false;
                });
                self.refresh().await;
            }
            Err(e) => {
                log::error!("❌ [DOCUMENT] Save failed: {}", e);
                self.state.update(|s| {
                    s.saving = false;
                    s.action_error = Some(e.server_message_or("Failed to save content!"));
                });
            }
        }
    }

    pub async fn toggle_publish(&self) {
        if !self.state.with(DocumentState::can_publish) {
            return;
        }
        let target = self.state.with(|s| !s.published);
        self.state.update(|s| {
            s.publishing = true;
            s.action_error = None;
        });

        match self.ctx.api.set_published(&self.id, target).await {
            Ok(publish) => {
                log::info!("📢 [DOCUMENT] {} published={}", self.id, publish.published);
                self.state.update(|s| {
                    s.published = publish.published;
                    s.published_at = publish.published_at;
                    s.published_by = publish.published_by;
                    s.publishing = false;
                });
                self.refresh().await;
            }
            Err(e) => {
                log::error!("❌ [DOCUMENT] Publish failed: {}", e);
                self.state.update(|s| {
                    s.publishing = false;
                    s.action_error = Some(e.server_message_or("Failed to publish content!"));
                });
            }
        }
    }

    /// Saves the server bytes under the file name shown on the page
    pub async fn download(&self) {
        if self.state.with(|s| s.downloading) {
            return;
        }
        let filename = self.state.with(|s| s.filename.clone());
        self.state.update(|s| {
            s.downloading = true;
            s.action_error = None;
        });

        let outcome = match self.ctx.api.download(&self.id).await {
            Ok(bytes) => self
                .ctx
                .files
                .save(&filename, &bytes, mime_for(&filename))
                .map_err(|e| {
                    log::error!("❌ [DOCUMENT] {}", e);
                    "Failed to download file".to_string()
                }),
            Err(e) => {
                log::error!("❌ [DOCUMENT] Download failed: {}", e);
                Err(e.server_message_or("Failed to download file"))
            }
        };

        self.state.update(|s| {
            s.downloading = false;
            if let Err(message) = outcome {
                s.action_error = Some(message);
            }
        });
    }

    pub fn request_delete(&self) {
        self.state.update(|s| {
            if s.is_owner {
                s.show_delete_modal = true;
            }
        });
    }

    pub fn dismiss_delete(&self) {
        self.state.update(|s| {
            if !s.deleting {
                s.show_delete_modal = false;
            }
        });
    }

    pub async fn delete(&self) {
        if self.state.with(|s| s.deleting || !s.show_delete_modal) {
            return;
        }
        self.state.update(|s| {
            s.deleting = true;
            s.action_error = None;
        });

        match self.ctx.api.delete_generation(&self.id).await {
            Ok(()) => {
                log::info!("🗑️ [DOCUMENT] Deleted {}", self.id);
                self.state.update(|s| {
                    s.deleting = false;
                    s.show_delete_modal = false;
                });
                self.ctx.navigate(&Route::Dashboard.path());
            }
            Err(e) => {
                log::error!("❌ [DOCUMENT] Delete failed: {}", e);
                self.state.update(|s| {
                    s.deleting = false;
                    s.show_delete_modal = false;
                    s.action_error = Some(e.server_message_or("Failed to delete generation"));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::Harness;
    use futures::executor::block_on;

    const OWNED_VIEW: &str = r##"{"data":{
        "content":"# Login\n\n- [ ] valid password",
        "filename":"QA-7-testcases.md",
        "email":"mia@example.com",
        "issueKey":"QA-7",
        "projectKey":"QA",
        "currentVersion":3,
        "lastUpdatedBy":"mia@example.com",
        "updatedAt":"2026-04-01T10:00:00Z",
        "published":false
    }}"##;

    fn loaded(h: &Harness) -> DocumentViewModel {
        h.transport.respond_json(200, OWNED_VIEW);
        let vm = DocumentViewModel::new(h.ctx.clone(), "g-7");
        block_on(vm.load());
        vm
    }

    #[test]
    fn load_populates_metadata_and_ownership() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);

        let s = vm.state.snapshot();
        assert!(!s.loading);
        assert!(s.is_owner);
        assert_eq!(s.current_version, 3);
        assert_eq!(s.title(), "QA-7's test cases");
        assert_eq!(s.edited_content, s.content);
        assert_eq!(h.transport.requests()[0].url, "http://api.test/generations/g-7/view");
    }

    #[test]
    fn foreign_document_is_read_only() {
        let h = Harness::signed_in("/view/g-8");
        h.transport.respond_json(
            200,
            r#"{"data":{"content":"x","email":"ana@example.com"}}"#,
        );
        let vm = DocumentViewModel::new(h.ctx.clone(), "g-8");
        block_on(vm.load());

        vm.begin_edit();
        vm.request_delete();
        block_on(vm.toggle_publish());

        let s = vm.state.snapshot();
        assert!(!s.is_owner);
        assert!(!s.is_editing);
        assert!(!s.show_delete_modal);
        assert_eq!(s.filename, "output.md");
        assert_eq!(s.title(), "output.md");
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[test]
    fn load_failure_clears_content() {
        let h = Harness::signed_in("/view/missing");
        h.transport.respond_json(404, r#"{"error":"Generation not found"}"#);
        let vm = DocumentViewModel::new(h.ctx.clone(), "missing");

        block_on(vm.load());

        let s = vm.state.snapshot();
        assert_eq!(s.load_error.as_deref(), Some("Generation not found"));
        assert!(!s.has_content());
        assert!(!s.loading);
    }

    #[test]
    fn cancel_restores_saved_content() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        let original = vm.state.snapshot().content;

        vm.begin_edit();
        vm.edit("scribbles".into());
        assert!(vm.state.snapshot().can_save());
        vm.cancel_edit();

        let s = vm.state.snapshot();
        assert!(!s.is_editing);
        assert_eq!(s.edited_content, original);
        assert_eq!(s.content, original);
    }

    #[test]
    fn save_is_disabled_until_something_changes() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        vm.begin_edit();

        block_on(vm.save());

        assert!(!vm.state.snapshot().can_save());
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[test]
    fn save_adopts_server_version_then_reloads() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        vm.begin_edit();
        vm.edit("# Login v4".into());
        h.transport.respond_json(
            200,
            r##"{"data":{"content":"# Login v4","currentVersion":4}}"##,
        );
        h.transport.respond_json(
            200,
            r##"{"data":{"content":"# Login v4","email":"mia@example.com","issueKey":"QA-7","currentVersion":4}}"##,
        );

        block_on(vm.save());

        let s = vm.state.snapshot();
        assert!(!s.is_editing);
        assert!(!s.saving);
        assert_eq!(s.content, "# Login v4");
        assert_eq!(s.current_version, 4);
        let requests = h.transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].body.as_ref().unwrap()["content"], "# Login v4");
        assert!(requests[2].url.ends_with("/generations/g-7/view"));
    }

    #[test]
    fn failed_save_keeps_the_editor_open() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        vm.begin_edit();
        vm.edit("draft".into());
        h.transport.respond_json(409, r#"{"error":"Version conflict"}"#);

        block_on(vm.save());

        let s = vm.state.snapshot();
        assert!(s.is_editing);
        assert_eq!(s.edited_content, "draft");
        assert_eq!(s.action_error.as_deref(), Some("Version conflict"));
        assert_eq!(h.transport.requests().len(), 2);
    }

    #[test]
    fn publish_sends_the_inverse_flag() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_json(
            200,
            r#"{"data":{"published":true,"publishedAt":"2026-04-02T08:00:00Z","publishedBy":"mia@example.com"}}"#,
        );
        h.transport.respond_json(
            200,
            r#"{"data":{"content":"x","email":"mia@example.com","published":true,"publishedBy":"mia@example.com"}}"#,
        );

        block_on(vm.toggle_publish());

        let requests = h.transport.requests();
        assert_eq!(requests[1].body.as_ref().unwrap()["published"], true);
        let s = vm.state.snapshot();
        assert!(s.published);
        assert_eq!(s.published_by.as_deref(), Some("mia@example.com"));
        assert!(!s.publishing);
    }

    #[test]
    fn download_uses_the_server_filename() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_bytes(200, b"# file body".to_vec());

        block_on(vm.download());

        let saved = h.saver.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "QA-7-testcases.md");
        assert_eq!(saved[0].1, b"# file body".to_vec());
        assert_eq!(saved[0].2, "text/markdown");
        assert!(!vm.state.snapshot().downloading);
    }

    #[test]
    fn download_failure_sets_banner() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.fail(ApiError::Network("offline".into()));

        block_on(vm.download());

        assert_eq!(
            vm.state.snapshot().action_error.as_deref(),
            Some("Failed to download file")
        );
        assert!(h.saver.saved.borrow().is_empty());
    }

    #[test]
    fn confirmed_delete_returns_to_dashboard() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_json(200, r#"{"data":{"deleted":true}}"#);

        block_on(vm.delete());
        assert_eq!(h.transport.requests().len(), 1);

        vm.request_delete();
        block_on(vm.delete());

        assert_eq!(h.navigator.pushed(), vec!["/dashboard".to_string()]);
        assert_eq!(
            h.transport.requests()[1].method,
            crate::services::HttpMethod::Delete
        );
    }

    #[test]
    fn failed_delete_closes_modal_with_error() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_json(500, "");
        vm.request_delete();

        block_on(vm.delete());

        let s = vm.state.snapshot();
        assert!(!s.show_delete_modal);
        assert!(!s.deleting);
        assert_eq!(s.action_error.as_deref(), Some("Failed to delete generation"));
        assert!(h.navigator.pushed().is_empty());
    }

    #[test]
    fn null_metadata_falls_back_to_defaults() {
        let h = Harness::signed_in("/view/g-9");
        h.transport.respond_json(
            200,
            r##"{"data":{"content":"# Cases","filename":null,"currentVersion":null,"published":null,"email":"mia@example.com"}}"##,
        );
        let vm = DocumentViewModel::new(h.ctx.clone(), "g-9");

        block_on(vm.load());

        let s = vm.state.snapshot();
        assert_eq!(s.load_error, None);
        assert_eq!(s.filename, "output.md");
        assert_eq!(s.title(), "output.md");
        assert_eq!(s.current_version, 1);
        assert!(!s.published);
    }

    #[test]
    fn blank_filename_downloads_as_output_md() {
        let h = Harness::signed_in("/view/g-9");
        h.transport.respond_json(
            200,
            r##"{"data":{"content":"# Cases","filename":"","email":"mia@example.com"}}"##,
        );
        let vm = DocumentViewModel::new(h.ctx.clone(), "g-9");
        block_on(vm.load());
        h.transport.respond_bytes(200, b"# Cases".to_vec());

        block_on(vm.download());

        assert_eq!(vm.state.snapshot().title(), "output.md");
        let saved = h.saver.saved.borrow();
        assert_eq!(saved[0].0, "output.md");
        assert_eq!(saved[0].2, "text/markdown");
    }

    #[test]
    fn rejected_save_to_disk_sets_banner() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.saver.refuse.set(true);
        h.transport.respond_bytes(200, b"# file body".to_vec());

        block_on(vm.download());

        let s = vm.state.snapshot();
        assert!(!s.downloading);
        assert_eq!(s.action_error.as_deref(), Some("Failed to download file"));
        assert!(h.saver.saved.borrow().is_empty());
    }

    #[test]
    fn failed_publish_keeps_state_and_shows_banner() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_json(500, "");

        block_on(vm.toggle_publish());

        let s = vm.state.snapshot();
        assert!(!s.published);
        assert!(!s.publishing);
        assert_eq!(s.action_error.as_deref(), Some("Failed to publish content!"));
        assert_eq!(h.transport.requests().len(), 2);
    }

    #[test]
    fn publish_error_prefers_server_message() {
        let h = Harness::signed_in("/view/g-7");
        let vm = loaded(&h);
        h.transport.respond_json(403, r#"{"error":"Only the owner can publish"}"#);

        block_on(vm.toggle_publish());

        assert_eq!(
            vm.state.snapshot().action_error.as_deref(),
            Some("Only the owner can publish")
        );
    }
}
