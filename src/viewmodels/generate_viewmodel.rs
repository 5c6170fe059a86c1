// ============================================================================
// GENERATE VIEWMODEL - Prelight analysis and test-case generation
// ============================================================================

use crate::context::AppContext;
use crate::models::{GenerationResult, PrelightReport};
use crate::state::ReactiveState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateState {
    pub issue_key: String,
    pub analyzing: bool,
    pub generating: bool,
    /// Ok(report) or the error to show in the analysis card
    pub prelight: Option<Result<PrelightReport, String>>,
    pub result: Option<Result<GenerationResult, String>>,
}

impl GenerateState {
    fn trimmed_key(&self) -> &str {
        self.issue_key.trim()
    }

    pub fn can_analyze(&self) -> bool {
        !self.analyzing && !self.trimmed_key().is_empty()
    }

    pub fn can_generate(&self) -> bool {
        !self.generating && !self.trimmed_key().is_empty()
    }
}

pub struct GenerateViewModel {
    ctx: AppContext,
    pub state: ReactiveState<GenerateState>,
}

impl GenerateViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            state: ReactiveState::default(),
        }
    }

    /// Keystroke: no re-render, the view toggles its buttons directly
    pub fn set_issue_key(&self, value: String) {
        self.state.update_silent(|s| s.issue_key = value);
    }

    pub async fn analyze(&self) {
        if !self.state.with(GenerateState::can_analyze) {
            return;
        }
        let issue_key = self.state.with(|s| s.trimmed_key().to_string());
        self.state.update(|s| {
            s.analyzing = true;
            s.prelight = None;
        });

        log::info!("🔍 [GENERATE] Prelight for {}", issue_key);
        let outcome = self
            .ctx
            .api
            .prelight(&issue_key)
            .await
            .map_err(|e| e.describe_or("An unknown error occurred"));

        self.state.update(|s| {
            s.analyzing = false;
            s.prelight = Some(outcome);
        });
    }

    pub async fn generate(&self) {
        if !self.state.with(GenerateState::can_generate) {
            return;
        }
        let issue_key = self.state.with(|s| s.trimmed_key().to_string());
        self.state.update(|s| {
            s.generating = true;
            s.result = None;
        });

        log::info!("🤖 [GENERATE] Generating test cases for {}", issue_key);
        let outcome = self
            .ctx
            .api
            .generate_testcases(&issue_key)
            .await
            .map_err(|e| e.describe_or("Generation failed!"));
        if let Ok(result) = &outcome {
            log::info!("✅ [GENERATE] Generation {} ready", result.generation_id);
        }

        self.state.update(|s| {
            s.generating = false;
            s.result = Some(outcome);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use futures::executor::block_on;

    #[test]
    fn blank_key_disables_both_actions() {
        let state = GenerateState {
            issue_key: "   ".into(),
            ..Default::default()
        };
        assert!(!state.can_analyze());
        assert!(!state.can_generate());
    }

    #[test]
    fn busy_flags_disable_their_own_action_only() {
        let state = GenerateState {
            issue_key: "QA-1".into(),
            analyzing: true,
            ..Default::default()
        };
        assert!(!state.can_analyze());
        assert!(state.can_generate());
    }

    #[test]
    fn blank_key_sends_nothing_and_leaves_flags_alone() {
        let h = Harness::signed_in("/");
        let vm = GenerateViewModel::new(h.ctx.clone());
        vm.set_issue_key("  ".into());

        block_on(vm.analyze());
        block_on(vm.generate());

        assert!(h.transport.requests().is_empty());
        assert_eq!(vm.state.snapshot().analyzing, false);
    }

    #[test]
    fn analyze_trims_key_and_stores_report() {
        let h = Harness::signed_in("/");
        h.transport.respond_json(
            200,
            r#"{"issueKey":"QA-42","title":"Reset password","uiStory":false,"attachments":0,"estimatedTokens":900}"#,
        );
        let vm = GenerateViewModel::new(h.ctx.clone());
        vm.set_issue_key("  QA-42 ".into());

        block_on(vm.analyze());

        let state = vm.state.snapshot();
        assert!(!state.analyzing);
        let report = state.prelight.unwrap().unwrap();
        assert_eq!(report.title.as_deref(), Some("Reset password"));
        assert_eq!(
            h.transport.requests()[0].body.as_ref().unwrap()["issueKey"],
            "QA-42"
        );
    }

    #[test]
    fn analyze_error_prefers_server_message() {
        let h = Harness::signed_in("/");
        h.transport
            .respond_json(400, r#"{"error":"Issue QA-0 does not exist"}"#);
        let vm = GenerateViewModel::new(h.ctx.clone());
        vm.set_issue_key("QA-0".into());

        block_on(vm.analyze());

        assert_eq!(
            vm.state.snapshot().prelight,
            Some(Err("Issue QA-0 does not exist".to_string()))
        );
    }

    #[test]
    fn generate_reports_result_or_fallback() {
        let h = Harness::signed_in("/");
        h.transport.respond_json(
            200,
            r##"{"data":{"generationId":"g-5","issueKey":"QA-5","generationTimeSeconds":33.0,"markdown":"# Cases"}}"##,
        );
        h.transport.respond_json(502, "");
        let vm = GenerateViewModel::new(h.ctx.clone());
        vm.set_issue_key("QA-5".into());

        block_on(vm.generate());
        let first = vm.state.snapshot().result.unwrap().unwrap();
        assert_eq!(first.generation_id, "g-5");
        assert!(first.has_document());

        block_on(vm.generate());
        assert_eq!(
            vm.state.snapshot().result,
            Some(Err("Generation failed!".to_string()))
        );
        assert!(!vm.state.snapshot().generating);
    }
}
