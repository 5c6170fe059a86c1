// ============================================================================
// GENERATE VIEW - Issue key input, analysis card, generation card
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{append_child, on_input_value, set_flag, ElementBuilder};
use crate::models::{GenerationResult, PrelightReport};
use crate::routing::Route;
use crate::viewmodels::{GenerateState, GenerateViewModel};
use crate::views::shared::{button, error_banner, field, link, on_click_spawn};

fn render_input_card(vm: &Rc<GenerateViewModel>, state: &GenerateState) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .class("form-input issue-key-input")
        .attr("type", "text")?
        .attr("placeholder", "Enter JIRA issue key...")?
        .attr("value", &state.issue_key)?
        .build();

    let analyze_label = if state.analyzing { "Analyzing..." } else { "Analyze" };
    let analyze = button(analyze_label, "btn-primary", !state.can_analyze())?;
    {
        let vm = vm.clone();
        on_click_spawn(&analyze, move || {
            let vm = vm.clone();
            async move { vm.analyze().await }
        })?;
    }

    let generate_label = if state.generating { "Generating..." } else { "Generate" };
    let generate = button(generate_label, "btn-gradient", !state.can_generate())?;
    {
        let vm = vm.clone();
        on_click_spawn(&generate, move || {
            let vm = vm.clone();
            async move { vm.generate().await }
        })?;
    }

    // Keystrokes only toggle the buttons so the input keeps focus
    {
        let vm = vm.clone();
        let analyze = analyze.clone();
        let generate = generate.clone();
        on_input_value(&input, move |value| {
            vm.set_issue_key(value);
            let (can_analyze, can_generate) =
                vm.state.with(|s| (s.can_analyze(), s.can_generate()));
            let _ = set_flag(&analyze, "disabled", !can_analyze);
            let _ = set_flag(&generate, "disabled", !can_generate);
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("card input-card")
        .child(input)?
        .child(analyze)?
        .child(generate)?
        .build())
}

fn render_report(report: &PrelightReport) -> Result<Element, JsValue> {
    let title = report.title.clone().unwrap_or_default();
    let left = ElementBuilder::new("div")?
        .class("report-column")
        .child(field("Issue Key:", &report.issue_key)?)?
        .child(field("Summary:", &title)?)?
        .child(field("UI Story:", if report.ui_story { "Yes" } else { "No" })?)?
        .build();
    let right = ElementBuilder::new("div")?
        .class("report-column")
        .child(field("Attachments:", &report.attachments.to_string())?)?
        .child(field("Estimated Tokens:", &report.estimated_tokens.to_string())?)?
        .child(field("Estimated Cost:", &report.estimated_cost_label())?)?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("report-grid")
        .child(left)?
        .child(right)?
        .build())
}

fn render_prelight_card(prelight: &Result<PrelightReport, String>) -> Result<Element, JsValue> {
    let body = match prelight {
        Ok(report) => render_report(report)?,
        Err(message) => error_banner(&format!("Error: {}", message))?,
    };
    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text("Analysis Result").build())?
        .child(body)?
        .build())
}

fn render_result(ctx: &AppContext, result: &GenerationResult) -> Result<Element, JsValue> {
    let elapsed = result
        .generation_time_seconds
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();
    let summary = ElementBuilder::new("div")?
        .class("result-summary")
        .child(field("Issue Key", &result.issue_key)?)?
        .child(field("Generation Time:", &elapsed)?)?
        .build();

    if result.has_document() {
        let view_path = Route::View(result.generation_id.clone()).path();
        let notice = ElementBuilder::new("p")?
            .class("success-banner")
            .text("✅ Test cases generated successfully! ")
            .child(link(ctx, &view_path, "View Test Cases", "success-link")?)?
            .build();
        append_child(&summary, &notice)?;
    }
    Ok(summary)
}

fn render_result_card(
    ctx: &AppContext,
    outcome: &Result<GenerationResult, String>,
) -> Result<Element, JsValue> {
    let body = match outcome {
        Ok(result) => render_result(ctx, result)?,
        Err(message) => error_banner(&format!("Error: {}", message))?,
    };
    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text("Generation Complete!").build())?
        .child(body)?
        .build())
}

pub fn render_generate(ctx: &AppContext, vm: &Rc<GenerateViewModel>) -> Result<Element, JsValue> {
    let state = vm.state.snapshot();

    let heading = ElementBuilder::new("div")?
        .class("page-heading")
        .child(ElementBuilder::new("h1")?.text("Generate Test Cases").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Enter a JIRA issue key to analyze and generate comprehensive test cases.")
                .build(),
        )?
        .build();

    let page = ElementBuilder::new("div")?
        .class("generate-page")
        .child(heading)?
        .child(render_input_card(vm, &state)?)?
        .build();

    if let Some(prelight) = &state.prelight {
        append_child(&page, &render_prelight_card(prelight)?)?;
    }
    if let Some(outcome) = &state.result {
        append_child(&page, &render_result_card(ctx, outcome)?)?;
    }
    Ok(page)
}
