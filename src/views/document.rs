// ============================================================================
// DOCUMENT VIEW - Metadata header, actions, editor or rendered markdown
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{append_child, on_click, on_input_value, set_flag, ElementBuilder};
use crate::markdown::render_markdown;
use crate::routing::Route;
use crate::utils::format_date;
use crate::viewmodels::{DocumentState, DocumentViewModel};
use crate::views::shared::{button, error_banner, link, on_click_spawn, spinner};

fn meta_item(class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("span")?
        .class(&format!("meta-item {}", class))
        .text(text)
        .build())
}

fn render_metadata(state: &DocumentState) -> Result<Element, JsValue> {
    let meta = ElementBuilder::new("div")?.class("doc-meta").build();
    if let Some(project) = state.project_key.as_deref().filter(|p| !p.is_empty()) {
        append_child(&meta, &meta_item("meta-project", project)?)?;
    }
    append_child(&meta, &meta_item(
        "meta-version",
        &format!("Version {}", state.current_version),
    )?)?;
    append_child(&meta, &meta_item("meta-updated", &format_date(state.updated_at.as_deref()))?)?;
    if let Some(editor) = state.last_updated_by.as_deref() {
        append_child(&meta, &meta_item("meta-editor", editor)?)?;
    }
    if state.published {
        let by = state.published_by.as_deref().unwrap_or("unknown");
        let when = format_date(state.published_at.as_deref());
        append_child(&meta, &meta_item(
            "meta-published",
            &format!("Published by {} on {}", by, when),
        )?)?;
    }
    Ok(meta)
}

fn render_edit_actions(vm: &Rc<DocumentViewModel>, state: &DocumentState) -> Result<(Element, Element), JsValue> {
    let cancel = button("Cancel", "btn-secondary", state.saving)?;
    {
        let vm = vm.clone();
        on_click(&cancel, move |_| vm.cancel_edit())?;
    }

    let save_label = if state.saving { "Saving..." } else { "Save" };
    let save = button(save_label, "btn-primary", !state.can_save())?;
    {
        let vm = vm.clone();
        on_click_spawn(&save, move || {
            let vm = vm.clone();
            async move { vm.save().await }
        })?;
    }
    Ok((cancel, save))
}

fn render_view_actions(vm: &Rc<DocumentViewModel>, state: &DocumentState) -> Result<Vec<Element>, JsValue> {
    let mut actions = Vec::new();

    if state.is_owner {
        let edit = button("Edit", "btn-secondary", !state.has_content())?;
        {
            let vm = vm.clone();
            on_click(&edit, move |_| vm.begin_edit())?;
        }
        actions.push(edit);

        let publish_label = match (state.publishing, state.published) {
            (true, _) => "Updating...",
            (false, true) => "Unpublish",
            (false, false) => "Publish",
        };
        let publish = button(publish_label, "btn-secondary", !state.can_publish())?;
        {
            let vm = vm.clone();
            on_click_spawn(&publish, move || {
                let vm = vm.clone();
                async move { vm.toggle_publish().await }
            })?;
        }
        actions.push(publish);
    }

    let download_label = if state.downloading { "Downloading..." } else { "Download" };
    let download = button(download_label, "btn-secondary", state.downloading || !state.has_content())?;
    {
        let vm = vm.clone();
        on_click_spawn(&download, move || {
            let vm = vm.clone();
            async move { vm.download().await }
        })?;
    }
    actions.push(download);

    if state.is_owner {
        let delete = button("Delete", "btn-danger", !state.has_content())?;
        {
            let vm = vm.clone();
            on_click(&delete, move |_| vm.request_delete())?;
        }
        actions.push(delete);
    }
    Ok(actions)
}

fn render_delete_modal(vm: &Rc<DocumentViewModel>, state: &DocumentState) -> Result<Element, JsValue> {
    let dialog = ElementBuilder::new("div")?
        .class("modal")
        .attr("role", "dialog")?
        .child(ElementBuilder::new("h3")?.text("Delete Generation").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Are you sure you want to delete this test case generation? This action cannot be undone.")
                .build(),
        )?
        .build();

    if state.published {
        let warning = ElementBuilder::new("p")?
            .class("modal-warning")
            .text("⚠️ This generation is published. Deleting it will remove it from public view.")
            .build();
        append_child(&dialog, &warning)?;
    }

    let cancel = button("Cancel", "btn-secondary", state.deleting)?;
    {
        let vm = vm.clone();
        on_click(&cancel, move |_| vm.dismiss_delete())?;
    }
    let confirm_label = if state.deleting { "Deleting..." } else { "Delete" };
    let confirm = button(confirm_label, "btn-danger", state.deleting)?;
    {
        let vm = vm.clone();
        on_click_spawn(&confirm, move || {
            let vm = vm.clone();
            async move { vm.delete().await }
        })?;
    }
    let buttons = ElementBuilder::new("div")?
        .class("modal-actions")
        .child(cancel)?
        .child(confirm)?
        .build();
    append_child(&dialog, &buttons)?;

    Ok(ElementBuilder::new("div")?
        .class("modal-backdrop")
        .child(dialog)?
        .build())
}

fn render_editor(vm: &Rc<DocumentViewModel>, state: &DocumentState, save: &Element) -> Result<Element, JsValue> {
    let editor = ElementBuilder::new("textarea")?
        .class("doc-editor")
        .attr("placeholder", "Enter markdown content...")?
        .attr("spellcheck", "true")?
        .text(&state.edited_content)
        .disabled(state.saving)?
        .build();

    // Save button tracks the buffer without a re-render
    let vm = vm.clone();
    let save = save.clone();
    on_input_value(&editor, move |value| {
        vm.edit(value);
        let enabled = vm.state.with(DocumentState::can_save);
        let _ = set_flag(&save, "disabled", !enabled);
    })?;
    Ok(editor)
}

fn render_markdown_body(state: &DocumentState) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("article")?
        .class("markdown-body")
        .html(&render_markdown(&state.content))
        .build())
}

pub fn render_document(ctx: &AppContext, vm: &Rc<DocumentViewModel>) -> Result<Element, JsValue> {
    let state = vm.state.snapshot();

    if state.loading {
        return spinner("Loading content...");
    }
    if let Some(message) = &state.load_error {
        return Ok(ElementBuilder::new("div")?
            .class("document-page")
            .child(error_banner(message)?)?
            .build());
    }

    let back = link(ctx, &Route::Dashboard.path(), "← Back to Dashboard", "back-link")?;

    let title = ElementBuilder::new("h1")?.class("doc-title").text(&state.title()).build();
    if state.published {
        let badge = ElementBuilder::new("span")?
            .class("badge badge-published")
            .text("Published")
            .build();
        append_child(&title, &badge)?;
    }

    let (actions, body) = if state.is_editing {
        let (cancel, save) = render_edit_actions(vm, &state)?;
        let editor = render_editor(vm, &state, &save)?;
        (vec![cancel, save], editor)
    } else {
        (render_view_actions(vm, &state)?, render_markdown_body(&state)?)
    };
    let action_bar = ElementBuilder::new("div")?
        .class("doc-actions")
        .children(actions)?
        .build();

    let header = ElementBuilder::new("div")?
        .class("doc-header")
        .child(title)?
        .child(render_metadata(&state)?)?
        .child(action_bar)?
        .build();

    let page = ElementBuilder::new("div")?
        .class("document-page")
        .child(back)?
        .child(header)?
        .build();

    if let Some(message) = &state.action_error {
        append_child(&page, &error_banner(message)?)?;
    }
    append_child(&page, &body)?;

    if state.show_delete_modal {
        append_child(&page, &render_delete_modal(vm, &state)?)?;
    }
    Ok(page)
}
