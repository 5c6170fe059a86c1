// ============================================================================
// DASHBOARD VIEW - Filters, generations table, pagination
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::{Generation, ListFilter};
use crate::routing::Route;
use crate::utils::{format_cost, format_date, format_time};
use crate::viewmodels::{DashboardState, DashboardViewModel};
use crate::views::shared::{button, error_banner, link, on_click_spawn, spinner};

const COLUMNS: [&str; 8] = ["Issue Key", "Status", "Mode", "Owner", "Created", "Time", "Cost", "Actions"];

fn render_filters(vm: &Rc<DashboardViewModel>, active: ListFilter) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("filter-bar").build();
    for filter in ListFilter::ALL {
        let class = if filter == active { "filter-btn active" } else { "filter-btn" };
        let btn = button(filter.label(), class, false)?;
        let vm = vm.clone();
        on_click_spawn(&btn, move || {
            let vm = vm.clone();
            async move { vm.set_filter(filter).await }
        })?;
        append_child(&bar, &btn)?;
    }
    Ok(bar)
}

fn cell(text: &str, class: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("td")?.class(class).text(text).build())
}

fn render_row(ctx: &AppContext, vm: &DashboardViewModel, item: &Generation) -> Result<Element, JsValue> {
    let issue = cell(&item.issue_key, "cell-issue")?;
    if item.published {
        let badge = ElementBuilder::new("span")?
            .class("badge badge-published")
            .text("Published")
            .build();
        append_child(&issue, &badge)?;
    }

    let status_badge = ElementBuilder::new("span")?
        .class(item.status.badge_class())
        .text(&item.status.label())
        .build();
    let status = ElementBuilder::new("td")?.child(status_badge)?.build();

    let actions = ElementBuilder::new("td")?.class("cell-actions").build();
    if item.is_viewable() {
        let path = Route::View(item.id.clone()).path();
        append_child(&actions, &link(ctx, &path, "View", "table-link")?)?;
    }

    Ok(ElementBuilder::new("tr")?
        .child(issue)?
        .child(status)?
        .child(cell(item.mode_label(), "cell-mode")?)?
        .child(cell(&vm.owner_label(item), "cell-owner")?)?
        .child(cell(&format_date(item.created_at.as_deref()), "cell-date")?)?
        .child(cell(&format_time(item.generation_time_seconds), "cell-time")?)?
        .child(cell(&format_cost(item.cost), "cell-cost")?)?
        .child(actions)?
        .build())
}

fn render_table(ctx: &AppContext, vm: &DashboardViewModel, state: &DashboardState) -> Result<Element, JsValue> {
    let head_row = ElementBuilder::new("tr")?.build();
    for title in COLUMNS {
        append_child(&head_row, &ElementBuilder::new("th")?.text(title).build())?;
    }
    let thead = ElementBuilder::new("thead")?.child(head_row)?.build();

    let tbody = ElementBuilder::new("tbody")?.build();
    for item in &state.items {
        append_child(&tbody, &render_row(ctx, vm, item)?)?;
    }

    Ok(ElementBuilder::new("table")?
        .class("generations-table")
        .child(thead)?
        .child(tbody)?
        .build())
}

fn render_empty(ctx: &AppContext) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("empty-state")
        .child(
            ElementBuilder::new("p")?
                .text("No generations found. Start by generating test cases!")
                .build(),
        )?
        .child(link(ctx, &Route::Generate.path(), "Generate Test Cases", "btn-primary")?)?
        .build())
}

fn render_pagination(vm: &Rc<DashboardViewModel>, state: &DashboardState) -> Result<Element, JsValue> {
    let pages = state.pagination.as_ref().map(|p| p.pages).unwrap_or(0);
    let summary = ElementBuilder::new("span")?
        .class("page-summary")
        .text(&format!("Showing page {} of {}", state.reported_page(), pages))
        .build();

    let previous = button("Previous", "page-btn", !state.can_go_previous())?;
    {
        let vm = vm.clone();
        on_click_spawn(&previous, move || {
            let vm = vm.clone();
            async move { vm.previous_page().await }
        })?;
    }
    let next = button("Next", "page-btn", !state.can_go_next())?;
    {
        let vm = vm.clone();
        on_click_spawn(&next, move || {
            let vm = vm.clone();
            async move { vm.next_page().await }
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("pagination")
        .child(summary)?
        .child(previous)?
        .child(next)?
        .build())
}

pub fn render_dashboard(ctx: &AppContext, vm: &Rc<DashboardViewModel>) -> Result<Element, JsValue> {
    let state = vm.state.snapshot();

    let heading = ElementBuilder::new("div")?
        .class("page-heading")
        .child(ElementBuilder::new("h1")?.text("Dashboard").build())?
        .child(
            ElementBuilder::new("p")?
                .text("View and manage your test case generations")
                .build(),
        )?
        .build();

    let page = ElementBuilder::new("div")?
        .class("dashboard-page")
        .child(heading)?
        .child(render_filters(vm, state.filter)?)?
        .build();

    if let Some(message) = &state.error {
        append_child(&page, &error_banner(message)?)?;
    }

    if state.loading {
        append_child(&page, &spinner("Loading generations...")?)?;
    } else if state.is_empty() {
        append_child(&page, &render_empty(ctx)?)?;
    } else {
        append_child(&page, &render_table(ctx, vm, &state)?)?;
    }

    if !state.loading && state.shows_pagination() {
        append_child(&page, &render_pagination(vm, &state)?)?;
    }
    Ok(page)
}
