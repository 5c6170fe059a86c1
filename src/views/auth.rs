// ============================================================================
// AUTH VIEWS - Login and register screens
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::context::AppContext;
use crate::dom::{append_child, on_input_value, on_submit, ElementBuilder};
use crate::viewmodels::{AuthForm, AuthMode, AuthViewModel};
use crate::views::shared::{error_banner, link};

fn form_group<F>(
    label: &str,
    input_type: &str,
    placeholder: &str,
    value: &str,
    disabled: bool,
    on_change: F,
) -> Result<Element, JsValue>
where
    F: FnMut(String) + 'static,
{
    let caption = ElementBuilder::new("label")?.text(label).build();
    let input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .disabled(disabled)?
        .build();
    on_input_value(&input, on_change)?;

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(caption)?
        .child(input)?
        .build())
}

struct AuthCopy {
    heading: &'static str,
    subtitle: &'static str,
    submit: &'static str,
    busy: &'static str,
    switch_prompt: &'static str,
    switch_label: &'static str,
    switch_path: &'static str,
}

fn copy_for(mode: AuthMode) -> AuthCopy {
    match mode {
        AuthMode::Login => AuthCopy {
            heading: "Welcome Back",
            subtitle: "Sign in to your account to continue!",
            submit: "Sign In",
            busy: "Signing in...",
            switch_prompt: "Don't have an account? ",
            switch_label: "Register",
            switch_path: "/register",
        },
        AuthMode::Register => AuthCopy {
            heading: "Create Account",
            subtitle: "Create a new account to get started!",
            submit: "Create Account",
            busy: "Creating Account...",
            switch_prompt: "Already have an account? ",
            switch_label: "Log in",
            switch_path: "/login",
        },
    }
}

fn render_fields(vm: &Rc<AuthViewModel>, form: &AuthForm) -> Result<Vec<Element>, JsValue> {
    let mut fields = Vec::new();
    if vm.mode() == AuthMode::Register {
        let vm_name = vm.clone();
        fields.push(form_group(
            "Full Name",
            "text",
            "Mia Nguyen",
            &form.name,
            form.loading,
            move |v| vm_name.set_name(v),
        )?);
    }

    let vm_email = vm.clone();
    let email_label = match vm.mode() {
        AuthMode::Login => "Email",
        AuthMode::Register => "Email Address",
    };
    fields.push(form_group(
        email_label,
        "email",
        "Enter your email",
        &form.email,
        form.loading,
        move |v| vm_email.set_email(v),
    )?);

    let vm_password = vm.clone();
    fields.push(form_group(
        "Password",
        "password",
        "Enter your password",
        &form.password,
        form.loading,
        move |v| vm_password.set_password(v),
    )?);
    Ok(fields)
}

/// Full-screen login or register card
pub fn render_auth(ctx: &AppContext, vm: &Rc<AuthViewModel>) -> Result<Element, JsValue> {
    let form_state = vm.state.snapshot();
    let copy = copy_for(vm.mode());

    let header = ElementBuilder::new("div")?
        .class("auth-header")
        .child(ElementBuilder::new("h1")?.text(copy.heading).build())?
        .child(ElementBuilder::new("p")?.text(copy.subtitle).build())?
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .children(render_fields(vm, &form_state)?)?
        .build();

    if let Some(message) = &form_state.error {
        append_child(&form, &error_banner(&format!("Error: {}", message))?)?;
    }

    let submit_label = if form_state.loading { copy.busy } else { copy.submit };
    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text(submit_label)
        .disabled(form_state.loading)?
        .build();
    append_child(&form, &submit)?;

    {
        let vm = vm.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            spawn_local(async move { vm.submit().await });
        })?;
    }

    let switch = ElementBuilder::new("p")?
        .class("auth-switch")
        .text(copy.switch_prompt)
        .child(link(ctx, copy.switch_path, copy.switch_label, "auth-switch-link")?)?
        .build();

    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(header)?
        .child(form)?
        .child(switch)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("auth-screen")
        .child(card)?
        .build())
}
