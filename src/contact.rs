// Contact form submitted with fetch instead of a page navigation.
//
// The flow itself (`submit`) only talks to a `FormView` and a send
// future, so it can be driven without a browser. `DomForm` is the real
// view backed by the page's form elements.

use std::future::Future;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, FormData, Headers, HtmlFormElement, Request, RequestInit, Response,
    Window,
};

pub const FORM_ID: &str = "contact-form";
pub const SUBMIT_ID: &str = "submit-btn";
pub const SUCCESS_ID: &str = "form-success";
pub const BUSY_CLASS: &str = "loading";
pub const SHOW_CLASS: &str = "show";

#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("server rejected the submission with status {status}")]
    Rejected { status: u16 },
    #[error("request could not complete: {0}")]
    Network(String),
}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Rejected { .. } => "Something went wrong. Please try again.",
            SubmitError::Network(_) => "Network error. Please try again.",
        }
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Everything the submission flow does to the page.
pub trait FormView {
    fn set_submit_enabled(&self, enabled: bool);
    fn set_busy(&self, busy: bool);
    fn reset_fields(&self);
    fn show_success(&self);
    fn alert(&self, message: &str);
}

/// Runs one submission attempt. `send` starts the request and resolves
/// to the response status, or a network error.
pub async fn submit<V, S, F>(view: &V, send: S) -> Result<(), SubmitError>
where
    V: FormView + ?Sized,
    S: FnOnce() -> F,
    F: Future<Output = Result<u16, SubmitError>>,
{
    view.set_submit_enabled(false);
    view.set_busy(true);

    let result = match send().await {
        Ok(status) if is_success(status) => Ok(()),
        Ok(status) => Err(SubmitError::Rejected { status }),
        Err(e) => Err(e),
    };

    match &result {
        Ok(()) => {
            view.reset_fields();
            view.show_success();
        }
        Err(e) => view.alert(e.user_message()),
    }

    view.set_submit_enabled(true);
    view.set_busy(false);
    result
}

pub struct DomForm {
    window: Window,
    form: HtmlFormElement,
    // <button> or <input type="submit">
    button: Option<Element>,
    success: Option<Element>,
}

impl DomForm {
    pub fn find(window: &Window, document: &Document) -> Result<Option<DomForm>, JsValue> {
        let form = match document.get_element_by_id(FORM_ID) {
            Some(el) => el.dyn_into::<HtmlFormElement>()?,
            None => return Ok(None),
        };
        let button = document.get_element_by_id(SUBMIT_ID);
        let success = document.get_element_by_id(SUCCESS_ID);
        Ok(Some(DomForm {
            window: window.clone(),
            form,
            button,
            success,
        }))
    }

    pub fn bind(self) -> Result<(), JsValue> {
        let view = Rc::new(self);
        let form = view.form.clone();
        let on_submit = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            let view = view.clone();
            spawn_local(async move {
                let result = submit(view.as_ref(), || send_form(&view.window, &view.form)).await;
                if let Err(e) = result {
                    console_warn!("contact form: {}", e);
                }
            });
        }) as Box<dyn FnMut(_)>);
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
        Ok(())
    }
}

impl FormView for DomForm {
    fn set_submit_enabled(&self, enabled: bool) {
        if let Some(button) = &self.button {
            let _ = if enabled {
                button.remove_attribute("disabled")
            } else {
                button.set_attribute("disabled", "")
            };
        }
    }

    fn set_busy(&self, busy: bool) {
        if let Some(button) = &self.button {
            let classes = button.class_list();
            let _ = if busy {
                classes.add_1(BUSY_CLASS)
            } else {
                classes.remove_1(BUSY_CLASS)
            };
        }
    }

    fn reset_fields(&self) {
        self.form.reset();
    }

    fn show_success(&self) {
        if let Some(success) = &self.success {
            let _ = success.class_list().add_1(SHOW_CLASS);
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

// Builds the request from the form's own method, action and fields and
// starts it right away; the returned future resolves to the status.
fn send_form(
    window: &Window,
    form: &HtmlFormElement,
) -> impl Future<Output = Result<u16, SubmitError>> {
    let pending = build_request(form).map(|request| window.fetch_with_request(&request));
    async move {
        let promise = pending.map_err(js_error)?;
        let response = JsFuture::from(promise).await.map_err(js_error)?;
        let response: Response = response.dyn_into().map_err(js_error)?;
        Ok(response.status())
    }
}

pub fn build_request(form: &HtmlFormElement) -> Result<Request, JsValue> {
    let body = FormData::new_with_form(form)?;
    let headers = Headers::new()?;
    headers.set("Accept", "application/json")?;

    let init = RequestInit::new();
    init.set_method(&form.method());
    init.set_body(&body);
    init.set_headers(&headers);
    Request::new_with_str_and_init(&form.action(), &init)
}

fn js_error(e: JsValue) -> SubmitError {
    SubmitError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}
