use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use crate::components::notification::ToastKind;
use crate::error::Result as PageResult;

pub const SUCCESS_MESSAGE: &str = "Message sent! We will get back to you soon.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all required fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// What the page should do after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFeedback {
    pub message: String,
    pub kind: ToastKind,
    pub reset_form: bool,
}

impl ContactSubmission {
    /// Reads the first text input, email input and textarea of `form`.
    pub fn read(form: &Element) -> Self {
        let input = |selector: &str| {
            form.query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|el| el.value())
                .unwrap_or_default()
        };
        let message = form
            .query_selector("textarea")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|el| el.value())
            .unwrap_or_default();

        Self {
            name: input("input[type=\"text\"]"),
            email: input("input[type=\"email\"]"),
            message,
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ContactError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    pub fn evaluate(&self) -> FormFeedback {
        match self.validate() {
            Ok(()) => FormFeedback {
                message: SUCCESS_MESSAGE.to_string(),
                kind: ToastKind::Success,
                reset_form: true,
            },
            Err(e) => FormFeedback {
                message: e.to_string(),
                kind: ToastKind::Error,
                reset_form: false,
            },
        }
    }
}

/// Keys that submit the surrounding form from a text input.
pub fn submits_on_key(key: &str) -> bool {
    key == "Enter"
}

/// Fires a plain `submit` event at `form`. Unlike `requestSubmit` this skips
/// constraint validation, so empty `required` fields still reach
/// [`ContactSubmission::evaluate`].
pub fn dispatch_submit(form: &HtmlFormElement) -> PageResult<bool> {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init)?;
    Ok(form.dispatch_event(&event)?)
}

pub fn reset(form: &Element) {
    match form.dyn_ref::<HtmlFormElement>() {
        Some(form) => form.reset(),
        None => log::warn!("contact form target is not a <form>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@lab.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn any_empty_field_is_an_error_without_reset() {
        for sub in [
            submission("", "a@b.co", "hi"),
            submission("Ada", "", "hi"),
            submission("Ada", "a@b.co", ""),
        ] {
            let feedback = sub.evaluate();
            assert_eq!(feedback.kind, ToastKind::Error);
            assert!(!feedback.reset_form);
            assert_eq!(feedback.message, ContactError::MissingField.to_string());
        }
    }

    #[test]
    fn bad_email_is_reported_after_presence_check() {
        let feedback = submission("Ada", "ada@lab", "hello").evaluate();
        assert_eq!(feedback.kind, ToastKind::Error);
        assert_eq!(feedback.message, ContactError::InvalidEmail.to_string());
        assert!(!feedback.reset_form);
    }

    #[test]
    fn only_enter_submits() {
        assert!(submits_on_key("Enter"));
        assert!(!submits_on_key("Tab"));
        assert!(!submits_on_key("enter"));
        assert!(!submits_on_key(" "));
    }

    #[test]
    fn complete_submission_succeeds_and_resets() {
        let feedback = submission("Ada", "ada@lab.org", "hello").evaluate();
        assert_eq!(feedback.kind, ToastKind::Success);
        assert_eq!(feedback.message, SUCCESS_MESSAGE);
        assert!(feedback.reset_form);
    }
}
