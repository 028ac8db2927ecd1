use std::collections::BTreeMap;

use gloo_console::log;
use gloo_timers::future::TimeoutFuture;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::notification::Notifier;
use crate::utils::text::upper_first;
use crate::utils::validation::{is_email, is_phone};

const CONTACT_SEND_MS: u32 = 2000;
const NEWSLETTER_SEND_MS: u32 = 1500;

pub const FIX_ERRORS: &str = "Please fix the errors and try again";
pub const CONTACT_SENT: &str = "Message sent successfully! We'll get back to you soon.";
pub const SUBSCRIBED: &str = "Successfully subscribed to our newsletter!";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Returns the message to show under the field, if any. Values are trimmed
/// first; optional fields left empty are always valid.
pub fn validate_field(field: &FieldDef, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return field.required.then(|| format!("{} is required", upper_first(field.name)));
    }
    match field.kind {
        FieldKind::Email if !is_email(value) => Some(INVALID_EMAIL.to_string()),
        FieldKind::Tel if !is_phone(value) => Some(INVALID_PHONE.to_string()),
        _ => None,
    }
}

/// Validates every field, keyed by field name.
pub fn validate_all<'a>(fields: &[FieldDef], values: impl Fn(&str) -> &'a str) -> BTreeMap<&'static str, String> {
    fields
        .iter()
        .filter_map(|f| validate_field(f, values(f.name)).map(|msg| (f.name, msg)))
        .collect()
}

/// Class marking an input that failed validation.
pub const FIELD_ERROR_CLASS: &str = "field-error";

pub fn field_class(has_error: bool) -> Option<&'static str> {
    has_error.then_some(FIELD_ERROR_CLASS)
}

pub fn contact_fields() -> Vec<FieldDef> {
    vec![
        FieldDef { name: "name", label: "Full Name", kind: FieldKind::Text, required: true },
        FieldDef { name: "email", label: "Email Address", kind: FieldKind::Email, required: true },
        FieldDef { name: "phone", label: "Phone Number", kind: FieldKind::Tel, required: false },
        FieldDef { name: "subject", label: "Subject", kind: FieldKind::Text, required: true },
        FieldDef { name: "message", label: "Message", kind: FieldKind::TextArea, required: true },
    ]
}

pub enum ContactMsg {
    Input(&'static str, String),
    Blur(&'static str),
    Submit,
    Sent,
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub notifier: Notifier,
}

pub struct ContactForm {
    fields: Vec<FieldDef>,
    values: BTreeMap<&'static str, String>,
    errors: BTreeMap<&'static str, String>,
    submitting: bool,
}

impl ContactForm {
    fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

impl Component for ContactForm {
    type Message = ContactMsg;
    type Properties = ContactFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            fields: contact_fields(),
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
            submitting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::Input(name, value) => {
                self.values.insert(name, value);
                self.errors.remove(name);
                true
            }
            ContactMsg::Blur(name) => {
                let Some(field) = self.fields.iter().find(|f| f.name == name) else {
                    return false;
                };
                match validate_field(field, self.value(name)) {
                    Some(message) => self.errors.insert(name, message),
                    None => self.errors.remove(name),
                };
                true
            }
            ContactMsg::Submit => {
                if self.submitting {
                    return false;
                }
                let errors = validate_all(&self.fields, |name| self.value(name));
                self.errors = errors;
                if !self.errors.is_empty() {
                    ctx.props().notifier.error(FIX_ERRORS);
                    return true;
                }
                log!("Contact form submitted by", self.value("email").to_string());
                self.submitting = true;
                ctx.link().send_future(async {
                    TimeoutFuture::new(CONTACT_SEND_MS).await;
                    ContactMsg::Sent
                });
                true
            }
            ContactMsg::Sent => {
                ctx.props().notifier.success(CONTACT_SENT);
                self.values.clear();
                self.errors.clear();
                self.submitting = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });

        html! {
            <form id="contactForm" class="contact-form" novalidate={true} {onsubmit}>
                { for self.fields.iter().map(|field| {
                    let name = field.name;
                    let error = self.errors.get(name);
                    let onblur = ctx.link().callback(move |_: FocusEvent| ContactMsg::Blur(name));
                    let input = if field.kind == FieldKind::TextArea {
                        let oninput = ctx.link().callback(move |e: InputEvent| {
                            let area: HtmlTextAreaElement = e.target_unchecked_into();
                            ContactMsg::Input(name, area.value())
                        });
                        html! {
                            <textarea id={name} {name} rows="5" value={self.value(name).to_string()}
                                class={classes!(field_class(error.is_some()))}
                                required={field.required} {oninput} {onblur}></textarea>
                        }
                    } else {
                        let oninput = ctx.link().callback(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            ContactMsg::Input(name, input.value())
                        });
                        let input_type = match field.kind {
                            FieldKind::Email => "email",
                            FieldKind::Tel => "tel",
                            _ => "text",
                        };
                        html! {
                            <input type={input_type} id={name} {name} value={self.value(name).to_string()}
                                class={classes!(field_class(error.is_some()))}
                                required={field.required} {oninput} {onblur} />
                        }
                    };
                    html! {
                        <div class="form-group">
                            <label for={name}>{ field.label }</label>
                            { input }
                            if let Some(error) = error {
                                <span class="error-message">{ error }</span>
                            }
                        </div>
                    }
                }) }
                <button type="submit" class="btn btn-primary" disabled={self.submitting}>
                    if self.submitting {
                        <i class="fas fa-spinner fa-spin"></i>{" Sending..."}
                    } else {
                        {"Send Message"}
                    }
                </button>
            </form>
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NewsletterFormProps {
    pub notifier: Notifier,
}

#[function_component(NewsletterForm)]
pub fn newsletter_form(props: &NewsletterFormProps) -> Html {
    let email = use_state(String::new);
    let submitting = use_state(|| false);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let submitting = submitting.clone();
        let notifier = props.notifier.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            if !is_email(email.trim()) {
                notifier.error(INVALID_EMAIL);
                return;
            }
            submitting.set(true);
            let email = email.clone();
            let submitting = submitting.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(NEWSLETTER_SEND_MS).await;
                notifier.success(SUBSCRIBED);
                email.set(String::new());
                submitting.set(false);
            });
        })
    };

    html! {
        <form class="newsletter-form" novalidate={true} {onsubmit}>
            <input type="email" placeholder="Enter your email" value={(*email).clone()} {oninput} />
            <button type="submit" class="btn btn-primary" disabled={*submitting}>
                if *submitting {
                    <i class="fas fa-spinner fa-spin"></i>{" Subscribing..."}
                } else {
                    {"Subscribe"}
                }
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &'static str, kind: FieldKind, required: bool) -> FieldDef {
        FieldDef { name, label: name, kind, required }
    }

    #[test]
    fn invalid_fields_use_the_stylesheet_class() {
        assert_eq!(field_class(true), Some("field-error"));
        assert_eq!(field_class(false), None);
    }

    #[test]
    fn required_message_capitalizes_name() {
        let f = field("name", FieldKind::Text, true);
        assert_eq!(validate_field(&f, "   ").as_deref(), Some("Name is required"));
        assert_eq!(validate_field(&f, " Ada "), None);
    }

    #[test]
    fn optional_empty_field_is_valid() {
        let f = field("phone", FieldKind::Tel, false);
        assert_eq!(validate_field(&f, ""), None);
        assert_eq!(validate_field(&f, "abc").as_deref(), Some(INVALID_PHONE));
        assert_eq!(validate_field(&f, "+1 555 123 4567"), None);
    }

    #[test]
    fn email_format_is_checked() {
        let f = field("email", FieldKind::Email, true);
        assert_eq!(validate_field(&f, "nope").as_deref(), Some(INVALID_EMAIL));
        assert_eq!(validate_field(&f, "ada@example.com"), None);
    }

    #[test]
    fn validate_all_collects_every_error() {
        let fields = contact_fields();
        let errors = validate_all(&fields, |name| match name {
            "email" => "bad",
            "subject" => "Hi",
            _ => "",
        });
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["email"], INVALID_EMAIL);
        assert_eq!(errors["message"], "Message is required");
        assert!(!errors.contains_key("phone"));
    }
}
