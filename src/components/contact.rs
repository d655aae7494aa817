use super::{attr, button::ButtonType, card, esc, pill_button, pill_link};
use crate::forms::{ContactFields, FormState};

const CHECK_SVG: &str = r#"<svg class="success-icon" fill="none" viewBox="0 0 24 24" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"/></svg>"#;

/// Inline messages for one field, e.g. "Email should be an email".
fn field_errors(state: &FormState, field: &str, prefix: &str) -> String {
    state
        .errors_for(field)
        .map(|e| {
            format!(
                r#"<p class="field-error" id="contact-{field}-error" role="alert">{} {}</p>"#,
                esc(prefix),
                esc(&e.message)
            )
        })
        .collect()
}

fn input(
    state: &FormState,
    field: &str,
    label: &str,
    kind: &str,
    value: &str,
    required: bool,
    autocomplete: &str,
) -> String {
    let star = if required {
        r#" <span class="required">*</span>"#
    } else {
        ""
    };
    let req = if required {
        r#" required aria-required="true""#
    } else {
        ""
    };
    let invalid = if state.errors_for(field).next().is_some() {
        format!(r#" aria-invalid="true" aria-describedby="contact-{field}-error""#)
    } else {
        String::new()
    };
    format!(
        concat!(
            r#"<div class="field"><label for="contact-{field}">{label}{star}</label>"#,
            r#"<input id="contact-{field}" name="{field}" type="{kind}" value="{value}" autocomplete="{ac}"{req}{invalid}>"#,
            r#"{errors}</div>"#
        ),
        field = field,
        label = esc(label),
        star = star,
        kind = kind,
        value = attr(value),
        ac = autocomplete,
        req = req,
        invalid = invalid,
        errors = field_errors(state, field, label),
    )
}

/// The contact card for the given submission state.
///
/// `Succeeded` replaces the form with a confirmation; every other state renders
/// the form with `fields` echoed back and errors next to their inputs.
pub fn contact_form(state: &FormState, fields: &ContactFields) -> String {
    if matches!(state, FormState::Succeeded) {
        let body = format!(
            concat!(
                r#"<div class="contact-success" role="status">{check}"#,
                r#"<h3>Message Sent!</h3>"#,
                r#"<p>Thank you for reaching out. I'll get back to you as soon as possible.</p>"#,
                r#"{again}</div>"#
            ),
            check = CHECK_SVG,
            again = pill_link("/contact", "Send Another Message", false),
        );
        return card("contact-card", &body);
    }

    let submitting = state.is_submitting();
    let label = if submitting { "Sending..." } else { "Send Message" };
    let form_errors: String = state
        .form_errors()
        .map(|e| format!(r#"<p class="form-error" role="alert">{}</p>"#, esc(&e.message)))
        .collect();

    let message_invalid = if state.errors_for("message").next().is_some() {
        r#" aria-invalid="true" aria-describedby="contact-message-error""#
    } else {
        ""
    };

    let body = format!(
        concat!(
            r#"<h2>Send a Message</h2>"#,
            r#"<form class="contact-form" method="post" action="/contact">"#,
            "{name}{email}{subject}",
            r#"<div class="field"><label for="contact-message">Message <span class="required">*</span></label>"#,
            r#"<textarea id="contact-message" name="message" rows="6" required aria-required="true"{message_invalid}>{message}</textarea>"#,
            r#"{message_errors}</div>"#,
            "{button}{form_errors}",
            r#"</form>"#
        ),
        name = input(state, "name", "Name", "text", &fields.name, true, "name"),
        email = input(state, "email", "Email", "email", &fields.email, true, "email"),
        subject = input(state, "subject", "Subject", "text", &fields.subject, false, "off"),
        message_invalid = message_invalid,
        message = esc(&fields.message),
        message_errors = field_errors(state, "message", "Message"),
        button = pill_button(label, ButtonType::Submit, submitting),
        form_errors = form_errors,
    );
    card("contact-card", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldError;

    #[test]
    fn idle_form_is_empty_and_enabled() {
        let html = contact_form(&FormState::Idle, &ContactFields::default());
        assert!(html.contains(r#"name="email" type="email" value="""#));
        assert!(html.contains("Send Message</button>"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn submitting_disables_button() {
        let html = contact_form(&FormState::Submitting, &ContactFields::default());
        assert!(html.contains(r#"type="submit" disabled>Sending...</button>"#));
    }

    #[test]
    fn failed_state_places_error_next_to_email_input() {
        let state = FormState::Failed(vec![FieldError::field("email", "should be an email")]);
        let fields = ContactFields {
            name: "Ana".into(),
            email: "nope".into(),
            subject: String::new(),
            message: "Hi <there>".into(),
        };
        let html = contact_form(&state, &fields);
        let input_at = html.find(r#"id="contact-email""#).unwrap();
        let err_at = html.find("Email should be an email").unwrap();
        let next_field = html.find(r#"id="contact-subject""#).unwrap();
        assert!(input_at < err_at && err_at < next_field);
        assert!(html.contains(r#"value="nope""#));
        assert!(html.contains("Hi &lt;there&gt;</textarea>"));
    }

    #[test]
    fn generic_failure_shows_form_error() {
        let state = FormState::Failed(vec![FieldError::form("Try later")]);
        let html = contact_form(&state, &ContactFields::default());
        assert!(html.contains(r#"<p class="form-error" role="alert">Try later</p>"#));
        assert!(!html.contains("Message Sent!"));
    }

    #[test]
    fn success_replaces_form() {
        let html = contact_form(&FormState::Succeeded, &ContactFields::default());
        assert!(html.contains("Message Sent!"));
        assert!(!html.contains("<form"));
    }
}
