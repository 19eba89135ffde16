use leptos::{
    either::Either,
    ev::{Event, FocusEvent, SubmitEvent},
    prelude::*,
};

use crate::contact::{ContactForm, Field, FieldError, SubmitState, SUBMIT_DELAY};

fn record(errors: RwSignal<Vec<FieldError>>, field: Field, result: Result<(), FieldError>) {
    errors.update(|errs| {
        errs.retain(|e| e.field() != field);
        if let Err(e) = result {
            errs.push(e);
        }
    });
}

#[component]
fn FormField(
    field: Field,
    label: &'static str,
    form: RwSignal<ContactForm>,
    errors: RwSignal<Vec<FieldError>>,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let error = move || {
        errors.with(|errs| {
            errs.iter()
                .find(|e| e.field() == field)
                .map(ToString::to_string)
        })
    };
    let value = move || form.with(|f| f.value(field).to_string());
    let on_input = move |ev: Event| {
        form.update(|f| f.set(field, event_target_value(&ev)));
        record(errors, field, Ok(()));
    };
    let on_blur = move |_: FocusEvent| {
        let result = form.with_untracked(|f| f.validate_field(field));
        record(errors, field, result);
    };

    let input = if multiline {
        Either::Left(view! {
            <textarea
                id=field.id()
                name=field.id()
                rows="5"
                required
                prop:value=value
                on:input=on_input
                on:blur=on_blur
            ></textarea>
        })
    } else {
        let kind = if field == Field::Email { "email" } else { "text" };
        Either::Right(view! {
            <input
                type=kind
                id=field.id()
                name=field.id()
                required
                prop:value=value
                on:input=on_input
                on:blur=on_blur
            />
        })
    };

    view! {
        <div class="form-group" class:error=move || error().is_some()>
            <label for=field.id()>{label}</label>
            {input}
            <span class="error-message">{error}</span>
        </div>
    }
}

/// Contact form with client-side validation and a simulated send.
#[component]
pub fn ContactSection(email: String) -> impl IntoView {
    let form = RwSignal::new(ContactForm::default());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let state = RwSignal::new(SubmitState::Editing);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.get_untracked().is_busy() {
            return;
        }
        let current = form.get_untracked();
        if let Err(errs) = current.validate() {
            errors.set(errs);
            return;
        }
        errors.set(Vec::new());
        state.set(SubmitState::Sending);
        log::debug!("sending contact form for {}", current.email);
        set_timeout(
            move || {
                form.set(ContactForm::default());
                state.set(SubmitState::Sent);
            },
            SUBMIT_DELAY,
        );
    };

    view! {
        <div class="contact">
            <p class="contact-intro">
                "Have a question or want to work together? Drop me a line or email "
                <a href=format!("mailto:{email}")>{email.clone()}</a>
                "."
            </p>
            <form
                id="contactForm"
                class="contact-form"
                class:submitted=move || state.get() == SubmitState::Sent
                novalidate
                on:submit=on_submit
            >
                <FormField field=Field::Name label="Name" form errors />
                <FormField field=Field::Email label="Email" form errors />
                <FormField field=Field::Message label="Message" form errors multiline=true />
                <button
                    type="submit"
                    class="btn btn-primary"
                    class:loading=move || state.get().is_busy()
                    disabled=move || state.get().is_busy()
                >
                    "Send Message"
                </button>
            </form>
            <div id="formSuccess" class="form-success" class:show=move || state.get() == SubmitState::Sent>
                "Thanks! Your message has been sent."
            </div>
        </div>
    }
}
