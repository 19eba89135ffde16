use std::time::Duration;

use leptos::prelude::*;

const HIDE_AFTER: Duration = Duration::from_millis(500);

fn release_scroll() {
    if let Some(body) = document().body() {
        if let Err(e) = body.style().set_property("overflow", "auto") {
            log::warn!("couldn't restore page scroll: {e:?}");
        }
    }
}

/// Full-page loader shown until the app has hydrated.
#[component]
pub fn Preloader() -> impl IntoView {
    let (hidden, set_hidden) = signal(false);
    Effect::new(move |_| {
        set_timeout(
            move || {
                set_hidden.set(true);
                release_scroll();
            },
            HIDE_AFTER,
        );
    });

    view! {
        <div id="preloader" class:hidden=move || hidden.get()>
            <div class="loader"></div>
        </div>
    }
}
