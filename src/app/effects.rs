use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use leptos::{html, prelude::*};
use leptos_use::{
    use_intersection_observer_with_options, use_media_query, use_mouse, use_mouse_in_element,
    use_raf_fn_with_options, use_timeout_fn, use_window_scroll, utils::Pausable,
    UseIntersectionObserverOptions, UseIntersectionObserverReturn, UseMouseInElementReturn,
    UseMouseReturn, UseRafFnOptions, UseTimeoutFnReturn,
};

use crate::content::Skill;
use crate::motion::{
    magnetic_transform, parallax_transform, skill_width, tilt_transform, Counter, CounterTick,
    PointerInElement, DEFAULT_COUNTER_DURATION_MS, DEFAULT_PARALLAX_SPEED,
};

const DESKTOP_QUERY: &str = "(hover: hover) and (pointer: fine)";
const HOVER_QUERY: &str = "(hover: hover)";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

const REVEAL_MARGIN: &str = "0px 0px -100px 0px";
const REVEAL_THRESHOLD: f64 = 0.1;
const SKILL_BAR_THRESHOLD: f64 = 0.5;
const SKILL_BAR_DELAY: Duration = Duration::from_millis(200);
const CURSOR_IDLE_MS: f64 = 1000.0;

/// Flips to `true` the first time `target` intersects the viewport, then
/// stops observing.
fn use_seen_once(target: NodeRef<html::Div>, root_margin: &str, threshold: f64) -> ReadSignal<bool> {
    let (seen, set_seen) = signal(false);
    let UseIntersectionObserverReturn { stop, .. } = use_intersection_observer_with_options(
        target,
        move |entries, _| {
            if entries.iter().any(|e| e.is_intersecting()) {
                set_seen.set(true);
            }
        },
        UseIntersectionObserverOptions::default()
            .root_margin(root_margin.to_string())
            .thresholds(vec![threshold]),
    );
    Effect::watch(
        move || seen.get(),
        move |seen, _, _| {
            if *seen {
                stop();
            }
        },
        false,
    );
    seen
}

fn pointer_in(
    element_x: Signal<f64>,
    element_y: Signal<f64>,
    element_width: Signal<f64>,
    element_height: Signal<f64>,
) -> PointerInElement {
    PointerInElement {
        x: element_x.get(),
        y: element_y.get(),
        width: element_width.get(),
        height: element_height.get(),
    }
}

#[component]
pub fn Reveal(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let el = NodeRef::<html::Div>::new();
    let revealed = use_seen_once(el, REVEAL_MARGIN, REVEAL_THRESHOLD);
    view! {
        <div
            node_ref=el
            class=class
            class:reveal-hidden=move || !revealed.get()
            class:revealed=move || revealed.get()
        >
            {children()}
        </div>
    }
}

/// Progress bar that fills to the skill's level once half of it is visible.
#[component]
pub fn SkillBar(skill: Skill) -> impl IntoView {
    let el = NodeRef::<html::Div>::new();
    let seen = use_seen_once(el, "0px", SKILL_BAR_THRESHOLD);
    let (width, set_width) = signal(skill_width(0));
    let progress = skill.progress;
    Effect::watch(
        move || seen.get(),
        move |seen, _, _| {
            if *seen {
                set_timeout(move || set_width.set(skill_width(progress)), SKILL_BAR_DELAY);
            }
        },
        false,
    );

    view! {
        <div class="skill">
            <div class="skill-label">
                <span>{skill.name}</span>
                <span class="skill-value">{skill_width(progress)}</span>
            </div>
            <div class="skill-track" node_ref=el>
                <div class="skill-progress" data-progress=progress.to_string() style:width=move || width.get()></div>
            </div>
        </div>
    }
}

/// Counts up to `target` once scrolled into view.
#[component]
pub fn CountUp(
    target: u64,
    #[prop(default = DEFAULT_COUNTER_DURATION_MS)] duration_ms: f64,
) -> impl IntoView {
    let el = NodeRef::<html::Div>::new();
    let seen = use_seen_once(el, "0px", SKILL_BAR_THRESHOLD);
    let (shown, set_shown) = signal(0u64);
    let (done, set_done) = signal(false);
    let counter = Arc::new(Mutex::new(Counter::new(target, duration_ms)));

    let Pausable { pause, resume, .. } = use_raf_fn_with_options(
        move |_| {
            let tick = counter.lock().expect("should be able to lock counter").tick();
            match tick {
                CounterTick::Running(v) => set_shown.set(v),
                CounterTick::Done(v) => {
                    set_shown.set(v);
                    set_done.set(true);
                }
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    Effect::new(move |_| {
        if done.get() {
            pause();
        } else if seen.get() {
            resume();
        }
    });

    view! {
        <div class="counter" node_ref=el>
            {move || shown.get()}
        </div>
    }
}

/// Pulls its content toward the pointer on desktop devices.
#[component]
pub fn Magnetic(children: Children) -> impl IntoView {
    let el = NodeRef::<html::Div>::new();
    let desktop = use_media_query(DESKTOP_QUERY);
    let UseMouseInElementReturn {
        element_x,
        element_y,
        element_width,
        element_height,
        is_outside,
        ..
    } = use_mouse_in_element(el);
    let transform = move || {
        if !desktop.get() || is_outside.get() {
            return String::new();
        }
        magnetic_transform(pointer_in(element_x, element_y, element_width, element_height))
    };

    view! {
        <div class="magnetic" node_ref=el style:transform=transform>
            {children()}
        </div>
    }
}

/// Tilts its content in 3D following the pointer on desktop devices.
#[component]
pub fn Tilt(
    #[prop(optional, into)] class: String,
    #[prop(optional)] disabled: bool,
    children: Children,
) -> impl IntoView {
    let el = NodeRef::<html::Div>::new();
    let desktop = use_media_query(DESKTOP_QUERY);
    let UseMouseInElementReturn {
        element_x,
        element_y,
        element_width,
        element_height,
        is_outside,
        ..
    } = use_mouse_in_element(el);
    let transform = move || {
        if disabled || !desktop.get() || is_outside.get() {
            return String::new();
        }
        tilt_transform(pointer_in(element_x, element_y, element_width, element_height))
    };

    view! {
        <div class=class node_ref=el style:transform=transform>
            {children()}
        </div>
    }
}

#[component]
pub fn Parallax(
    #[prop(default = DEFAULT_PARALLAX_SPEED)] speed: f64,
    children: Children,
) -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    let reduced_motion = use_media_query(REDUCED_MOTION_QUERY);
    let transform = move || {
        if reduced_motion.get() {
            String::new()
        } else {
            parallax_transform(scroll_y.get(), speed)
        }
    };

    view! {
        <div class="parallax" style:transform=transform>
            {children()}
        </div>
    }
}

/// Soft glow following the pointer, fading out a second after it stops.
#[component]
pub fn CursorGlow() -> impl IntoView {
    let hover = use_media_query(HOVER_QUERY);
    let UseMouseReturn { x, y, .. } = use_mouse();
    let (active, set_active) = signal(false);
    let UseTimeoutFnReturn { start, .. } =
        use_timeout_fn(move |_: ()| set_active.set(false), CURSOR_IDLE_MS);
    Effect::watch(
        move || (x.get(), y.get()),
        move |_, _, _| {
            set_active.set(true);
            start(());
        },
        false,
    );

    view! {
        <Show when=move || hover.get()>
            <div
                class="cursor-glow"
                class:active=move || active.get()
                style:left=move || format!("{}px", x.get())
                style:top=move || format!("{}px", y.get())
            ></div>
        </Show>
    }
}
