use leptos::{html, prelude::*};
use leptos_use::{
    use_intersection_observer_with_options, use_window_scroll, UseIntersectionObserverOptions,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::content::NavSection;
use crate::motion::{anchor_target, back_to_top_visible, navbar_scrolled, scroll_target};

/// Sections count as active while they cross the band between 20% and 30%
/// from the top of the viewport.
const ACTIVE_SECTION_MARGIN: &str = "-20% 0px -70% 0px";

/// Navigation state shared by the navbar, in-page links and sections.
#[derive(Debug, Clone, Copy)]
pub struct PageNav {
    pub active: RwSignal<Option<String>>,
    pub menu_open: RwSignal<bool>,
    pub navbar: NodeRef<html::Nav>,
}

impl Default for PageNav {
    fn default() -> Self {
        Self::new()
    }
}

impl PageNav {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            menu_open: RwSignal::new(false),
            navbar: NodeRef::new(),
        }
    }

    /// Smooth-scrolls to the section an in-page `href` points at, leaving
    /// room for the navbar, and closes the mobile menu.
    pub fn scroll_to(&self, href: &str) {
        let Some(id) = anchor_target(href) else {
            return;
        };
        let Some(target) = document()
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::debug!("no section with id {id}");
            return;
        };
        let navbar_height = self
            .navbar
            .get_untracked()
            .map(|nav| nav.offset_height() as f64)
            .unwrap_or_default();
        smooth_scroll_to(scroll_target(target.offset_top() as f64, navbar_height));
        if self.menu_open.get_untracked() {
            self.menu_open.set(false);
        }
    }
}

pub fn smooth_scroll_to(top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}

#[component]
pub fn AnchorLink(
    nav: PageNav,
    #[prop(into)] href: String,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] active: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let target = href.clone();
    view! {
        <a
            href=href
            class=class
            class:active=move || active.get()
            on:click=move |ev| {
                ev.prevent_default();
                nav.scroll_to(&target);
            }
        >
            {children()}
        </a>
    }
}

/// A page section that marks itself active in the navbar while in view.
#[component]
pub fn PageSection(
    nav: PageNav,
    #[prop(into)] id: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let el = NodeRef::<html::Section>::new();
    let section_id = id.clone();
    use_intersection_observer_with_options(
        el,
        move |entries, _| {
            if entries.iter().any(|e| e.is_intersecting()) {
                nav.active.set(Some(section_id.clone()));
            }
        },
        UseIntersectionObserverOptions::default()
            .root_margin(ACTIVE_SECTION_MARGIN.to_string())
            .thresholds(vec![0.0]),
    );

    view! {
        <section id=id class=class node_ref=el>
            {children()}
        </section>
    }
}

#[component]
pub fn Header(name: String, sections: Vec<NavSection>, nav: PageNav) -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();

    view! {
        <nav
            id="mainNav"
            node_ref=nav.navbar
            class="navbar"
            class:scrolled=move || navbar_scrolled(scroll_y.get())
        >
            <div class="container navbar-inner">
                <AnchorLink nav href="#home" class="navbar-brand">
                    {name}
                </AnchorLink>
                <button
                    class="navbar-toggler"
                    aria-label="Toggle navigation"
                    on:click=move |_| nav.menu_open.update(|open| *open = !*open)
                >
                    "☰"
                </button>
                <ul id="navbarNav" class="navbar-nav" class:show=move || nav.menu_open.get()>
                    {sections
                        .into_iter()
                        .map(|section| {
                            let href = format!("#{}", section.id);
                            let id = section.id;
                            let active = Signal::derive(move || {
                                nav.active.with(|a| a.as_deref() == Some(id.as_str()))
                            });
                            view! {
                                <li>
                                    <AnchorLink nav href class="nav-link" active>
                                        {section.label}
                                    </AnchorLink>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </nav>
    }
}

#[component]
pub fn BackToTop() -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    view! {
        <button
            id="backToTop"
            class="back-to-top"
            class:visible=move || back_to_top_visible(scroll_y.get())
            aria-label="Back to top"
            on:click=move |_| smooth_scroll_to(0.0)
        >
            "↑"
        </button>
    }
}
