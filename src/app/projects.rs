use leptos::prelude::*;

use super::effects::Tilt;
use crate::content::Project;
use crate::motion::ProjectFilter;

fn filter_label(filter: &ProjectFilter) -> String {
    let key = filter.key();
    let mut chars = key.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn Projects(projects: Vec<Project>, filters: Vec<ProjectFilter>) -> impl IntoView {
    let (filter, set_filter) = signal(ProjectFilter::All);

    view! {
        <div class="project-filters">
            {filters
                .into_iter()
                .map(|f| {
                    let label = filter_label(&f);
                    let key = f.key().to_string();
                    let this = f.clone();
                    view! {
                        <button
                            class="filter-btn"
                            data-filter=key
                            class:active=move || filter.with(|current| *current == this)
                            on:click=move |_| {
                                log::debug!("filtering projects by {f}");
                                set_filter.set(f.clone());
                            }
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
        <div class="project-grid">
            {projects
                .into_iter()
                .map(|project| {
                    let category = project.category.clone();
                    let shown = Signal::derive(move || filter.with(|f| f.matches(&category)));
                    view! { <ProjectCard project shown /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn ProjectCard(project: Project, shown: Signal<bool>) -> impl IntoView {
    let Project {
        title,
        description,
        category,
        tags,
        url,
        coming_soon,
    } = project;

    view! {
        <Tilt class="project-card-wrapper" disabled=coming_soon>
            <article
                class="project-card"
                class:coming-soon=coming_soon
                class:hidden=move || !shown.get()
                class:fade-in=move || shown.get()
                data-category=category
            >
                <h3 class="project-title">{title}</h3>
                <p class="project-description">{description}</p>
                <div class="project-tags">
                    {tags
                        .into_iter()
                        .map(|tag| view! { <span class="tag">{tag}</span> })
                        .collect_view()}
                </div>
                {if coming_soon {
                    Some(view! { <span class="badge">"Coming soon"</span> }.into_any())
                } else {
                    url.map(|href| {
                        view! {
                            <a
                                href=href
                                target="_blank"
                                rel="noopener noreferrer"
                                class="project-link"
                            >
                                "View project →"
                            </a>
                        }
                            .into_any()
                    })
                }}
            </article>
        </Tilt>
    }
}
