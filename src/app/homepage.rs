use chrono::prelude::*;
use leptos::{either::Either, prelude::*};
use leptos_meta::Title;

use super::contact::ContactSection;
use super::effects::{CountUp, CursorGlow, Magnetic, Parallax, Reveal, SkillBar, Tilt};
use super::header::{AnchorLink, BackToTop, Header, PageNav, PageSection};
use super::projects::Projects;
use super::scramble_text::ScrambleText;
use crate::content::{site, SiteContent};

#[component]
pub fn HomePage() -> impl IntoView {
    match site() {
        Ok(site) => Either::Left(view! { <Portfolio site /> }),
        Err(e) => {
            log::error!("{e}");
            Either::Right(view! { <div class="content-error">{e.to_string()}</div> })
        }
    }
}

#[component]
fn Portfolio(site: &'static SiteContent) -> impl IntoView {
    let nav = PageNav::new();

    view! {
        <Title text=site.title.clone() />
        <Header name=site.name.clone() sections=site.sections.clone() nav />
        <main>
            <PageSection nav id="home" class="hero">
                <Parallax>
                    <h1 class="hero-title">
                        "Hi, I'm " <span class="highlight">{site.name.clone()}</span>
                    </h1>
                    <h2 class="hero-subtitle">
                        <ScrambleText phrases=site.hero_phrases.clone() />
                    </h2>
                    <div class="hero-buttons">
                        <Magnetic>
                            <AnchorLink nav href="#projects" class="btn btn-primary">
                                "View My Work"
                            </AnchorLink>
                        </Magnetic>
                        <Magnetic>
                            <AnchorLink nav href="#contact" class="btn btn-outline-primary">
                                "Get In Touch"
                            </AnchorLink>
                        </Magnetic>
                    </div>
                </Parallax>
            </PageSection>
            <PageSection nav id="about" class="container">
                <Reveal>
                    <h2 class="section-title">"About Me"</h2>
                    {site
                        .about
                        .iter()
                        .map(|p| view! { <p class="lead">{p.clone()}</p> })
                        .collect_view()}
                </Reveal>
                <div class="stats">
                    {site
                        .stats
                        .iter()
                        .map(|stat| {
                            view! {
                                <div class="stat">
                                    <CountUp target=stat.value />
                                    <div class="stat-label">{stat.label.clone()}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </PageSection>
            <PageSection nav id="skills" class="container">
                <Reveal>
                    <h2 class="section-title">"Skills"</h2>
                </Reveal>
                <div class="skill-grid">
                    {site
                        .skill_groups()
                        .into_iter()
                        .map(|(group, skills)| {
                            view! {
                                <Tilt class="skill-card">
                                    <h3>{group}</h3>
                                    {skills
                                        .into_iter()
                                        .map(|skill| view! { <SkillBar skill /> })
                                        .collect_view()}
                                </Tilt>
                            }
                        })
                        .collect_view()}
                </div>
            </PageSection>
            <PageSection nav id="projects" class="container">
                <Reveal>
                    <h2 class="section-title">"Projects"</h2>
                </Reveal>
                <Projects projects=site.projects.clone() filters=site.filters() />
            </PageSection>
            <PageSection nav id="contact" class="container">
                <Reveal>
                    <h2 class="section-title">"Get In Touch"</h2>
                </Reveal>
                <ContactSection email=site.email.clone() />
            </PageSection>
        </main>
        <Footer name=site.name.clone() />
        <BackToTop />
        <CursorGlow />
    }
}

#[component]
fn Footer(name: String) -> impl IntoView {
    let year = Utc::now().year();
    let built = DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.format("%b %e %Y").to_string())
        .unwrap_or_default();

    view! {
        <footer class="footer">
            <p>"© " <span id="currentYear">{year}</span> " " {name}</p>
            <p class="text-muted">"Last built " {built}</p>
        </footer>
    }
}
