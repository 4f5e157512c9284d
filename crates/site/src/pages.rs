//! Portfolio pages. Each hosts a terminal started at the page path.

use std::rc::Rc;

use leptos::*;
use leptos_router::A;
use portfolio_app_terminal::{browser_ports, TerminalApp};
use terminal_shell::{Command, ShellPorts};

use crate::{
    commands::{
        contact_commands, home_commands, project_commands, skill_commands, CONTACT_EMAIL,
        CONTACT_GITHUB, PROJECTS, SKILL_GROUPS,
    },
    navigation::RouterNavigation,
};

fn site_ports() -> ShellPorts {
    ShellPorts {
        router: Rc::new(RouterNavigation::from_router()),
        ..browser_ports()
    }
}

#[component]
fn PageTerminal(path: &'static str, commands: Vec<Command>) -> impl IntoView {
    view! {
        <div class="page-terminal">
            <TerminalApp initial_path=path commands=commands ports=site_ports() />
        </div>
    }
}

#[component]
fn PageHeader(title: &'static str, tagline: &'static str) -> impl IntoView {
    view! {
        <header class="page-header">
            <h1>{title}</h1>
            <p class="page-tagline">{tagline}</p>
        </header>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="page page-home">
            <PageHeader title="Developer Portfolio" tagline="A neo-brutalist CLI-inspired showcase" />
            <PageTerminal path="/" commands=home_commands() />
            <h2>"Featured Projects"</h2>
            <ul class="project-grid">
                {PROJECTS
                    .iter()
                    .map(|project| view! {
                        <li class="brutalist-card">
                            <h3>{project.name}</h3>
                            <p class="project-stack">{project.stack}</p>
                        </li>
                    })
                    .collect_view()}
            </ul>
            <p class="page-tip">
                "Pro tip: type 'education' or 'experience' in the terminal, or 'cd projects' to see more."
            </p>
        </section>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="page page-about">
            <PageHeader title="About Me" tagline="Get to know the developer behind the code" />
            <PageTerminal path="/about" commands=Vec::new() />
            <p>
                "Frontend-leaning full stack developer who likes fast feedback loops, typed APIs, and interfaces that feel like tools."
            </p>
        </section>
    }
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    view! {
        <section class="page page-projects">
            <PageHeader title="Projects" tagline="Showcasing my best work" />
            <PageTerminal path="/projects" commands=project_commands() />
            {PROJECTS
                .iter()
                .map(|project| view! {
                    <article class="brutalist-card project-card">
                        <h2>{project.name}</h2>
                        <p class="project-stack">{project.stack}</p>
                        <p>{project.summary}</p>
                    </article>
                })
                .collect_view()}
            <p class="page-tip">"Pro tip: type 'projects -l' in the terminal for a detailed list."</p>
        </section>
    }
}

#[component]
pub fn SkillsPage() -> impl IntoView {
    view! {
        <section class="page page-skills">
            <PageHeader title="Skills" tagline="Technical expertise and capabilities" />
            <PageTerminal path="/skills" commands=skill_commands() />
            <div class="skill-grid">
                {SKILL_GROUPS
                    .iter()
                    .map(|(group, skills)| view! {
                        <div class="brutalist-card">
                            <h2>{*group}</h2>
                            <ul>
                                {skills.iter().map(|skill| view! { <li>{*skill}</li> }).collect_view()}
                            </ul>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <section class="page page-contact">
            <PageHeader title="Contact" tagline="Let's build something together" />
            <PageTerminal path="/contact" commands=contact_commands() />
            <dl class="contact-list">
                <dt>"Email"</dt>
                <dd>{CONTACT_EMAIL}</dd>
                <dt>"GitHub"</dt>
                <dd>{CONTACT_GITHUB}</dd>
            </dl>
        </section>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="page page-not-found">
            <PageHeader title="404" tagline="Directory not found" />
            <A href="/">"Return home"</A>
        </section>
    }
}
