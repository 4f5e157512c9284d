//! Page-specific terminal commands and the portfolio content they print.

use terminal_shell::{contract::CommandOutput, Command};

/// One showcased project.
pub(crate) struct Project {
    pub name: &'static str,
    pub stack: &'static str,
    pub summary: &'static str,
}

pub(crate) const PROJECTS: &[Project] = &[
    Project {
        name: "E-commerce Platform",
        stack: "React, Node.js, MongoDB, Redux",
        summary: "Real-time inventory management, customer analytics and a custom CMS.",
    },
    Project {
        name: "Analytics Dashboard",
        stack: "Next.js, D3.js, GraphQL, AWS",
        summary: "Customizable widgets, data visualization and automated reporting.",
    },
    Project {
        name: "Content Management System",
        stack: "TypeScript, PostgreSQL, Express, React",
        summary: "Role-based access control, content versioning and flexible content models.",
    },
];

/// Skill groups shown on the skills page.
pub(crate) const SKILL_GROUPS: &[(&str, &[&str])] = &[
    ("Frontend", &["React", "TypeScript", "Next.js", "Tailwind CSS"]),
    ("Backend", &["Node.js", "Express", "PostgreSQL", "MongoDB"]),
    ("DevOps", &["Docker", "AWS", "CI/CD", "Git"]),
];

pub(crate) const CONTACT_EMAIL: &str = "hello@example.dev";
pub(crate) const CONTACT_GITHUB: &str = "github.com/example";

const EDUCATION: &str = "2015-2019: B.S. Computer Science, Tech University
2019-2021: M.S. Software Engineering, Code Academy
Certifications: AWS Solutions Architect, Google Cloud Professional Developer";

const EXPERIENCE: &str = "2021-Present: Senior Frontend Developer at TechCorp
- Led a team of 5 developers to rebuild the company's flagship product
- Implemented CI/CD pipeline reducing deployment time by 70%
- Mentored junior developers and conducted code reviews

2019-2021: Full Stack Developer at StartupXYZ
- Developed user-facing features with React and TypeScript
- Built RESTful APIs using Node.js and Express
- Implemented database models with MongoDB and PostgreSQL";

/// Commands for the home page.
pub fn home_commands() -> Vec<Command> {
    vec![
        Command::text("education", "Show education history", EDUCATION),
        Command::text("experience", "Show work experience", EXPERIENCE),
    ]
}

/// Commands for the projects page.
pub fn project_commands() -> Vec<Command> {
    vec![Command::sync("projects", "List featured projects", |context| {
        let detailed = context.arg(0).is_some_and(|arg| arg == "-l");
        Ok(CommandOutput::lines(PROJECTS.iter().map(|project| {
            if detailed {
                format!("{} [{}]\n  {}", project.name, project.stack, project.summary)
            } else {
                project.name.to_string()
            }
        })))
    })]
}

/// Commands for the skills page.
pub fn skill_commands() -> Vec<Command> {
    vec![Command::sync("skills", "List technical skills by area", |_| {
        Ok(CommandOutput::lines(SKILL_GROUPS.iter().map(|(group, skills)| {
            format!("{:<10} {}", format!("{group}:"), skills.join(", "))
        })))
    })]
}

/// Commands for the contact page.
pub fn contact_commands() -> Vec<Command> {
    vec![Command::text(
        "contact",
        "Show contact details",
        format!("Email:  {CONTACT_EMAIL}\nGitHub: {CONTACT_GITHUB}"),
    )]
}
