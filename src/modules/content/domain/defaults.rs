// src/modules/content/domain/defaults.rs
//
// Built-in content used to seed the store before the first successful
// fetch, and to keep individual slots populated when a fetch fails. The
// public site should never render an empty shell because of a network blip.

use crate::content::domain::entities::{
    ContactInfo, ExperienceStats, Profile, Project, Service, SocialLinks,
};
use crate::timeline::domain::entities::{TimelineEntry, TimelineKind};

pub fn default_profile() -> Profile {
    Profile {
        name: "Your Name".to_string(),
        role: "Full-Stack Developer".to_string(),
        bio: "I build modern, scalable web applications with a focus on clean code and good user experience.".to_string(),
        about_me: "I'm a dedicated full-stack developer who enjoys solving problems, improving UI/UX, and continuously learning new technologies.".to_string(),
        about_home: [
            "I build modern, scalable web applications with a focus on clean code and good user experience.".to_string(),
            "On the backend I design secure APIs; on the frontend I build fast, user-friendly interfaces.".to_string(),
            "I enjoy shipping real products, optimizing performance, and learning new architecture.".to_string(),
        ],
        image: String::new(),
        logo: None,
        social: SocialLinks {
            linkedin: "https://linkedin.com".to_string(),
            github: "https://github.com".to_string(),
        },
        tech_stack: vec![
            "JavaScript".to_string(),
            "TypeScript".to_string(),
            "React".to_string(),
            "Node.js".to_string(),
            "MongoDB".to_string(),
        ],
        badges: vec!["Open Source Contributor".to_string(), "Tech Blogger".to_string()],
        show_project_intro: true,
    }
}

pub fn default_services() -> Vec<Service> {
    vec![
        Service {
            icon_name: "FaCode".to_string(),
            title: "Frontend Development".to_string(),
            description: "Responsive, interactive UIs with modern frameworks".to_string(),
        },
        Service {
            icon_name: "FaServer".to_string(),
            title: "Backend Development".to_string(),
            description: "Robust APIs and server-side logic".to_string(),
        },
        Service {
            icon_name: "FaCloud".to_string(),
            title: "Cloud Deployment".to_string(),
            description: "Deployment, CDNs and CI/CD pipelines".to_string(),
        },
    ]
}

pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: None,
            title: "Festival Management Platform".to_string(),
            description: "End-to-end platform for managing submissions, entries and contests.".to_string(),
            image: "https://via.placeholder.com/800x600".to_string(),
            demo_link: "https://example.com".to_string(),
            repo_link: String::new(),
            tech: vec![],
        },
        Project {
            id: None,
            title: "Streaming Discovery Hub".to_string(),
            description: "Centralized discovery and comparison platform for streaming services.".to_string(),
            image: "https://via.placeholder.com/800x600".to_string(),
            demo_link: "https://example.com".to_string(),
            repo_link: String::new(),
            tech: vec![],
        },
    ]
}

pub fn default_contact() -> ContactInfo {
    ContactInfo {
        email: "hello@example.com".to_string(),
        phone: "+1 555 000 0000".to_string(),
        location: "Somewhere, Earth".to_string(),
    }
}

pub fn default_experience_stats() -> ExperienceStats {
    ExperienceStats {
        projects_completed: "3+".to_string(),
        technologies: "14+".to_string(),
        years_experience: "2+".to_string(),
    }
}

pub fn default_timeline() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new(
            TimelineKind::Experience,
            "Mar 2025 - PRESENT",
            "Full Stack Developer",
            "Acme Studio",
            "Building and operating the product end to end.",
        ),
        TimelineEntry::new(
            TimelineKind::Education,
            "Aug 2020 - May 2024",
            "BE in Computer Science",
            "State University",
            "Computer Science and Engineering.",
        ),
    ]
}
