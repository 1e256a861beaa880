pub mod content_gateway;

pub use content_gateway::{
    AboutDocument, AboutPatch, ContactMessage, ContentGateway, ProjectPayload, ProjectRecord,
    SkillGroups, SkillRecord,
};
