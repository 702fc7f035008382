// src/types/mod.rs
pub mod resume_data;

pub use resume_data::{
    Certification, Demographics, Education, Experience, Language, Personal, Project, ResumeData,
    Skill,
};
