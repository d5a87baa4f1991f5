// src/models/mod.rs

pub mod feedback;
pub mod question;
pub mod rule;
