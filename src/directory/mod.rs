//! Directory domain: agent profiles, scoring, and bulk import.

pub mod agents;
pub mod import;
