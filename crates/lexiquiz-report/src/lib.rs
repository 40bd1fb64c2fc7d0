//! lexiquiz-report: rendering of finished quiz sessions.

pub mod html;
pub mod links;
