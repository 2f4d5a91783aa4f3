//! Cross-cutting helpers.

pub mod datetime;
