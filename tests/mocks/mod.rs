//! Mock servers for integration tests

pub mod gemini;
