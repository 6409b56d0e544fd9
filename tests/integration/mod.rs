//! Integration test modules

mod data;
mod health;
mod proxy;
mod streaming;
