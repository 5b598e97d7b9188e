//! artpivot - art history catalogue and lecture-note extraction service.
//!
//! Keeps a catalogue of art periods and artworks, lays them out on a
//! timeline, and turns lecture notes into artwork suggestions with a local
//! parser backed by an OpenAI-compatible model.

pub mod cli;
pub mod config;
pub mod extraction;
pub mod llm;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
pub mod timeline;
