//! Draftflow - Conversational Tech-Blog Drafting Assistant
//!
//! This crate implements a confirmation-gated step pipeline that collects a
//! blog topic, keywords, style, structure and subtitles through conversation,
//! drafts each section via a text generation service, and assembles the final
//! Markdown document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
