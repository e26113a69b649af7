//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutation, view capture/restore, and persistence.
//! - Keep host adapters decoupled from storage details.

pub mod notes_service;
