//! Subflow - transcription and translation runs for uploaded media
//!
//! This library crate exposes the collaborators and commands behind the
//! `subflow` binary for integration testing.

pub mod aws;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod event;
pub mod orchestrator;
pub mod storage;
