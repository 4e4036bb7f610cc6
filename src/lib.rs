//! AHP Sherpa - Conversational decision support core
//!
//! This crate implements the intent state machine of a chat bot that walks
//! a user through an Analytic Hierarchy Process: collecting options and
//! criteria, eliciting pairwise preferences, and reporting the ranking.
//!
//! The chat transport, session store and decision model sit behind ports
//! (`ports`); in-memory and mock adapters ship in `adapters`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
