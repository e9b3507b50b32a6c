//! Testing utilities for Waypoint agents.
//!
//! Provides deterministic stand-ins for the two nondeterministic edges of
//! the reasoning loop: [`ScriptedModel`] replaces the model backend with a
//! scripted sequence of replies, and [`MockTool`] replaces real tools with
//! canned results. Both hand out cloneable handles that keep recording
//! after ownership moves into an agent or registry, so tests can assert on
//! call counts and inputs afterwards.

pub mod mock_model;
pub mod mock_tools;

pub use mock_model::ScriptedModel;
pub use mock_tools::MockTool;
