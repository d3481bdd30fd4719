//! Chordal Core Types and Definitions
//!
//! This crate provides the foundational types for Chordal chord diagram
//! layouts. It includes:
//!
//! - **Model**: The validated data model of labeled, grouped entities and
//!   their pairwise strengths ([`model::ChordData`])
//! - **Geometry**: Points and angle helpers for circular layouts ([`geometry`] module)

pub mod geometry;
pub mod model;
