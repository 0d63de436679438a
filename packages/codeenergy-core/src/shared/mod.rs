//! Shared types used across feature slices

pub mod models;
