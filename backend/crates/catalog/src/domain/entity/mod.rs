//! Entity Module

pub mod movie;
pub mod rating;
