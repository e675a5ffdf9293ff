//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! unsatisfiable step graphs, an exhausted search budget, malformed templates, invalid
//! configuration, and priority queue underflow.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("no pad assignment satisfies the constraints around vertex {vertex}")]
    Unsatisfiable { vertex: usize },

    #[error("coloring search gave up after {steps} steps")]
    SearchExhausted { steps: usize },

    #[error("malformed template: {0}")]
    MalformedTemplate(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("priority queue is empty")]
    QueueUnderflow,
}
