// src/pipeline/mod.rs

pub mod engine;
pub mod metrics;

pub use engine::AebEngine;
pub use metrics::{PerformanceMetrics, PerformanceReport};
