//! Rubric scoring and recommendation engine for self-assessment worksheets.
//!
//! The host application owns HTTP, persistence, and rendering; this crate turns a
//! free-text [`assessment::Submission`] into a bounded, tiered
//! [`assessment::AnalysisResult`] and offers synthetic analytics for demo charts.

pub mod analytics;
pub mod assessment;
pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use service::AssessmentService;
