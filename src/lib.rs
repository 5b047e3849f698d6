pub mod assembler;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod extract;
pub mod firecrawl;
pub mod gemini;
pub mod layouts;
pub mod models;
pub mod pipeline;
pub mod planner;
pub mod sanitize;

pub use assembler::{Assembler, PublishedPresentation};
pub use client::{AlaiClient, PresentationService};
pub use config::Config;
pub use errors::{PresenterError, Result};
pub use models::content::NormalizedContent;
pub use models::slide::{LayoutKind, SlideDescriptor};
pub use pipeline::{Pipeline, PlannerKind};
