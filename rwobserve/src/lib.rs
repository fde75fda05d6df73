//! Production-friendly observability hooks for the engine client and the
//! session pipeline.
//!
//! ```rust
//! use rwobserve::{MetricsObservabilityHooks, SafePipelineHooks, TracingObservabilityHooks};
//!
//! let _pipeline_hooks = SafePipelineHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeEngineHooks, SafePipelineHooks, SafeSessionObserver};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeEngineHooks, SafePipelineHooks, SafeSessionObserver,
        TracingObservabilityHooks,
    };
}
