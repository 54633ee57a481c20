// Command handlers module
pub mod alerts;
pub mod configure;
pub mod metrics;
pub mod run;

// Re-exports for cleaner imports
pub use metrics::execute as metrics;
pub use run::execute as run;
