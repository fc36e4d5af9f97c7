//! droidsign-core - Android release artifact signing
//!
//! This crate drives discovered APK/AAB release files through the standard
//! Android signing toolchain:
//! - APK: zipalign, then apksigner
//! - AAB: jarsigner, then zipalign
//!
//! It also covers the surrounding concerns a CI signing step needs: glob
//! discovery of release files, Android SDK / JDK toolchain resolution,
//! configuration loading, and the final report of signed paths.

pub mod artifact;
pub mod batch;
pub mod config;
pub mod credentials;
pub mod discovery;
pub mod error;
pub mod invoker;
pub mod paths;
pub mod pipeline;
pub mod report;
pub mod toolset;

pub use artifact::{ArtifactKind, ReleaseFile};
pub use batch::{BatchOrchestrator, BatchProgress};
pub use config::{Config, ToolOverrides};
pub use credentials::SigningCredentials;
pub use error::{Result, SigningError};
pub use invoker::{ProcessInvoker, ToolInvoker};
pub use pipeline::SigningPipeline;
pub use report::{SigningReport, SigningResult};
pub use toolset::BuildToolset;
