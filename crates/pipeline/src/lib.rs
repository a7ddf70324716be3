//! Client-side studio state and the per-image enhancement pipeline.
//!
//! - [`UploadQueue`]: identity-keyed queue of image records.
//! - [`BrandingStore`] / [`LogoRegistry`]: branding settings and logos.
//! - [`Pipeline`]: one enhancement round-trip for one record.
//! - [`Studio`]: facade tying them together, with "process all" fan-out.
//! - [`ResultExporter`]: saves completed results to disk.

pub mod branding;
pub mod events;
pub mod export;
pub mod processor;
pub mod queue;
pub mod studio;

pub use branding::{BrandingStore, LogoRegistry};
pub use events::StudioEvent;
pub use export::{ExportError, ResultExporter};
pub use processor::{DispatchContext, Pipeline, PipelineError};
pub use queue::{NewUpload, UploadQueue};
pub use studio::{join_dispatched, Dispatched, Studio};
