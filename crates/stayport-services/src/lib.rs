//! Stayport submission and review services.
//!
//! The pieces between the form surface and the HTTP client: the local draft
//! store, image-slot resolution, the submission pipeline with its
//! post-update reconciliation, the administrator review workflow, and the
//! merchant list view.

pub mod draft;
pub mod guard;
pub mod merchant;
pub mod pipeline;
pub mod review;
pub mod uploader;

pub use draft::DraftStore;
pub use guard::NavigationGuard;
pub use merchant::{merchant_hotel_rows, MerchantHotelRow};
pub use pipeline::{
    build_payload, reconcile, SubmissionOutcome, SubmissionPhase, SubmissionPipeline,
};
pub use review::ReviewWorkflow;
pub use uploader::{resolve_images, ImageUploader, ResolvedImages};
