//! Form state for product mutations.
//!
//! Forms hold what the user typed and turn it into validated DTOs and
//! request payloads on submit.

mod create;
mod image_source;
mod payload;
mod update;

pub use create::{parse_price, CreateProductForm};
pub use image_source::{ImageSourceSelector, PendingImage};
pub use payload::{update_needs_multipart, Payload, IMAGE_FIELD, REMOTE_IMAGE_FIELD};
pub use update::{UpdateProductForm, UpdateSubmission};
