//! Media upload gateway.
//!
//! Uploaded request files are first staged on local disk ([`temp`]), then
//! pushed to an external media host through the [`store::MediaStore`]
//! trait. The HTTP provider talks to a Cloudinary-style unsigned-upload
//! endpoint; the local provider backs development and tests.

pub mod store;
pub mod temp;

pub use store::{
    HttpMediaStore, LocalMediaStore, MediaConfig, MediaStore, UploadError, UploadedMedia,
};
pub use temp::StagedFiles;
