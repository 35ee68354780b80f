//! Personal artwork galleries persisted in a local JSON file.
//!
//! ```ignore
//! use mindfulart_gallery::GalleryStore;
//!
//! let mut store = GalleryStore::open_default()?;
//! let gallery = store.create_gallery("Dutch Masters", "")?;
//! store.add_artwork(&gallery.id, artwork)?;
//! ```

pub mod error;
pub mod store;

pub use error::{GalleryError, GalleryResult};
pub use store::{DEFAULT_GALLERY_DESCRIPTION, DEFAULT_GALLERY_NAME, Gallery, GalleryStore};
