//! # Remote catalog port
//!
//! All persistent state lives on the external API server; this module is
//! the seam the rest of the crate talks to it through. The [`RemoteStore`]
//! trait mirrors the consumed REST contract one method per endpoint:
//!
//! - `authenticate`      -> `PATCH /users/auth`
//! - `list_medicines`    -> `GET /medicines?page=&pageSize=`
//! - `search_medicines`  -> `PATCH /medicines/search`
//! - `get_medicine`      -> `GET /medicines/{id}`
//! - `update_medicine`   -> `PATCH /medicines/{id}`
//! - `update_leaflet`    -> `PATCH /medicines/{id}/leaflet`
//! - `list_photos`       -> `GET /medicines/{id}/photos`
//! - `upload_photo`      -> `POST /medicines/{id}/photos`
//! - `delete_photo`      -> `PATCH /medicines/photos`
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: production client over reqwest
//! - [`memory::InMemoryStore`]: seedable fake with failure injection,
//!   used by the command-layer tests
//!
//! Implementations must be `Sync`: the dual-request save runs two calls
//! from scoped threads against the same store.

use crate::error::Result;
use crate::model::{BasicFields, LeafletData, MedicineDetail, MedicineSummary, Photo};
use std::path::Path;

pub mod http;
pub mod memory;

pub trait RemoteStore: Sync {
    /// Exchange credentials for a session token.
    fn authenticate(&self, email: &str, password: &str) -> Result<String>;

    /// Fetch one page of the catalog listing.
    fn list_medicines(&self, page: usize, page_size: usize) -> Result<Vec<MedicineSummary>>;

    /// Lookup medicines by name. Not paginated.
    fn search_medicines(&self, name: &str) -> Result<Vec<MedicineSummary>>;

    fn get_medicine(&self, id: &str) -> Result<MedicineDetail>;

    /// Patch the basic fields (name, description, registry code).
    fn update_medicine(&self, id: &str, fields: &BasicFields) -> Result<()>;

    /// Patch all seven leaflet sections at once.
    fn update_leaflet(&self, id: &str, leaflet: &LeafletData) -> Result<()>;

    fn list_photos(&self, id: &str) -> Result<Vec<Photo>>;

    fn upload_photo(&self, id: &str, file: &Path) -> Result<()>;

    /// Delete a photo by its server-assigned key (never by url).
    fn delete_photo(&self, key: &str) -> Result<()>;
}
