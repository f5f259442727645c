pub mod error;
mod flat;
pub mod metric;
mod snapshot;
pub mod store;

/// Durable integer key for one registered face.
pub type IdentityId = u32;

pub use error::StoreError;
pub use metric::{Metric, cosine_distance, euclidean_distance};
pub use store::{FaceStore, SearchHit, StoreConfig};
