use std::fmt::Debug;

use schemars::JsonSchema;
use serde::Serialize;
pub use serde_with;
use utility::id::{HasId, Id};

pub mod asset;
pub mod geofence;
pub mod point;

/// Fixed data the product ships with. A session starts from the seed set
/// and keeps everything in memory until reload.
pub trait SeedData: Sized + HasId
where
    Self::IdType: Serialize + Debug + Clone,
{
    fn seed_data() -> Vec<WithId<Self>>;
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
