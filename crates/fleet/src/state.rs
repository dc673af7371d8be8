use indexmap::IndexMap;
use model::asset::TrackedAsset;
use model::geofence::Geofence;
use model::point::GeoPoint;
use model::{SeedData, WithId};
use utility::id::Id;

/// All tracked assets and fences of a session, keyed by id.
///
/// An index map keeps the seed order, which is also the display order of
/// the asset list.
#[derive(Debug, Default)]
pub struct FleetState {
    assets: IndexMap<Id<TrackedAsset>, TrackedAsset>,
    fences: Vec<WithId<Geofence>>,
}

impl FleetState {
    /// Starts a session from the shipped seed set.
    pub fn from_seed() -> Self {
        let mut state = Self::default();
        for asset in TrackedAsset::seed_data() {
            state.insert(asset);
        }
        state.fences = Geofence::seed_data();
        state
    }

    pub fn insert(&mut self, asset: WithId<TrackedAsset>) {
        self.assets.insert(asset.id, asset.content);
    }

    pub fn get(&self, id: &Id<TrackedAsset>) -> Option<&TrackedAsset> {
        self.assets.get(id)
    }

    pub fn assets(
        &self,
    ) -> impl Iterator<Item = (&Id<TrackedAsset>, &TrackedAsset)> {
        self.assets.iter()
    }

    pub fn assets_mut(&mut self) -> impl Iterator<Item = &mut TrackedAsset> {
        self.assets.values_mut()
    }

    pub fn fences(&self) -> &[WithId<Geofence>] {
        &self.fences
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Positions as the rendering/export layer may see them. The privacy
    /// mask is applied here and only here; the precise coordinates stay
    /// untouched in the registry.
    pub fn display_positions(
        &self,
        privacy_enabled: bool,
    ) -> Vec<(Id<TrackedAsset>, GeoPoint)> {
        self.assets
            .iter()
            .map(|(id, asset)| (id.clone(), asset.position.masked(privacy_enabled)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_state_has_assets_and_fences() {
        let state = FleetState::from_seed();
        assert_eq!(state.len(), 4);
        assert_eq!(state.fences().len(), 2);
    }

    #[test]
    fn display_positions_mask_only_the_view() {
        let state = FleetState::from_seed();
        let masked = state.display_positions(true);
        let plain = state.display_positions(false);

        let first_id = masked[0].0.clone();
        assert_eq!(masked[0].1, GeoPoint::new(37.77, -122.42));
        // the stored coordinate is still precise
        assert_eq!(
            state.get(&first_id).unwrap().position,
            plain[0].1
        );
        assert_eq!(plain[0].1, GeoPoint::new(37.7749, -122.4194));
    }

    #[test]
    fn display_positions_keep_seed_order() {
        let state = FleetState::from_seed();
        let ids = state
            .display_positions(false)
            .into_iter()
            .map(|(id, _)| id.raw())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
