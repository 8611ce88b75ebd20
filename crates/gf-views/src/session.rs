//! One viewer's interaction state

use std::sync::Arc;

use gf_core::{Dataset, FilterCriteria, FilterEngine, PointId, Selection, SelectionResolver};

use crate::composer::MapComposer;
use crate::scene::MapScene;

/// Criteria, selection and current scene of a single viewer.
///
/// The dataset is shared read-only; everything else belongs to this session.
pub struct ViewerSession {
    dataset: Arc<Dataset>,
    engine: FilterEngine,
    composer: MapComposer,
    resolver: SelectionResolver,
    criteria: FilterCriteria,
    selection: Selection,
    scene: MapScene,
    /// Bumped on every recomputation
    generation: u64,
}

impl ViewerSession {
    pub fn new(
        dataset: Arc<Dataset>,
        engine: FilterEngine,
        composer: MapComposer,
        resolver: SelectionResolver,
        criteria: FilterCriteria,
    ) -> Self {
        let scene = recompute(&dataset, &engine, &composer, &criteria);
        Self {
            dataset,
            engine,
            composer,
            resolver,
            criteria,
            selection: Selection::None,
            scene,
            generation: 0,
        }
    }

    /// Session with default engine, composer, texts and criteria
    pub fn with_defaults(dataset: Arc<Dataset>) -> Self {
        Self::new(
            dataset,
            FilterEngine::default(),
            MapComposer::default(),
            SelectionResolver::default(),
            FilterCriteria::default(),
        )
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the criteria and recompute the scene if they changed.
    /// Returns whether a recomputation happened. The selection is kept.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.refresh();
        true
    }

    /// Recompute the scene from the current criteria
    pub fn refresh(&mut self) {
        self.scene = recompute(&self.dataset, &self.engine, &self.composer, &self.criteria);
        self.generation += 1;
    }

    /// Record a point pick against the current scene
    pub fn pick(&mut self, point: PointId) {
        self.selection = self.scene.pick(point);
    }

    /// Text for the availability display
    pub fn detail_text(&self) -> &str {
        self.resolver.resolve(&self.selection)
    }
}

/// `compose(filter(dataset, criteria))`
pub fn recompute(
    dataset: &Dataset,
    engine: &FilterEngine,
    composer: &MapComposer,
    criteria: &FilterCriteria,
) -> MapScene {
    let partition = engine.filter(dataset, criteria);
    composer.compose_partition(&partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::{RowId, ShopRecord, REFERENCE_SHOP_NAME};

    fn shop(name: &str, city: &str, distance: f64, avail: Option<&str>) -> ShopRecord {
        ShopRecord {
            shop_name: name.to_string(),
            city: city.to_string(),
            problem: "clutch replacement".to_string(),
            distance_from_reference: distance,
            latitude: 51.45,
            longitude: -2.58,
            price: "£200".to_string(),
            earliest_availability: avail.map(str::to_string),
        }
    }

    fn session() -> ViewerSession {
        let dataset = Dataset::new(vec![
            shop("Near", "Bristol", 3.0, Some("9am Mon")),
            shop("Far", "Bristol", 9.0, None),
            shop(REFERENCE_SHOP_NAME, "Bristol", 0.0, None),
            shop("Bath Garage", "Bath", 1.0, None),
        ]);
        ViewerSession::with_defaults(Arc::new(dataset))
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.generation(), 0);
        assert_eq!(session.scene().candidate_layer.len(), 1);
        assert_eq!(session.scene().reference_layer.len(), 1);
        assert_eq!(session.detail_text(), "Click on any Garage");
    }

    #[test]
    fn test_criteria_change_recomputes() {
        let mut session = session();
        let widened = session.criteria().clone().with_distance(0.0, 15.0);

        assert!(session.set_criteria(widened.clone()));
        assert_eq!(session.generation(), 1);
        assert_eq!(session.scene().candidate_layer.len(), 2);

        assert!(!session.set_criteria(widened));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_pick_flow() {
        let mut session = session();

        session.pick(PointId::candidate(RowId(0)));
        assert_eq!(session.detail_text(), "9am Mon");

        session.pick(PointId::reference(RowId(2)));
        assert_eq!(session.detail_text(), "No availability");
    }

    #[test]
    fn test_selection_survives_criteria_change() {
        let mut session = session();
        session.pick(PointId::candidate(RowId(0)));
        session.set_criteria(FilterCriteria::empty());

        assert!(session.scene().candidate_layer.is_empty());
        assert_eq!(session.detail_text(), "9am Mon");
    }

    #[test]
    fn test_sessions_are_independent() {
        let dataset = Arc::new(Dataset::new(vec![shop("Near", "Bristol", 3.0, Some("Fri"))]));
        let mut first = ViewerSession::with_defaults(dataset.clone());
        let second = ViewerSession::with_defaults(dataset);

        first.set_criteria(FilterCriteria::empty());
        first.pick(PointId::candidate(RowId(0)));

        assert_eq!(second.scene().candidate_layer.len(), 1);
        assert_eq!(second.detail_text(), "Click on any Garage");
        assert_eq!(second.criteria(), &FilterCriteria::default());
    }
}
