use fxhash::FxBuildHasher;
use indexmap::IndexSet;

use crate::stepper::{Layer, MarkSink};
use crate::vertex::Coordinates;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// In-memory record of which cells currently carry a marker, per [Layer], in the order they were
/// marked. A cell on the path is usually also marked as visited; [layer_of](Self::layer_of)
/// reports the path layer in that case since it is drawn on top.
#[derive(Clone, Debug, Default)]
pub struct Markers {
    visited: FxIndexSet<Coordinates>,
    path: FxIndexSet<Coordinates>,
}

impl Markers {
    pub fn new() -> Markers {
        Markers::default()
    }

    fn layer(&self, layer: Layer) -> &FxIndexSet<Coordinates> {
        match layer {
            Layer::Visited => &self.visited,
            Layer::Path => &self.path,
        }
    }

    pub fn is_marked(&self, coords: Coordinates, layer: Layer) -> bool {
        self.layer(layer).contains(&coords)
    }

    pub fn layer_of(&self, coords: Coordinates) -> Option<Layer> {
        [Layer::Path, Layer::Visited]
            .into_iter()
            .find(|&layer| self.is_marked(coords, layer))
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).len()
    }

    /// Marked cells of `layer`, oldest first.
    pub fn iter(&self, layer: Layer) -> impl Iterator<Item = &Coordinates> + '_ {
        self.layer(layer).iter()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.path.is_empty()
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.path.clear();
    }
}

impl MarkSink for Markers {
    fn mark(&mut self, coords: Coordinates, layer: Layer, on: bool) {
        let set = match layer {
            Layer::Visited => &mut self.visited,
            Layer::Path => &mut self.path,
        };
        if on {
            set.insert(coords);
        } else {
            set.shift_remove(&coords);
        }
    }
}
