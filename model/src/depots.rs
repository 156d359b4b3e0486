use std::collections::BTreeMap;

use serde::Serialize;

use crate::base_types::{Coordinate, DepotId};
use crate::error::InputError;

pub struct Depots {
    depots: BTreeMap<DepotId, Depot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Depot {
    id: DepotId,
    name: String,
    location: Coordinate,
}

impl Depot {
    pub fn new(id: DepotId, name: String, location: Coordinate) -> Depot {
        Depot { id, name, location }
    }

    pub fn id(&self) -> DepotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }
}

impl Depots {
    pub fn new(depots: Vec<Depot>) -> Result<Depots, InputError> {
        let mut map = BTreeMap::new();
        for depot in depots {
            let id = depot.id;
            if map.insert(id, depot).is_some() {
                return Err(InputError::DuplicateDepot(id));
            }
        }
        Ok(Depots { depots: map })
    }

    pub fn get(&self, id: DepotId) -> Option<&Depot> {
        self.depots.get(&id)
    }

    /// sorted by id
    pub fn iter(&self) -> impl Iterator<Item = &Depot> + '_ {
        self.depots.values()
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }
}
