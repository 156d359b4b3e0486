use crate::demand::DemandRecord;
use crate::depots::Depots;
use crate::diagnostics::Diagnostics;
use crate::routes::Routes;
use crate::shifts::ShiftRecord;
use crate::vehicles::VehicleRecord;

/// All read-only input tables of one run. Shared by every combination of a sweep.
pub struct Dataset {
    depots: Depots,
    routes: Routes,
    shifts: Vec<ShiftRecord>,
    vehicles: Vec<VehicleRecord>,
    demand: Vec<DemandRecord>,
    diagnostics: Diagnostics,
}

impl Dataset {
    pub fn new(
        depots: Depots,
        routes: Routes,
        shifts: Vec<ShiftRecord>,
        vehicles: Vec<VehicleRecord>,
        demand: Vec<DemandRecord>,
        diagnostics: Diagnostics,
    ) -> Dataset {
        Dataset {
            depots,
            routes,
            shifts,
            vehicles,
            demand,
            diagnostics,
        }
    }

    pub fn depots(&self) -> &Depots {
        &self.depots
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn shifts(&self) -> &[ShiftRecord] {
        &self.shifts
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn demand(&self) -> &[DemandRecord] {
        &self.demand
    }

    /// what was dropped while loading (malformed routes).
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
