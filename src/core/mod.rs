pub mod allocation;
pub mod engine;
pub mod geofence;
pub mod ledger;
pub mod position;
pub mod shift;
pub mod variant;
