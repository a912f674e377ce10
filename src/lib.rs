pub mod configuration;
pub mod domain;
pub mod registry_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
