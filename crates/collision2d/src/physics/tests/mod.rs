//! Lifecycle scenario tests for the collision registry

mod lifecycle_scenarios;
