//! Scenario and property tests spanning several modules.

mod forecast_tests;
