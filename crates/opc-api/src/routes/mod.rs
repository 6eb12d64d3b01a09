//! # API Route Modules
//!
//! Handlers validate input, call [`opc_registry::PackCalculator`], and map
//! the result onto the JSON shapes the browser client expects. No
//! calculation logic lives here.

pub mod calculate;
pub mod packs;
