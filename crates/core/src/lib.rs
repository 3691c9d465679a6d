//! Domain logic for the fire-risk service.
//!
//! Everything here is independent of the database and HTTP layers: the risk
//! classifier is pure, and the evaluator reaches the outside world only
//! through the [`store::ReadingStore`] and [`actuator::Actuator`] traits.

pub mod actuator;
pub mod capture;
pub mod error;
pub mod evaluation;
pub mod paging;
pub mod reading;
pub mod risk;
pub mod store;
pub mod types;
