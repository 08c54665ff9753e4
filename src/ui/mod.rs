//! egui rendering. Everything here reads [`crate::state::AppState`] and the
//! prepared [`crate::dashboard::DashboardView`]; no aggregation happens here.

pub mod panels;
pub mod plot;
