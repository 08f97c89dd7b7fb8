//! Application layer: the reservation wizard state machine and the script
//! runner that drives it.
//!
//! `ReservationWizard` owns the draft exclusively. The only suspension point is
//! the payment gateway call, which runs as a spawned `tokio` task.

pub mod script;
pub mod wizard;
