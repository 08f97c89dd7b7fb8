//! Domain layer: the reservation draft, its derived pricing, validation rules
//! and the ports the wizard talks to.

pub mod concierge;
pub mod confirmation;
pub mod draft;
pub mod ports;
pub mod pricing;
pub mod room;
pub mod step;
pub mod validation;
