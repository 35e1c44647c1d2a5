//! Usecase layer: the conversion workflow + events.

pub mod convert;
pub mod event;
pub mod stats;
