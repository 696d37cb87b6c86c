//! HTTP handlers for the card-generation surface.

pub mod cards;
