//! **pow2** — a 2048-style merge puzzle game model.
//!
//! Wires a [`tilefuse_core::Session`] into the [`tilefuse_core::Model`]
//! interface so any driver back-end can run it.

pub mod model;

pub use model::Pow2Model;
