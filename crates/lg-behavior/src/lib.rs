//! `lg-behavior`: the driving-behaviour hook consulted at insertion time.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                       |
//! |-----------|----------------------------------------------------------------|
//! | [`model`] | `DrivingBehavior` trait                                        |
//! | [`fixed`] | `FixedBehavior`: speed factor on the limit, constant headway  |
//!
//! # Design notes
//!
//! A generated GTU does not exist yet when its admission is checked, so the
//! generator cannot ask a live controller what it would do.  It *peeks*
//! instead: the behaviour that will drive the GTU after insertion answers
//! "what speed would you want here" and "what headway would you keep at this
//! speed" without any state.  Hence `&self` methods and `Send + Sync`.

pub mod fixed;
pub mod model;


pub use fixed::FixedBehavior;
pub use model::DrivingBehavior;
