//! User interface subsystem - status display + footswitches.
//!
//! The display is consumed through the small [`view::PatchDisplay`]
//! interface; two hardware backends implement it and one is picked at
//! startup from `config::DISPLAY_KIND`.

pub mod view;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
