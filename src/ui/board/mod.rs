//! Board view
//!
//! The 2x2 quadrant grid and its pieces.

pub mod composer;
pub mod quadrant;
pub mod thought_card;

use crate::types::quadrant::Quadrant;
use dioxus::prelude::*;
use quadrant::QuadrantPanel;

#[component]
pub fn BoardView() -> Element {
    rsx! {
        div {
            class: "quadrant-grid",
            for q in Quadrant::ALL {
                QuadrantPanel { key: "{q}", quadrant: q }
            }
        }
    }
}
