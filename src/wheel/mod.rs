//! Presentation model of the wheel: one coloured slice per roster entry.

use crate::roster::Name;
use serde::{Deserialize, Serialize};

pub const PALETTE: [&str; 8] = [
    "#4a90e2", "#50e3c2", "#b8e986", "#f8e71c", "#f5a623", "#e35b5b", "#bd10e0", "#9013fe",
];

pub const TEXT_COLOR: &str = "#ffffff";
pub const PLACEHOLDER_LABEL: &str = "Add names to spin!";
pub const PLACEHOLDER_COLOR: &str = "#cccccc";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WheelSlice {
    pub label: String,
    pub background: String,
    pub text_color: String,
}

pub fn slice_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Slices in roster order; an empty roster renders a single placeholder.
pub fn slices(roster: &[Name]) -> Vec<WheelSlice> {
    if roster.is_empty() {
        return vec![WheelSlice {
            label: PLACEHOLDER_LABEL.to_string(),
            background: PLACEHOLDER_COLOR.to_string(),
            text_color: TEXT_COLOR.to_string(),
        }];
    }

    roster
        .iter()
        .enumerate()
        .map(|(index, name)| WheelSlice {
            label: name.value.clone(),
            background: slice_color(index).to_string(),
            text_color: TEXT_COLOR.to_string(),
        })
        .collect()
}

/// Whether the spin trigger should be enabled.
pub fn can_spin(roster: &[Name], draw_in_progress: bool) -> bool {
    !roster.is_empty() && !draw_in_progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<Name> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Name::new(i.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_empty_roster_shows_placeholder() {
        let slices = slices(&[]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, PLACEHOLDER_LABEL);
        assert_eq!(slices[0].background, PLACEHOLDER_COLOR);
    }

    #[test]
    fn test_colors_cycle_through_palette() {
        let roster = names(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let slices = slices(&roster);

        assert_eq!(slices.len(), 10);
        assert_eq!(slices[0].background, "#4a90e2");
        assert_eq!(slices[7].background, "#9013fe");
        assert_eq!(slices[8].background, slices[0].background);
        assert_eq!(slices[9].label, "j");
        assert!(slices.iter().all(|s| s.text_color == TEXT_COLOR));
    }

    #[test]
    fn test_can_spin() {
        let roster = names(&["a"]);
        assert!(can_spin(&roster, false));
        assert!(!can_spin(&roster, true));
        assert!(!can_spin(&[], false));
    }
}
