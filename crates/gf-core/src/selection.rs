//! Point selection state and the availability text it resolves to

use serde::{Deserialize, Serialize};

use crate::shop::PointId;

/// Detail attached to a map point: the shop's earliest availability, if known
pub type DetailPayload = Option<String>;

/// Most recent point pick
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// Nothing has been picked yet
    #[default]
    None,
    /// A point was picked. `payload` is `None` when the point carries no availability.
    Picked { point: PointId, payload: DetailPayload },
}

impl Selection {
    pub fn picked(point: PointId, payload: DetailPayload) -> Self {
        Self::Picked { point, payload }
    }
}

/// Turns a selection into the text shown next to "Earliest Availability"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionResolver {
    /// Shown before any point has been picked
    pub prompt: String,
    /// Shown when the picked point has no availability data
    pub no_availability: String,
}

impl Default for SelectionResolver {
    fn default() -> Self {
        Self {
            prompt: "Click on any Garage".to_string(),
            no_availability: "No availability".to_string(),
        }
    }
}

impl SelectionResolver {
    pub fn resolve<'a>(&'a self, selection: &'a Selection) -> &'a str {
        match selection {
            Selection::None => &self.prompt,
            Selection::Picked { payload: Some(text), .. } => text,
            Selection::Picked { payload: None, .. } => &self.no_availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::RowId;

    #[test]
    fn test_no_selection_shows_prompt() {
        let resolver = SelectionResolver::default();
        assert_eq!(resolver.resolve(&Selection::None), "Click on any Garage");
    }

    #[test]
    fn test_payload_is_returned_verbatim() {
        let resolver = SelectionResolver::default();
        let selection = Selection::picked(PointId::candidate(RowId(4)), Some("9am Mon".to_string()));
        assert_eq!(resolver.resolve(&selection), "9am Mon");
    }

    #[test]
    fn test_missing_payload_differs_from_no_selection() {
        let resolver = SelectionResolver::default();
        let selection = Selection::picked(PointId::candidate(RowId(0)), None);

        assert_eq!(resolver.resolve(&selection), "No availability");
        assert_ne!(resolver.resolve(&selection), resolver.resolve(&Selection::None));
    }

    #[test]
    fn test_custom_texts() {
        let resolver = SelectionResolver {
            prompt: "Pick a garage".to_string(),
            no_availability: "Fully booked".to_string(),
        };
        let selection = Selection::picked(PointId::reference(RowId(1)), None);
        assert_eq!(resolver.resolve(&Selection::None), "Pick a garage");
        assert_eq!(resolver.resolve(&selection), "Fully booked");
    }
}
