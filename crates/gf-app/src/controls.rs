//! Left-hand control panel

use egui::{RichText, Slider, Ui};

use gf_core::{DistanceRange, FilterCriteria};
use gf_data::CategoryIndex;

/// Slider tick labels, in miles
const DISTANCE_MARKS: [u32; 5] = [0, 3, 6, 9, 12];

/// Draw the filter controls and the availability text.
/// Returns the edited criteria when the user changed anything this frame.
pub fn show(ui: &mut Ui, index: &CategoryIndex, criteria: &FilterCriteria, availability: &str) -> Option<FilterCriteria> {
    let mut edited = criteria.clone();

    ui.heading("Repair Issue");
    for problem in index.problem_options() {
        let mut checked = edited.problems.contains(problem);
        if ui.checkbox(&mut checked, problem).changed() {
            edited.set_problem(problem, checked);
        }
    }

    ui.separator();
    ui.heading("City");
    for city in index.city_options() {
        let mut checked = edited.cities.contains(city);
        if ui.checkbox(&mut checked, city).changed() {
            edited.set_city(city, checked);
        }
    }

    ui.separator();
    ui.heading("Distance from Halfords");
    distance_range(ui, &mut edited.distance_range);

    ui.separator();
    ui.heading("Earliest Availability");
    ui.label(RichText::new(availability).strong());

    (edited != *criteria).then_some(edited)
}

/// Two independent sliders; the lower bound may exceed the upper one
fn distance_range(ui: &mut Ui, range: &mut DistanceRange) {
    let bounds = DistanceRange::MIN..=DistanceRange::MAX;
    ui.add(
        Slider::new(&mut range.lo, bounds.clone())
            .step_by(1.0)
            .suffix(" miles")
            .text("from"),
    );
    ui.add(
        Slider::new(&mut range.hi, bounds)
            .step_by(1.0)
            .suffix(" miles")
            .text("to"),
    );

    ui.horizontal(|ui| {
        for mark in DISTANCE_MARKS {
            ui.label(RichText::new(format!("{mark} miles")).small().weak());
        }
    });
}
