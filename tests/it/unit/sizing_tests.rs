//! Unit tests for layout sizing and validation through the public API.

use panelgrid::geometry::Length;
use panelgrid::layout::{
    Adjustment, Axis, LayoutDescription, LayoutError, LayoutSpec, SlotDescription,
    column_left_values, column_width_values,
};

fn one_two_one() -> LayoutSpec {
    LayoutSpec::try_from(&LayoutDescription::columns(vec![
        SlotDescription::leaf("left"),
        SlotDescription::leaf("center").col_span(2),
        SlotDescription::leaf("right"),
    ]))
    .unwrap()
}

#[test]
fn test_span_proportional_widths() {
    let spec = one_two_one();
    let widths: Vec<Length> = (0..3)
        .map(|i| column_width_values(&spec.slots, i, 0.0, &[]).to_length().simplify())
        .collect();
    assert_eq!(
        widths,
        vec![Length::Percent(25.0), Length::Percent(50.0), Length::Percent(25.0)]
    );

    let lefts: Vec<f64> = (0..3)
        .map(|i| column_left_values(&spec.slots, i, 0.0, &[]).percentage)
        .collect();
    assert_eq!(lefts, vec![0.0, 25.0, 75.0]);
}

#[test]
fn test_widths_sum_to_container() {
    let spec = LayoutSpec::try_from(&LayoutDescription::columns(vec![
        SlotDescription::leaf("a").width(180.0),
        SlotDescription::leaf("b").col_span(3),
        SlotDescription::leaf("c"),
        SlotDescription::leaf("d").hidden(),
    ]))
    .unwrap();
    let adjustments = [
        Adjustment::default(),
        Adjustment { x: 25.0, y: 0.0 },
        Adjustment { x: -25.0, y: 0.0 },
        Adjustment::default(),
    ];

    for container in [480.0, 1024.0, 1920.0] {
        let total: f64 = (0..4)
            .map(|i| column_width_values(&spec.slots, i, 8.0, &adjustments).resolve(container))
            .sum();
        // padding before columns 1 and 2; the hidden column takes none
        assert!((total + 16.0 - container).abs() < 1e-9, "container {container}");
    }
}

#[test]
fn test_axis_validation() {
    let cells = LayoutSpec::try_from(&LayoutDescription::cells(vec![])).unwrap();
    assert_eq!(cells.axis, Axis::Cells);
    assert!(cells.is_empty());

    let neither = LayoutDescription::default();
    assert_eq!(
        LayoutSpec::try_from(&neither),
        Err(LayoutError::AxisCount { passed: 0 })
    );

    let spec = one_two_one();
    assert_eq!(
        spec.slot(3).map(|_| ()),
        Err(LayoutError::SlotOutOfRange { index: 3, len: 3 })
    );
}
