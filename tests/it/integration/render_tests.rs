//! Render tree output for valid and invalid layouts.
//!
//! Style snapshots are inline; update with `cargo insta review`.

use crate::helpers::TestLayoutBuilder;
use panelgrid::drag::PointerTarget;
use panelgrid::geometry::{Length, Point, Size};
use panelgrid::layout::{
    BoxStyle, LayoutDescription, LayoutManager, LayoutOptions, Position, RenderNode, RowHeight,
    SlotDescription,
};

fn styles(node: &RenderNode) -> Vec<&BoxStyle> {
    node.children().iter().filter_map(RenderNode::style).collect()
}

fn class_name(node: &RenderNode) -> &str {
    match node {
        RenderNode::Slot { class_name, .. } | RenderNode::Blank { class_name, .. } => class_name,
        _ => "",
    }
}

// ============================================================================
// Invalid Layouts
// ============================================================================

#[test]
fn test_two_axes_render_error() {
    let description = LayoutDescription {
        rows: Some(vec![SlotDescription::leaf("a")]),
        columns: Some(vec![SlotDescription::leaf("b")]),
        ..Default::default()
    };
    let manager = LayoutManager::new(&description);

    let node = manager.render();
    let RenderNode::Error { message, layout } = &node else {
        panic!("expected an error node, got {node:?}");
    };
    assert!(message.contains("one and only one of [cells, rows, columns]"));
    assert!(message.contains("Passed 2."));
    assert_eq!(*layout, description.to_json());
}

#[test]
fn test_no_axis_renders_error() {
    let manager = LayoutManager::new(&LayoutDescription::default());
    let node = manager.render();
    assert!(node.is_error());
    assert!(node.children().is_empty());
}

#[test]
fn test_invalid_nested_layout_leaves_siblings_intact() {
    let broken = LayoutDescription {
        rows: Some(vec![]),
        cells: Some(vec![]),
        ..Default::default()
    };
    let description = LayoutDescription::rows(vec![
        SlotDescription::leaf("top"),
        SlotDescription::nested(broken),
        SlotDescription::leaf("bottom"),
    ]);
    let manager = LayoutManager::new(&description);
    assert!(manager.is_valid());

    let node = manager.render();
    assert!(!node.is_error());
    assert_eq!(node.children().len(), 3);
    assert!(node.children()[1].nested().is_some_and(RenderNode::is_error));
    assert!(node.children()[0].nested().is_none());
    assert!(node.children()[2].props().is_some());
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_column_styles_follow_spans() {
    let description = LayoutDescription::columns(vec![
        SlotDescription::leaf("a"),
        SlotDescription::leaf("b").col_span(2),
        SlotDescription::leaf("c"),
    ]);
    let mut manager = LayoutManager::new(&description);
    manager.arrange(Size::new(400.0, 200.0), &[]);

    let node = manager.render();
    insta::assert_json_snapshot!(styles(&node), @r###"
    [
      {
        "left": {
          "calc": {
            "percent": 0.0,
            "px": 0.0
          }
        },
        "width": {
          "calc": {
            "percent": 25.0,
            "px": 0.0
          }
        }
      },
      {
        "left": {
          "calc": {
            "percent": 25.0,
            "px": 0.0
          }
        },
        "width": {
          "calc": {
            "percent": 50.0,
            "px": 0.0
          }
        }
      },
      {
        "left": {
          "calc": {
            "percent": 75.0,
            "px": 0.0
          }
        },
        "width": {
          "calc": {
            "percent": 25.0,
            "px": 0.0
          }
        }
      }
    ]
    "###);

    // the resolved styles agree with the arranged rects
    for (style, rect) in styles(&node).iter().zip(manager.slot_rects()) {
        let left = style.left.and_then(|l| l.resolve(400.0)).unwrap_or_default();
        let width = style.width.and_then(|w| w.resolve(400.0)).unwrap_or_default();
        assert!((left - rect.x).abs() < 1e-9);
        assert!((width - rect.width).abs() < 1e-9);
    }
}

#[test]
fn test_resizing_disables_transitions() {
    let description = TestLayoutBuilder::columns()
        .with_leaves(1)
        .with_slot(SlotDescription::leaf("slot-1").resizeable())
        .build();
    let mut manager = LayoutManager::new(&description);
    manager.arrange(Size::new(200.0, 100.0), &[]);

    assert!(manager.pointer_down(1, Point::new(100.0, 10.0), PointerTarget::ResizeHandle));
    let node = manager.render();
    assert!(
        node.children()
            .iter()
            .all(|child| class_name(child) == "layout-manager-column no-transition")
    );

    manager.pointer_up(Point::new(100.0, 10.0));
    let node = manager.render();
    assert_eq!(class_name(&node.children()[0]), "layout-manager-column");
}

// ============================================================================
// Rows and Cells
// ============================================================================

#[test]
fn test_fill_rows_share_height() {
    let description = LayoutDescription::rows(vec![
        SlotDescription::leaf("a"),
        SlotDescription::leaf("b").row_span(2),
        SlotDescription::leaf("c"),
    ])
    .with_options(LayoutOptions {
        row_height: Some(RowHeight::Fill),
        full_height: true,
        ..Default::default()
    });
    let manager = LayoutManager::new(&description);

    let node = manager.render();
    let RenderNode::Layout { class_names, .. } = &node else {
        panic!("expected a layout node");
    };
    assert_eq!(class_names, &["layout-manager-full-height", "layout-manager"]);

    let tops: Vec<Option<Length>> = styles(&node).iter().map(|s| s.top).collect();
    assert_eq!(
        tops,
        vec![
            Some(Length::Percent(0.0)),
            Some(Length::Percent(25.0)),
            Some(Length::Percent(75.0)),
        ]
    );
    assert_eq!(styles(&node)[1].height, Some(Length::Percent(50.0)));
    assert!(
        styles(&node)
            .iter()
            .all(|s| s.position == Some(Position::Absolute))
    );
}

#[test]
fn test_natural_rows_have_no_style() {
    let manager = LayoutManager::new(&TestLayoutBuilder::rows().with_leaves(2).build());
    let node = manager.render();
    assert!(styles(&node).iter().all(|s| s.is_empty()));
    assert!(
        node.children()
            .iter()
            .all(|child| class_name(child) == "layout-manager-row")
    );
}

#[test]
fn test_cells_render_blank_fillers() {
    let description = TestLayoutBuilder::cells()
        .with_leaves(3)
        .with_options(LayoutOptions {
            min_cell_width: Some(120.0),
            ..Default::default()
        })
        .build();
    let manager = LayoutManager::new(&description);

    let node = manager.render();
    let keys: Vec<&str> = node.children().iter().filter_map(RenderNode::key).collect();
    assert_eq!(keys, vec!["0", "1", "2", "blank-0", "blank-1", "blank-2"]);

    let blank = &node.children()[4];
    assert!(matches!(blank, RenderNode::Blank { .. }));
    assert_eq!(blank.style().and_then(|s| s.min_width), Some(120.0));
}
