//! Drag-to-reorder driven through the layout manager's pointer API.

use crate::helpers::{TestLayoutBuilder, draggable_rows, record_moves, stacked_rows};
use panelgrid::drag::{PointerTarget, Viewport};
use panelgrid::geometry::{Point, Rect, Size};
use panelgrid::layout::{Adjustment, CellDimension, LayoutManager, LayoutOptions, SlotDescription};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_drag_first_row_past_third() {
    let mut manager = draggable_rows(4, 1000.0);
    let moves = record_moves(&mut manager);

    assert!(manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body));
    manager.pointer_move(Point::new(50.0, 210.0));

    let state = manager.drag_state();
    assert_eq!(state.dragging_index, Some(0));
    assert_eq!(state.shifted_indices, BTreeSet::from([1, 2]));
    // neighbors move up by the dragged row's height
    assert_eq!(state.shifted_height, -100.0);
    assert!(state.dragging_inside);

    assert_eq!(manager.pointer_up(Point::new(50.0, 210.0)), Some((0, 2)));
    assert_eq!(*moves.borrow(), vec![(0, 2)]);
    assert!(!manager.drag_state().is_dragging());
    assert!(manager.drag_state().shifted_indices.is_empty());
}

#[test]
fn test_drag_last_row_to_top() {
    let mut manager = draggable_rows(4, 1000.0);
    let moves = record_moves(&mut manager);

    manager.pointer_down(3, Point::new(50.0, 350.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 190.0));
    assert_eq!(manager.drag_state().shifted_indices, BTreeSet::from([1, 2]));
    assert_eq!(manager.drag_state().shifted_height, 100.0);

    manager.pointer_move(Point::new(50.0, 40.0));
    assert_eq!(manager.pointer_up(Point::new(50.0, 40.0)), Some((3, 0)));
    assert_eq!(*moves.borrow(), vec![(3, 0)]);
}

#[test]
fn test_measured_rects_drive_shifting() {
    let description = TestLayoutBuilder::rows().with_leaves(4).draggable_y().build();
    let mut manager = LayoutManager::new(&description);
    let moves = record_moves(&mut manager);
    manager.set_viewport(Viewport::new(Rect::new(0.0, 0.0, 400.0, 400.0)));
    // host-measured 50px rows instead of an arrange pass
    manager.set_slot_rects(stacked_rows(4, 50.0));

    manager.pointer_down(0, Point::new(50.0, 25.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 130.0));
    assert_eq!(manager.drag_state().shifted_indices, BTreeSet::from([1, 2]));
    assert_eq!(manager.drag_state().shifted_height, -50.0);

    assert_eq!(manager.pointer_up(Point::new(50.0, 130.0)), Some((0, 2)));
    assert_eq!(*moves.borrow(), vec![(0, 2)]);
}

#[test]
fn test_short_drag_moves_nothing() {
    let mut manager = draggable_rows(4, 1000.0);
    let moves = record_moves(&mut manager);

    manager.pointer_down(1, Point::new(50.0, 150.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 190.0));
    assert!(manager.drag_state().shifted_indices.is_empty());

    assert_eq!(manager.pointer_up(Point::new(50.0, 190.0)), None);
    assert!(moves.borrow().is_empty());
}

#[test]
fn test_missing_move_to_is_silent() {
    let mut manager = draggable_rows(4, 1000.0);

    manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 210.0));
    assert_eq!(manager.drag_state().shifted_indices.len(), 2);

    assert_eq!(manager.pointer_up(Point::new(50.0, 210.0)), None);
    assert!(!manager.drag_state().is_dragging());
}

#[test]
fn test_handle_only_panels_ignore_body() {
    let description = TestLayoutBuilder::rows()
        .with_slot(SlotDescription::leaf("a").draggable(panelgrid::drag::PanelOptions {
            drag_y: true,
            handle_only: true,
            ..Default::default()
        }))
        .with_leaves(2)
        .build();
    let mut manager = LayoutManager::new(&description);
    manager.arrange(Size::new(400.0, 600.0), &[100.0; 3]);

    assert!(!manager.pointer_down(0, Point::new(10.0, 10.0), PointerTarget::Body));
    manager.pointer_move(Point::new(10.0, 300.0));
    assert!(!manager.drag_state().is_dragging());

    assert!(manager.pointer_down(0, Point::new(10.0, 10.0), PointerTarget::Handle));
}

#[test]
fn test_panel_outside_viewport() {
    let mut manager = draggable_rows(4, 400.0);
    manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 500.0));

    assert!(!manager.drag_state().dragging_inside);
}

#[test]
fn test_leaving_viewport_sideways_is_outside() {
    let description = TestLayoutBuilder::rows().with_leaves(4).draggable_xy().build();
    let mut manager = LayoutManager::new(&description);
    manager.set_viewport(Viewport::new(Rect::new(0.0, 0.0, 400.0, 1000.0)));
    manager.arrange(Size::new(400.0, 1000.0), &[100.0; 4]);

    manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(450.0, 60.0));
    assert!(!manager.drag_state().dragging_inside);

    manager.pointer_move(Point::new(350.0, 60.0));
    assert!(manager.drag_state().dragging_inside);
}

#[test]
fn test_neighbors_get_shift_props() {
    let mut manager = draggable_rows(4, 1000.0);
    manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 210.0));

    let node = manager.render();
    let dys: Vec<f64> = node
        .children()
        .iter()
        .filter_map(|child| child.props().map(|props| props.dy))
        .collect();
    assert_eq!(dys, vec![0.0, -100.0, -100.0, 0.0]);

    let neighbor_flags: Vec<bool> = node
        .children()
        .iter()
        .filter_map(|child| child.props().map(|props| props.neighbor_dragging))
        .collect();
    assert_eq!(neighbor_flags, vec![false, true, true, true]);
}

#[test]
fn test_drop_zone_layouts_do_not_shift() {
    let description = TestLayoutBuilder::rows()
        .with_leaves(3)
        .draggable_y()
        .with_options(LayoutOptions {
            use_drop_zones: true,
            ..Default::default()
        })
        .build();
    let mut manager = LayoutManager::new(&description);
    manager.set_viewport(Viewport::new(Rect::new(0.0, 0.0, 400.0, 1000.0)));
    manager.arrange(Size::new(400.0, 1000.0), &[100.0; 3]);

    manager.pointer_down(0, Point::new(50.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(50.0, 210.0));
    assert!(!manager.drag_state().shifted_indices.is_empty());

    let node = manager.render();
    assert!(
        node.children()
            .iter()
            .filter_map(|child| child.props())
            .all(|props| props.dy == 0.0)
    );
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn test_column_move_carries_its_adjustment() {
    let description = TestLayoutBuilder::columns()
        .with_leaves(1)
        .with_slot(SlotDescription::leaf("slot-1").resizeable())
        .with_leaves(1)
        .draggable_x()
        .build();
    let mut manager = LayoutManager::new(&description);
    let moves = record_moves(&mut manager);
    let sizes: Rc<RefCell<Vec<Vec<Adjustment>>>> = Rc::default();
    let sink = sizes.clone();
    manager.set_on_col_size_change(move |adjustments| sink.borrow_mut().push(adjustments.to_vec()));
    manager.arrange(Size::new(300.0, 200.0), &[]);

    // widen column 1 by 20px at the expense of column 0
    assert!(manager.pointer_down(1, Point::new(100.0, 10.0), PointerTarget::ResizeHandle));
    manager.pointer_move(Point::new(80.0, 10.0));
    assert_eq!(manager.pointer_up(Point::new(80.0, 10.0)), None);
    manager.arrange(Size::new(300.0, 200.0), &[]);
    let widened = manager.slot_rects()[1];
    assert!((widened.x - 80.0).abs() < 1e-9);
    assert!((widened.width - 120.0).abs() < 1e-9);

    // column 0's right edge (80) passes column 1's midpoint (140)
    assert!(manager.pointer_down(0, Point::new(40.0, 10.0), PointerTarget::Body));
    manager.pointer_move(Point::new(110.0, 10.0));
    assert_eq!(manager.drag_state().shifted_indices, BTreeSet::from([1]));
    assert!((manager.drag_state().shifted_width + 80.0).abs() < 1e-9);
    assert_eq!(manager.pointer_up(Point::new(110.0, 10.0)), Some((0, 1)));

    assert_eq!(*moves.borrow(), vec![(0, 1)]);
    let xs: Vec<f64> = manager.size_adjustments().iter().map(|a| a.x).collect();
    assert_eq!(xs, vec![20.0, -20.0, 0.0]);
    assert_eq!(sizes.borrow().len(), 2);
}

// ============================================================================
// Cells
// ============================================================================

#[test]
fn test_cell_drag_to_pointer_target() {
    let description = TestLayoutBuilder::cells()
        .with_leaves(6)
        .draggable_xy()
        .with_options(LayoutOptions {
            cell_width: Some(CellDimension::Fixed(100.0)),
            ..Default::default()
        })
        .build();
    let mut manager = LayoutManager::new(&description);
    let moves = record_moves(&mut manager);
    manager.set_viewport(Viewport::new(Rect::new(0.0, 0.0, 300.0, 600.0)));
    manager.arrange(Size::new(300.0, 600.0), &[100.0; 6]);

    manager.pointer_down(1, Point::new(150.0, 50.0), PointerTarget::Body);
    manager.pointer_move(Point::new(150.0, 150.0));
    assert_eq!(manager.drag_state().shifted_indices, BTreeSet::from([2, 3, 4]));

    // cell 3 starts a row, so it wraps to the end of the row above
    let node = manager.render();
    let props = node.children()[3].props().copied().unwrap_or_default();
    assert_eq!((props.dx, props.dy), (200.0, -100.0));

    assert_eq!(manager.pointer_up(Point::new(150.0, 150.0)), Some((1, 4)));
    assert_eq!(*moves.borrow(), vec![(1, 4)]);
}
