use pdf_nup::*;

#[test]
fn test_grid_per_level() {
    let cases = [
        (ShrinkLevel::OneStep, (2, 1), Orientation::Landscape),
        (ShrinkLevel::TwoStep, (2, 2), Orientation::Portrait),
        (ShrinkLevel::ThreeStep, (4, 2), Orientation::Landscape),
        (ShrinkLevel::FourStep, (4, 4), Orientation::Portrait),
        (ShrinkLevel::FiveStep, (8, 4), Orientation::Landscape),
    ];

    for (level, (cols, rows), orientation) in cases {
        let grid = plan(level, false);
        assert_eq!((grid.cols, grid.rows), (cols, rows), "{:?}", level);
        assert_eq!(grid.orientation, orientation, "{:?}", level);
        assert_eq!(grid.tiling_order.len(), cols * rows);
        assert_eq!(grid.cell_count(), level.cells_per_sheet());
    }
}

#[test]
fn test_force_portrait_only_affects_one_step() {
    let one = plan(ShrinkLevel::OneStep, true);
    assert_eq!((one.cols, one.rows), (1, 2));
    assert_eq!(one.orientation, Orientation::Portrait);

    for level in [
        ShrinkLevel::TwoStep,
        ShrinkLevel::ThreeStep,
        ShrinkLevel::FourStep,
        ShrinkLevel::FiveStep,
    ] {
        assert_eq!(plan(level, true), plan(level, false));
    }
}

#[test]
fn test_tiling_order_fills_top_row_first() {
    let order = tiling_order(4, 2);
    let expected: Vec<GridCell> = [(0, 1), (1, 1), (2, 1), (3, 1), (0, 0), (1, 0), (2, 0), (3, 0)]
        .into_iter()
        .map(|(col, row)| GridCell::new(col, row))
        .collect();
    assert_eq!(order, expected);
}

#[test]
fn test_tiling_order_covers_every_cell_once() {
    let order = tiling_order(8, 4);
    let unique: std::collections::HashSet<_> = order.iter().copied().collect();
    assert_eq!(unique.len(), 32);
    assert!(order.iter().all(|cell| cell.col < 8 && cell.row < 4));
}

#[test]
fn test_cell_offset() {
    let page = PageSize::new(298.0, 420.0);
    assert_eq!(GridCell::new(0, 0).offset(page), (0.0, 0.0));
    assert_eq!(GridCell::new(1, 1).offset(page), (298.0, 420.0));
}

#[test]
fn test_imposition_plan_sheet_size() {
    let a5 = PageSize::new(420.0, 595.0);
    let plan = ImpositionPlan::new(a5, &NupOptions::default()).unwrap();
    assert_eq!(plan.sheet_size(), PageSize::new(842.0, 595.0));

    let rotated = NupOptions {
        force_portrait: true,
        ..Default::default()
    };
    let plan = ImpositionPlan::new(PageSize::new(595.0, 420.0), &rotated).unwrap();
    assert_eq!(plan.sheet_size(), PageSize::new(595.0, 842.0));
}

#[test]
fn test_imposition_plan_propagates_unsupported() {
    let odd_size = PageSize::new(600.0, 700.0);
    let result = ImpositionPlan::new(odd_size, &NupOptions::default());
    assert!(matches!(result, Err(NupError::UnsupportedPageSize { .. })));
}
