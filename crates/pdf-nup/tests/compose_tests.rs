use pdf_nup::*;

const A4: PageSize = PageSize {
    width: 595.0,
    height: 842.0,
};
const A5: PageSize = PageSize {
    width: 420.0,
    height: 595.0,
};
const A6: PageSize = PageSize {
    width: 298.0,
    height: 420.0,
};
const A8: PageSize = PageSize {
    width: 147.0,
    height: 210.0,
};

fn pages(count: usize, size: PageSize) -> Vec<(usize, PageSize)> {
    (0..count).map(|i| (i, size)).collect()
}

fn compose_with(
    input: Vec<(usize, PageSize)>,
    options: &NupOptions,
) -> Result<Vec<Sheet<usize>>> {
    let plan = ImpositionPlan::new(input[0].1, options)?;
    compose(input, &plan.grid, plan.sheet_size(), options.fill)
}

fn offsets(sheet: &Sheet<usize>) -> Vec<(usize, f32, f32)> {
    sheet
        .placements
        .iter()
        .map(|p| (p.content, p.x, p.y))
        .collect()
}

#[test]
fn test_a5_pairs_side_by_side_on_landscape_a4() {
    let sheets = compose_with(pages(4, A5), &NupOptions::default()).unwrap();

    assert_eq!(sheets.len(), 2);
    for sheet in &sheets {
        assert_eq!(sheet.size, PageSize::new(842.0, 595.0));
    }
    assert_eq!(offsets(&sheets[0]), vec![(0, 0.0, 0.0), (1, 420.0, 0.0)]);
    assert_eq!(offsets(&sheets[1]), vec![(2, 0.0, 0.0), (3, 420.0, 0.0)]);
}

#[test]
fn test_a6_quad_on_portrait_a4() {
    let sheets = compose_with(pages(4, A6), &NupOptions::default()).unwrap();

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].size, PageSize::new(595.0, 842.0));
    assert_eq!(
        offsets(&sheets[0]),
        vec![
            (0, 0.0, 420.0),
            (1, 298.0, 420.0),
            (2, 0.0, 0.0),
            (3, 298.0, 0.0),
        ]
    );
}

#[test]
fn test_single_a4_fill_tiles_a3() {
    let options = NupOptions {
        fill: true,
        ..Default::default()
    };
    let sheets = compose_with(pages(1, A4), &options).unwrap();

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].size, PageSize::new(1190.0, 842.0));
    assert_eq!(
        offsets(&sheets[0]),
        vec![(0, 0.0, 0.0), (0, 595.0, 0.0)]
    );
}

#[test]
fn test_single_a4_fill_rotated_stacks_on_portrait_a3() {
    let options = NupOptions {
        fill: true,
        force_portrait: true,
        ..Default::default()
    };
    let sheets = compose_with(pages(1, PageSize::new(842.0, 595.0)), &options).unwrap();

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].size, PageSize::new(842.0, 1190.0));
    assert_eq!(
        offsets(&sheets[0]),
        vec![(0, 0.0, 595.0), (0, 0.0, 0.0)]
    );
}

#[test]
fn test_fill_covers_whole_grid() {
    let options = NupOptions {
        fill: true,
        ..Default::default()
    };
    let sheets = compose_with(pages(1, A8), &options).unwrap();

    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].len(), 16);
    assert!(sheets[0].placements.iter().all(|p| p.content == 0));
}

#[test]
fn test_fill_with_many_pages_matches_normal_mode() {
    let filled = compose_with(
        pages(5, A6),
        &NupOptions {
            fill: true,
            ..Default::default()
        },
    )
    .unwrap();
    let normal = compose_with(pages(5, A6), &NupOptions::default()).unwrap();

    assert_eq!(filled, normal);
}

#[test]
fn test_partial_last_sheet_is_flushed() {
    let sheets = compose_with(pages(5, A6), &NupOptions::default()).unwrap();

    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].len(), 4);
    assert_eq!(sheets[1].len(), 1);
    // First cell is the top-left one
    assert_eq!(offsets(&sheets[1]), vec![(4, 0.0, 420.0)]);
}

#[test]
fn test_sheet_count_and_page_conservation() {
    for (size, cells) in [(A5, 2), (A6, 4), (A8, 16)] {
        for count in 1..=40 {
            let sheets = compose_with(pages(count, size), &NupOptions::default()).unwrap();
            assert_eq!(sheets.len(), count.div_ceil(cells), "{} pages of {}", count, size);

            let placed: Vec<usize> = sheets
                .iter()
                .flat_map(|s| s.placements.iter().map(|p| p.content))
                .collect();
            assert_eq!(placed, (0..count).collect::<Vec<_>>());
            assert!(sheets.iter().all(|s| !s.is_empty()));
        }
    }
}

#[test]
fn test_mismatched_page_fails_before_composing() {
    let input = vec![(0, A5), (1, A6), (2, A5)];
    let plan = ImpositionPlan::new(A5, &NupOptions::default()).unwrap();

    match compose(input, &plan.grid, plan.sheet_size(), false) {
        Err(NupError::InconsistentPageSize {
            page,
            actual,
            expected,
        }) => {
            assert_eq!(page, 2);
            assert_eq!(actual, A6);
            assert_eq!(expected, A5);
        }
        other => panic!("Expected InconsistentPageSize, got {:?}", other),
    }
}

#[test]
fn test_empty_input_fails() {
    let plan = ImpositionPlan::new(A5, &NupOptions::default()).unwrap();
    let result = compose(Vec::<(usize, PageSize)>::new(), &plan.grid, plan.sheet_size(), false);
    assert!(matches!(result, Err(NupError::EmptyDocument)));
}

#[test]
fn test_validate_page_sizes_returns_common_size() {
    assert_eq!(validate_page_sizes([A6, A6, A6]).unwrap(), A6);
    assert!(matches!(
        validate_page_sizes(std::iter::empty::<PageSize>()),
        Err(NupError::EmptyDocument)
    ));
}
