//! Placement geometry tests.
//!
//! Covers the three placement policies, the footer reservation and the
//! centering arithmetic.

use shelface::{
    Canvas, Dimensions, FooterReservation, PlacementPolicy, ShelfaceError, compute_placement,
};

fn dims(width: u32, height: u32) -> Dimensions {
    Dimensions::new(width, height).expect("non-zero dimensions")
}

fn full_hd() -> Canvas {
    dims(1920, 1080)
}

// ── ResizePad ────────────────────────────────────────────────────

#[test]
fn resize_pad_letterboxes_four_by_three() {
    let placement = compute_placement(
        dims(640, 480),
        full_hd(),
        PlacementPolicy::ResizePad,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.size, dims(1240, 930));
    assert_eq!(placement.offset_x, 340);
    assert_eq!(placement.offset_y, 0);
}

#[test]
fn resize_pad_wide_source_binds_on_width() {
    let placement = compute_placement(
        dims(4000, 1000),
        full_hd(),
        PlacementPolicy::ResizePad,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.size, dims(1920, 480));
    assert_eq!((placement.offset_x, placement.offset_y), (0, 225));
}

#[test]
fn resize_pad_offsets_floor_odd_remainders() {
    // 300x600 scales to 465x930; (1920 - 465) / 2 = 727.5.
    let placement = compute_placement(
        dims(300, 600),
        full_hd(),
        PlacementPolicy::ResizePad,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.size, dims(465, 930));
    assert_eq!(placement.offset_x, 727);
}

#[test]
fn resize_pad_upscales_small_sources() {
    let placement = compute_placement(
        dims(16, 9),
        full_hd(),
        PlacementPolicy::ResizePad,
        FooterReservation::none(),
    )
    .unwrap();

    assert_eq!(placement.size, full_hd());
    assert_eq!((placement.offset_x, placement.offset_y), (0, 0));
    assert_eq!(placement.scale(), 120.0);
}

#[test]
fn resize_pad_properties_hold_across_sizes() {
    let canvases = [dims(1920, 1080), dims(800, 480), dims(480, 800), dims(1024, 768)];
    let sources = [
        dims(640, 480),
        dims(480, 640),
        dims(1, 1),
        dims(1000, 999),
        dims(3, 7),
        dims(4096, 2160),
        dims(333, 777),
    ];
    let footers = [0, 1, 50, 150];

    for canvas in canvases {
        for footer_height in footers {
            let footer = FooterReservation::new(footer_height);
            let area = footer.usable_area(canvas).unwrap();

            for source in sources {
                let placement =
                    compute_placement(source, canvas, PlacementPolicy::ResizePad, footer)
                        .unwrap();
                let size = placement.size;
                let context = format!("{source} on {canvas} with footer {footer_height}");

                assert!(size.fits_within(area), "{context}: {size} exceeds {area}");
                assert!(
                    size.width == area.width || size.height == area.height,
                    "{context}: {size} touches no bound of {area}",
                );

                // Aspect ratio preserved within rounding.
                let skew = (size.width as i64 * source.height as i64
                    - size.height as i64 * source.width as i64)
                    .abs();
                let tolerance = source.width.max(source.height) as i64;
                assert!(skew <= tolerance, "{context}: aspect drift {skew}");

                // Centered within one pixel.
                let slack_x = area.width as i64 - size.width as i64 - 2 * placement.offset_x;
                let slack_y = area.height as i64 - size.height as i64 - 2 * placement.offset_y;
                assert!((0..=1).contains(&slack_x), "{context}: x slack {slack_x}");
                assert!((0..=1).contains(&slack_y), "{context}: y slack {slack_y}");
                assert!(placement.is_within(area), "{context}");
            }
        }
    }
}

// ── Resize ───────────────────────────────────────────────────────

#[test]
fn resize_fills_usable_area_exactly() {
    for source in [dims(640, 480), dims(10, 1000), dims(5000, 20)] {
        let placement = compute_placement(
            source,
            full_hd(),
            PlacementPolicy::Resize,
            FooterReservation::new(150),
        )
        .unwrap();

        assert_eq!(placement.size, dims(1920, 930));
        assert_eq!((placement.offset_x, placement.offset_y), (0, 0));
    }
}

#[test]
fn resize_reports_independent_scale_factors() {
    let placement = compute_placement(
        dims(960, 465),
        full_hd(),
        PlacementPolicy::Resize,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.scale_x, 2.0);
    assert_eq!(placement.scale_y, 2.0);
}

// ── Pad ──────────────────────────────────────────────────────────

#[test]
fn pad_keeps_source_size_and_centers() {
    let placement = compute_placement(
        dims(101, 100),
        dims(200, 300),
        PlacementPolicy::Pad,
        FooterReservation::none(),
    )
    .unwrap();

    assert_eq!(placement.size, dims(101, 100));
    assert_eq!((placement.offset_x, placement.offset_y), (49, 100));
    assert_eq!(placement.scale(), 1.0);
}

#[test]
fn pad_oversized_source_gets_negative_offsets() {
    let placement = compute_placement(
        dims(2001, 1000),
        full_hd(),
        PlacementPolicy::Pad,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.size, dims(2001, 1000));
    // Floor division: -81 / 2 = -41, -70 / 2 = -35.
    assert_eq!((placement.offset_x, placement.offset_y), (-41, -35));
    assert!(!placement.is_within(dims(1920, 930)));
}

// ── Footer reservation ───────────────────────────────────────────

#[test]
fn footer_equal_to_half_the_canvas_is_rejected() {
    for policy in PlacementPolicy::ALL {
        let result = compute_placement(
            dims(10, 10),
            dims(640, 300),
            policy,
            FooterReservation::new(150),
        );
        assert!(
            matches!(
                result,
                Err(ShelfaceError::FooterTooTall {
                    canvas_height: 300,
                    footer_height: 150,
                })
            ),
            "{policy}: {result:?}",
        );
    }
}

#[test]
fn footer_just_below_half_is_accepted() {
    let placement = compute_placement(
        dims(10, 10),
        dims(640, 301),
        PlacementPolicy::Resize,
        FooterReservation::new(150),
    )
    .unwrap();

    assert_eq!(placement.size, dims(640, 151));
}

#[test]
fn usable_height_subtracts_footer() {
    let footer = FooterReservation::new(150);
    assert_eq!(footer.usable_height(full_hd()).unwrap(), 930);
    assert_eq!(FooterReservation::none().usable_height(full_hd()).unwrap(), 1080);
}

// ── Dimensions and policy names ─────────────────────────────────

#[test]
fn zero_dimensions_are_rejected() {
    assert!(matches!(
        Dimensions::new(0, 10),
        Err(ShelfaceError::InvalidDimensions { width: 0, height: 10 })
    ));
    assert!(Dimensions::new(10, 0).is_err());
}

#[test]
fn policy_names_round_trip() {
    for policy in PlacementPolicy::ALL {
        assert_eq!(policy.name().parse::<PlacementPolicy>().unwrap(), policy);
    }
    assert_eq!(
        "Resize-Pad".parse::<PlacementPolicy>().unwrap(),
        PlacementPolicy::ResizePad
    );
    assert_eq!(PlacementPolicy::default(), PlacementPolicy::ResizePad);
}

#[test]
fn unknown_policy_lists_alternatives() {
    let error = "stretch".parse::<PlacementPolicy>().unwrap_err();
    match &error {
        ShelfaceError::UnknownChoice {
            kind,
            value,
            available,
        } => {
            assert_eq!(*kind, "resize method");
            assert_eq!(value, "stretch");
            assert_eq!(available, &["pad", "resize", "resize_pad"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "Invalid resize method: stretch (available: pad, resize, resize_pad)"
    );
}
