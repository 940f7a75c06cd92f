use vanishing_point::LineSegment;

/// Pinwheel of flat wedges meeting at `apex`. Wedge `i` spans the directions
/// `[boundaries_deg[i], boundaries_deg[i + 1])` (wrapping around) and is
/// filled with `levels[i]`; the boundaries are the only edges in the image.
pub fn converging_wedges_u8(
    width: usize,
    height: usize,
    apex: (f64, f64),
    boundaries_deg: &[f64],
    levels: &[u8],
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(!boundaries_deg.is_empty(), "need at least one boundary");
    assert_eq!(boundaries_deg.len(), levels.len());
    assert!(
        boundaries_deg.windows(2).all(|w| w[0] < w[1]),
        "boundaries must be increasing"
    );

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let dir = (y as f64 - apex.1)
                .atan2(x as f64 - apex.0)
                .to_degrees()
                .rem_euclid(360.0);
            // Directions before the first boundary belong to the last wedge.
            let wedge = boundaries_deg
                .iter()
                .rposition(|&b| b <= dir)
                .unwrap_or(boundaries_deg.len() - 1);
            img[y * width + x] = levels[wedge];
        }
    }
    img
}

/// Segments on rays through `target`, each running from `near` to `far`
/// pixels away from it in the given direction.
pub fn segments_toward(
    target: (f64, f64),
    dirs_deg: &[f64],
    near: f64,
    far: f64,
) -> Vec<LineSegment> {
    dirs_deg
        .iter()
        .map(|d| {
            let (s, c) = d.to_radians().sin_cos();
            LineSegment::new(
                (target.0 + near * c).round() as i32,
                (target.1 + near * s).round() as i32,
                (target.0 + far * c).round() as i32,
                (target.1 + far * s).round() as i32,
            )
        })
        .collect()
}

/// Perpendicular distance of `p` from the infinite line through `seg`.
pub fn distance_to_line(seg: &LineSegment, p: (f64, f64)) -> f64 {
    let d = seg.delta();
    let (ax, ay) = (seg.x1 as f64, seg.y1 as f64);
    (d.x * (p.1 - ay) - d.y * (p.0 - ax)).abs() / d.norm()
}
