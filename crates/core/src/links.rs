//! Proximity links between nearby particles.
//!
//! Every unordered pair is examined each frame (O(n^2), no spatial index;
//! particle counts stay in the tens to low hundreds). A pair closer than the
//! threshold gets a line whose opacity falls linearly from `base_opacity` at
//! distance 0 to 0 at the threshold.

use glam::DVec2;
use serde::Serialize;

use crate::style::LinkStyle;
use crate::surface::Surface;

/// A link between particles `i < j`, at their drawn positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    pub i: usize,
    pub j: usize,
    pub from: DVec2,
    pub to: DVec2,
    pub distance: f64,
    pub opacity: f64,
}

/// `base * (max - d) / max` when `d < max`, otherwise `None`.
pub fn link_opacity(distance: f64, max_distance: f64, base_opacity: f64) -> Option<f64> {
    if max_distance > 0.0 && distance < max_distance {
        Some(base_opacity * (max_distance - distance) / max_distance)
    } else {
        None
    }
}

/// Calls `f` for every linked pair in `(i, j)` lexicographic order.
pub fn for_each_link(
    positions: &[DVec2],
    max_distance: f64,
    base_opacity: f64,
    mut f: impl FnMut(Link),
) {
    for (i, &a) in positions.iter().enumerate() {
        for (j, &b) in positions.iter().enumerate().skip(i + 1) {
            let distance = a.distance(b);
            if let Some(opacity) = link_opacity(distance, max_distance, base_opacity) {
                f(Link {
                    i,
                    j,
                    from: a,
                    to: b,
                    distance,
                    opacity,
                });
            }
        }
    }
}

/// Collects every link among `positions`.
pub fn find_links(positions: &[DVec2], max_distance: f64, base_opacity: f64) -> Vec<Link> {
    let mut links = Vec::new();
    for_each_link(positions, max_distance, base_opacity, |link| links.push(link));
    links
}

/// Strokes every link with `style` and returns how many were drawn.
pub fn render_links<S: Surface + ?Sized>(
    surface: &mut S,
    positions: &[DVec2],
    max_distance: f64,
    style: &LinkStyle,
) -> usize {
    surface.set_shadow(style.shadow);
    let mut drawn = 0;
    for_each_link(positions, max_distance, style.base_opacity, |link| {
        surface.stroke_line(
            link.from,
            link.to,
            style.width,
            style.color.with_alpha(link.opacity),
        );
        drawn += 1;
    });
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn opacity_at_fifty_of_one_forty() {
        let opacity = link_opacity(50.0, 140.0, 0.13).unwrap();
        assert!((opacity - 0.13 * 90.0 / 140.0).abs() < 1e-12);
        assert!((opacity - 0.0836).abs() < 1e-4);
    }

    #[test]
    fn opacity_is_full_at_zero_and_absent_at_threshold() {
        assert_eq!(link_opacity(0.0, 140.0, 0.13), Some(0.13));
        assert_eq!(link_opacity(140.0, 140.0, 0.13), None);
        assert_eq!(link_opacity(200.0, 140.0, 0.13), None);
        assert_eq!(link_opacity(0.0, 0.0, 1.0), None);
    }

    #[test]
    fn two_particle_scenario_draws_one_line() {
        let positions = [DVec2::new(100.0, 100.0), DVec2::new(130.0, 140.0)];
        let links = find_links(&positions, 140.0, 0.13);
        assert_eq!(links.len(), 1);
        let link = links[0];
        assert_eq!((link.i, link.j), (0, 1));
        assert!((link.distance - 50.0).abs() < 1e-12);
        assert!((link.opacity - 0.083_571_428).abs() < 1e-6);
    }

    #[test]
    fn pairs_are_visited_once_in_order() {
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(500.0, 500.0),
        ];
        let pairs: Vec<(usize, usize)> = find_links(&positions, 100.0, 1.0)
            .iter()
            .map(|l| (l.i, l.j))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn empty_and_single_inputs_have_no_links() {
        assert!(find_links(&[], 140.0, 1.0).is_empty());
        assert!(find_links(&[DVec2::ZERO], 140.0, 1.0).is_empty());
    }

    #[test]
    fn render_links_strokes_with_style_color_and_opacity() {
        let style = LinkStyle::default();
        let positions = [DVec2::new(0.0, 0.0), DVec2::new(70.0, 0.0)];
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let drawn = render_links(&mut surface, &positions, 140.0, &style);
        assert_eq!(drawn, 1);
        let line = surface.lines().next().unwrap();
        match line {
            DrawCommand::Line { color, width, .. } => {
                assert!((color.a - style.base_opacity * 0.5).abs() < 1e-12);
                assert_eq!(color.r, style.color.r);
                assert_eq!(*width, style.width);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn position() -> impl Strategy<Value = DVec2> {
            (0.0_f64..400.0, 0.0_f64..400.0).prop_map(|(x, y)| DVec2::new(x, y))
        }

        proptest! {
            #[test]
            fn link_iff_closer_than_threshold(
                positions in prop::collection::vec(position(), 0..30),
                max in 1.0_f64..300.0,
            ) {
                let links = find_links(&positions, max, 0.5);
                let linked: std::collections::HashSet<(usize, usize)> =
                    links.iter().map(|l| (l.i, l.j)).collect();
                for i in 0..positions.len() {
                    for j in (i + 1)..positions.len() {
                        let close = positions[i].distance(positions[j]) < max;
                        prop_assert_eq!(close, linked.contains(&(i, j)));
                    }
                }
            }

            #[test]
            fn opacity_decreases_with_distance(
                d1 in 0.0_f64..140.0,
                d2 in 0.0_f64..140.0,
                base in 0.01_f64..1.0,
            ) {
                let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
                let o_near = link_opacity(near, 140.0, base).unwrap();
                let o_far = link_opacity(far, 140.0, base).unwrap();
                prop_assert!(o_near >= o_far);
                prop_assert!(o_far >= 0.0 && o_near <= base);
            }
        }
    }
}
