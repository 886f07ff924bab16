//! Unit tests for ps-env.

use std::sync::Arc;

use ps_core::{Point2, SimRng};
use ps_plume::{BoundaryPolicy, Gaussian2D, GaussianParams, PlumeModel, UniformBox};

use crate::{Environment, SourcePositions, SourceSet};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params() -> GaussianParams {
    GaussianParams::new(0.1, 0.02, 0.5, 12.0)
}

fn plume() -> Arc<Gaussian2D> {
    Arc::new(Gaussian2D::new(params()).unwrap())
}

fn explicit(points: &[[f64; 2]]) -> SourcePositions {
    SourcePositions::from_rows(points).unwrap()
}

fn env_with(points: &[[f64; 2]]) -> Environment<Gaussian2D> {
    let mut rng = SimRng::new(0);
    Environment::new(plume(), 0.0, 1.0, explicit(points), &mut rng).unwrap()
}

#[cfg(test)]
mod probability_field {
    use super::*;

    #[test]
    fn no_sources_never_hits() {
        let env = env_with(&[]);
        for (x, y) in [(0.0, 0.0), (1.0, -1.0), (-3.0, 0.5)] {
            assert_eq!(env.hit_probability_at(x, y, 0.1), 0.0);
            assert_eq!(env.miss_probability_at(x, y, 0.1), 1.0);
        }
    }

    #[test]
    fn single_source_matches_plume_displacement() {
        let env = env_with(&[[-1.0, 0.5]]);
        let model = plume();
        for (x, y) in [(0.0, 0.0), (0.5, 0.5), (2.0, 1.0), (-1.5, 0.5)] {
            let expected = model.hit_probability_at(x + 1.0, y - 0.5, 0.2);
            assert_eq!(env.hit_probability_at(x, y, 0.2), expected);
        }
    }

    #[test]
    fn longer_exposure_raises_hit_probability() {
        let env = env_with(&[[-1.0, 1.0]]);
        let short = env.hit_probability_at(0.0, 0.0, 0.1);
        let long = env.hit_probability_at(0.0, 0.0, 0.3);
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn upwind_of_every_source_never_hits() {
        let env = env_with(&[[-1.0, 0.0], [-1.0, 0.3]]);
        assert_eq!(env.hit_probability_at(-1.1, 0.0, 0.5), 0.0);
    }

    #[test]
    fn miss_is_product_over_sources() {
        let env = env_with(&[[-1.0, 0.0], [-0.5, 0.2]]);
        let model = plume();
        let expected = model.miss_probability_at(1.0, 0.0, 0.1)
            * model.miss_probability_at(0.5, -0.2, 0.1);
        let got = env.miss_probability_at(0.0, 0.0, 0.1);
        assert!((got - expected).abs() < 1e-15);
    }

    #[test]
    fn slices_match_scalar_queries() {
        let env = env_with(&[[-1.0, 0.0]]);
        let xs = [0.0, 0.5, -2.0];
        let ys = [0.0, 0.1, 0.0];
        let hits = env.hit_probability(&xs, &ys, 0.1).unwrap();
        let misses = env.miss_probability(&xs, &ys, 0.1).unwrap();
        for i in 0..xs.len() {
            assert_eq!(hits[i], env.hit_probability_at(xs[i], ys[i], 0.1));
            assert_eq!(misses[i], env.miss_probability_at(xs[i], ys[i], 0.1));
        }
        assert!(env.hit_probability(&xs, &ys[..2], 0.1).is_err());
    }

    #[test]
    fn standing_on_a_source_is_certain() {
        let env = env_with(&[[0.25, -0.25]]);
        assert_eq!(env.hit_probability_at(0.25, -0.25, 0.1), 1.0);
        let mut rng = SimRng::new(3);
        assert!((0..100).all(|_| env.sample(0.25, -0.25, 0.1, &mut rng)));
    }

    #[test]
    fn sampling_with_no_sources_never_detects() {
        let env = env_with(&[]);
        let mut rng = SimRng::new(3);
        assert!((0..100).all(|_| !env.sample(0.0, 0.0, 1.0, &mut rng)));
    }

    #[test]
    fn hard_bounded_pruning_matches_full_product() {
        let bounded =
            Arc::new(Gaussian2D::new(params()).unwrap().with_policy(BoundaryPolicy::HardBounded));
        let points: Vec<[f64; 2]> = (0..40)
            .map(|i| {
                let t = i as f64;
                [-10.0 + 0.5 * t, (t * 0.7).sin() * 3.0]
            })
            .collect();

        let mut rng = SimRng::new(0);
        let env = Environment::new(bounded.clone(), 0.0, 5.0, explicit(&points), &mut rng).unwrap();

        for (x, y) in [(0.0, 0.0), (3.0, 1.0), (-4.0, -2.0), (9.5, 0.2)] {
            let full: f64 = points
                .iter()
                .map(|s| bounded.miss_probability_at(x - s[0], y - s[1], 0.2))
                .product();
            assert!((env.miss_probability_at(x, y, 0.2) - full).abs() < 1e-12);
        }
    }

    #[test]
    fn uniform_box_environment() {
        let boxed = Arc::new(UniformBox::new(0.5, 0.25, 0.4).unwrap());
        let mut rng = SimRng::new(0);
        let env = Environment::new(boxed, 0.0, 1.0, explicit(&[[0.0, 0.0], [0.2, 0.0]]), &mut rng)
            .unwrap();
        // Inside both boxes: 1 - 0.6².
        assert!((env.hit_probability_at(0.1, 0.0, 1.0) - 0.64).abs() < 1e-12);
        // Inside only the second.
        assert!((env.hit_probability_at(0.6, 0.0, 1.0) - 0.4).abs() < 1e-12);
        assert_eq!(env.hit_probability_at(2.0, 0.0, 1.0), 0.0);
    }
}

#[cfg(test)]
mod placement {
    use super::*;
    use crate::source_region;

    #[test]
    fn region_expands_search_square_by_boundary() {
        let env = env_with(&[]);
        let b = params().influence_boundary();
        let region = env.region();
        assert_eq!(region.x_min, -1.0 - b.downwind);
        assert_eq!(region.x_max, 1.0 + b.upwind);
        assert_eq!(region.y_min, -1.0 - b.crosswind_pos);
        assert_eq!(region.y_max, 1.0 + b.crosswind_neg);
        assert_eq!(region, source_region(&b, 1.0));
        assert!((env.area() - region.width() * region.height()).abs() < 1e-12);
    }

    #[test]
    fn random_placement_is_seeded_and_inside_region() {
        let draw = |seed| {
            let mut rng = SimRng::new(seed);
            Environment::new(plume(), 2.0, 3.0, SourcePositions::Random, &mut rng).unwrap()
        };
        let a = draw(42);
        let b = draw(42);
        assert_eq!(a.sources().as_slice(), b.sources().as_slice());
        assert!(!a.sources().is_empty());
        for p in a.sources() {
            assert!(a.region().contains(*p), "{p} outside region");
        }
    }

    #[test]
    fn source_count_tracks_mean() {
        let mut rng = SimRng::new(7);
        let env = Environment::new(plume(), 5.0, 4.0, SourcePositions::Random, &mut rng).unwrap();
        let mean = env.area() * 5.0;
        let n = env.sources().len() as f64;
        // Six standard deviations.
        assert!((n - mean).abs() < 6.0 * mean.sqrt(), "n = {n}, mean = {mean}");
    }

    #[test]
    fn zero_density_has_no_sources() {
        let mut rng = SimRng::new(7);
        let env = Environment::new(plume(), 0.0, 4.0, SourcePositions::Random, &mut rng).unwrap();
        assert!(env.sources().is_empty());
    }

    #[test]
    fn negative_inputs_rejected() {
        let mut rng = SimRng::new(0);
        assert!(Environment::new(plume(), -1.0, 1.0, SourcePositions::Random, &mut rng).is_err());
        assert!(Environment::new(plume(), 1.0, f64::NAN, SourcePositions::Random, &mut rng).is_err());
    }

    #[test]
    fn replacing_sources() {
        let mut env = env_with(&[[0.0, 0.0]]);
        let mut rng = SimRng::new(0);
        env.set_source_positions(explicit(&[[1.0, 1.0], [2.0, 2.0]]), &mut rng).unwrap();
        assert_eq!(env.sources().len(), 2);
        assert_eq!(env.sources().as_slice()[1], Point2::new(2.0, 2.0));
    }

    #[test]
    fn rows_must_have_two_columns() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 1.0], vec![1.0, 2.0, 3.0]];
        assert!(SourcePositions::from_rows(rows.as_slice()).is_err());
        assert!(SourceSet::from_rows(&[[f64::NAN, 0.0]][..]).is_err());
    }

    #[test]
    fn nearest_source_lookup() {
        let env = env_with(&[[-1.0, 0.0], [2.0, 2.0], [0.5, -0.5]]);
        assert_eq!(env.nearest_source(0.4, -0.4), Some(Point2::new(0.5, -0.5)));
        assert_eq!(env.nearest_source(3.0, 3.0), Some(Point2::new(2.0, 2.0)));
        assert_eq!(env_with(&[]).nearest_source(0.0, 0.0), None);
    }

    #[test]
    fn within_radius_is_inclusive_and_sorted() {
        let set = SourceSet::from_rows(&[[3.0, 0.0], [1.0, 0.0], [0.0, 2.0]][..]).unwrap();
        let found: Vec<Point2> = set.within_radius(Point2::ORIGIN, 2.0).collect();
        assert_eq!(found, vec![Point2::new(1.0, 0.0), Point2::new(0.0, 2.0)]);
    }

    #[test]
    fn heatmap_covers_region() {
        let env = env_with(&[[-0.5, 0.0]]);
        let map = env.heatmap(ps_core::Resolution { nx: 20, ny: 10 }).unwrap();
        assert_eq!(map.xs.len(), 20);
        assert_eq!(map.ys.len(), 10);
        assert_eq!(map.values.len(), 200);
        assert!(map.values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(map.max() > 0.0);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Write;

    use crate::{load_sources_csv, load_sources_reader, EnvError};

    use super::*;

    #[test]
    fn loads_two_column_csv() {
        let csv = "x,y\n-1.0,1.0\n3.5,-0.25\n";
        let set = load_sources_reader(csv.as_bytes()).unwrap();
        assert_eq!(set.as_slice(), &[Point2::new(-1.0, 1.0), Point2::new(3.5, -0.25)]);
    }

    #[test]
    fn header_only_is_empty() {
        assert!(load_sources_reader("x,y\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn three_columns_rejected() {
        let err = load_sources_reader("x,y,z\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EnvError::TypeConfiguration(_)));
    }

    #[test]
    fn non_numeric_cell_rejected() {
        let err = load_sources_reader("x,y\n1.0,north\n".as_bytes()).unwrap_err();
        assert!(matches!(err, EnvError::TypeConfiguration(_)));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "0.5,0.5").unwrap();
        let set = load_sources_csv(file.path()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_sources_csv(std::path::Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, EnvError::Io(_)));
    }
}
