//! Peak extraction: bright local maxima of the accumulator become lines

use log::{debug, info};

use super::accumulator::{Accumulator, HoughSpace};
use crate::config::{HoughConfig, LineMapping};
use crate::models::{Line, LineSet};

/// Accumulator cell that survived thresholding and suppression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    /// Angle column
    pub theta_i: usize,
    /// Offset row
    pub row: usize,
    /// Vote count
    pub votes: u8,
}

impl LineMapping {
    /// Convert cell `(theta_i, row)` into `y = a*x + b`
    ///
    /// `Exact` returns `None` for vertical lines (`sin(theta) == 0`).
    pub fn to_line(&self, space: &HoughSpace, theta_i: usize, row: usize) -> Option<Line> {
        let theta = space.theta_for(theta_i);
        let (sin_t, cos_t) = theta.sin_cos();
        match self {
            LineMapping::Exact => {
                if sin_t.abs() < 1e-9 {
                    return None;
                }
                let rho = space.rho_for(row);
                Some(Line::new(-cos_t / sin_t, rho / sin_t))
            }
            LineMapping::Empirical => {
                let h = space.height();
                let rho = row as f64 - (h / 3) as f64;
                let new_y = (sin_t * rho).trunc();
                let new_x = (cos_t * rho).trunc();
                let intercept = (new_y * 1.9 - (h / 4) as f64).trunc();
                Some(Line::new(new_x * 2.0, intercept))
            }
        }
    }
}

/// True if no cell in the window beats `(theta_i, row)`
///
/// Equal cells earlier in raster order win, so a saturated plateau yields
/// a single peak.
fn is_local_max(
    acc: &Accumulator,
    theta_i: usize,
    row: usize,
    theta_radius: usize,
    row_radius: usize,
) -> bool {
    let votes = acc.votes(theta_i, row);
    let row_end = (row + row_radius).min(acc.height() - 1);
    let theta_end = (theta_i + theta_radius).min(acc.width() - 1);

    for r in row.saturating_sub(row_radius)..=row_end {
        for t in theta_i.saturating_sub(theta_radius)..=theta_end {
            if (r, t) == (row, theta_i) {
                continue;
            }
            let other = acc.votes(t, r);
            if other > votes || (other == votes && (r, t) < (row, theta_i)) {
                return false;
            }
        }
    }
    true
}

/// Find cells with more than `threshold` votes that are window maxima
///
/// Peaks come back brightest first; equal counts keep raster order
/// (row-major, then column).
pub fn find_peaks(
    acc: &Accumulator,
    threshold: u8,
    theta_radius: usize,
    row_radius: usize,
) -> Vec<Peak> {
    let mut peaks = Vec::new();
    for row in 0..acc.height() {
        for theta_i in 0..acc.width() {
            let votes = acc.votes(theta_i, row);
            if votes <= threshold {
                continue;
            }
            if is_local_max(acc, theta_i, row, theta_radius, row_radius) {
                peaks.push(Peak {
                    theta_i,
                    row,
                    votes,
                });
            }
        }
    }

    // Stable sort keeps raster order among ties.
    peaks.sort_by(|a, b| b.votes.cmp(&a.votes));
    debug!("{} peaks above {} votes", peaks.len(), threshold);
    peaks
}

/// Extract at most `config.max_lines` lines from the accumulator
pub fn extract_peaks(acc: &Accumulator, config: &HoughConfig) -> LineSet {
    let peaks = find_peaks(
        acc,
        config.vote_threshold,
        config.nms_theta_radius,
        config.nms_row_radius,
    );

    let lines: LineSet = peaks
        .iter()
        .filter_map(|p| config.mapping.to_line(acc.space(), p.theta_i, p.row))
        .take(config.max_lines)
        .collect();

    info!(
        "extracted {} lines from {} peaks (max votes {})",
        lines.len(),
        peaks.len(),
        acc.max_votes()
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::accumulator::accumulate;
    use crate::models::{PixelSurface, Rgb};

    fn image_with(
        width: usize,
        height: usize,
        points: impl IntoIterator<Item = (usize, usize)>,
    ) -> PixelSurface {
        let mut image =
            PixelSurface::from_raw(width, height, vec![255; width * height * 3]).unwrap();
        for (x, y) in points {
            image.set_pixel(x as isize, y as isize, Rgb::BLACK);
        }
        image
    }

    fn accumulated(image: &PixelSurface) -> Accumulator {
        let mut acc = Accumulator::for_image(image);
        accumulate(image, &mut acc).unwrap();
        acc
    }

    #[test]
    fn test_empty_accumulator_has_no_lines() {
        let acc = Accumulator::new(100, 100);
        let lines = extract_peaks(&acc, &HoughConfig::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_diagonal_recovered() {
        let image = image_with(100, 100, (0..100).map(|i| (i, i)));
        let acc = accumulated(&image);
        let config = HoughConfig::default().with_vote_threshold(80);

        let peaks = find_peaks(&acc, 80, 5, 5);
        assert_eq!(
            peaks,
            vec![Peak {
                theta_i: 75,
                row: 50,
                votes: 100
            }]
        );

        let lines = extract_peaks(&acc, &config);
        assert_eq!(lines.len(), 1);
        let line = lines.as_slice()[0];
        assert!((line.slope - 1.0).abs() < 1e-6, "slope {}", line.slope);
        assert!(line.intercept.abs() < 1e-6, "intercept {}", line.intercept);
    }

    #[test]
    fn test_non_square_diagonal_within_angle_step() {
        let config = HoughConfig::default().with_vote_threshold(80);
        let along = |i: usize| (i as f64 * 99.0 / 199.0).round() as usize;

        // Wide image: true slope 99/199, column step pi/200.
        let wide = accumulated(&image_with(200, 100, (0..200).map(|x| (x, along(x)))));
        let lines = extract_peaks(&wide, &config);
        assert_eq!(lines.len(), 1);
        let line = lines.as_slice()[0];
        assert!((line.slope - 99.0 / 199.0).abs() < 0.01, "slope {}", line.slope);
        assert!(line.intercept.abs() < 0.5, "intercept {}", line.intercept);

        // Tall image: true slope 199/99, column step pi/100.
        let tall = accumulated(&image_with(100, 200, (0..200).map(|y| (along(y), y))));
        let lines = extract_peaks(&tall, &config);
        assert_eq!(lines.len(), 1);
        let line = lines.as_slice()[0];
        assert!((line.slope - 199.0 / 99.0).abs() < 0.15, "slope {}", line.slope);
        assert!(line.intercept.abs() < 0.5, "intercept {}", line.intercept);
    }

    #[test]
    fn test_saturated_plateau_yields_single_peak() {
        let image = image_with(300, 300, (0..300).map(|i| (i, i)));
        let acc = accumulated(&image);
        let lines = extract_peaks(&acc, &HoughConfig::default());
        assert_eq!(lines.len(), 1);
        assert!((lines.as_slice()[0].slope - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_two_lines_brightest_first() {
        let points = (0..100).map(|i| (i, i)).chain((0..100).map(|i| (i, 99 - i)));
        let image = image_with(100, 100, points);
        let acc = accumulated(&image);
        let lines = extract_peaks(&acc, &HoughConfig::default().with_vote_threshold(80));

        assert_eq!(lines.len(), 2);
        let first = lines.as_slice()[0];
        let second = lines.as_slice()[1];
        // Equal votes: raster order puts the smaller row (y = x) first.
        assert!((first.slope - 1.0).abs() < 1e-6);
        assert!((second.slope + 1.0).abs() < 1e-6);
        assert!((second.intercept - 99.0).abs() < 0.5);
    }

    #[test]
    fn test_max_lines_caps_output() {
        let points = (0..100).map(|i| (i, i)).chain((0..100).map(|i| (i, 99 - i)));
        let image = image_with(100, 100, points);
        let acc = accumulated(&image);
        let config = HoughConfig::default().with_vote_threshold(80).with_max_lines(1);
        assert_eq!(extract_peaks(&acc, &config).len(), 1);
    }

    #[test]
    fn test_tie_broken_by_raster_order() {
        let mut votes = PixelSurface::new(20, 20);
        votes.set_pixel(3, 4, Rgb::gray(10));
        votes.set_pixel(5, 4, Rgb::gray(10));
        let acc = Accumulator::from_surface(votes);

        let peaks = find_peaks(&acc, 5, 3, 3);
        assert_eq!(peaks.len(), 1);
        assert_eq!((peaks[0].theta_i, peaks[0].row), (3, 4));

        let separated = find_peaks(&acc, 5, 1, 1);
        assert_eq!(separated.len(), 2);
        assert_eq!((separated[1].theta_i, separated[1].row), (5, 4));
    }

    #[test]
    fn test_exact_mapping_skips_vertical() {
        let space = HoughSpace::new(100, 100);
        assert_eq!(LineMapping::Exact.to_line(&space, 0, 60), None);
        let horizontal = LineMapping::Exact.to_line(&space, 50, 60).unwrap();
        assert!(horizontal.slope.abs() < 1e-9);
        assert!((horizontal.intercept - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empirical_mapping_constants() {
        let space = HoughSpace::new(100, 90);
        // theta = pi/2, rho = 60 - 30 = 30 -> newY = 30, newX = 0
        let line = LineMapping::Empirical.to_line(&space, 50, 60).unwrap();
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, (30.0f64 * 1.9 - 22.0).trunc());
    }
}
