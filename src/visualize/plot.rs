extern crate plotters;
extern crate nalgebra as na;

use std::path::Path;
use plotters::prelude::*;
use na::Vector3;

use crate::{float,Float};

fn get_min_max(data_vectors: &[&Vec<Float>]) -> (Float,Float) {
    let mut min = float::MAX;
    let mut max = float::MIN;

    for data in data_vectors {
        for &v in data.iter() {
            if v < min {
                min = v;
            }

            if v > max {
                max = v;
            }
        }
    }

    if (max-min) < 1e-5 {
        max = min + 1e-5;
    }

    (min,max)
}

fn split_axes(positions: &[Vector3<Float>]) -> Vec<Vec<Float>> {
    (0..3).map(|axis| positions.iter().map(|point| point[axis]).collect::<Vec<Float>>()).collect()
}

/**
 * Per axis line plot of two trajectories over the pose index, e.g. before and after adjustment.
 */
pub fn draw_trajectory_comparison(positions: &[Vector3<Float>], label_1: &str, positions_2: &[Vector3<Float>], label_2: &str, file_path: &Path, title: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let data = split_axes(positions);
    let data_2 = split_axes(positions_2);
    let number_of_samples = positions.len().max(positions_2.len()).max(2);

    let root = BitMapBackend::new(file_path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 12))?;

    let drawing_areas = root.split_evenly((3,1));

    for (i, area) in drawing_areas.iter().enumerate() {
        let (min,max) = get_min_max(&[&data[i], &data_2[i]]);

        let caption = match i {
            0 => "Position X",
            1 => "Position Y",
            _ => "Position Z"
        };

        let mut chart = ChartBuilder::on(area)
            .margin(30)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .caption(caption, ("sans-serif", 40))
            .build_cartesian_2d(0..(number_of_samples - 1), min..max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_desc("m")
            .draw()?;

        chart.draw_series(
            LineSeries::new(
                (0..).zip(data[i].iter()).map(|(x, y)| (x, *y)),
                &RED.mix(0.2),
            )
        )?.label(label_1).legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart.draw_series(
            LineSeries::new(
                (0..).zip(data_2[i].iter()).map(|(x, y)| (x, *y)),
                &BLUE.mix(0.2),
            )
        )?.label(label_2).legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart.configure_series_labels().border_style(&BLACK).draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_data_gets_non_empty_range() {
        let data = vec![2.0, 2.0];
        let (min, max) = get_min_max(&[&data]);
        assert_eq!(min, 2.0);
        assert!(max > min);
    }

    #[test]
    fn range_spans_both_series() {
        let a = vec![0.0, 1.0];
        let b = vec![-2.0, 0.5];
        assert_eq!(get_min_max(&[&a, &b]), (-2.0, 1.0));
    }
}
