use ellitrack::utils::sampling::sample_boundary;
use ellitrack::{
    select_best_fits, DifferenceWeights, Ellipse, EllipseDifference, FitSelection, Tracker,
    TrackerConfig,
};
use tracing_subscriber::EnvFilter;

/// Three fingertips drifting to the right. The middle one leaves after the second frame and a
/// new one enters in the last frame.
fn frames() -> Vec<Vec<Ellipse<f64>>> {
    vec![
        vec![
            Ellipse::from_parameters(40.0, 60.0, 22.0, 30.0, 80.0),
            Ellipse::from_parameters(90.0, 55.0, 31.0, 21.0, 5.0),
            Ellipse::from_parameters(140.0, 70.0, 28.0, 19.0, 3.0),
        ],
        vec![
            Ellipse::from_parameters(142.0, 71.0, 28.5, 19.0, 2.0),
            Ellipse::from_parameters(42.0, 61.0, 30.0, 22.0, -8.0),
            Ellipse::from_parameters(92.0, 55.0, 31.0, 21.0, 6.0),
        ],
        vec![
            Ellipse::from_parameters(44.0, 61.0, 30.0, 22.0, 171.0),
            Ellipse::from_parameters(144.0, 72.0, 28.0, 19.5, 1.0),
        ],
        vec![
            Ellipse::from_parameters(146.0, 72.0, 28.0, 19.5, 0.0),
            Ellipse::from_parameters(200.0, 40.0, 25.0, 25.0, 0.0),
            Ellipse::from_parameters(46.0, 62.0, 30.0, 22.0, 172.0),
        ],
    ]
}

fn main() -> Result<(), ellitrack::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Scaled down so that nearby fingertips stay clear of the tanh saturation.
    let difference = EllipseDifference::new(DifferenceWeights::new(0.1, 1.0, 0.05));
    let mut tracker = Tracker::new(difference, TrackerConfig::default());

    for (frame, ellipses) in frames().into_iter().enumerate() {
        // Pretend each ellipse was fitted to a contour of its own outline.
        let candidates: Vec<_> = ellipses
            .iter()
            .map(|ellipse| (*ellipse, sample_boundary(ellipse, 24)))
            .collect();
        let selection = FitSelection::default().with_min_minor_axis(10.0);
        let ellipses = select_best_fits(&candidates, &selection)?;

        let map = tracker.step(ellipses)?;
        println!("frame {frame}:");
        for (ellipse, identity) in map.iter() {
            println!(
                "  #{identity} center=({:.1}, {:.1}) axes=({:.1}, {:.1}) angle={:.1}",
                ellipse.center.x,
                ellipse.center.y,
                ellipse.axes.0,
                ellipse.axes.1,
                ellipse.angle_deg
            );
        }
    }

    Ok(())
}
