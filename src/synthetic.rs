use crate::component::Component;

/// `count` sorted positions drawn uniformly from `[ppm_start, ppm_end)`.
pub fn generate_peak_positions(rng: &mut fastrand::Rng, count: usize, ppm_start: f64, ppm_end: f64) -> Vec<f64> {
    let (lo, hi) = if ppm_start <= ppm_end {
        (ppm_start, ppm_end)
    } else {
        (ppm_end, ppm_start)
    };
    let mut peaks: Vec<f64> = (0..count).map(|_| lo + rng.f64() * (hi - lo)).collect();
    peaks.sort_by(f64::total_cmp);
    peaks
}

/// Components named `Compound-1` .. `Compound-<count>`, each with
/// `peaks_per_compound` random positions.
pub fn generate_compounds(
    seed: Option<u64>,
    count: usize,
    peaks_per_compound: usize,
    ppm_start: f64,
    ppm_end: f64,
) -> Vec<Component> {
    let mut rng = if let Some(s) = seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    };
    (0..count)
        .map(|i| {
            Component::new(
                format!("Compound-{}", i + 1),
                generate_peak_positions(&mut rng, peaks_per_compound, ppm_start, ppm_end),
            )
        })
        .collect()
}
