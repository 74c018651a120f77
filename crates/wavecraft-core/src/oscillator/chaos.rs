//! Projections of chaotic systems.
//!
//! Each sample at phase `t` is the state after `floor(t * rate)` steps from
//! fixed initial conditions. The step count never decreases along the cycle,
//! so one running integration is advanced instead of restarting per sample;
//! the arithmetic is the same sequence of operations either way.

/// Runs `step` until `steps_at(t)` steps have been taken for every sample.
fn advance<S>(
    n: usize,
    mut state: S,
    steps_at: impl Fn(f64) -> usize,
    mut step: impl FnMut(&mut S),
    project: impl Fn(&S) -> f64,
) -> Vec<f64> {
    let mut taken = 0usize;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let target = steps_at(i as f64 / n as f64);
        while taken < target {
            step(&mut state);
            taken += 1;
        }
        out.push(project(&state));
    }
    out
}

pub(super) fn lorenz(n: usize) -> Vec<f64> {
    const SIGMA: f64 = 10.0;
    const RHO: f64 = 28.0;
    const BETA: f64 = 8.0 / 3.0;
    const DT: f64 = 0.01;

    advance(
        n,
        (0.1f64, 0.0f64, 0.0f64),
        |t| (t * 200.0) as usize,
        |(x, y, z)| {
            let dx = SIGMA * (*y - *x);
            let dy = *x * (RHO - *z) - *y;
            let dz = *x * *y - BETA * *z;
            *x += dx * DT;
            *y += dy * DT;
            *z += dz * DT;
        },
        |(x, _, _)| (x / 15.0).tanh(),
    )
}

pub(super) fn rossler(n: usize) -> Vec<f64> {
    const A: f64 = 0.2;
    const B: f64 = 0.2;
    const C: f64 = 5.7;
    const DT: f64 = 0.05;

    advance(
        n,
        (0.1f64, 0.0f64, 0.0f64),
        |t| (t * 100.0) as usize,
        |(x, y, z)| {
            let dx = -*y - *z;
            let dy = *x + A * *y;
            let dz = B + *z * (*x - C);
            *x += dx * DT;
            *y += dy * DT;
            *z += dz * DT;
        },
        |(x, _, _)| (x / 5.0).tanh(),
    )
}

pub(super) fn henon(n: usize) -> Vec<f64> {
    const A: f64 = 1.4;
    const B: f64 = 0.3;

    advance(
        n,
        (0.1f64, 0.1f64),
        |t| (t * 50.0) as usize,
        |(x, y)| {
            let next = 1.0 - A * *x * *x + *y;
            *y = B * *x;
            *x = next;
        },
        |(x, _)| x.tanh(),
    )
}

/// Forced Duffing oscillator. The step count is driven by simulated time
/// rather than an integer rate, so it keeps its own clock.
pub(super) fn duffing(n: usize) -> Vec<f64> {
    const ALPHA: f64 = -1.0;
    const BETA: f64 = 1.0;
    const DELTA: f64 = 0.3;
    const GAMMA: f64 = 0.37;
    const OMEGA: f64 = 1.2;
    const DT: f64 = 0.05;

    let (mut x, mut v, mut clock) = (0.1f64, 0.0f64, 0.0f64);
    (0..n)
        .map(|i| {
            let until = i as f64 / n as f64 * 10.0;
            while clock < until {
                let force = GAMMA * (OMEGA * clock).cos();
                let dv = -DELTA * v - ALPHA * x - BETA * x * x * x + force;
                v += dv * DT;
                x += v * DT;
                clock += DT;
            }
            x.tanh()
        })
        .collect()
}

pub(super) fn chua(n: usize) -> Vec<f64> {
    const ALPHA: f64 = 15.6;
    const BETA: f64 = 28.0;
    const DT: f64 = 0.01;

    advance(
        n,
        (0.1f64, 0.0f64, 0.0f64),
        |t| (t * 150.0) as usize,
        |(x, y, z)| {
            let h = -1.143 * *x + 0.714 * ((*x + 1.0).abs() - (*x - 1.0).abs());
            let dx = ALPHA * (*y - *x - h);
            let dy = *x - *y + *z;
            let dz = -BETA * *y;
            *x += dx * DT;
            *y += dy * DT;
            *z += dz * DT;
        },
        |(x, _, _)| (x / 2.0).tanh(),
    )
}

/// Logistic map at r = 3.9 with a 50-iteration transient skipped.
pub(super) fn logistic_map(n: usize) -> Vec<f64> {
    const R: f64 = 3.9;

    advance(
        n,
        0.5f64,
        |t| (t * 100.0) as usize + 50,
        |x| *x = R * *x * (1.0 - *x),
        |x| (x - 0.5) * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorenz_from_scratch(t: f64) -> f64 {
        let (mut x, mut y, mut z) = (0.1f64, 0.0f64, 0.0f64);
        for _ in 0..(t * 200.0) as usize {
            let dx = 10.0 * (y - x);
            let dy = x * (28.0 - z) - y;
            let dz = x * y - 8.0 / 3.0 * z;
            x += dx * 0.01;
            y += dy * 0.01;
            z += dz * 0.01;
        }
        (x / 15.0).tanh()
    }

    #[test]
    fn test_running_integration_matches_restart() {
        let n = 512;
        let cycle = lorenz(n);
        for i in [0, 1, 37, 255, 256, 511] {
            assert_eq!(cycle[i], lorenz_from_scratch(i as f64 / n as f64));
        }
    }

    #[test]
    fn test_first_sample_is_initial_state() {
        assert_eq!(lorenz(16)[0], (0.1f64 / 15.0).tanh());
        assert_eq!(henon(16)[0], 0.1f64.tanh());
        assert_eq!(duffing(16)[0], 0.1f64.tanh());
    }

    #[test]
    fn test_outputs_are_bounded() {
        for cycle in [lorenz(1024), rossler(1024), henon(1024), duffing(1024), chua(1024)] {
            assert!(cycle.iter().all(|s| s.abs() < 1.0));
        }
        assert!(logistic_map(1024).iter().all(|s| s.abs() <= 1.0));
    }
}
