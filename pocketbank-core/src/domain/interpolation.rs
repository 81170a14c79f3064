//! Clamped piecewise-linear interpolation

/// Maps an input value onto an output range through `N` breakpoints.
///
/// Values between two breakpoints are interpolated linearly; values outside
/// the domain hold the nearest endpoint. Breakpoints must be ascending.
/// Evaluation does not allocate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation<const N: usize> {
    input: [f64; N],
    output: [f64; N],
}

impl<const N: usize> Interpolation<N> {
    pub const fn new(input: [f64; N], output: [f64; N]) -> Self {
        Self { input, output }
    }

    pub fn at(&self, value: f64) -> f64 {
        if N == 0 {
            return 0.0;
        }
        // NaN offsets behave like the start of the domain
        let value = if value.is_nan() { self.input[0] } else { value };

        if value <= self.input[0] {
            return self.output[0];
        }
        if value >= self.input[N - 1] {
            return self.output[N - 1];
        }

        for i in 0..N - 1 {
            let (x0, x1) = (self.input[i], self.input[i + 1]);
            if value <= x1 {
                let (y0, y1) = (self.output[i], self.output[i + 1]);
                if x1 == x0 {
                    return y1;
                }
                let t = (value - x0) / (x1 - x0);
                return y0 + t * (y1 - y0);
            }
        }
        self.output[N - 1]
    }
}

/// Two-breakpoint shorthand
pub const fn linear(from: (f64, f64), to: (f64, f64)) -> Interpolation<2> {
    Interpolation::new([from.0, to.0], [from.1, to.1])
}
