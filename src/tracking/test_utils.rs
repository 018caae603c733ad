/// Complex number compared by the L1 distance of its components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn error(&self, other: &Self) -> f64 {
        (self.re - other.re).abs() + (self.im - other.im).abs()
    }
}
