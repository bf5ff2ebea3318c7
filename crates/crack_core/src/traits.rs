use std::fmt::Debug;

/// A closed planar curve parametrized over one period `[0, 2π)`.
pub trait Curve: Debug {
    /// Cartesian x-coordinate at parameter `s`.
    fn x(&self, s: f64) -> f64;

    /// Cartesian y-coordinate at parameter `s`.
    fn y(&self, s: f64) -> f64;

    /// Both coordinates at once.
    fn point(&self, s: f64) -> (f64, f64) {
        (self.x(s), self.y(s))
    }
}

/// A kernel whose context is already fixed, leaving a single free argument.
pub trait Evaluate<A> {
    fn evaluate(&self, arg: A) -> f64;
}
