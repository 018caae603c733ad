/// Signed dissimilarity score between two objects of the same kind.
///
/// Lower means more alike. Scores for two real objects must be finite; they may be negative.
/// Closures and functions `Fn(&T, &T) -> f64` implement this trait.
pub trait Dissimilarity<T: ?Sized> {
    fn dissimilarity(&self, old: &T, new: &T) -> f64;
}

impl<T, Func> Dissimilarity<T> for Func
where
    T: ?Sized,
    Func: Fn(&T, &T) -> f64,
{
    fn dissimilarity(&self, old: &T, new: &T) -> f64 {
        self(old, new)
    }
}
