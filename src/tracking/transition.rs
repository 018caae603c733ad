use tracing::debug;

use super::correspondence::{find_matching, MatchStrategy};
use super::{Dissimilarity, IdentityMap, TrackingError};

/// Identity map of `new_objects`, carrying identities over from `original` along the best
/// correspondence found by exhaustive search.
///
/// Matched objects inherit the identity of their old counterpart. New objects paired with
/// padding receive fresh identities, counting up from [IdentityMap::next_identity] in the order
/// of `new_objects`. Old objects paired with padding are dropped and their identities retired.
pub fn transition<T, D>(
    original: &IdentityMap<T>,
    new_objects: &[T],
    dissimilarity: &D,
) -> Result<IdentityMap<T>, TrackingError>
where
    T: Clone,
    D: Dissimilarity<T> + ?Sized,
{
    transition_with(original, new_objects, dissimilarity, &MatchStrategy::exhaustive())
}

/// [transition] with an explicit search strategy.
pub fn transition_with<T, D>(
    original: &IdentityMap<T>,
    new_objects: &[T],
    dissimilarity: &D,
    strategy: &MatchStrategy,
) -> Result<IdentityMap<T>, TrackingError>
where
    T: Clone,
    D: Dissimilarity<T> + ?Sized,
{
    let old_objects = original.objects();
    let matching = find_matching(old_objects, new_objects, dissimilarity, strategy)?;

    let mut next = IdentityMap::new();
    let mut fresh = original.next_identity();
    let (mut carried, mut minted, mut dropped) = (0usize, 0usize, 0usize);

    for (new_index, &old_index) in matching.old_for_new.iter().enumerate() {
        match (old_index < old_objects.len(), new_objects.get(new_index)) {
            (true, Some(object)) => {
                next.push(object.clone(), original.identities()[old_index]);
                carried += 1;
            }
            (false, Some(object)) => {
                next.push(object.clone(), fresh);
                fresh += 1;
                minted += 1;
            }
            (true, None) => dropped += 1,
            (false, None) => {}
        }
    }

    debug!(
        carried,
        minted,
        dropped,
        total_error = matching.total_error,
        optimal = matching.optimal,
        "identity transition"
    );

    Ok(next)
}
