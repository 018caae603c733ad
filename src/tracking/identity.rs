/// Integer label that follows an object from one time step to the next.
pub type Identity = usize;

/// Objects of one time step and the identity each of them carries.
///
/// Every object owns a slot holding its identity, so lookups never rely on hashing the objects
/// themselves. Identities are unique within a map. Maps are produced whole, by
/// [IdentityMap::initial] on the first time step and by [crate::tracking::transition] afterwards.
#[derive(Debug, Clone)]
pub struct IdentityMap<T> {
    objects: Vec<T>,
    identities: Vec<Identity>,
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            identities: Vec::new(),
        }
    }

    /// Assigns identities `0..n` to `objects` in order.
    pub fn initial(objects: Vec<T>) -> Self {
        let identities = (0..objects.len()).collect();
        Self {
            objects,
            identities,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, Identity)> {
        self.objects.iter().zip(self.identities.iter().copied())
    }

    pub fn object_of(&self, identity: Identity) -> Option<&T> {
        self.identities
            .iter()
            .position(|&id| id == identity)
            .map(|slot| &self.objects[slot])
    }

    pub fn max_identity(&self) -> Option<Identity> {
        self.identities.iter().copied().max()
    }

    /// First identity handed out to an object that has no counterpart: one above the current
    /// maximum, or 1 for an empty map.
    pub fn next_identity(&self) -> Identity {
        self.max_identity().unwrap_or(0) + 1
    }

    pub(crate) fn push(&mut self, object: T, identity: Identity) {
        debug_assert!(
            !self.identities.contains(&identity),
            "identity {identity} is already taken"
        );
        self.objects.push(object);
        self.identities.push(identity);
    }
}

impl<T: PartialEq> IdentityMap<T> {
    pub fn identity_of(&self, object: &T) -> Option<Identity> {
        self.objects
            .iter()
            .position(|o| o == object)
            .map(|slot| self.identities[slot])
    }
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, Identity)> for IdentityMap<T> {
    fn from_iter<I: IntoIterator<Item = (T, Identity)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (object, identity) in iter {
            map.push(object, identity);
        }
        map
    }
}

/// Order of the slots is irrelevant.
impl<T: PartialEq> PartialEq for IdentityMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(object, identity)| other.object_of(identity) == Some(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        let map = IdentityMap::initial(vec!["a", "b", "c"]);
        assert_eq!(map.identities(), &[0, 1, 2]);
        assert_eq!(map.identity_of(&"c"), Some(2));
        assert_eq!(map.object_of(1), Some(&"b"));
        assert_eq!(map.identity_of(&"z"), None);
    }

    #[test]
    fn test_next_identity() {
        assert_eq!(IdentityMap::<u8>::new().next_identity(), 1);
        assert_eq!(IdentityMap::initial(vec![7u8]).next_identity(), 1);

        let map: IdentityMap<u8> = [(1, 4), (2, 9), (3, 2)].into_iter().collect();
        assert_eq!(map.max_identity(), Some(9));
        assert_eq!(map.next_identity(), 10);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: IdentityMap<&str> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: IdentityMap<&str> = [("y", 2), ("x", 1)].into_iter().collect();
        let c: IdentityMap<&str> = [("y", 1), ("x", 2)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, IdentityMap::initial(vec!["x"]));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_duplicate_identity() {
        let _: IdentityMap<u8> = [(1, 3), (2, 3)].into_iter().collect();
    }
}
