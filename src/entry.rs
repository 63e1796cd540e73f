/// The payload of a tree node: an ordering key and its associated value. Sets store `()` as the
/// value so that every collection shares one balancing algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn into_pair(self) -> (T, U) {
        let Entry { key, value } = self;
        (key, value)
    }
}
