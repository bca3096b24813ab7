use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Look up the K, inserting a default value if it is missing
    GetOrInsertDefault(K),
    /// Drop every entry
    Clear,
    /// Compare iterators
    Iter,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Clearing is rare so that trees
    /// get a chance to grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 0, 0, 1, 1, 2, 3, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::GetOrInsertDefault(K::arbitrary(g)),
            2 => Op::Clear,
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
