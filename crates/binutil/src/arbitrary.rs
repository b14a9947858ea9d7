use arbitrary::{Arbitrary, Unstructured};

use crate::int31::{INT31_MAX, Int31};

impl<'a> Arbitrary<'a> for Int31 {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        // Drop the top bit so every input lands in range.
        let v = u32::arbitrary(u)? & INT31_MAX;
        Ok(Int31::new_unchecked(v))
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        u32::size_hint(depth)
    }
}
