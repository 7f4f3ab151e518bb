use crate::{Error, Tuple, Value};

/// Splits a whitespace separated attribute list such as `"title year"`.
pub(crate) fn split_attributes(attributes: &str) -> Vec<&str> {
    attributes.split_whitespace().collect()
}

/// Builds a new tuple from the values of `tuple` at `positions`.
pub(crate) fn project_helper(tuple: &[Value], positions: &[usize]) -> Tuple {
    positions.iter().map(|&i| tuple[i].clone()).collect()
}

/// Calls `result` on every pair of tuples from `left` and `right`. `right` is called once
/// per tuple of `left` for a fresh pass over the right tuples.
pub(crate) fn product_helper<I, J>(
    left: I,
    mut right: impl FnMut() -> J,
    mut result: impl FnMut(&Tuple, &Tuple) -> Result<(), Error>,
) -> Result<(), Error>
where
    I: IntoIterator<Item = Result<Tuple, Error>>,
    J: IntoIterator<Item = Result<Tuple, Error>>,
{
    for l in left {
        let l = l?;
        for r in right() {
            result(&l, &r?)?;
        }
    }
    Ok(())
}

/// Returns true if `tuples` yields a tuple equal to `tuple`. Stops at the first match.
pub(crate) fn contains_helper<I>(tuples: I, tuple: &[Value]) -> Result<bool, Error>
where
    I: IntoIterator<Item = Result<Tuple, Error>>,
{
    for t in tuples {
        if t?.as_slice() == tuple {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns true if the values of `left` at `left_columns` equal the values of `right` at
/// `right_columns`, pairwise. Stops at the first pair that differs.
pub(crate) fn match_helper(
    left: &[Value],
    left_columns: &[usize],
    right: &[Value],
    right_columns: &[usize],
) -> bool {
    left_columns
        .iter()
        .zip(right_columns.iter())
        .all(|(&i, &j)| left[i] == right[j])
}

/// Returns the positions of the first occurrence of every distinct name in `names`.
pub(crate) fn first_occurrences(names: &[String]) -> Vec<usize> {
    (0..names.len())
        .filter(|&i| !names[..i].contains(&names[i]))
        .collect()
}
