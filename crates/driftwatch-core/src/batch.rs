use crate::error::CoreError;

/// Split `items` into consecutive groups of `size`, the last group holding
/// whatever remains.
///
/// Concatenating the groups yields `items` unchanged. An empty slice yields
/// no groups at all rather than a single empty one.
pub fn batch<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>, CoreError> {
    if size == 0 {
        return Err(CoreError::InvalidBatchSize(size));
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}
