//! Prefix function (failure function) over a slice.

/// Compute the prefix function of `items`.
///
/// `result[i]` is the length of the longest proper prefix of `items[..=i]`
/// that is also a suffix of it. Runs in O(n): every fallback along the
/// failure chain is paid for by an earlier extension.
pub fn prefix_function<T: Eq>(items: &[T]) -> Vec<usize> {
    let mut failure = vec![0; items.len()];
    for i in 1..items.len() {
        let mut j = failure[i - 1];
        while j > 0 && items[i] != items[j] {
            j = failure[j - 1];
        }
        if items[i] == items[j] {
            j += 1;
        }
        failure[i] = j;
    }
    failure
}
