//! Remove-then-insert helpers shared by task and column moves.

/// Move the element at `from` so it ends up at `to`.
///
/// `to` is an index into the sequence *after* the element has been removed,
/// clamped to its length. Returns true if the order changed.
pub(crate) fn reorder<T>(seq: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= seq.len() {
        return false;
    }
    let item = seq.remove(from);
    let to = to.min(seq.len());
    seq.insert(to, item);
    from != to
}

/// Insert `item` at `index`, clamped to the sequence length. Returns the
/// index actually used.
pub(crate) fn insert_clamped<T>(seq: &mut Vec<T>, index: usize, item: T) -> usize {
    let index = index.min(seq.len());
    seq.insert(index, item);
    index
}
