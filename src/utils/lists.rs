//! Small list helpers

/// Split `items` into consecutive chunks, opening a new chunk at every
/// element for which `starts_chunk` holds. The first element always opens
/// a chunk; the matching element becomes the head of the new chunk.
pub fn chunk_when<T, I, P>(items: I, mut starts_chunk: P) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    items.into_iter().fold(Vec::new(), |mut chunks: Vec<Vec<T>>, item| {
        if chunks.is_empty() || starts_chunk(&item) {
            chunks.push(Vec::new());
        }
        if let Some(last) = chunks.last_mut() {
            last.push(item);
        }
        chunks
    })
}
