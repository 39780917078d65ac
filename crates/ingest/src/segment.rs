//! Fixed-width segmentation of extracted text into prompt-sized blocks.
//!
//! Blocks are contiguous, non-overlapping and measured in characters, not
//! bytes. No attempt is made to respect word or sentence boundaries, so a
//! term may be split across two blocks.

/// Split `text` into blocks of at most `block_size` characters.
///
/// Concatenating the blocks in order reproduces `text` exactly. Empty text
/// yields no blocks. A `block_size` of zero is treated as one.
pub fn segment(text: &str, block_size: usize) -> Vec<&str> {
    let block_size = block_size.max(1);
    let mut blocks = Vec::with_capacity(text.len() / block_size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == block_size {
            blocks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        blocks.push(&text[start..]);
    }

    blocks
}
