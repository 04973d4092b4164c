//! Story integrity digest
//!
//! A deterministic, non-cryptographic hash over the concatenated segment
//! text, shown to readers as a stable "story ID". Collisions are fine;
//! this is a display aid, not a security control or a primary key.

/// FNV-1a 32-bit offset basis
const OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
const PRIME: u32 = 0x0100_0193;

/// Normalize story text before hashing or counting.
///
/// Segments are joined with a single newline, the draft (if any) goes
/// last, then the whole thing is trimmed and internal whitespace runs
/// collapse to single spaces. Identical content in identical order
/// always normalizes to the identical string.
fn normalize<S: AsRef<str>>(contents: &[S], draft: Option<&str>) -> String {
    let mut parts: Vec<&str> = contents.iter().map(|s| s.as_ref()).collect();
    if let Some(d) = draft {
        parts.push(d);
    }
    let joined = parts.join("\n");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compute the integrity digest for a sequence of segment contents plus
/// an optional in-progress draft.
///
/// FNV-1a over the normalized text: XOR each byte into the hash, then
/// multiply by the prime. Rendered as 8 lowercase hex digits.
pub fn story_digest<S: AsRef<str>>(contents: &[S], draft: Option<&str>) -> String {
    let normalized = normalize(contents, draft);
    let mut hash = OFFSET_BASIS;
    for byte in normalized.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    format!("{hash:08x}")
}

/// Word count over the same normalized text the digest sees.
pub fn word_count<S: AsRef<str>>(contents: &[S], draft: Option<&str>) -> usize {
    let normalized = normalize(contents, draft);
    if normalized.is_empty() {
        0
    } else {
        normalized.split(' ').count()
    }
}
