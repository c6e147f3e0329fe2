//! Short hash helpers

/// First `len` hex chars of the md5 digest of `input` (`len` is capped at 32)
pub fn short_md5(input: &str, len: usize) -> String {
    let digest = format!("{:x}", md5::compute(input));
    digest[..len.min(digest.len())].to_string()
}
