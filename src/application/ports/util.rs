// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Normalize arbitrary input into URL-safe slug characters. May return an
    /// empty string when nothing survives normalization.
    fn slugify(&self, input: &str) -> String;
}
