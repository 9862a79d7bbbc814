use crate::application::ports::util::SlugGenerator;

/// ASCII-only slug normalization: lower-case the input, turn every character
/// outside `[a-z0-9-]` into a hyphen, collapse hyphen runs, and trim hyphens
/// from both ends. Titles with no ASCII letters or digits normalize to the
/// empty string; the caller decides what to do with that.
#[derive(Default, Clone)]
pub struct AsciiSlugGenerator;

impl SlugGenerator for AsciiSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        let mut slug = String::with_capacity(input.len());
        let mut pending_hyphen = false;

        for ch in input.chars() {
            let kept = match ch {
                'a'..='z' | '0'..='9' => Some(ch),
                'A'..='Z' => Some(ch.to_ascii_lowercase()),
                _ => None,
            };
            match kept {
                Some(c) => {
                    if pending_hyphen {
                        slug.push('-');
                        pending_hyphen = false;
                    }
                    slug.push(c);
                }
                // Leading separators are dropped outright; interior ones are
                // deferred so runs collapse and a trailing run never lands.
                None if !slug.is_empty() => pending_hyphen = true,
                None => {}
            }
        }

        slug
    }
}
