use uuid::Uuid;

use crate::domain::post::models::Slug;

const MAX_BASE_LENGTH: usize = 80;
const FALLBACK: &str = "post";
const RANDOM_SUFFIX_LENGTH: usize = 6;

/// Derive the base slug for a title.
///
/// Transliterates to ASCII, lowercases, collapses every run of other
/// characters into one dash and trims dashes from both ends. The result is
/// cut back to the last whole word when it exceeds 80 characters. A title with no
/// usable characters yields `post`.
pub fn slugify(title: &str) -> Slug {
    let ascii = deunicode::deunicode(title).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > MAX_BASE_LENGTH {
        let cut = if slug.as_bytes()[MAX_BASE_LENGTH] == b'-' {
            MAX_BASE_LENGTH
        } else {
            // A single word longer than the limit is cut inside the word.
            slug[..MAX_BASE_LENGTH].rfind('-').unwrap_or(MAX_BASE_LENGTH)
        };
        slug.truncate(cut);
    }

    if slug.is_empty() {
        return Slug::from_trusted(FALLBACK.to_string());
    }

    Slug::from_trusted(slug)
}

/// Produces the candidate slugs tried, in order, when creating a post.
///
/// The post store's unique constraint decides which candidate wins; the
/// generator never checks availability itself. Candidates are the base,
/// then `base-2` through `base-N`, then `base-<hex>` with random suffixes.
#[derive(Debug, Clone, Copy)]
pub struct SlugGenerator {
    counter_attempts: u32,
    random_attempts: u32,
}

impl SlugGenerator {
    pub const DEFAULT_COUNTER_ATTEMPTS: u32 = 10;
    pub const DEFAULT_RANDOM_ATTEMPTS: u32 = 5;

    /// # Arguments
    /// * `counter_attempts` - Highest counter tried, the base counting as 1
    /// * `random_attempts` - Random suffixes tried after the counters run out
    pub fn new(counter_attempts: u32, random_attempts: u32) -> Self {
        Self {
            counter_attempts: counter_attempts.max(1),
            random_attempts,
        }
    }

    /// Total number of candidates [`candidates`](Self::candidates) yields.
    pub fn attempts(&self) -> u32 {
        self.counter_attempts + self.random_attempts
    }

    pub fn candidates<'a>(&self, base: &'a Slug) -> impl Iterator<Item = Slug> + 'a {
        let counted = (1..=self.counter_attempts).map(move |n| {
            if n == 1 {
                base.clone()
            } else {
                Slug::from_trusted(format!("{}-{}", base, n))
            }
        });

        let random = (0..self.random_attempts)
            .map(move |_| Slug::from_trusted(format!("{}-{}", base, random_suffix())));

        counted.chain(random)
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_COUNTER_ATTEMPTS,
            Self::DEFAULT_RANDOM_ATTEMPTS,
        )
    }
}

fn random_suffix() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(RANDOM_SUFFIX_LENGTH);
    hex
}
