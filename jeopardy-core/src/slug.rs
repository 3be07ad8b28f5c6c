//! Category slugs used to address board cells.

use std::collections::HashSet;

/// Slug used for categories whose title normalizes to nothing.
pub const FALLBACK_SLUG: &str = "category";

/// Normalize a category title: ASCII alphanumerics are lowercased,
/// every other character becomes `-`.
///
/// Applying it twice gives the same result as applying it once.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Slugify every title, suffixing duplicates with `-2`, `-3`, ... so that
/// each slug is unique within the returned list.
pub fn unique_slugs<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut slugs = Vec::new();

    for title in titles {
        let mut base = slugify(title);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        seen.insert(candidate.clone());
        slugs.push(candidate);
    }

    slugs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Science"), "science");
        assert_eq!(slugify("U.S. History"), "u-s--history");
        assert_eq!(slugify("4-letter words"), "4-letter-words");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_non_ascii() {
        assert_eq!(slugify("Café"), "caf-");
        assert_eq!(slugify("日本"), "--");
    }

    #[test]
    fn test_slugify_idempotent() {
        for title in ["Science", "U.S. History", "  odd  spacing ", "Café & Crème", "a-b-c", ""] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "not idempotent for {title:?}");
        }
    }

    #[test]
    fn test_unique_slugs_without_collisions() {
        let slugs = unique_slugs(["Science", "Sports"]);
        assert_eq!(slugs, vec!["science", "sports"]);
    }

    #[test]
    fn test_unique_slugs_disambiguates() {
        let slugs = unique_slugs(["Science", "SCIENCE", "science!", "Science 2"]);
        assert_eq!(slugs, vec!["science", "science-2", "science-", "science-2-2"]);

        let set: HashSet<_> = slugs.iter().collect();
        assert_eq!(set.len(), slugs.len());
    }

    #[test]
    fn test_unique_slugs_empty_titles() {
        let slugs = unique_slugs(["", "", "Category"]);
        assert_eq!(slugs, vec!["category", "category-2", "category-3"]);
    }
}
