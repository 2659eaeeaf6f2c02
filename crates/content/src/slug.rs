//! Mapping of request paths onto content slugs.
//!
//! A slug is the request path with the mounted route root removed, e.g. the
//! path `/docs/guide/intro/` under the root `/docs` resolves to `guide/intro`.
//! An empty slug addresses the index resource of the content API.

const SEPARATOR: char = '/';

/// Strips every leading and trailing `/` from `value`.
pub fn trim_separators(value: &str) -> &str {
    value.trim_matches(SEPARATOR)
}

/// Resolves the content slug for `path` when the content routes are mounted at `root`.
///
/// The root is removed as a literal prefix, at most once. Paths outside the
/// root are returned with only their separators trimmed.
pub fn resolve_slug(root: &str, path: &str) -> String {
    let root = trim_separators(root);
    let path = trim_separators(path);

    let relative = path.strip_prefix(root).unwrap_or(path);
    trim_separators(relative).to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_root_from_nested_path() {
        assert_eq!(resolve_slug("/docs", "/docs/guide/intro"), "guide/intro");
    }

    #[test]
    fn separators_are_irrelevant_on_both_sides() {
        for root in ["docs", "/docs", "docs/", "//docs//"] {
            for path in ["/docs/guide/intro", "docs/guide/intro/", "///docs/guide/intro//"] {
                assert_eq!(resolve_slug(root, path), "guide/intro", "root={root:?} path={path:?}");
            }
        }
    }

    #[test]
    fn root_path_resolves_to_empty_slug() {
        assert_eq!(resolve_slug("/docs", "/docs"), "");
        assert_eq!(resolve_slug("/docs/", "/docs/"), "");
        assert_eq!(resolve_slug("", "/"), "");
    }

    #[test]
    fn empty_root_keeps_whole_path() {
        assert_eq!(resolve_slug("/", "/guide/intro/"), "guide/intro");
        assert_eq!(resolve_slug("", "guide"), "guide");
    }

    #[test]
    fn multi_segment_root_is_removed() {
        assert_eq!(resolve_slug("/help/docs/", "/help/docs/faq"), "faq");
    }

    #[test]
    fn root_is_removed_only_once() {
        assert_eq!(resolve_slug("/docs", "/docs/docs/setup"), "docs/setup");
    }

    #[test]
    fn path_outside_root_is_only_trimmed() {
        assert_eq!(resolve_slug("/docs", "/blog/post/"), "blog/post");
    }

    #[test]
    fn root_with_pattern_characters_is_matched_literally() {
        let cases = [
            ("/v1.0", "/v1.0/intro", "intro"),
            ("/v1.0", "/v1x0/intro", "v1x0/intro"),
            ("/c++", "/c++/pointers", "pointers"),
            ("/c++", "/ccc/pointers", "ccc/pointers"),
            ("/(beta)", "/(beta)/notes", "notes"),
            ("/a*b", "/aab/x", "aab/x"),
            ("/[x]", "/[x]/y", "y"),
            ("/$root^", "/$root^/z", "z"),
        ];

        for (root, path, expected) in cases {
            assert_eq!(resolve_slug(root, path), expected, "root={root:?} path={path:?}");
        }
    }

    #[test]
    fn prefix_followed_by_path_is_stripped_exactly() {
        let roots = ["docs", "a/b", "v2.1", "x+y"];
        let rests = ["", "one", "one/two", "deep/er/path"];

        for root in roots {
            for rest in rests {
                let path = format!("/{root}/{rest}/");
                assert_eq!(resolve_slug(root, &path), rest, "root={root:?} path={path:?}");
            }
        }
    }

    #[test]
    fn normalizing_a_slug_again_is_a_no_op() {
        for (root, path) in [("/docs", "/docs/guide/intro/"), ("", "/a/b"), ("/x", "/x")] {
            let slug = resolve_slug(root, path);
            assert_eq!(trim_separators(&slug), slug);
            assert_eq!(resolve_slug("", &slug), slug);
        }
    }
}
