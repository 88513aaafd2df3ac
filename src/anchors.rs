/// Element id named by a same-page link, e.g. `"#contact"` → `"contact"`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fragment() {
        assert_eq!(fragment_id("#features"), Some("features"));
        assert_eq!(fragment_id("#contact-us"), Some("contact-us"));
    }

    #[test]
    fn bare_hash_and_external_links_have_no_target() {
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about#team"), None);
        assert_eq!(fragment_id("https://example.com"), None);
    }
}
