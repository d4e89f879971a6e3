//! Post tag normalisation shared by writes and feed filters

/// Trim tags and drop blanks and duplicates, keeping first-seen order
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(tags.len());
    for tag in tags.iter().map(|t| t.as_ref().trim()) {
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        assert_eq!(
            normalize_tags(&[" tech", "life", "", "tech ", "  "]),
            vec!["tech", "life"]
        );
        assert!(normalize_tags::<String>(&[]).is_empty());
    }
}
