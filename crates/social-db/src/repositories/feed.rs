//! Personalized feed query construction
//!
//! The feed shows posts written by the reader or by anyone the reader
//! follows, newest first. Every user-supplied value is bound, never
//! interpolated.

use sqlx::{Postgres, QueryBuilder};

use social_core::{FeedQuery, Id};

const FEED_SELECT: &str = r"
    SELECT p.id, p.title, p.content, p.user_id, p.tags, p.created_at, p.updated_at, p.version,
           u.username AS author_username,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
    WHERE ";

/// Escape LIKE wildcards so the term matches literally
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the feed query for `user_id`
///
/// `query` must already be validated. Tags combine with OR: a post matches
/// when it carries any requested tag.
pub(crate) fn build_feed_query(user_id: Id, query: &FeedQuery) -> QueryBuilder<'_, Postgres> {
    let reader = user_id.into_inner();
    let mut qb = QueryBuilder::new(FEED_SELECT);

    qb.push("(p.user_id = ")
        .push_bind(reader)
        .push(" OR EXISTS (SELECT 1 FROM followers f WHERE f.user_id = p.user_id AND f.follower_id = ")
        .push_bind(reader)
        .push("))");

    if let Some(term) = query.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (p.title ILIKE ")
            .push_bind(pattern.clone())
            .push(r" ESCAPE '\' OR p.content ILIKE ")
            .push_bind(pattern)
            .push(r" ESCAPE '\')");
    }

    let tags = query.normalized_tags();
    if !tags.is_empty() {
        qb.push(" AND (");
        for (i, tag) in tags.into_iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("p.tags ? ").push_bind(tag);
        }
        qb.push(")");
    }

    if let Some(since) = query.since {
        qb.push(" AND p.created_at >= ").push_bind(since);
    }
    if let Some(until) = query.until {
        qb.push(" AND p.created_at <= ").push_bind(until);
    }

    qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset);

    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn placeholders(sql: &str) -> usize {
        sql.matches('$').count()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ai"), "ai");
        assert_eq!(escape_like("100%"), r"100\%");
        assert_eq!(escape_like("snake_case"), r"snake\_case");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn test_unfiltered_feed() {
        let query = FeedQuery::new();
        let qb = build_feed_query(Id::new(1), &query);
        let sql = qb.sql();

        assert!(sql.contains("p.user_id = $1"));
        assert!(sql.contains("f.follower_id = $2"));
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("p.tags ?"));
        assert!(sql.ends_with("ORDER BY p.created_at DESC, p.id DESC LIMIT $3 OFFSET $4"));
        assert_eq!(placeholders(sql), 4);
    }

    #[test]
    fn test_search_and_tags() {
        let query = FeedQuery::new()
            .with_search("ai")
            .with_tags(["tech", "life"]);
        let qb = build_feed_query(Id::new(1), &query);
        let sql = qb.sql();

        assert!(sql.contains(r"p.title ILIKE $3 ESCAPE '\' OR p.content ILIKE $4 ESCAPE '\'"));
        assert!(sql.contains("(p.tags ? $5 OR p.tags ? $6)"));
        assert!(sql.contains("LIMIT $7 OFFSET $8"));
    }

    #[test]
    fn test_blank_filters_are_skipped() {
        let query = FeedQuery::new().with_search("   ").with_tags(["", " "]);
        let qb = build_feed_query(Id::new(1), &query);
        let sql = qb.sql();

        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("p.tags ?"));
    }

    #[test]
    fn test_duplicate_tags_bound_once() {
        let query = FeedQuery::new().with_tags(["tech", "tech "]);
        let qb = build_feed_query(Id::new(1), &query);
        assert_eq!(qb.sql().matches("p.tags ?").count(), 1);
    }

    #[test]
    fn test_time_window() {
        let now = Utc::now();
        let query = FeedQuery::new().with_since(now).with_until(now);
        let qb = build_feed_query(Id::new(1), &query);
        let sql = qb.sql();

        assert!(sql.contains("p.created_at >= $3"));
        assert!(sql.contains("p.created_at <= $4"));
        assert_eq!(placeholders(sql), 6);
    }
}
