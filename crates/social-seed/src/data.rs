//! Sample content and generators for seeding

use rand::seq::SliceRandom;
use rand::Rng;

use social_core::{Id, NewComment, NewPost, NewUser};

const USERNAMES: &[&str] = &[
    "tom", "bob", "jerry", "alice", "eve", "mallory", "peggy", "trent", "victor", "walter",
    "carol", "dave",
];

const TITLES: &[&str] = &[
    "Unleashing the Future: How AI is Reshaping Our World",
    "Secrets of the Digital Underground",
    "Beyond the Horizon: Exploring the Unknown",
    "Mastering Chaos: Strategies for Thriving in Uncertain Times",
    "The Power Playbook: Unlocking Hidden Potential",
    "Zero to Hero: A Journey of Transformation",
    "Breaking the Code: Inside the Hacker's Mind",
    "Rising Titans: The Battle for Innovation",
    "Edge of Reality: Where Science Meets Imagination",
    "The Hidden Blueprint to Success",
    "Shadows of Tomorrow: Predicting the Next Big Wave",
    "The Art of Fearless Living",
    "Game Changers: Leaders Who Rewrite the Rules",
    "Storming the Summit: Conquering Impossible Goals",
    "Epic Journeys: Tales of Adventure and Discovery",
];

const CONTENTS: &[&str] = &[
    "Content that captivates and converts.",
    "The secret formula behind viral content.",
    "Crafting stories that spark emotion.",
    "From clicks to conversions: content that sells.",
    "The hidden psychology of persuasive content.",
    "Content that ranks: winning the SEO game.",
    "The future of interactive content.",
    "How to create evergreen content that lasts.",
    "Data-driven content strategies that work.",
    "How to scale your content without losing quality.",
];

const TAGS: &[&str] = &[
    "tech", "life", "music", "travel", "food", "science", "health", "fitness", "education",
    "finance", "history", "art", "culture", "nature", "sports", "politics", "environment",
    "fashion", "gaming", "movies",
];

const COMMENTS: &[&str] = &[
    "Great post! Really enjoyed reading it.",
    "Thanks for sharing this information.",
    "Interesting perspective, I hadn't thought of it that way.",
    "I disagree with some points, but overall a good read.",
    "Can you provide more details on this topic?",
    "Looking forward to your next post!",
    "I learned something new today.",
    "Well written and easy to understand.",
    "Could you recommend further reading?",
    "Fantastic article, keep up the good work!",
];

/// How much data one seeding run creates
#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
    pub follows: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: 100,
            posts: 200,
            comments: 500,
            follows: 300,
        }
    }
}

fn pick<'a, R: Rng>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Registrations sharing one precomputed password hash
pub fn users(count: usize, password_hash: &str) -> Vec<NewUser> {
    (0..count)
        .map(|i| {
            let name = format!("{}{i}", USERNAMES[i % USERNAMES.len()]);
            let email = format!("{name}@example.com");
            NewUser::new(name, email, password_hash.to_string())
        })
        .collect()
}

/// Posts by random authors, each with up to three random tags
pub fn posts<R: Rng>(rng: &mut R, count: usize, authors: &[Id]) -> Vec<NewPost> {
    if authors.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let author = authors[rng.gen_range(0..authors.len())];
            let tags: Vec<&str> = (0..3).map(|_| pick(rng, TAGS)).collect();
            NewPost::new(
                author,
                pick(rng, TITLES).to_string(),
                pick(rng, CONTENTS).to_string(),
            )
            .with_tags(tags)
        })
        .collect()
}

/// Comments by random users on random posts
pub fn comments<R: Rng>(rng: &mut R, count: usize, posts: &[Id], users: &[Id]) -> Vec<NewComment> {
    if posts.is_empty() || users.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            NewComment::new(
                posts[rng.gen_range(0..posts.len())],
                users[rng.gen_range(0..users.len())],
                pick(rng, COMMENTS).to_string(),
            )
        })
        .collect()
}

/// Random `(follower, followed)` pairs, never self-follows
pub fn follows<R: Rng>(rng: &mut R, count: usize, users: &[Id]) -> Vec<(Id, Id)> {
    if users.len() < 2 {
        return Vec::new();
    }

    let mut pairs = Vec::with_capacity(count);
    while pairs.len() < count {
        let follower = users[rng.gen_range(0..users.len())];
        let followed = users[rng.gen_range(0..users.len())];
        if follower != followed {
            pairs.push((follower, followed));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(n: i64) -> Vec<Id> {
        (1..=n).map(Id::new).collect()
    }

    #[test]
    fn test_users_are_unique() {
        let users = users(30, "hash");
        assert_eq!(users.len(), 30);
        assert_eq!(users[0].username, "tom0");
        assert_eq!(users[12].username, "tom12");
        assert_eq!(users[3].email, "alice3@example.com");

        let mut names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 30);
    }

    #[test]
    fn test_posts_use_known_authors() {
        let mut rng = StdRng::seed_from_u64(7);
        let authors = ids(5);
        let posts = posts(&mut rng, 20, &authors);

        assert_eq!(posts.len(), 20);
        for post in &posts {
            assert!(authors.contains(&post.user_id));
            assert_eq!(post.tags.len(), 3);
            assert!(post.tags.iter().all(|t| TAGS.contains(&t.as_str())));
        }
    }

    #[test]
    fn test_follows_skip_self() {
        let mut rng = StdRng::seed_from_u64(11);
        let pairs = follows(&mut rng, 50, &ids(3));
        assert_eq!(pairs.len(), 50);
        assert!(pairs.iter().all(|(a, b)| a != b));

        assert!(follows(&mut rng, 5, &ids(1)).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(posts(&mut rng, 5, &[]).is_empty());
        assert!(comments(&mut rng, 5, &ids(2), &[]).is_empty());
    }
}
