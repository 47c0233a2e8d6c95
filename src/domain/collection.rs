//! Curated collections: fixed account groups browsed as a single exhibition.
//!
//! Accounts are fetched in the listed order. An account may appear in more
//! than one collection.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CuratedCollection {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub accounts: &'static [&'static str],
}

pub const CURATED_COLLECTIONS: &[CuratedCollection] = &[
    CuratedCollection {
        key: "famous",
        title: "Hall of Fame",
        description: "Most starred abandoned projects",
        accounts: &["torvalds", "gvanrossum", "antirez", "tj", "sindresorhus"],
    },
    CuratedCollection {
        key: "gamedev",
        title: "Abandoned Games",
        description: "Unfinished gaming dreams",
        accounts: &["photonstorm", "kittykatattack", "liabru", "goldfire"],
    },
    CuratedCollection {
        key: "tools",
        title: "Forgotten Tools",
        description: "CLI and dev tools left behind",
        accounts: &["tj", "sindresorhus", "substack", "remy"],
    },
    CuratedCollection {
        key: "webdev",
        title: "Web Experiments",
        description: "Frontend projects that never shipped",
        accounts: &["addyosmani", "paulirish", "chriscoyier", "wesbos"],
    },
];

pub fn find_collection(key: &str) -> Option<&'static CuratedCollection> {
    CURATED_COLLECTIONS.iter().find(|c| c.key == key)
}
