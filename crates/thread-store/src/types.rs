//! On-disk document shapes.

use std::collections::BTreeMap;

/// Thread id -> user ids (ban list, mute list).
pub type ThreadUserLists = BTreeMap<String, Vec<String>>;

/// Thread id -> user id -> game id.
pub type ThreadGameIds = BTreeMap<String, BTreeMap<String, String>>;
