use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_TOP_TOPICS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// Occurrence counts per topic, remembering the order topics were first seen.
#[derive(Debug, Default)]
pub struct TopicCounter {
    counts: Vec<TopicCount>,
    positions: HashMap<String, usize>,
}

impl TopicCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, topic: &str) {
        if let Some(&pos) = self.positions.get(topic) {
            self.counts[pos].count += 1;
        } else {
            self.positions.insert(topic.to_string(), self.counts.len());
            self.counts.push(TopicCount {
                topic: topic.to_string(),
                count: 1,
            });
        }
    }

    pub fn count(&self, topic: &str) -> usize {
        self.positions
            .get(topic)
            .map_or(0, |&pos| self.counts[pos].count)
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Topics by count, highest first. Equal counts stay in first-seen order.
    pub fn ranked(&self) -> Vec<TopicCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    pub fn top(&self, n: usize) -> PopularTopics {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        PopularTopics::from_ranked(ranked.into_iter().map(|tc| tc.topic).collect())
    }
}

/// The selected topics, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularTopics {
    ranked: Vec<String>,
    members: HashSet<String>,
}

impl PopularTopics {
    pub fn from_ranked(ranked: Vec<String>) -> Self {
        let members = ranked.iter().cloned().collect();
        Self { ranked, members }
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.members.contains(topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}
