/// One record from a corpus file. Re-derived from the markup on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub topics: Vec<String>,
    pub body: Option<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, topics: Vec<String>, body: Option<String>) -> Self {
        Self {
            id: id.into(),
            topics,
            body,
        }
    }

    pub fn is_single_topic(&self) -> bool {
        self.topics.len() == 1
    }

    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Single-topic articles with a body are the only ones any pass looks at.
    pub fn is_candidate(&self) -> bool {
        self.is_single_topic() && self.has_body()
    }

    pub fn topic(&self) -> Option<&str> {
        match self.topics.as_slice() {
            [topic] => Some(topic.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_needs_one_topic_and_body() {
        let one = Article::new("1", vec!["earn".into()], Some("text".into()));
        let two = Article::new("2", vec!["earn".into(), "acq".into()], Some("text".into()));
        let none = Article::new("3", vec!["earn".into()], None);
        let empty_body = Article::new("4", vec!["earn".into()], Some(String::new()));

        assert!(one.is_candidate());
        assert_eq!(one.topic(), Some("earn"));
        assert!(!two.is_candidate());
        assert_eq!(two.topic(), None);
        assert!(!none.is_candidate());
        assert!(empty_body.is_candidate());
    }
}
