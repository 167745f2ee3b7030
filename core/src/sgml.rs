use crate::article::Article;
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::path::Path;

const BODY_ELEMENT: &str = "article-body";
const ID_ATTRIBUTE: &str = "newid";

lazy_static! {
    // An HTML parser folds every <BODY> into the document body, so the corpus
    // body tags are renamed before parsing.
    static ref BODY_TAG: Regex = Regex::new(r"(?i)<(/?)body\b").expect("valid regex");
    static ref RECORD: Selector = Selector::parse("reuters").expect("valid selector");
    static ref TOPIC: Selector = Selector::parse("topics > d").expect("valid selector");
    static ref BODY: Selector = Selector::parse(BODY_ELEMENT).expect("valid selector");
}

/// Parse every article record in one corpus file.
///
/// `path` is only used to name the file in errors.
pub fn parse_articles(markup: &str, path: &Path) -> Result<Vec<Article>> {
    let markup = rename_body_tags(markup);
    let document = Html::parse_document(&markup);

    document
        .select(&RECORD)
        .enumerate()
        .map(|(position, record)| parse_record(record, position, path))
        .collect()
}

fn rename_body_tags(markup: &str) -> Cow<'_, str> {
    BODY_TAG.replace_all(markup, format!("<${{1}}{BODY_ELEMENT}").as_str())
}

fn parse_record(record: ElementRef<'_>, position: usize, path: &Path) -> Result<Article> {
    let id = record
        .value()
        .attr(ID_ATTRIBUTE)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::MalformedArticle {
            path: path.to_path_buf(),
            position,
            reason: format!("missing {} attribute", ID_ATTRIBUTE.to_uppercase()),
        })?;

    let topics = record
        .select(&TOPIC)
        .map(|topic| topic.text().collect::<String>())
        .collect();

    let body = record
        .select(&BODY)
        .next()
        .map(|body| body.text().collect::<String>());

    Ok(Article::new(id, topics, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE lewis SYSTEM "lewis.dtd">
<REUTERS TOPICS="YES" LEWISSPLIT="TRAIN" NEWID="1">
<DATE>26-FEB-1987 15:01:01.79</DATE>
<TOPICS><D>cocoa</D></TOPICS>
<PLACES><D>el-salvador</D><D>usa</D></PLACES>
<TEXT>&#2;
<TITLE>BAHIA COCOA REVIEW</TITLE>
<BODY>Showers continued throughout the week.
Reuter
&#3;</BODY></TEXT>
</REUTERS>
<REUTERS TOPICS="NO" NEWID="2">
<TOPICS></TOPICS>
<TEXT TYPE="BRIEF"><TITLE>NO BODY HERE</TITLE></TEXT>
</REUTERS>
<REUTERS TOPICS="YES" NEWID="3">
<TOPICS><D>grain</D><D>wheat</D></TOPICS>
<TEXT><BODY>Wheat &lt;exports&gt; rose.</BODY></TEXT>
</REUTERS>
"#;

    #[test]
    fn extracts_records() {
        let articles = parse_articles(SAMPLE, Path::new("sample.sgm")).unwrap();
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].id, "1");
        assert_eq!(articles[0].topics, vec!["cocoa"]);
        let body = articles[0].body.as_deref().unwrap();
        assert!(body.starts_with("Showers continued"));
        assert!(!body.contains("BAHIA"));

        assert_eq!(articles[1].id, "2");
        assert!(articles[1].topics.is_empty());
        assert_eq!(articles[1].body, None);

        assert_eq!(articles[2].topics, vec!["grain", "wheat"]);
        assert_eq!(articles[2].body.as_deref(), Some("Wheat <exports> rose."));
    }

    #[test]
    fn places_are_not_topics() {
        let articles = parse_articles(SAMPLE, Path::new("sample.sgm")).unwrap();
        assert!(!articles[0].topics.iter().any(|t| t == "usa"));
    }

    #[test]
    fn missing_id_is_malformed() {
        let markup = "<REUTERS><TOPICS><D>earn</D></TOPICS><BODY>x</BODY></REUTERS>";
        let err = parse_articles(markup, Path::new("bad.sgm")).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("bad.sgm"));
        assert!(err.to_string().contains("NEWID"));
    }
}
