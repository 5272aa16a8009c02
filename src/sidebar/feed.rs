use super::i18n::Locale;
use super::relative_time;
use crate::error::Result;
use crate::http::HttpRequest;
use chrono::{DateTime, Utc};

/// Upper bound on items taken from one feed response.
pub const FETCH_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub time_ago: String,
}

/// The `feedrecentchanges` request: main namespace, last 7 days, no minor,
/// bot or log entries.
pub fn recent_changes_request(script_path: &str) -> HttpRequest {
    let limit = FETCH_LIMIT.to_string();
    HttpRequest::post_form(
        format!("{}/api.php", script_path.trim_end_matches('/')),
        [
            ("action", "feedrecentchanges"),
            ("feedformat", "rss"),
            ("namespace", "0"),
            ("days", "7"),
            ("limit", limit.as_str()),
            ("hideminor", "1"),
            ("hidebots", "1"),
            ("hidelog", "1"),
        ],
    )
}

/// Parses an RSS body into display items. Entries lacking a title or a
/// publish date are skipped.
pub fn parse_items(body: &str, article_path: &str, now: DateTime<Utc>, locale: Locale) -> Result<Vec<FeedItem>> {
    let feed = feed_rs::parser::parse(body.as_bytes())?;

    let items = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title?.content;
            let published = entry.published?;
            Some(FeedItem {
                link: article_link(&title, article_path),
                time_ago: relative_time::from_now(published, now, locale),
                title,
            })
        })
        .take(FETCH_LIMIT)
        .collect();

    Ok(items)
}

/// `Main Page` with `/wiki/$1` -> `/wiki/Main_Page`.
///
/// `article_path` is read as a replacement pattern over the whole encoded
/// title: `$1`, `$01` and `$&` insert it, `$$` is a literal `$`, and
/// `` $` `` and `$'` are empty. Any other `$` is kept as is.
pub fn article_link(title: &str, article_path: &str) -> String {
    let encoded = encode_uri(&title.replace(' ', "_"));
    let mut link = String::with_capacity(article_path.len() + encoded.len());
    let mut rest = article_path;

    while let Some(pos) = rest.find('$') {
        link.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (expansion, consumed) = if after.starts_with("01") {
            (encoded.as_str(), 2)
        } else if after.starts_with(['1', '&']) {
            (encoded.as_str(), 1)
        } else if after.starts_with('$') {
            ("$", 1)
        } else if after.starts_with(['`', '\'']) {
            ("", 1)
        } else {
            ("$", 0)
        };
        link.push_str(expansion);
        rest = &after[consumed..];
    }
    link.push_str(rest);
    link
}

/// Percent-encodes everything except the characters a URI may carry as-is,
/// reserved delimiters included.
pub fn encode_uri(input: &str) -> String {
    const KEEP: &str = ";,/?:@&=+$-_.!~*'()#";

    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || KEEP.contains(c) {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Wiki - Recent changes [ja]</title>
    <link>https://wiki.example/wiki/Special:RecentChanges</link>
    <description>Track the most recent changes to the wiki in this feed.</description>
    <item>
      <title>Redstone Circuit</title>
      <link>https://wiki.example/w/index.php?title=Redstone_Circuit&amp;diff=12</link>
      <pubDate>Wed, 01 May 2024 11:00:00 GMT</pubDate>
    </item>
    <item>
      <title>No date here</title>
      <link>https://wiki.example/wiki/No_date_here</link>
    </item>
    <item>
      <title>村人</title>
      <pubDate>Tue, 30 Apr 2024 12:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let req = recent_changes_request("/w/");
        assert_eq!(req.url, "/w/api.php");
        assert_eq!(req.form_value("action"), Some("feedrecentchanges"));
        assert_eq!(req.form_value("feedformat"), Some("rss"));
        assert_eq!(req.form_value("namespace"), Some("0"));
        assert_eq!(req.form_value("days"), Some("7"));
        assert_eq!(req.form_value("limit"), Some("20"));
        assert_eq!(req.form_value("hideminor"), Some("1"));
        assert_eq!(req.form_value("hidebots"), Some("1"));
        assert_eq!(req.form_value("hidelog"), Some("1"));
    }

    #[test]
    fn test_parse_skips_undated_items() {
        let items = parse_items(RSS, "/wiki/$1", now(), Locale::Ja).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            FeedItem {
                title: "Redstone Circuit".to_string(),
                link: "/wiki/Redstone_Circuit".to_string(),
                time_ago: "1 時間前".to_string(),
            }
        );
        assert_eq!(items[1].link, "/wiki/%E6%9D%91%E4%BA%BA");
        assert_eq!(items[1].time_ago, "昨日");
    }

    #[test]
    fn test_parse_caps_at_fetch_limit() {
        let entries: String = (0..25)
            .map(|i| {
                format!("<item><title>Page {i}</title><pubDate>Wed, 01 May 2024 10:00:00 GMT</pubDate></item>")
            })
            .collect();
        let body = format!(r#"<rss version="2.0"><channel><title>t</title>{entries}</channel></rss>"#);

        let items = parse_items(&body, "/wiki/$1", now(), Locale::En).unwrap();
        assert_eq!(items.len(), FETCH_LIMIT);
        assert_eq!(items[0].time_ago, "2 hours ago");
    }

    #[test]
    fn test_parse_rejects_non_feed() {
        assert!(parse_items("<html><body>error</body></html>", "/wiki/$1", now(), Locale::Ja).is_err());
    }

    #[test]
    fn test_article_link_encoding() {
        assert_eq!(article_link("Help:A page", "/wiki/$1"), "/wiki/Help:A_page");
        assert_eq!(article_link("50% (draft)", "/index.php?title=$1"), "/index.php?title=50%25_(draft)");
        assert_eq!(article_link("A&B/C", "/wiki/$1"), "/wiki/A&B/C");
    }

    #[test]
    fn test_article_path_dollar_patterns() {
        assert_eq!(article_link("A B", "/p/$&?x=$$1"), "/p/A_B?x=$1");
        assert_eq!(article_link("A B", "/p/$01/$1"), "/p/A_B/A_B");
        assert_eq!(article_link("A B", "/p/$`$'$2$"), "/p/$2$");
        assert_eq!(article_link("A", "/wiki/page"), "/wiki/page");
    }

    #[test]
    fn test_encode_uri_keeps_reserved() {
        assert_eq!(encode_uri("a b"), "a%20b");
        assert_eq!(encode_uri(";,/?:@&=+$#"), ";,/?:@&=+$#");
        assert_eq!(encode_uri("\"<>"), "%22%3C%3E");
    }
}
