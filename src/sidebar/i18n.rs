use super::relative_time::TimeUnit;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Fixed interface strings for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub recent_changes: &'static str,
    pub just_now: &'static str,
    pub no_update: &'static str,
}

const JA: Messages = Messages {
    recent_changes: "最近の更新",
    just_now: "たった今",
    no_update: "更新はありません",
};

const EN: Messages = Messages {
    recent_changes: "Recent changes",
    just_now: "just now",
    no_update: "No updates",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }

    /// Formats a signed offset the way `Intl.RelativeTimeFormat` does with
    /// `numeric: "auto"`: negative is past, positive is future, and the
    /// near offsets that have a word of their own use it.
    pub fn format_relative(self, value: i64, unit: TimeUnit) -> String {
        match self {
            Locale::Ja => format_ja(value, unit),
            Locale::En => format_en(value, unit),
        }
    }
}

fn format_ja(value: i64, unit: TimeUnit) -> String {
    let named = match (unit, value) {
        (TimeUnit::Year, -1) => Some("昨年"),
        (TimeUnit::Year, 0) => Some("今年"),
        (TimeUnit::Year, 1) => Some("来年"),
        (TimeUnit::Month, -1) => Some("先月"),
        (TimeUnit::Month, 0) => Some("今月"),
        (TimeUnit::Month, 1) => Some("来月"),
        (TimeUnit::Week, -1) => Some("先週"),
        (TimeUnit::Week, 0) => Some("今週"),
        (TimeUnit::Week, 1) => Some("来週"),
        (TimeUnit::Day, -2) => Some("一昨日"),
        (TimeUnit::Day, -1) => Some("昨日"),
        (TimeUnit::Day, 0) => Some("今日"),
        (TimeUnit::Day, 1) => Some("明日"),
        (TimeUnit::Day, 2) => Some("明後日"),
        (TimeUnit::Hour, 0) => Some("1 時間以内"),
        (TimeUnit::Minute, 0) => Some("1 分以内"),
        _ => None,
    };
    if let Some(word) = named {
        return word.to_string();
    }

    let noun = match unit {
        TimeUnit::Year => "年",
        TimeUnit::Month => "か月",
        TimeUnit::Week => "週間",
        TimeUnit::Day => "日",
        TimeUnit::Hour => "時間",
        TimeUnit::Minute => "分",
    };
    let direction = if value < 0 { "前" } else { "後" };
    format!("{} {}{}", group_digits(value.unsigned_abs()), noun, direction)
}

fn format_en(value: i64, unit: TimeUnit) -> String {
    let named = match (unit, value) {
        (TimeUnit::Year, -1) => Some("last year"),
        (TimeUnit::Year, 0) => Some("this year"),
        (TimeUnit::Year, 1) => Some("next year"),
        (TimeUnit::Month, -1) => Some("last month"),
        (TimeUnit::Month, 0) => Some("this month"),
        (TimeUnit::Month, 1) => Some("next month"),
        (TimeUnit::Week, -1) => Some("last week"),
        (TimeUnit::Week, 0) => Some("this week"),
        (TimeUnit::Week, 1) => Some("next week"),
        (TimeUnit::Day, -1) => Some("yesterday"),
        (TimeUnit::Day, 0) => Some("today"),
        (TimeUnit::Day, 1) => Some("tomorrow"),
        (TimeUnit::Hour, 0) => Some("this hour"),
        (TimeUnit::Minute, 0) => Some("this minute"),
        _ => None,
    };
    if let Some(word) = named {
        return word.to_string();
    }

    let n = value.unsigned_abs();
    let noun = match unit {
        TimeUnit::Year => "year",
        TimeUnit::Month => "month",
        TimeUnit::Week => "week",
        TimeUnit::Day => "day",
        TimeUnit::Hour => "hour",
        TimeUnit::Minute => "minute",
    };
    let plural = if n == 1 { "" } else { "s" };
    if value < 0 {
        format!("{} {}{} ago", group_digits(n), noun, plural)
    } else {
        format!("in {} {}{}", group_digits(n), noun, plural)
    }
}

/// `1234567` -> `1,234,567`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
