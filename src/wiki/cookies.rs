/// Ordered `name=value` cookies, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a jar from a rendered `Cookie` header such as `a=1; b=2`.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.insert(pair);
        }
        jar
    }

    /// Merges one `Set-Cookie` value: attributes after the first `;` are dropped,
    /// an existing cookie with the same name is replaced in place, otherwise it is appended.
    pub fn merge_set_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        if !pair.is_empty() {
            self.insert(pair);
        }
    }

    pub fn merge_all<'a>(&mut self, set_cookies: impl IntoIterator<Item = &'a String>) {
        for cookie in set_cookies {
            self.merge_set_cookie(cookie);
        }
    }

    fn insert(&mut self, pair: &str) {
        let name = pair.split('=').next().unwrap_or_default();
        let prefix = format!("{name}=");
        match self.cookies.iter_mut().find(|c| c.starts_with(&prefix)) {
            Some(existing) => *existing = pair.to_string(),
            None => self.cookies.push(pair.to_string()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.cookies
            .iter()
            .find_map(|c| c.strip_prefix(prefix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(String::as_str)
    }

    /// The jar as a `Cookie` request header value.
    pub fn header_value(&self) -> String {
        self.cookies.join("; ")
    }
}
