use serde::Serialize;

#[derive(Serialize)]
pub struct AppInfo {
    pub app: &'static str,
    pub version: &'static str,
    pub build: &'static str,
}

#[macro_export]
macro_rules! get_app_info {
    () => {{
        const APP: &str = env!("CARGO_PKG_NAME");
        const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

        #[inline]
        fn git_version() -> &'static str {
            option_env!("GIT_VERSION").unwrap_or("n/a")
        }

        $crate::utils::AppInfo {
            app: APP,
            version: PKG_VERSION,
            build: git_version(),
        }
    }};
}

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
