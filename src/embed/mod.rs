//! Embedded HTML resources.
//!
//! Small pages the server renders without touching the build output tree:
//! the demo shell at `/` and the proxy's 502 page.

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for shell.html.
    pub struct ShellVars<'a> {
        pub main_js: &'a str,
        pub main_css: &'a str,
        pub version: &'a str,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__MAIN_JS__", self.main_js)
                .replace("__MAIN_CSS__", self.main_css)
                .replace("__VERSION__", self.version)
        }
    }

    /// Application shell: the template-integration path in miniature. Its
    /// asset URLs come from the asset manager like any server-rendered page.
    pub const SHELL_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("serve/shell.html"));

    /// Variables for bad_gateway.html.
    pub struct BadGatewayVars<'a> {
        pub path: &'a str,
    }

    impl TemplateVars for BadGatewayVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__PATH__", self.path)
        }
    }

    /// 502 page shown when the dev server does not answer.
    pub const BAD_GATEWAY_HTML: Template<BadGatewayVars<'static>> =
        Template::new(include_str!("serve/bad_gateway.html"));
}
