use crate::config::HeaderConfig;
use std::fmt::Write;

/// Line that opens and closes a header block.
pub const DELIMITER: &str = "---";

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct HeaderTemplate {
    pub title: String,
    pub subtitle: String,
    pub self_contained: bool,
    pub fields: HeaderConfig,
}

impl HeaderTemplate {
    pub fn new<T, S>(title: T, subtitle: S, self_contained: bool, fields: HeaderConfig) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            self_contained,
            fields,
        }
    }

    /// The header block, from the opening `---` to the closing `---`
    /// without a trailing newline. This is the form stored in a notebook cell.
    pub fn render(&self) -> String {
        let f = &self.fields;
        let mut out = String::new();

        push_line(&mut out, 0, DELIMITER);
        push_line(&mut out, 0, &format!("title: \"{}\"", self.title));
        push_line(&mut out, 0, &format!("subtitle: \"{}\"", self.subtitle));
        push_line(&mut out, 0, &format!("author: \"{}\"", f.author));
        push_line(&mut out, 0, &format!("date: {}", f.date));
        push_line(&mut out, 0, &format!("date-format: {}", f.date_format));

        push_line(&mut out, 0, "format:");
        push_line(&mut out, 1, "html:");
        push_line(&mut out, 2, "theme:");
        push_line(&mut out, 3, "dark:");
        push_list(&mut out, 4, &f.dark_theme);
        push_line(&mut out, 3, "light:");
        push_list(&mut out, 4, &f.light_theme);
        push_line(&mut out, 2, &format!("toc: {}", f.toc));
        push_line(&mut out, 2, &format!("code-copy: {}", f.code_copy));
        push_line(&mut out, 2, &format!("code-overflow: {}", f.code_overflow));
        push_line(&mut out, 2, &format!("mainfont: \"{}\"", f.main_font));
        push_line(&mut out, 2, &format!("code-annotations: {}", f.code_annotations));
        push_line(&mut out, 2, &format!("self-contained: {}", self.self_contained));

        push_line(&mut out, 0, "execute:");
        push_line(&mut out, 1, &format!("echo: {}", f.execute.echo));
        push_line(&mut out, 1, &format!("warning: {}", f.execute.warning));
        push_line(&mut out, 1, &format!("message: {}", f.execute.message));
        push_line(&mut out, 1, &format!("freeze: {}", f.execute.freeze));

        push_line(&mut out, 0, "filters:");
        push_list(&mut out, 1, &f.filters);
        push_line(&mut out, 0, &format!("lightbox: {}", f.lightbox));

        out.push_str(DELIMITER);
        out
    }

    /// The header as a `.qmd` preamble: the rendered block plus a newline.
    pub fn render_preamble(&self) -> String {
        let mut out = self.render();
        out.push('\n');
        out
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    let _ = writeln!(out, "{}{}", INDENT.repeat(depth), text);
}

fn push_list(out: &mut String, depth: usize, items: &[String]) {
    for item in items {
        push_line(out, depth, &format!("- {}", item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(self_contained: bool) -> HeaderTemplate {
        HeaderTemplate::new("Lab 3", "Linear models", self_contained, HeaderConfig::default())
    }

    #[test]
    fn test_parameterized_fields() {
        let header = template(true).render();
        assert!(header.contains("title: \"Lab 3\""));
        assert!(header.contains("subtitle: \"Linear models\""));
        assert!(header.contains("self-contained: true"));

        let header = template(false).render();
        assert!(header.contains("self-contained: false"));
    }

    #[test]
    fn test_block_is_delimited() {
        let header = template(false).render();
        assert!(header.starts_with("---\ntitle:"));
        assert!(header.ends_with("lightbox: auto\n---"));
        assert_eq!(header.lines().filter(|l| *l == DELIMITER).count(), 2);

        assert!(template(false).render_preamble().ends_with("\n---\n"));
    }

    #[test]
    fn test_default_layout() {
        let header = template(false).render();
        let expected = "\
format:
    html:
        theme:
            dark:
                - cosmo
                - style/html-sta313.scss
                - style/html-dark.scss
                - style/my-adjustments.scss
            light:
                - cosmo
                - style/html-sta313.scss
        toc: true
        code-copy: true
        code-overflow: wrap
        mainfont: \"Atkinson Hyperlegible\"
        code-annotations: hover
        self-contained: false
execute:
    echo: true
    warning: false
    message: false
    freeze: auto
filters:
    - openlinksinnewpage
";
        assert!(header.contains(expected));
        assert!(header.contains("author: \"Kangheng Liu\"\ndate: last-modified\ndate-format: long\n"));
    }

    #[test]
    fn test_configured_fields() {
        let mut fields = HeaderConfig::default();
        fields.author = "Ada Lovelace".to_string();
        fields.filters = vec!["a".to_string(), "b".to_string()];

        let header = HeaderTemplate::new("T", "S", false, fields).render();
        assert!(header.contains("author: \"Ada Lovelace\""));
        assert!(header.contains("filters:\n    - a\n    - b\n"));
    }
}
