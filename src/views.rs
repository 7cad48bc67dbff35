use minijinja::{context, Environment};

use crate::error::AppResult;
use crate::models::Comment;

const INDEX_TEMPLATE: &str = "index.html";

/// Compiled page templates. `.html` templates are auto-escaped.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render_index(&self, comments: &[Comment], main_page_image_url: &str) -> AppResult<String> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        let page = template.render(context! {
            comments => comments,
            main_page_image_url => main_page_image_url,
        })?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lists_comments_in_given_order() {
        let views = Views::new().unwrap();
        let comments = vec![
            Comment { id: 2, text: "newer".to_string() },
            Comment { id: 1, text: "older".to_string() },
        ];

        let page = views.render_index(&comments, "https://example.com/logo.png").unwrap();
        let newer = page.find("newer").unwrap();
        let older = page.find("older").unwrap();
        assert!(newer < older);
        // `/` is escaped inside .html templates
        assert!(page.contains("logo.png"));
    }

    #[test]
    fn test_index_escapes_comment_text() {
        let views = Views::new().unwrap();
        let comments = vec![Comment { id: 1, text: "<script>alert(1)</script>".to_string() }];

        let page = views.render_index(&comments, "logo.png").unwrap();
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_index_renders_without_comments() {
        let views = Views::new().unwrap();
        let page = views.render_index(&[], "logo.png").unwrap();
        assert!(page.contains("No comments yet"));
    }
}
