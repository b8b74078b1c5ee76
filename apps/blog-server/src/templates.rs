//! HTML templates compiled into the binary.

use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("auth/register.html", include_str!("../templates/auth/register.html")),
    ("auth/login.html", include_str!("../templates/auth/login.html")),
    ("blog/index.html", include_str!("../templates/blog/index.html")),
    ("blog/create.html", include_str!("../templates/blog/create.html")),
    ("blog/update.html", include_str!("../templates/blog/update.html")),
    ("blog/post.html", include_str!("../templates/blog/post.html")),
];

/// Tera registry holding every page template.
///
/// Names end in `.html`, so Tera auto-escapes every interpolation.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // Registered together so `extends` resolves regardless of order.
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_context() -> Context {
        let mut ctx = Context::new();
        ctx.insert("current_user", &json!({ "id": 1, "username": "alice" }));
        ctx.insert("flashes", &vec!["Title is required."]);
        ctx
    }

    #[test]
    fn test_all_templates_compile() {
        let templates = Templates::new().unwrap();
        let names: Vec<&str> = templates.tera.get_template_names().collect();

        for (name, _) in TEMPLATES {
            assert!(names.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_index_marks_own_posts_editable_and_escapes() {
        let templates = Templates::new().unwrap();
        let mut ctx = page_context();
        ctx.insert(
            "posts",
            &json!([
                {
                    "id": 2, "author_id": 1, "title": "<script>x</script>", "body": "b",
                    "created": "2024-05-01T10:00:00Z",
                    "author": { "id": 1, "username": "alice" }
                },
                {
                    "id": 1, "author_id": 9, "title": "Theirs", "body": "b",
                    "created": "2024-04-01T10:00:00Z",
                    "author": { "id": 9, "username": "zed" }
                }
            ]),
        );

        let html = templates.render("blog/index.html", &ctx).unwrap();

        assert!(html.contains("/2/update"));
        assert!(!html.contains("/1/update"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Title is required."));
        assert!(html.contains("2024-05-01"));
    }

    #[test]
    fn test_anonymous_navigation() {
        let templates = Templates::new().unwrap();
        let mut ctx = Context::new();
        ctx.insert("current_user", &Option::<serde_json::Value>::None);
        ctx.insert("flashes", &Vec::<String>::new());
        ctx.insert("form", &json!({ "username": "" }));

        let html = templates.render("auth/login.html", &ctx).unwrap();

        assert!(html.contains("/auth/register"));
        assert!(!html.contains("Log Out"));
    }
}
