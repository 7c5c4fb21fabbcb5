//! Source file templates for `devtool new-file`.
//!
//! Templates are keyed by lower-case file extension. A file named `.<ext>` in the project's
//! template directory wins; otherwise a built-in template is used for the common C/C++
//! extensions.
//!
//! Templates see exactly four variables: `filename`, `author`, `date` and `brief`.

use crate::error::Result;
use log::debug;
use minijinja::{Environment, UndefinedBehavior, context};
use std::fs;
use std::path::PathBuf;

const SOURCE_TEMPLATE: &str = r#"/**
 * @file {{ filename }}
 * @author {{ author }}
 * @date {{ date }}
 * @brief {{ brief }}
 */
"#;

const HEADER_TEMPLATE: &str = r#"/**
 * @file {{ filename }}
 * @author {{ author }}
 * @date {{ date }}
 * @brief {{ brief }}
 */

#pragma once
"#;

fn builtin(extension: &str) -> Option<&'static str> {
    match extension {
        "cpp" | "c" | "cc" | "cxx" => Some(SOURCE_TEMPLATE),
        "hpp" | "h" | "hh" | "hxx" => Some(HEADER_TEMPLATE),
        _ => None,
    }
}

/// Values bound into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Base name of the target, without directories.
    pub filename: String,
    pub author: String,
    pub date: String,
    pub brief: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    extension: String,
    source: String,
}

impl Template {
    pub fn new(extension: &str, source: impl Into<String>) -> Self {
        Self {
            extension: extension.to_string(),
            source: source.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn render(&self, ctx: &TemplateContext) -> Result<String> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        let rendered = env.render_str(
            &self.source,
            context! {
                filename => &ctx.filename,
                author => &ctx.author,
                date => &ctx.date,
                brief => &ctx.brief,
            },
        )?;
        Ok(rendered)
    }
}

/// Looks templates up in a directory, falling back to the built-ins.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    dir: PathBuf,
}

impl TemplateRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Template for `extension` (compared lower-case), if one is registered.
    pub fn resolve(&self, extension: &str) -> Result<Option<Template>> {
        let key = extension.to_lowercase();
        let path = self.dir.join(format!(".{}", key));
        if path.is_file() {
            debug!("using template {}", path.display());
            return Ok(Some(Template::new(&key, fs::read_to_string(&path)?)));
        }
        Ok(builtin(&key).map(|source| Template::new(&key, source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(filename: &str) -> TemplateContext {
        TemplateContext {
            filename: filename.to_string(),
            author: "alice".to_string(),
            date: "2024-01-01".to_string(),
            brief: "test header".to_string(),
        }
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = Template::new("hpp", "# {{filename}} by {{author}} on {{date}} — {{brief}}");
        assert_eq!(
            template.render(&ctx("Bar.hpp")).unwrap(),
            "# Bar.hpp by alice on 2024-01-01 — test header"
        );
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let template = Template::new("html", "<p>{{ brief }}</p>");
        let mut context = ctx("index.html");
        context.brief = "a < b & c".to_string();
        assert_eq!(template.render(&context).unwrap(), "<p>a < b & c</p>");
    }

    #[test]
    fn test_render_rejects_unknown_placeholder() {
        let template = Template::new("cpp", "{{ license }}");
        assert!(template.render(&ctx("a.cpp")).is_err());
    }

    #[test]
    fn test_builtin_header() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = TemplateRegistry::new(tmp.path());
        let template = registry.resolve("HPP").unwrap().unwrap();
        assert_eq!(template.extension(), "hpp");

        let rendered = template.render(&ctx("Bar.hpp")).unwrap();
        assert!(rendered.contains("@file Bar.hpp"));
        assert!(rendered.contains("@author alice"));
        assert!(rendered.ends_with("#pragma once\n"));
    }

    #[test]
    fn test_directory_template_overrides_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".cpp"), "// {{ filename }}\n").unwrap();
        let registry = TemplateRegistry::new(tmp.path());

        let template = registry.resolve("cpp").unwrap().unwrap();
        assert_eq!(template.render(&ctx("main.cpp")).unwrap(), "// main.cpp\n");
    }

    #[test]
    fn test_directory_can_add_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".cs"), "// {{ brief }}").unwrap();
        let registry = TemplateRegistry::new(tmp.path());

        assert!(registry.resolve("cs").unwrap().is_some());
        assert!(registry.resolve("txt").unwrap().is_none());
    }
}
