use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::errors::RecipeError;

#[derive(RustEmbed)]
#[folder = "src/assets/"]
pub struct Assets;

/// Text of an embedded template, e.g. `cmake/toolchain.cmake.tera`
pub fn template_source(name: &str) -> Result<String, RecipeError> {
    let file = Assets::get(name).ok_or_else(|| RecipeError::AssetNotFound(name.to_string()))?;
    Ok(String::from_utf8_lossy(&file.data).into_owned())
}

/// Render an embedded template with `context`
pub fn render(name: &str, context: &Context) -> Result<String, RecipeError> {
    let source = template_source(name)?;
    Ok(Tera::one_off(&source, context, false)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmake_templates_embedded() {
        for name in [
            "cmake/toolchain.cmake.tera",
            "cmake/config.cmake.tera",
            "cmake/config-version.cmake.tera",
            "cmake/conandeps.cmake.tera",
        ] {
            assert!(Assets::get(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_missing_template() {
        assert!(matches!(
            template_source("cmake/nope.tera"),
            Err(RecipeError::AssetNotFound(_))
        ));
    }

    #[test]
    fn test_render_version_check() {
        let mut ctx = Context::new();
        ctx.insert("reference", "fmt/10.2.1");
        ctx.insert("version", "10.2.1");
        ctx.insert("major", "10");
        let text = render("cmake/config-version.cmake.tera", &ctx).unwrap();
        assert!(text.contains("set(PACKAGE_VERSION \"10.2.1\")"));
        assert!(text.contains("STREQUAL \"10\""));
    }
}
