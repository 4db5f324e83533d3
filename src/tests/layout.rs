use super::{rem_to_px, LayoutContext, SiteMetadata};
use crate::config::Config;
use crate::document::{ContentDocument, PageMetadata};
use crate::error::ContentError;
use crate::registry::ContentRegistry;
use crate::section::Section;
use std::fs;
use std::path::PathBuf;

fn site() -> SiteMetadata {
    SiteMetadata {
        title_template: "%s - TypeScript".to_string(),
        default_title: "TypeScript Masterclass".to_string(),
    }
}

fn context() -> LayoutContext {
    let registry = ContentRegistry::from_documents([
        ContentDocument {
            source_path: PathBuf::from("src/app/page.mdx"),
            page_path: "/".to_string(),
            metadata: None,
            sections: Vec::new(),
        },
        ContentDocument {
            source_path: PathBuf::from("src/app/generics/page.mdx"),
            page_path: "/generics".to_string(),
            metadata: Some(PageMetadata {
                title: Some("Generics".to_string()),
                description: Some("Type parameters".to_string()),
            }),
            sections: vec![Section::new("syntax", "Syntax")],
        },
    ])
    .unwrap();
    LayoutContext::new(site(), registry)
}

#[test]
fn test_title_template() {
    assert_eq!(site().page_title(Some("Generics")), "Generics - TypeScript");
    assert_eq!(site().page_title(None), "TypeScript Masterclass");
    assert_eq!(site().page_title(Some("  ")), "TypeScript Masterclass");
}

#[test]
fn test_sections_for_known_and_unknown_pages() {
    let ctx = context();
    assert_eq!(ctx.sections_for("/generics"), [Section::new("syntax", "Syntax")]);
    assert!(ctx.sections_for("/").is_empty());
    assert!(ctx.sections_for("/missing").is_empty());
}

#[test]
fn test_page_view() {
    let ctx = context();

    let page = ctx.page("/generics").unwrap();
    assert_eq!(page.title, "Generics - TypeScript");
    assert_eq!(page.description, Some("Type parameters"));
    assert_eq!(page.sections.len(), 1);

    let home = ctx.page("/").unwrap();
    assert_eq!(home.title, "TypeScript Masterclass");
    assert!(ctx.page("/missing").is_none());
}

#[test]
fn test_require_page_rejects_unknown_path() {
    let ctx = context();
    assert!(ctx.require_page("/").is_ok());

    let err = ctx.require_page("/unknown").unwrap_err();
    assert!(matches!(err, ContentError::UnknownPage { ref page } if page == "/unknown"));
    assert_eq!(crate::Error::from(err).exit_code(), crate::error::ExitCode::CONTENT_ERROR);
}

#[test]
fn test_serialised_context_carries_all_sections() {
    let json = serde_json::to_value(context()).unwrap();
    assert_eq!(json["all_sections"]["/generics"][0]["id"], "syntax");
    assert_eq!(json["metadata"]["default_title"], "TypeScript Masterclass");
    assert!(json.get("registry").is_none());
}

#[tokio::test]
async fn test_build_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("intro")).unwrap();
    fs::write(
        dir.path().join("intro/page.mdx"),
        "export const metadata = { title: 'Intro' }\nexport const sections = [{ id: 'a', title: 'A' }]\n",
    )
    .unwrap();

    let mut cfg = Config::from_toml("").unwrap();
    cfg.content_root = dir.path().to_string_lossy().into_owned();
    let ctx = LayoutContext::build(&cfg).await.unwrap();

    assert_eq!(ctx.page("/intro").unwrap().title, "Intro - TypeScript");
    assert_eq!(ctx.sections_for("/intro")[0].id, "a");
}

#[test]
fn test_rem_to_px() {
    assert!((rem_to_px(2.0, None) - 32.0).abs() < f64::EPSILON);
    assert!((rem_to_px(1.5, Some(20.0)) - 30.0).abs() < f64::EPSILON);
}
