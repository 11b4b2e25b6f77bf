//! Template lookup by exact name or exact title

use tracing::{debug, instrument};

use tio_common::{EditorApi, Template, TemplateType, TioResult};

/// Which template field to match against. One or the other, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateQuery<'q> {
    Name(&'q str),
    Title(&'q str),
}

impl TemplateQuery<'_> {
    fn matches(&self, template: &Template) -> bool {
        match self {
            TemplateQuery::Name(name) => template.name == *name,
            TemplateQuery::Title(title) => template.title == *title,
        }
    }
}

/// Resolves scan templates against the full remote listing.
///
/// Every lookup fetches the listing again; nothing is cached.
pub struct TemplateResolver<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C> TemplateResolver<'a, C>
where
    C: EditorApi + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// First scan template matching `query`, or `None`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: TemplateQuery<'_>) -> TioResult<Option<Template>> {
        let templates = self.client.list_templates(TemplateType::Scan).await?;
        let found = templates.into_iter().find(|t| query.matches(t));
        debug!(found = found.is_some(), "template lookup");
        Ok(found)
    }

    pub async fn by_name(&self, name: &str) -> TioResult<Option<Template>> {
        self.resolve(TemplateQuery::Name(name)).await
    }

    pub async fn by_title(&self, title: &str) -> TioResult<Option<Template>> {
        self.resolve(TemplateQuery::Title(title)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTenable;

    fn catalogue() -> Vec<Template> {
        vec![
            Template::new("u-basic", "basic", "Basic Network Scan"),
            Template::new("u-trap", "discovery", "basic"),
            Template::new("u-basic-2", "basic", "Duplicate Name"),
        ]
    }

    #[tokio::test]
    async fn name_lookup_returns_first_exact_match() {
        let mock = MockTenable::new().with_templates(catalogue());
        let found = TemplateResolver::new(&mock).by_name("basic").await.unwrap();
        assert_eq!(found.unwrap().uuid, "u-basic");
    }

    #[tokio::test]
    async fn title_lookup_matches_title_only() {
        let mock = MockTenable::new().with_templates(catalogue());
        let found = TemplateResolver::new(&mock).by_title("basic").await.unwrap();
        assert_eq!(found.unwrap().uuid, "u-trap");
    }

    #[tokio::test]
    async fn no_match_is_absence_not_error() {
        let mock = MockTenable::new().with_templates(catalogue());
        let resolver = TemplateResolver::new(&mock);
        assert!(resolver.by_name("Basic").await.unwrap().is_none());
        assert!(resolver.by_title("Basic Network").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn every_lookup_refetches() {
        let mock = MockTenable::new().with_templates(catalogue());
        let resolver = TemplateResolver::new(&mock);
        resolver.by_name("basic").await.unwrap();
        resolver.by_name("basic").await.unwrap();
        assert_eq!(mock.template_fetches(), 2);
    }
}
