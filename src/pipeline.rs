//! One run from webpage URL to published presentation.

use log::info;

use crate::assembler::{Assembler, PublishedPresentation};
use crate::auth::Authenticator;
use crate::client::PresentationService;
use crate::errors::{PresenterError, Result};
use crate::extract::extract_content;
use crate::firecrawl::PageScraper;
use crate::gemini::TextGenerator;
use crate::models::content::NormalizedContent;
use crate::models::slide::SlideDescriptor;
use crate::planner::{llm::plan_with_model, plan_from_content};

/// How slides are derived from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerKind {
    /// Title slide plus main points, straight from the extracted content.
    #[default]
    Content,
    /// Let the language model choose layouts and content.
    LanguageModel,
}

/// The slides planned for a page together with the content they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidePlan {
    pub content: NormalizedContent,
    pub slides: Vec<SlideDescriptor>,
}

/// Wires the collaborators of one run together.
pub struct Pipeline<'a> {
    pub scraper: &'a dyn PageScraper,
    pub generator: Option<&'a dyn TextGenerator>,
    pub authenticator: &'a dyn Authenticator,
    pub service: &'a dyn PresentationService,
}

impl<'a> Pipeline<'a> {
    /// Scrapes `url`, extracts its content and plans the slides.
    pub async fn plan(&self, url: &str, planner: PlannerKind) -> Result<SlidePlan> {
        info!("Processing webpage: {}", url);
        let page = self.scraper.scrape(url).await?;
        let content = extract_content(&page, url)?;

        let slides = match planner {
            PlannerKind::Content => plan_from_content(&content),
            PlannerKind::LanguageModel => {
                let generator = self.generator.ok_or_else(|| {
                    PresenterError::Configuration(
                        "a language model is required for this planner".to_string(),
                    )
                })?;
                let markdown = page
                    .markdown
                    .clone()
                    .filter(|md| !md.trim().is_empty())
                    .unwrap_or_else(|| content.to_markdown());
                plan_with_model(generator, &markdown, url).await?
            }
        };
        info!("Planned {} slides", slides.len());
        Ok(SlidePlan { content, slides })
    }

    /// Authenticates and builds the planned presentation on the service.
    pub async fn publish(&self, plan: &SlidePlan) -> Result<PublishedPresentation> {
        let token = self.authenticator.access_token().await?;
        Assembler::new(self.service)
            .publish(&token, &plan.content.title, &plan.slides)
            .await
    }

    /// `plan` followed by `publish`.
    pub async fn run(&self, url: &str, planner: PlannerKind) -> Result<PublishedPresentation> {
        let plan = self.plan(url, planner).await?;
        self.publish(&plan).await
    }
}
