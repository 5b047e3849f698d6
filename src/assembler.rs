//! Drives the presentation service through the ordered calls that materialize a deck.

use log::{error, info};
use std::fmt;

use crate::client::PresentationService;
use crate::errors::{PresenterError, Result};
use crate::layouts::build_variant;
use crate::layouts::builder::new_id;
use crate::models::api::{
    CreatePresentationRequest, CreateSlideRequest, RemoteSession, RemoteSlide,
    DEFAULT_COLOR_SET_ID, DEFAULT_THEME_ID, PRODUCT_TYPE,
};
use crate::models::slide::SlideDescriptor;

/// Where a run currently is in the remote protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticated,
    PresentationCreated,
    SlideCreated(usize),
    VariantSubmitted(usize),
    VariantActivated(usize),
    Shared,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Authenticated => write!(f, "authenticated"),
            Stage::PresentationCreated => write!(f, "presentation created"),
            Stage::SlideCreated(n) => write!(f, "slide {} created", n + 1),
            Stage::VariantSubmitted(n) => write!(f, "slide {} variant submitted", n + 1),
            Stage::VariantActivated(n) => write!(f, "slide {} variant activated", n + 1),
            Stage::Shared => write!(f, "shared"),
        }
    }
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPresentation {
    pub session: RemoteSession,
    pub share_url: String,
}

/// Builds one presentation, slide by slide, strictly in order.
///
/// Each slide is created, gets its variant submitted and activated before the next
/// slide is touched. Any failure ends the run; slides already created stay on the
/// service.
pub struct Assembler<'a, S: PresentationService + ?Sized> {
    service: &'a S,
    stage: Stage,
}

impl<'a, S: PresentationService + ?Sized> Assembler<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            stage: Stage::Authenticated,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Creates, fills and publishes a presentation titled after `title`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty slide list, `Protocol` when the service omits the
    /// initial slide, and whatever the service reports for any failed call.
    pub async fn publish(
        &mut self,
        bearer_token: &str,
        title: &str,
        slides: &[SlideDescriptor],
    ) -> Result<PublishedPresentation> {
        match self.run(bearer_token, title, slides).await {
            Ok(published) => Ok(published),
            Err(e) => {
                error!("Presentation run aborted after stage '{}': {}", self.stage, e);
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        bearer_token: &str,
        title: &str,
        slides: &[SlideDescriptor],
    ) -> Result<PublishedPresentation> {
        let (first, rest) = slides.split_first().ok_or_else(|| {
            PresenterError::InvalidInput("cannot create a presentation without slides".to_string())
        })?;

        let mut session = RemoteSession::new(bearer_token, new_id());
        info!("Creating presentation '{}'...", title);
        let created = self
            .service
            .create_presentation(
                &session.bearer_token,
                &CreatePresentationRequest {
                    presentation_id: session.presentation_id.clone(),
                    presentation_title: format!("Presentation: {}", title),
                    create_first_slide: true,
                    default_color_set_id: DEFAULT_COLOR_SET_ID,
                    theme_id: DEFAULT_THEME_ID.to_string(),
                },
            )
            .await?;
        self.stage = Stage::PresentationCreated;

        let first_slide_id = created
            .first_slide_id()
            .ok_or_else(|| {
                PresenterError::Protocol(
                    "failed to get slide ID from presentation creation".to_string(),
                )
            })?
            .to_string();
        self.stage = Stage::SlideCreated(0);
        let first_variant = self.realize_slide(&session, 0, &first_slide_id, first).await?;
        session.slides.push(RemoteSlide {
            slide_id: first_slide_id,
            active_variant_id: first_variant,
        });

        for (offset, slide) in rest.iter().enumerate() {
            let position = offset + 1;
            let slide_id = new_id();
            self.service
                .create_slide(
                    &session.bearer_token,
                    &CreateSlideRequest {
                        slide_id: slide_id.clone(),
                        presentation_id: session.presentation_id.clone(),
                        product_type: PRODUCT_TYPE.to_string(),
                        slide_order: position,
                        color_set_id: DEFAULT_COLOR_SET_ID,
                    },
                )
                .await?;
            self.stage = Stage::SlideCreated(position);

            let variant_id = self.realize_slide(&session, position, &slide_id, slide).await?;
            session.slides.push(RemoteSlide {
                slide_id,
                active_variant_id: variant_id,
            });
        }

        let share_url = self
            .service
            .share_presentation(&session.bearer_token, &session.presentation_id)
            .await?;
        self.stage = Stage::Shared;
        info!(
            "Published presentation {} with {} slides",
            session.presentation_id,
            session.slides.len()
        );

        Ok(PublishedPresentation { session, share_url })
    }

    /// Submits the slide's element grid as a variant and makes it the visible one.
    async fn realize_slide(
        &mut self,
        session: &RemoteSession,
        position: usize,
        slide_id: &str,
        slide: &SlideDescriptor,
    ) -> Result<String> {
        let variant = build_variant(slide);
        let variant_id = self
            .service
            .create_variant(&session.bearer_token, slide_id, &variant)
            .await?;
        self.stage = Stage::VariantSubmitted(position);

        self.service
            .set_active_variant(&session.bearer_token, slide_id, &variant_id)
            .await?;
        self.stage = Stage::VariantActivated(position);
        info!(
            "Slide {} ({}) is live with variant {}",
            position + 1,
            variant.layout,
            variant_id
        );
        Ok(variant_id)
    }
}
