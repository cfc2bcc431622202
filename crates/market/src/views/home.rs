//! Home page.

use std::time::Duration;

use askama::Template;

use super::{Outcome, ViewContext};
use crate::error::Result;
use crate::timers::Slideshow;

/// Slideshow images, in display order.
pub const SLIDES: [&str; 4] = [
    "https://c.ndtvimg.com/2025-01/c907n72g_art-and-craft-villages-in-india_625x300_07_January_25.jpg?im=FeatureCrop,algorithm=dnn,width=545,height=307",
    "https://media.craftmaestros.com/media/magefan_blog/The_culture_of_Indian_craft.png",
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT5cEaLaowIWMVUioPNIOovoMxJGVFRIybQNA&s",
    "https://www.andbeyond.com/wp-content/uploads/sites/5/delhi-crafts-museum3.jpg",
];

/// The home slideshow, rotating every `period`.
#[must_use]
pub fn slideshow(period: Duration) -> Slideshow {
    Slideshow::new(SLIDES.iter().map(ToString::to_string).collect(), period)
}

/// A slideshow image.
#[derive(Clone)]
pub struct SlideView {
    pub src: String,
    pub alt: String,
    pub active: bool,
}

/// A "Why Craftify?" card.
#[derive(Clone)]
pub struct FeatureView {
    pub heading: &'static str,
    pub text: &'static str,
}

const FEATURES: [FeatureView; 3] = [
    FeatureView {
        heading: "Authentic",
        text: "Original works from real artists.",
    },
    FeatureView {
        heading: "Secure",
        text: "Simple checkout with clear invoices.",
    },
    FeatureView {
        heading: "Fair",
        text: "Artists control pricing and profiles.",
    },
];

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub slides: Vec<SlideView>,
    pub features: Vec<FeatureView>,
}

/// Render the home page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let active = ctx.ui.slide_index % SLIDES.len();
    let slides = SLIDES
        .iter()
        .enumerate()
        .map(|(i, src)| SlideView {
            src: (*src).to_string(),
            alt: format!("slide {}", i + 1),
            active: i == active,
        })
        .collect();

    Outcome::page(
        "Home",
        &HomeTemplate {
            slides,
            features: FEATURES.to_vec(),
        },
    )
}
