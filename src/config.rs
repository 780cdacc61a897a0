//! Site configuration: breakpoints, thresholds, and carousel definitions.
//!
//! DESIGN
//! ======
//! Every field has a default that reproduces the page's stock behavior, so an
//! empty JSON object (or no config block at all) is a valid configuration.
//! The browser entry point reads an optional override from
//! `<script type="application/json" id="folio-config">`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::FolioError;

pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_SECTION_OFFSET_PX: f64 = 60.0;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_PROJECTS_PER_PAGE: usize = 6;
pub const DEFAULT_FILTER_FADE_MS: u32 = 300;
pub const DEFAULT_SLIDE_PERIOD_MS: u32 = 5000;

/// Element id of the optional JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Tunables for every widget the runtime mounts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Scroll offset below which the navbar never hides.
    pub scroll_threshold_px: f64,
    /// Viewports at or below this width use the mobile menu behavior.
    pub mobile_breakpoint_px: f64,
    /// Scroll-spy lead: a section counts as current this many pixels early.
    pub section_offset_px: f64,
    /// Visible fraction at which a section is revealed.
    pub reveal_threshold: f64,
    pub projects_per_page: usize,
    /// Fade duration before a filtered-out project card is removed from flow.
    pub filter_fade_ms: u32,
    pub carousels: Vec<CarouselConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            section_offset_px: DEFAULT_SECTION_OFFSET_PX,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            projects_per_page: DEFAULT_PROJECTS_PER_PAGE,
            filter_fade_ms: DEFAULT_FILTER_FADE_MS,
            carousels: default_carousels(),
        }
    }
}

impl SiteConfig {
    /// Parse a config override. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Config`] if `raw` is not valid JSON for this shape.
    pub fn from_json(raw: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// One slideshow kind on the page.
///
/// With a `scope`, one carousel is mounted per matching scope element and
/// every other selector is resolved inside it. Without one, a single
/// carousel is mounted from page-wide selectors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselConfig {
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
    /// Slides, or the single `<img>` when `sources` is non-empty.
    pub slides: String,
    #[serde(default)]
    pub indicators: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    /// Element whose hover/touch pauses autoplay. Defaults to the scope.
    #[serde(default)]
    pub pause_area: Option<String>,
    #[serde(default)]
    pub pause_on_hover: bool,
    #[serde(default)]
    pub pause_on_touch: bool,
    #[serde(default = "default_period_ms")]
    pub period_ms: u32,
    /// Image sources cycled through the `src` attribute of the slide element.
    #[serde(default)]
    pub sources: Vec<String>,
}

fn default_period_ms() -> u32 {
    DEFAULT_SLIDE_PERIOD_MS
}

fn opt(selector: &str) -> Option<String> {
    Some(selector.to_owned())
}

/// The four slideshows the stock page carries.
#[must_use]
pub fn default_carousels() -> Vec<CarouselConfig> {
    vec![
        CarouselConfig {
            name: "certifications".to_owned(),
            scope: None,
            slides: ".certification-slide".to_owned(),
            indicators: opt(".certification-slideshow .dot"),
            prev: opt(".certification-slideshow .prev-btn"),
            next: opt(".certification-slideshow .next-btn"),
            pause_area: opt(".certification-slideshow"),
            pause_on_hover: true,
            pause_on_touch: true,
            period_ms: 5000,
            sources: Vec::new(),
        },
        CarouselConfig {
            name: "services".to_owned(),
            scope: opt(".service-slideshow"),
            slides: ".service-slide".to_owned(),
            indicators: None,
            prev: None,
            next: None,
            pause_area: None,
            pause_on_hover: false,
            pause_on_touch: false,
            period_ms: 3000,
            sources: Vec::new(),
        },
        CarouselConfig {
            name: "testimonials".to_owned(),
            scope: None,
            slides: ".testimonial-slide".to_owned(),
            indicators: opt(".testimonial-dots .dot"),
            prev: opt(".testimonial-controls .prev-btn"),
            next: opt(".testimonial-controls .next-btn"),
            pause_area: opt(".testimonials-container"),
            pause_on_hover: true,
            pause_on_touch: false,
            period_ms: 5000,
            sources: Vec::new(),
        },
        CarouselConfig {
            name: "payments".to_owned(),
            scope: None,
            slides: ".payment-cycle-icon".to_owned(),
            indicators: None,
            prev: None,
            next: None,
            pause_area: None,
            pause_on_hover: false,
            pause_on_touch: false,
            period_ms: 2000,
            sources: ["asset/btc.png", "asset/bhim.png", "asset/pi.png", "asset/pay.png", "asset/usdt.png"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        },
    ]
}
