//! Pure models behind the DCTech landing site: scroll-driven card effects,
//! the demo request form and page navigation.

pub mod demo;
pub mod pages;
pub mod scroll;

pub use crate::demo::{DemoRequest, DemoRequestForm, FormError};
pub use crate::pages::{CardLink, Feature, Navigator, Page, PageCopy, ToolCard};
pub use crate::scroll::{card_effect, hero_effect, Effect, FrameThrottle, Rect, Viewport};
