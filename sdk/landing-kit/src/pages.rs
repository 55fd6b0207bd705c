//! Site pages and their static copy.

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    SurveyFlow,
    ProMail,
    /// Rent reclaim tool
    DcSol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCopy {
    pub title: &'static str,
    pub tagline: &'static str,
    pub features: &'static [Feature],
}

/// Where a home page card leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardLink {
    External(&'static str),
    Internal(Page),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolCard {
    pub name: &'static str,
    pub pitch: &'static str,
    pub note: &'static str,
    pub action: &'static str,
    pub link: CardLink,
}

const SURVEYFLOW_FEATURES: &[Feature] = &[
    Feature {
        title: "Upload Plat Photos",
        text: "Simply upload a photo of your survey plat and let our AI do the work.",
    },
    Feature {
        title: "10-Second Processing",
        text: "Get a permanent client link in just 10 seconds. No manual data entry required.",
    },
    Feature {
        title: "Permanent Client Links",
        text: "Each processed plat gets a unique, permanent link you can share with clients instantly.",
    },
    Feature {
        title: "Built for DMV Surveyors",
        text: "Specialized for the DMV region. First 10 local surveyors get lifetime pricing.",
    },
];

const PROMAIL_FEATURES: &[Feature] = &[
    Feature {
        title: "Custom Domain Email",
        text: "Use your own domain name for professional email addresses (e.g., hello@yourcompany.com).",
    },
    Feature {
        title: "Private & Secure",
        text: "Full control over your email infrastructure with enterprise-grade security.",
    },
    Feature {
        title: "Easy Setup",
        text: "Simple configuration process. Get your domain email up and running quickly.",
    },
    Feature {
        title: "Business Ready",
        text: "Currently powering email for a professional tennis academy. Built for reliability and scale.",
    },
];

const TOOL_CARDS: [ToolCard; 3] = [
    ToolCard {
        name: "SurveyFlow",
        pitch: "Upload a plat photo → get a permanent client link in 10 seconds",
        note: "For DMV land surveyors • First 10 locals get lifetime pricing",
        action: "Open SurveyFlow →",
        link: CardLink::External("https://d25t0cfr5vha42.cloudfront.net/dashboard"),
    },
    ToolCard {
        name: "ProMail",
        pitch: "Private @yourdomain.com email",
        note: "Currently running for a pro tennis academy",
        action: "Open ProMail →",
        link: CardLink::External("https://main.dfsb5g96bxdtb.amplifyapp.com/"),
    },
    ToolCard {
        name: "DC sol",
        pitch: "Reclaim stuck SOLANA tokens from your wallet → burn dust tokens and clean up your balance",
        note: "Connect your wallet to reclaim and burn unwanted SOL tokens",
        action: "Reclaim SOL →",
        link: CardLink::Internal(Page::DcSol),
    },
];

impl Page {
    pub fn copy(&self) -> PageCopy {
        match self {
            Page::Home => PageCopy {
                title: "DC-Future-Tech",
                tagline: "I ship dead-simple AI tools that kill boring admin work.",
                features: &[],
            },
            Page::SurveyFlow => PageCopy {
                title: "SurveyFlow",
                tagline: "AI-Powered OCR for Land Surveyors",
                features: SURVEYFLOW_FEATURES,
            },
            Page::ProMail => PageCopy {
                title: "ProMail",
                tagline: "Private Email Service for Your Domain",
                features: PROMAIL_FEATURES,
            },
            Page::DcSol => PageCopy {
                title: "DC sol",
                tagline: "Solana Utility App",
                features: &[],
            },
        }
    }

    /// Product pages carrying a "Schedule a Demo" form.
    pub fn has_demo_form(&self) -> bool {
        matches!(self, Page::SurveyFlow | Page::ProMail)
    }

    /// Cards listed on the home page, in display order.
    pub fn tool_cards() -> &'static [ToolCard] {
        &TOOL_CARDS
    }
}

/// Single-level navigation: every page but home leads back home.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn open(&mut self, page: Page) {
        if page != self.current {
            debug!(from = ?self.current, to = ?page, "navigate");
            self.current = page;
        }
    }

    /// Follow a home page card. External links leave navigation untouched
    /// and are returned for the caller to open.
    pub fn follow(&mut self, card: &ToolCard) -> Option<&'static str> {
        match card.link {
            CardLink::Internal(page) => {
                self.open(page);
                None
            },
            CardLink::External(url) => Some(url),
        }
    }

    /// Return to the home page. Returns `false` when already there.
    pub fn back(&mut self) -> bool {
        if self.current == Page::Home {
            return false;
        }
        self.open(Page::Home);
        true
    }
}
