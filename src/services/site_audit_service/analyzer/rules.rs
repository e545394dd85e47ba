use crate::models::lighthouse::{ChecklistItem, ItemCategory, Severity};
use crate::services::site_audit_service::analyzer::facts::PageFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail {
        severity: Severity,
        message: &'static str,
    },
}

/// One independent inspection over [`PageFacts`].
pub struct Rule {
    pub id: &'static str,
    pub category: ItemCategory,
    pub impact: u32,
    pub explanation: &'static str,
    pub fix: &'static str,
    pub check: fn(&PageFacts) -> Verdict,
}

impl Rule {
    /// `None` when the page passes.
    pub fn evaluate(&self, facts: &PageFacts) -> Option<ChecklistItem> {
        match (self.check)(facts) {
            Verdict::Pass => None,
            Verdict::Fail { severity, message } => Some(ChecklistItem {
                id: self.id.to_string(),
                category: self.category,
                severity,
                message: message.to_string(),
                explanation: self.explanation.to_string(),
                fix: self.fix.to_string(),
                impact: Some(self.impact),
            }),
        }
    }
}

fn fail(severity: Severity, message: &'static str) -> Verdict {
    Verdict::Fail { severity, message }
}

fn check_https(facts: &PageFacts) -> Verdict {
    if facts.https {
        Verdict::Pass
    } else {
        fail(Severity::Critical, "Site is not served over HTTPS")
    }
}

fn check_title(facts: &PageFacts) -> Verdict {
    if facts.title.is_empty() {
        fail(Severity::Warning, "Missing meta title")
    } else {
        Verdict::Pass
    }
}

fn check_meta_description(facts: &PageFacts) -> Verdict {
    if facts.meta_description.is_empty() {
        fail(Severity::Warning, "Missing meta description")
    } else {
        Verdict::Pass
    }
}

fn check_canonical(facts: &PageFacts) -> Verdict {
    if facts.canonical.is_empty() {
        fail(Severity::Info, "Missing canonical URL")
    } else {
        Verdict::Pass
    }
}

fn check_viewport(facts: &PageFacts) -> Verdict {
    if facts.viewport.contains("width=device-width") {
        Verdict::Pass
    } else {
        fail(Severity::Warning, "Missing mobile viewport")
    }
}

fn check_h1(facts: &PageFacts) -> Verdict {
    match facts.h1_count {
        1 => Verdict::Pass,
        0 => fail(Severity::Warning, "Missing H1 heading"),
        _ => fail(Severity::Info, "Multiple H1 headings"),
    }
}

fn check_h2(facts: &PageFacts) -> Verdict {
    if facts.h2_count == 0 {
        fail(Severity::Info, "Consider adding H2 sections")
    } else {
        Verdict::Pass
    }
}

fn check_img_alt(facts: &PageFacts) -> Verdict {
    match facts.img_missing_alt {
        0 => Verdict::Pass,
        n if n > 3 => fail(Severity::Warning, "Images missing alt text"),
        _ => fail(Severity::Info, "Images missing alt text"),
    }
}

// Always info, however many images are affected
fn check_img_lazy(facts: &PageFacts) -> Verdict {
    if facts.img_not_lazy == 0 {
        Verdict::Pass
    } else {
        fail(Severity::Info, "Images without lazy loading")
    }
}

fn check_jsonld(facts: &PageFacts) -> Verdict {
    if facts.jsonld_count == 0 {
        fail(Severity::Info, "Missing JSON-LD structured data")
    } else {
        Verdict::Pass
    }
}

fn check_robots(facts: &PageFacts) -> Verdict {
    if facts.robots_found {
        Verdict::Pass
    } else {
        fail(Severity::Info, "robots.txt not found")
    }
}

fn check_sitemap(facts: &PageFacts) -> Verdict {
    if facts.sitemap_found {
        Verdict::Pass
    } else {
        fail(Severity::Info, "sitemap.xml not found")
    }
}

/// Evaluated in this order; findings keep it.
pub static RULES: [Rule; 12] = [
    Rule {
        id: "https",
        category: ItemCategory::BestPractices,
        impact: 10,
        explanation: "HTTPS protects data integrity and is a ranking factor.",
        fix: "Enable HTTPS with a valid TLS certificate.",
        check: check_https,
    },
    Rule {
        id: "title",
        category: ItemCategory::Seo,
        impact: 6,
        explanation: "Title summarizes page content and influences search results.",
        fix: "Add a concise, keyword-rich title (50-60 chars).",
        check: check_title,
    },
    Rule {
        id: "meta_description",
        category: ItemCategory::Seo,
        impact: 5,
        explanation: "Description improves click-through from search.",
        fix: "Add a unique description (50-160 chars).",
        check: check_meta_description,
    },
    Rule {
        id: "canonical",
        category: ItemCategory::Seo,
        impact: 3,
        explanation: "Canonical prevents duplicate content issues.",
        fix: "Add a canonical link to the preferred URL.",
        check: check_canonical,
    },
    Rule {
        id: "viewport",
        category: ItemCategory::Performance,
        impact: 6,
        explanation: "Viewport ensures proper scaling on mobile.",
        fix: "Add meta viewport with width=device-width, initial-scale=1.",
        check: check_viewport,
    },
    Rule {
        id: "h1_structure",
        category: ItemCategory::Seo,
        impact: 5,
        explanation: "One clear H1 helps structure and relevance.",
        fix: "Ensure exactly one H1 that reflects primary topic.",
        check: check_h1,
    },
    Rule {
        id: "h2_structure",
        category: ItemCategory::Seo,
        impact: 2,
        explanation: "Subheadings improve readability and keyword coverage.",
        fix: "Add descriptive H2s to segment content.",
        check: check_h2,
    },
    Rule {
        id: "img_alt",
        category: ItemCategory::Accessibility,
        impact: 4,
        explanation: "Alt text improves accessibility and SEO.",
        fix: "Add meaningful alt to all images.",
        check: check_img_alt,
    },
    Rule {
        id: "img_lazy",
        category: ItemCategory::Performance,
        impact: 3,
        explanation: "Lazy loading reduces initial payload.",
        fix: "Add loading=lazy to non-critical images.",
        check: check_img_lazy,
    },
    Rule {
        id: "jsonld",
        category: ItemCategory::Seo,
        impact: 3,
        explanation: "Structured data improves rich results.",
        fix: "Add relevant JSON-LD schema.",
        check: check_jsonld,
    },
    Rule {
        id: "robots",
        category: ItemCategory::Seo,
        impact: 2,
        explanation: "Robots guides crawler behavior.",
        fix: "Provide a robots.txt at the site root.",
        check: check_robots,
    },
    Rule {
        id: "sitemap",
        category: ItemCategory::Seo,
        impact: 2,
        explanation: "Sitemaps help discovery and indexing.",
        fix: "Publish a sitemap.xml and reference it in robots.txt.",
        check: check_sitemap,
    },
];
