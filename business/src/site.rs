//! Static page metadata: titles, social cards, JSON-LD and the sitemap.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};

/// File name the sitemap is published under.
pub const SITEMAP_FILE: &str = "sitemap.xml";

pub const SITE_NAME: &str = "QR Code Generator";
pub const HEADING: &str = "Free QR Code Generator";
pub const TAGLINE: &str = "Create custom QR codes instantly with full control over colors, size, and format. \
Perfect for marketing campaigns, business cards, and sharing URLs.";

const TITLE: &str = "Free QR Code Generator - Create Custom QR Codes Online";
const DESCRIPTION: &str = "Generate QR codes instantly for free. Customize colors, size, and error correction. \
Download as PNG or SVG. Perfect for URLs, text, business cards, and marketing materials.";
const SHORT_DESCRIPTION: &str =
    "Generate QR codes instantly for free. Customize colors, size, and error correction. Download as PNG or SVG.";
const KEYWORDS: [&str; 7] = [
    "QR code generator",
    "free QR code",
    "custom QR code",
    "QR code maker",
    "barcode generator",
    "URL to QR code",
    "QR code creator",
];
const FEATURES: [&str; 7] = [
    "Real-time QR code generation",
    "Customizable colors and size",
    "Multiple export formats (PNG, SVG)",
    "Error correction level selection",
    "Copy to clipboard functionality",
    "Dark mode support",
    "Mobile responsive design",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub site_name: String,
    pub images: Vec<SocialImage>,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub robots: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

impl PageMetadata {
    /// Metadata for the single page served at `site_url`.
    pub fn for_site(site_url: &str) -> Self {
        let og_image = "/og-image.png".to_owned();
        Self {
            title: TITLE.to_owned(),
            description: DESCRIPTION.to_owned(),
            keywords: KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
            canonical_url: site_url.to_owned(),
            robots: "index, follow".to_owned(),
            open_graph: OpenGraph {
                title: TITLE.to_owned(),
                description: SHORT_DESCRIPTION.to_owned(),
                kind: "website".to_owned(),
                url: site_url.to_owned(),
                site_name: SITE_NAME.to_owned(),
                images: vec![SocialImage {
                    url: og_image.clone(),
                    width: 1200,
                    height: 630,
                    alt: format!("{SITE_NAME} - Create Custom QR Codes Online"),
                }],
                locale: "en_US".to_owned(),
            },
            twitter: TwitterCard {
                card: "summary_large_image".to_owned(),
                title: TITLE.to_owned(),
                description: SHORT_DESCRIPTION.to_owned(),
                images: vec![og_image],
                creator: "@qrcodegen".to_owned(),
            },
        }
    }

    /// schema.org `WebApplication` object for a `ld+json` script tag.
    pub fn structured_data(&self) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": SITE_NAME,
            "description": SHORT_DESCRIPTION,
            "url": self.canonical_url,
            "applicationCategory": "UtilityApplication",
            "operatingSystem": "Any",
            "offers": {
                "@type": "Offer",
                "price": "0",
                "priceCurrency": "USD"
            },
            "featureList": FEATURES,
        })
    }

    /// Single-entry sitemap, `lastmod` set to `now`.
    pub fn sitemap_xml(&self, now: DateTime<Utc>) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
                "\n<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n",
                "<changefreq>weekly</changefreq>\n<priority>1.0</priority>\n</url>\n</urlset>\n"
            ),
            escape_xml(&self.canonical_url),
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    /// Write [`Self::sitemap_xml`] to `dir/sitemap.xml`, creating `dir`.
    pub fn write_sitemap(&self, dir: &Path, now: DateTime<Utc>) -> io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(SITEMAP_FILE);
        std::fs::write(&path, self.sitemap_xml(now))?;
        Ok(path)
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
