//! Company letterhead content for certificates and letters.
//!
//! Only the text and styling values are produced here; laying them out on a
//! page is left to whatever renders the document.

use entity::SubadminRecord;
use platform_session::Session;
use serde::{Deserialize, Serialize};

use crate::{HrBackend, HrError, HrResult};

const PLACEHOLDER_COMPANY: &str = "Your Company Name";
const PLACEHOLDER_ADDRESS: &str = "123 Business Avenue, City, Country";
const PLACEHOLDER_EMAIL: &str = "info@yourcompany.com";
const PLACEHOLDER_CONTACT: &str = "+1-234-567-8900";
const PLACEHOLDER_GST: &str = "XXXXXXXXXXXX";
const PLACEHOLDER_SITE: &str = "www.yourcompany.com";
const TAGLINE: &str = "Excellence in Business Solutions";
const SOCIALS: &str = "LinkedIn/Social Media";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderLayout {
    #[default]
    Centered,
    LeftAligned,
    RightAligned,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterheadConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub show_address: bool,
    pub show_contact: bool,
    #[serde(rename = "showGST")]
    pub show_gst: bool,
    pub show_socials: bool,
    pub show_logo: bool,
    pub border_style: String,
    pub header_layout: HeaderLayout,
}

impl Default for LetterheadConfig {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".into(),
            secondary_color: "#1e40af".into(),
            accent_color: "#fcd34d".into(),
            font_family: "Arial, sans-serif".into(),
            show_address: true,
            show_contact: true,
            show_gst: true,
            show_socials: true,
            show_logo: true,
            border_style: "solid".into(),
            header_layout: HeaderLayout::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Letterhead {
    pub company_name: String,
    pub tagline: String,
    pub logo_url: Option<String>,
    pub details: Vec<String>,
    pub footer: Vec<String>,
    pub config: LetterheadConfig,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl Letterhead {
    /// Builds the header and footer lines. Absent company fields fall back to
    /// sample text so the layout can still be previewed.
    pub fn compose(
        company: Option<&SubadminRecord>,
        config: &LetterheadConfig,
        logo_url: Option<String>,
        year: i32,
    ) -> Self {
        let empty = SubadminRecord::default();
        let company = company.unwrap_or(&empty);

        let mut details = Vec::new();
        if config.show_address {
            details.push(present(&company.address).unwrap_or(PLACEHOLDER_ADDRESS).to_string());
        }
        if config.show_contact {
            details.push(format!(
                "{} | {}",
                present(&company.email).unwrap_or(PLACEHOLDER_EMAIL),
                present(&company.contact).unwrap_or(PLACEHOLDER_CONTACT)
            ));
        }
        if config.show_gst {
            details.push(format!(
                "GST: {}",
                present(&company.gstno).unwrap_or(PLACEHOLDER_GST)
            ));
        }
        if config.show_socials {
            details.push(match present(&company.companyurl) {
                Some(url) => format!("{url} | {SOCIALS}"),
                None => format!("{PLACEHOLDER_SITE} {SOCIALS}"),
            });
        }

        let footer_name = present(&company.registercompanyname).unwrap_or("Your Company");
        let mut footer = vec![format!("© {year} {footer_name}. All Rights Reserved.")];
        if let Some(cin) = present(&company.cinno) {
            footer.push(format!("CIN: {cin}"));
        }
        if let Some(phone) = present(&company.phoneno) {
            footer.push(phone.to_string());
        }

        Self {
            company_name: present(&company.registercompanyname)
                .unwrap_or(PLACEHOLDER_COMPANY)
                .to_string(),
            tagline: TAGLINE.to_string(),
            logo_url: logo_url
                .filter(|_| config.show_logo && present(&company.companylogo).is_some()),
            details,
            footer,
            config: config.clone(),
        }
    }
}

/// Company profile of the logged-in subadmin, looked up by session email.
pub async fn load_company<B: HrBackend>(
    backend: &B,
    session: &Session,
) -> HrResult<Option<SubadminRecord>> {
    let email = session
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or(HrError::MissingEmail)?;
    Ok(backend.subadmin_by_email(email).await?)
}
