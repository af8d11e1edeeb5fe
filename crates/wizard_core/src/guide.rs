use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured résumé as returned by the parse service. Opaque to the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredResume(pub Value);

/// Structured job description as returned by the parse service. Opaque to the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredJobDescription(pub Value);

/// One of the guide sections shown on its own wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideSection {
    CompanyIndustry,
    DepartmentContext,
    RoleSuccess,
    CandidateFitMatrix,
    StarStoryBank,
    TechnicalCasePrep,
    MockInterview,
    InsiderCheatSheet,
    ThirtySixtyNinety,
    OfferNegotiation,
}

impl GuideSection {
    /// Display order, which is also step order after the two input steps.
    pub const ALL: [GuideSection; 10] = [
        GuideSection::CompanyIndustry,
        GuideSection::DepartmentContext,
        GuideSection::RoleSuccess,
        GuideSection::CandidateFitMatrix,
        GuideSection::StarStoryBank,
        GuideSection::TechnicalCasePrep,
        GuideSection::MockInterview,
        GuideSection::InsiderCheatSheet,
        GuideSection::ThirtySixtyNinety,
        GuideSection::OfferNegotiation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GuideSection::CompanyIndustry => "Company & Industry",
            GuideSection::DepartmentContext => "Department Context",
            GuideSection::RoleSuccess => "Role Success Factors",
            GuideSection::CandidateFitMatrix => "Candidate Fit Matrix",
            GuideSection::StarStoryBank => "STAR Story Bank",
            GuideSection::TechnicalCasePrep => "Technical & Case Prep",
            GuideSection::MockInterview => "Mock Interview",
            GuideSection::InsiderCheatSheet => "Insider Cheat Sheet",
            GuideSection::ThirtySixtyNinety => "30/60/90 Day Plan",
            GuideSection::OfferNegotiation => "Offer Negotiation",
        }
    }

    /// Field name used by the generate endpoint.
    pub fn key(self) -> &'static str {
        match self {
            GuideSection::CompanyIndustry => "section_1_company_industry",
            GuideSection::DepartmentContext => "section_2_department_context",
            GuideSection::RoleSuccess => "section_3_role_success",
            GuideSection::CandidateFitMatrix => "section_4_role_understanding_fit_assessment",
            GuideSection::StarStoryBank => "section_5_star_story_bank",
            GuideSection::TechnicalCasePrep => "section_6_technical_case_prep",
            GuideSection::MockInterview => "section_7_mock_interview",
            GuideSection::InsiderCheatSheet => "section_8_insider_cheat_sheet",
            GuideSection::ThirtySixtyNinety => "section_9_thirty_sixty_ninety",
            GuideSection::OfferNegotiation => "section_10_offer_negotiation",
        }
    }
}

/// The generated interview preparation guide.
///
/// Every section is optional; the service may omit any of them and the
/// wizard renders a placeholder for the missing ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Guide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_0_welcome: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_1_company_industry: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_2_department_context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_3_role_success: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_4_role_understanding_fit_assessment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_5_star_story_bank: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_6_technical_case_prep: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_7_mock_interview: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_8_insider_cheat_sheet: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_9_thirty_sixty_ninety: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_10_offer_negotiation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_share: Option<Value>,
}

impl Guide {
    /// Builds a guide from the generate response body. Only a JSON object is accepted.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "guide response must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    pub fn section(&self, section: GuideSection) -> Option<&Value> {
        let value = match section {
            GuideSection::CompanyIndustry => &self.section_1_company_industry,
            GuideSection::DepartmentContext => &self.section_2_department_context,
            GuideSection::RoleSuccess => &self.section_3_role_success,
            GuideSection::CandidateFitMatrix => &self.section_4_role_understanding_fit_assessment,
            GuideSection::StarStoryBank => &self.section_5_star_story_bank,
            GuideSection::TechnicalCasePrep => &self.section_6_technical_case_prep,
            GuideSection::MockInterview => &self.section_7_mock_interview,
            GuideSection::InsiderCheatSheet => &self.section_8_insider_cheat_sheet,
            GuideSection::ThirtySixtyNinety => &self.section_9_thirty_sixty_ninety,
            GuideSection::OfferNegotiation => &self.section_10_offer_negotiation,
        };
        value.as_ref().filter(|v| !v.is_null())
    }

    pub fn available_sections(&self) -> Vec<GuideSection> {
        GuideSection::ALL
            .into_iter()
            .filter(|section| self.section(*section).is_some())
            .collect()
    }
}
