use serde::{Deserialize, Serialize};

/// The facts collected about a parent's family situation.
///
/// Produced by the interview front end and consumed read-only by the engine.
/// Both `pregnancy_stage` and `child_age` may be present; the classifier
/// gives `pregnancy_stage` precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSituation {
    pub relationship_status: RelationshipStatus,
    #[serde(default)]
    pub pregnancy_stage: Option<PregnancyStage>,
    #[serde(default)]
    pub child_age: Option<ChildAge>,
    #[serde(default)]
    pub has_paternity_certificate: bool,
    #[serde(default)]
    pub has_joint_custody: bool,
    pub relationship_stable: bool,
    #[serde(default)]
    pub city: Option<String>,
}

impl UserSituation {
    /// True for unmarried parents, the group with bespoke paternity and custody steps.
    pub fn is_unmarried(&self) -> bool {
        self.relationship_status == RelationshipStatus::Unmarried
    }

    pub fn is_married(&self) -> bool {
        self.relationship_status == RelationshipStatus::Married
    }

    /// The city, if one was given and is not blank.
    pub fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipStatus {
    Married,
    Unmarried,
    Separated,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PregnancyStage {
    Planning,
    FirstTrimester,
    SecondTrimester,
    ThirdTrimester,
    Postpartum,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChildAge {
    #[serde(rename = "not-born")]
    NotBorn,
    #[serde(rename = "0-3-months")]
    ZeroToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12-months")]
    SixToTwelveMonths,
    #[serde(rename = "1-2-years")]
    OneToTwoYears,
    #[serde(rename = "older")]
    Older,
}

/// Coarse life-phase bucket used to filter and order guidance content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PlanningStage {
    Expecting,
    AtBirth,
    FirstYear,
    EarlyWarning,
}

impl PlanningStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expecting => "expecting",
            Self::AtBirth => "at-birth",
            Self::FirstYear => "first-year",
            Self::EarlyWarning => "early-warning",
        }
    }
}

impl std::fmt::Display for PlanningStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
