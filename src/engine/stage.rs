use crate::models::{ChildAge, PlanningStage, PregnancyStage, UserSituation};

/// Derive the planning stage from a situation.
///
/// Total and pure. An unstable relationship overrides every other signal;
/// otherwise pregnancy stage wins over child age, and a situation with
/// neither defaults to [`PlanningStage::Expecting`].
pub fn determine_stage(situation: &UserSituation) -> PlanningStage {
    if !situation.relationship_stable {
        return PlanningStage::EarlyWarning;
    }

    if let Some(pregnancy) = situation.pregnancy_stage {
        return match pregnancy {
            PregnancyStage::Planning
            | PregnancyStage::FirstTrimester
            | PregnancyStage::SecondTrimester
            | PregnancyStage::ThirdTrimester => PlanningStage::Expecting,
            PregnancyStage::Postpartum => PlanningStage::AtBirth,
        };
    }

    match situation.child_age {
        Some(ChildAge::NotBorn) => PlanningStage::Expecting,
        Some(ChildAge::ZeroToThreeMonths) => PlanningStage::AtBirth,
        Some(
            ChildAge::ThreeToSixMonths
            | ChildAge::SixToTwelveMonths
            | ChildAge::OneToTwoYears
            | ChildAge::Older,
        ) => PlanningStage::FirstYear,
        None => PlanningStage::Expecting,
    }
}
