//! Raw state classification and per-frame form scoring

use crate::logic::exercise::{ExerciseDefinition, JointRule, StateFamily, Zone};
use crate::logic::geometry::FrameAngles;
use super::types::PoseState;

/// Form result for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FormReport {
    /// 0 - 100
    pub accuracy: u8,
    /// Corrective hints, in definition order
    pub hints: Vec<&'static str>,
}

/// Combined zone of the primary joints, `None` if not measurable
fn primary_zone(definition: &ExerciseDefinition, angles: &FrameAngles) -> Option<Zone> {
    match definition.joint_rule {
        JointRule::FirstAvailable => definition
            .primary
            .iter()
            .find_map(|joint| angles.get(joint.name).map(|a| joint.zone(a))),
        JointRule::AllAgree => {
            let mut zones = Vec::with_capacity(definition.primary.len());
            for joint in definition.primary {
                zones.push(joint.zone(angles.get(joint.name)?));
            }
            let first = *zones.first()?;
            if zones.iter().all(|z| *z == first) {
                Some(first)
            } else {
                // Joints disagree on the extreme: mid-movement
                Some(Zone::Within)
            }
        }
    }
}

/// Raw state for one frame
///
/// `None` means the frame carries no state evidence (primary joint not
/// measurable, or a mid-range frame of a two-state exercise).
pub fn classify(definition: &ExerciseDefinition, angles: &FrameAngles) -> Option<PoseState> {
    let zone = primary_zone(definition, angles)?;

    match (definition.family, zone) {
        (StateFamily::Sustained, Zone::Within) => Some(PoseState::Correct),
        (StateFamily::Sustained, _) => Some(PoseState::Incorrect),
        (_, Zone::Below) => Some(PoseState::Down),
        (_, Zone::Above) => Some(PoseState::Up),
        (StateFamily::ThreeState, Zone::Within) => Some(PoseState::Transition),
        (StateFamily::TwoState, Zone::Within) => None,
    }
}

/// Score form: 100 minus `penalty` per deviation beyond tolerance
pub fn assess_form(
    definition: &ExerciseDefinition,
    angles: &FrameAngles,
    raw: Option<PoseState>,
    penalty: u8,
) -> FormReport {
    let mut hints = Vec::new();

    if raw == Some(PoseState::Incorrect) {
        if let Some(joint) = definition.primary.first() {
            hints.push(joint.hint);
        }
    }

    for joint in definition.form {
        if let Some(angle) = angles.get(joint.name) {
            if joint.zone(angle) != Zone::Within {
                hints.push(joint.hint);
            }
        }
    }

    let lost = (hints.len() as u32).saturating_mul(penalty as u32);
    FormReport {
        accuracy: 100u32.saturating_sub(lost) as u8,
        hints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::exercise::catalog;

    fn angles(pairs: &[(&'static str, Option<f32>)]) -> FrameAngles {
        let mut a = FrameAngles::default();
        for (name, value) in pairs {
            a.insert(*name, *value);
        }
        a
    }

    #[test]
    fn test_two_state_mid_range_has_no_evidence() {
        let a = angles(&[("elbow", Some(130.0))]);
        assert_eq!(classify(&catalog::PUSHUP, &a), None);
        let a = angles(&[("elbow", Some(80.0))]);
        assert_eq!(classify(&catalog::PUSHUP, &a), Some(PoseState::Down));
        let a = angles(&[("elbow", Some(175.0))]);
        assert_eq!(classify(&catalog::PUSHUP, &a), Some(PoseState::Up));
    }

    #[test]
    fn test_lunge_needs_both_knees() {
        let a = angles(&[("left_knee", Some(80.0)), ("right_knee", Some(130.0))]);
        assert_eq!(classify(&catalog::LUNGES, &a), Some(PoseState::Transition));

        let a = angles(&[("left_knee", Some(80.0)), ("right_knee", Some(85.0))]);
        assert_eq!(classify(&catalog::LUNGES, &a), Some(PoseState::Down));

        let a = angles(&[("left_knee", Some(80.0)), ("right_knee", None)]);
        assert_eq!(classify(&catalog::LUNGES, &a), None);
    }

    #[test]
    fn test_plank_correctness() {
        let a = angles(&[("elbow", Some(90.0))]);
        assert_eq!(classify(&catalog::PLANK, &a), Some(PoseState::Correct));
        let a = angles(&[("elbow", Some(130.0))]);
        assert_eq!(classify(&catalog::PLANK, &a), Some(PoseState::Incorrect));
    }

    #[test]
    fn test_form_penalty() {
        let a = angles(&[("elbow", Some(170.0)), ("body_line", Some(120.0))]);
        let report = assess_form(&catalog::PUSHUP, &a, Some(PoseState::Up), 15);
        assert_eq!(report.accuracy, 85);
        assert_eq!(report.hints, vec!["Keep your body in a straight line"]);

        // Unmeasurable form joints cost nothing
        let a = angles(&[("elbow", Some(170.0)), ("body_line", None)]);
        assert_eq!(assess_form(&catalog::PUSHUP, &a, Some(PoseState::Up), 15).accuracy, 100);
    }

    #[test]
    fn test_accuracy_never_below_zero() {
        let a = angles(&[("elbow", Some(150.0)), ("body_line", Some(90.0))]);
        let report = assess_form(&catalog::PLANK, &a, Some(PoseState::Incorrect), 200);
        assert_eq!(report.accuracy, 0);
        assert_eq!(report.hints.len(), 2);
    }
}
