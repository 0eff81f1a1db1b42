//! Grade entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{EnrollmentId, GradeId};

use crate::error::AssessmentError;

/// The common scale every grade is normalized onto
pub const GRADE_SCALE: Decimal = dec!(20);

/// A single grade recorded against an enrollment
///
/// Grades may be expressed on any scale (`value` out of `max_value`) and
/// are normalized onto the 20-point scale for averaging. A zero `weight`
/// keeps the grade on record without letting it count toward the average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub enrollment_id: EnrollmentId,
    pub subject: String,
    /// Obtained score, may exceed `max_value` when bonus points apply
    pub value: Decimal,
    /// Scale the score was given on, strictly positive
    pub max_value: Decimal,
    pub weight: Decimal,
    /// When the assessment took place, if known
    pub graded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Grade {
    /// Records a new grade
    ///
    /// # Arguments
    /// * `enrollment_id` - Enrollment the grade belongs to
    /// * `subject` - What was assessed
    /// * `value` - Obtained score, must not be negative
    /// * `max_value` - Grading scale, must be strictly positive
    /// * `weight` - Weight in the average, must not be negative
    pub fn new(
        enrollment_id: EnrollmentId,
        subject: impl Into<String>,
        value: Decimal,
        max_value: Decimal,
        weight: Decimal,
    ) -> Result<Self, AssessmentError> {
        if max_value <= Decimal::ZERO {
            return Err(AssessmentError::NonPositiveMaxValue(max_value));
        }
        if value < Decimal::ZERO {
            return Err(AssessmentError::NegativeValue(value));
        }
        if weight < Decimal::ZERO {
            return Err(AssessmentError::NegativeWeight(weight));
        }

        Ok(Self {
            id: GradeId::new_v7(),
            enrollment_id,
            subject: subject.into(),
            value,
            max_value,
            weight,
            graded_at: None,
            created_at: Utc::now(),
        })
    }

    /// Sets when the assessment took place
    pub fn with_graded_at(mut self, graded_at: DateTime<Utc>) -> Self {
        self.graded_at = Some(graded_at);
        self
    }

    /// The grade projected onto the 20-point scale, full precision
    pub fn normalized_on_20(&self) -> Decimal {
        self.value / self.max_value * GRADE_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_across_scales() {
        let g = Grade::new(EnrollmentId::new(), "Rust", dec!(15), dec!(20), dec!(1)).unwrap();
        assert_eq!(g.normalized_on_20(), dec!(15));

        let g = Grade::new(EnrollmentId::new(), "SQL", dec!(8), dec!(10), dec!(1)).unwrap();
        assert_eq!(g.normalized_on_20(), dec!(16));

        let g = Grade::new(EnrollmentId::new(), "Quiz", dec!(45), dec!(50), dec!(1)).unwrap();
        assert_eq!(g.normalized_on_20(), dec!(18));
    }

    #[test]
    fn test_bonus_points_can_exceed_the_scale() {
        let g = Grade::new(EnrollmentId::new(), "Project", dec!(22), dec!(20), dec!(1)).unwrap();
        assert_eq!(g.normalized_on_20(), dec!(22));
    }
}
