//! Scoring a submitted set of placements against the answer key.

use crate::object::{GameObject, ObjectId};
use crate::placement::Placement;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Source of authoritative answers, looked up by object id
pub trait AnswerKey {
  fn answer(&self, object: ObjectId) -> Option<&GameObject>;
}

impl AnswerKey for HashMap<ObjectId, GameObject> {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    self.get(&object)
  }
}

impl AnswerKey for BTreeMap<ObjectId, GameObject> {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    self.get(&object)
  }
}

impl AnswerKey for [GameObject] {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    self.iter().find(|o| o.id == object)
  }
}

impl AnswerKey for Vec<GameObject> {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    self.as_slice().answer(object)
  }
}

impl<K: AnswerKey + ?Sized> AnswerKey for &K {
  fn answer(&self, object: ObjectId) -> Option<&GameObject> {
    (**self).answer(object)
  }
}

/// Per-object feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
  pub object_id: ObjectId,
  pub correct: bool,
  pub message: String,
}

/// Request body of the validate endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
  pub placements: Vec<Placement>,
}

/// Overall verdict shown to the learner after checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Perfect,
  NotQuiteRight,
}

impl Verdict {
  pub fn title(&self) -> &'static str {
    match self {
      Verdict::Perfect => "Perfect!",
      Verdict::NotQuiteRight => "Not quite right",
    }
  }
}

/// Score plus per-object feedback, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
  pub score: u64,
  pub results: Vec<ValidationResult>,
}

impl ValidationReport {
  pub fn all_correct(&self) -> bool {
    self.results.iter().all(|r| r.correct)
  }

  pub fn correct_count(&self) -> usize {
    self.results.iter().filter(|r| r.correct).count()
  }

  /// `Perfect` only when something was scored and every scored placement was right. An empty
  /// submission is never `Perfect`, even though `all_correct` holds vacuously.
  pub fn verdict(&self) -> Verdict {
    if !self.results.is_empty() && self.all_correct() {
      Verdict::Perfect
    } else {
      Verdict::NotQuiteRight
    }
  }

  pub fn result_for(&self, object: ObjectId) -> Option<&ValidationResult> {
    self.results.iter().find(|r| r.object_id == object)
  }
}

/// Score `placements` against `key`.
///
/// Placements whose object is unknown to the key are skipped: they add nothing to the score and
/// produce no result. An object submitted more than once is scored at its first occurrence only.
pub fn validate<K, I>(key: &K, placements: I) -> ValidationReport
where
  K: AnswerKey + ?Sized,
  I: IntoIterator<Item = Placement>,
{
  let mut seen = HashSet::new();
  let mut report = ValidationReport::default();

  for placement in placements {
    let Some(object) = key.answer(placement.object_id) else {
      continue;
    };
    if !seen.insert(object.id) {
      continue;
    }

    let correct = object.is_correct_zone(placement.zone_id);
    if correct {
      report.score += u64::from(object.points);
    }
    report.results.push(ValidationResult {
      object_id: object.id,
      correct,
      message: object.message_for(correct).to_string(),
    });
  }

  report
}
