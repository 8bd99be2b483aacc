//! Topic selection and the history/revision state machine.
//!
//! A topic moves `Unseen -> Solved` when it is selected (its id is added to
//! the sheet's history) and `Solved -> PendingRevision` when it is marked for
//! revision (the id moves from history to the revision set, which makes it
//! selectable again). Nothing here moves a topic back out of revision.

mod factory;

use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::Topic;
use crate::sheets::{self, auxiliary, SheetDefinition};
use crate::store::{ProgressStore, StoreError, TopicStore};

pub use factory::SheetHandlerFactory;

/// A topic handed out by `select_topic`.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedTopic {
  pub sheet_type: String,
  #[serde(rename = "topic_id")]
  pub id: String,
  pub title: String,
  pub link: String,
  /// The raw topic document
  pub details: Topic,
}

/// Outcome of a selection attempt.
#[derive(Debug, Clone)]
pub enum Selection {
  Selected(SelectedTopic),
  /// Every topic of the sheet is in the history (or the sheet is empty)
  NoTopicsRemaining,
}

/// Selection engine bound to one sheet type and its stores.
pub struct SheetHandler {
  definition: &'static SheetDefinition,
  topics: Arc<dyn TopicStore>,
  progress: Arc<dyn ProgressStore>,
  auxiliary_root: PathBuf,
}

impl SheetHandler {
  pub fn new(
    definition: &'static SheetDefinition,
    topics: Arc<dyn TopicStore>,
    progress: Arc<dyn ProgressStore>,
    auxiliary_root: PathBuf,
  ) -> Self {
    Self {
      definition,
      topics,
      progress,
      auxiliary_root,
    }
  }

  pub fn sheet_type(&self) -> &'static str {
    self.definition.name
  }

  pub fn definition(&self) -> &'static SheetDefinition {
    self.definition
  }

  /// Full candidate list: the auxiliary pages when the sheet has them,
  /// otherwise the topic store.
  pub fn load_topics(&self) -> Result<Vec<Topic>, SheetError> {
    match &self.definition.auxiliary {
      Some(source) => auxiliary::load_topics(&self.auxiliary_root, source, self.sheet_type())
        .map_err(|e| {
          let path = auxiliary::source_dir(&self.auxiliary_root, source);
          self.store_error("load auxiliary pages", StoreError::Io(path.display().to_string(), e.to_string()))
        }),
      None => self
        .topics
        .find_all(self.definition)
        .map_err(|e| self.store_error("load topics", e)),
    }
  }

  pub fn history(&self) -> Result<HashSet<String>, SheetError> {
    self
      .progress
      .history(self.sheet_type())
      .map_err(|e| self.store_error("read history", e))
  }

  pub fn revision_list(&self) -> Result<Vec<String>, SheetError> {
    self
      .progress
      .revision(self.sheet_type())
      .map_err(|e| self.store_error("read revision", e))
  }

  /// Pick a random unsolved topic and record it in the history.
  ///
  /// Candidates are drawn from the unsolved set computed once per call. A
  /// draw only counts if this call's history insert is the one that added
  /// the id; otherwise a concurrent request claimed it first and the next
  /// candidate is drawn from what is left.
  pub fn select_topic(&self) -> Result<Selection, SheetError> {
    let topics = self.load_topics()?;
    let history = self.history()?;
    let total = topics.len();
    let mut unsolved = unsolved_topics(topics, &history, self.sheet_type());

    tracing::debug!(
      "{}: {} topics, {} solved, {} unsolved",
      self.sheet_type(),
      total,
      history.len(),
      unsolved.len()
    );

    let mut rng = rand::rng();
    while !unsolved.is_empty() {
      let (id, topic) = unsolved.swap_remove(rng.random_range(0..unsolved.len()));

      let claimed = self
        .progress
        .add_to_history(self.sheet_type(), &id)
        .map_err(|e| self.store_error("add to history", e))?;
      if !claimed {
        tracing::debug!("{}: topic {} was claimed concurrently, drawing again", self.sheet_type(), id);
        continue;
      }

      let title = sheets::extract_title(self.definition.title_rule, &topic);
      let link = sheets::search_link(&title, self.definition.display_domain);
      tracing::info!("{}: selected topic {} ({})", self.sheet_type(), id, title);

      return Ok(Selection::Selected(SelectedTopic {
        sheet_type: self.sheet_type().to_string(),
        id,
        title,
        link,
        details: topic,
      }));
    }

    tracing::info!("No unsolved topics remaining for {}", self.sheet_type());
    Ok(Selection::NoTopicsRemaining)
  }

  /// Move `topic_id` from the history to the revision set.
  ///
  /// Returns `Ok(false)` without touching the stores when the id is blank.
  pub fn mark_for_revision(&self, topic_id: &str) -> Result<bool, SheetError> {
    let topic_id = topic_id.trim();
    if topic_id.is_empty() {
      tracing::warn!("{}: cannot mark for revision, no topic id given", self.sheet_type());
      return Ok(false);
    }

    self
      .progress
      .add_to_revision(self.sheet_type(), topic_id)
      .map_err(|e| self.store_error("add to revision", e))?;
    let removed = self
      .progress
      .remove_from_history(self.sheet_type(), topic_id)
      .map_err(|e| self.store_error("remove from history", e))?;

    tracing::info!(
      "{}: topic {} marked for revision (history entry removed: {})",
      self.sheet_type(),
      topic_id,
      removed
    );
    Ok(true)
  }

  fn store_error(&self, operation: &'static str, source: StoreError) -> SheetError {
    tracing::error!("{}: failed to {}: {}", self.sheet_type(), operation, source);
    SheetError::StoreUnavailable {
      sheet_type: self.sheet_type().to_string(),
      operation,
      source,
    }
  }
}

/// Topics whose id is not in `history`, paired with their normalized id.
///
/// Topics without a usable id are skipped and logged.
pub fn unsolved_topics(topics: Vec<Topic>, history: &HashSet<String>, sheet_type: &str) -> Vec<(String, Topic)> {
  let mut malformed = 0;
  let unsolved: Vec<(String, Topic)> = topics
    .into_iter()
    .filter_map(|topic| match topic.id() {
      Some(id) => Some((id, topic)),
      None => {
        malformed += 1;
        None
      }
    })
    .filter(|(id, _)| !history.contains(id))
    .collect();

  if malformed > 0 {
    tracing::warn!("{}: skipped {} topics with no usable id", sheet_type, malformed);
  }
  unsolved
}

/// Errors surfaced by the factory and the selection engine.
#[derive(Debug)]
pub enum SheetError {
  UnknownSheetType(String),
  StoreUnavailable {
    sheet_type: String,
    operation: &'static str,
    source: StoreError,
  },
}

impl std::fmt::Display for SheetError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SheetError::UnknownSheetType(name) => write!(f, "Invalid sheet type provided: {}", name),
      SheetError::StoreUnavailable {
        sheet_type,
        operation,
        source,
      } => write!(f, "Store failure for {} during {}: {}", sheet_type, operation, source),
    }
  }
}

impl SheetError {
  /// Returns a user-facing error message without exposing storage details.
  pub fn user_message(&self) -> String {
    match self {
      SheetError::UnknownSheetType(_) => self.to_string(),
      SheetError::StoreUnavailable { .. } => "Topic storage is unavailable".to_string(),
    }
  }
}

impl std::error::Error for SheetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SheetError::StoreUnavailable { source, .. } => Some(source),
      SheetError::UnknownSheetType(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{topics, TestEnv};
  use serde_json::json;

  fn selected(selection: Selection) -> SelectedTopic {
    match selection {
      Selection::Selected(topic) => topic,
      Selection::NoTopicsRemaining => panic!("expected a topic"),
    }
  }

  #[test]
  fn test_unsolved_excludes_history_by_normalized_id() {
    let list = topics(json!([{"id": 1}, {"id": "2"}, {"id": 3}]));
    let history: HashSet<String> = ["1".to_string(), "2".to_string()].into();

    let unsolved = unsolved_topics(list, &history, "t");
    let ids: Vec<_> = unsolved.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["3"]);
  }

  #[test]
  fn test_unsolved_skips_malformed() {
    let list = topics(json!([{"title": "no id"}, {"id": null}, {"id": 5}]));
    let unsolved = unsolved_topics(list, &HashSet::new(), "t");
    assert_eq!(unsolved.len(), 1);
    assert_eq!(unsolved[0].0, "5");
  }

  #[test]
  fn test_select_never_returns_solved_topic() {
    let env = TestEnv::new().unwrap();
    env.seed("sde_sheet", json!([{"id": 1, "title": "A"}, {"id": 2, "title": "B"}, {"id": 3, "title": "C"}]));
    env.store.add_to_history("sde_sheet", "1").unwrap();
    env.store.add_to_history("sde_sheet", "3").unwrap();

    let handler = env.factory().create("sde_sheet").unwrap();
    let topic = selected(handler.select_topic().unwrap());
    assert_eq!(topic.id, "2");
    assert_eq!(topic.title, "B");
    assert_eq!(topic.link, "https://www.google.com/search?q=B+site%3Anaukri.com");
    assert!(handler.history().unwrap().contains("2"));
  }

  #[test]
  fn test_selected_topic_carries_raw_document() {
    let env = TestEnv::new().unwrap();
    env.seed("lc_sql_50", json!([{"id": 7, "title": "Two Sum", "difficulty": "Easy", "tags": ["x"]}]));

    let handler = env.factory().create("lc_sql_50").unwrap();
    let topic = selected(handler.select_topic().unwrap());
    assert_eq!(topic.sheet_type, "lc_sql_50");
    assert_eq!(topic.id, "7");
    assert_eq!(topic.link, "https://www.google.com/search?q=Two+Sum+site%3Aleetcode.com");
    assert_eq!(topic.details.get("difficulty"), Some(&json!("Easy")));
  }

  #[test]
  fn test_exhaustion_returns_no_topics_remaining() {
    let env = TestEnv::new().unwrap();
    env.seed("linux_commands", json!([{"id": "ls"}, {"id": "cd"}, {"id": "pwd"}]));
    let handler = env.factory().create("linux_commands").unwrap();

    let mut seen = HashSet::new();
    for _ in 0..3 {
      let topic = selected(handler.select_topic().unwrap());
      assert!(seen.insert(topic.id.clone()), "repeated {}", topic.id);
      assert_eq!(topic.title, topic.id);
    }
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
    assert_eq!(handler.history().unwrap().len(), 3);
  }

  #[test]
  fn test_empty_sheet_is_no_topics_remaining() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("langgraph").unwrap();
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
  }

  #[test]
  fn test_malformed_topics_are_never_selected() {
    let env = TestEnv::new().unwrap();
    env.seed("docker_commands", json!([{"title": "no id"}, {"id": "ps"}, {"id": ""}]));
    let handler = env.factory().create("docker_commands").unwrap();

    let topic = selected(handler.select_topic().unwrap());
    assert_eq!(topic.id, "ps");
    assert_eq!(topic.title, "ps command");
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
  }

  #[test]
  fn test_mark_for_revision_after_select_restores_history() {
    let env = TestEnv::new().unwrap();
    env.seed("os_core_sheet", json!([{"id": 1, "title": "Paging"}, {"id": 2, "title": "Deadlock"}]));
    env.store.add_to_history("os_core_sheet", "1").unwrap();
    let handler = env.factory().create("os_core_sheet").unwrap();
    let before = handler.history().unwrap();

    let topic = selected(handler.select_topic().unwrap());
    assert!(handler.mark_for_revision(&topic.id).unwrap());

    assert_eq!(handler.history().unwrap(), before);
    assert_eq!(handler.revision_list().unwrap(), vec![topic.id]);
  }

  #[test]
  fn test_padded_id_round_trip_restores_history() {
    let env = TestEnv::new().unwrap();
    env.seed("linux_commands", json!([{"id": " ls "}]));
    let handler = env.factory().create("linux_commands").unwrap();

    let topic = selected(handler.select_topic().unwrap());
    assert_eq!(topic.id, "ls");
    assert_eq!(topic.title, "ls");
    assert!(handler.history().unwrap().contains("ls"));

    assert!(handler.mark_for_revision(&topic.id).unwrap());
    assert!(handler.history().unwrap().is_empty());
    assert_eq!(handler.revision_list().unwrap(), vec!["ls"]);

    let again = selected(handler.select_topic().unwrap());
    assert_eq!(again.id, "ls");
  }

  #[test]
  fn test_mark_for_revision_is_idempotent() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("cn_core_sheet").unwrap();
    env.store.add_to_history("cn_core_sheet", "9").unwrap();

    assert!(handler.mark_for_revision("9").unwrap());
    assert!(handler.mark_for_revision("9").unwrap());

    assert_eq!(handler.revision_list().unwrap(), vec!["9"]);
    assert!(!handler.history().unwrap().contains("9"));
  }

  #[test]
  fn test_mark_for_revision_of_unseen_id() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("sde_sheet").unwrap();
    assert!(handler.mark_for_revision("never-selected").unwrap());
    assert_eq!(handler.revision_list().unwrap(), vec!["never-selected"]);
    assert!(handler.history().unwrap().is_empty());
  }

  #[test]
  fn test_revised_topic_becomes_selectable_again() {
    let env = TestEnv::new().unwrap();
    env.seed("dsa_common_patterns", json!([{"id": "two pointers"}]));
    let handler = env.factory().create("dsa_common_patterns").unwrap();

    let first = selected(handler.select_topic().unwrap());
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
    handler.mark_for_revision(&first.id).unwrap();
    let second = selected(handler.select_topic().unwrap());
    assert_eq!(first.id, second.id);
  }

  #[test]
  fn test_blank_revision_id_is_a_noop() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("sde_sheet").unwrap();
    assert!(!handler.mark_for_revision("").unwrap());
    assert!(!handler.mark_for_revision("   ").unwrap());
    assert!(handler.revision_list().unwrap().is_empty());
  }

  #[test]
  fn test_concurrent_selects_return_distinct_topics() {
    const N: usize = 8;
    let env = TestEnv::new().unwrap();
    let docs: Vec<_> = (0..N).map(|i| json!({"id": i, "title": format!("Topic {}", i)})).collect();
    env.seed("lc_dsa_75", serde_json::Value::Array(docs));
    let factory = env.factory();

    let handles: Vec<_> = (0..N)
      .map(|_| {
        let factory = factory.clone();
        std::thread::spawn(move || {
          let handler = factory.create("lc_dsa_75").unwrap();
          selected(handler.select_topic().unwrap()).id
        })
      })
      .collect();

    let ids: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), N);

    let handler = factory.create("lc_dsa_75").unwrap();
    assert_eq!(handler.history().unwrap().len(), N);
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
  }

  #[test]
  fn test_auxiliary_sheet_reads_pages_with_difficulty() {
    let env = TestEnv::new().unwrap();
    env.write_auxiliary_page(
      "microsoft_question_jsons",
      "page_1.json",
      json!([
        {"id": 100, "name": "LRU Cache", "difficulty": "Moderate"},
        {"id": 101, "name": "Reverse List", "difficulty": "Easy"}
      ]),
    );

    let handler = env.factory().create("microsoft_dsa").unwrap();
    let topic = selected(handler.select_topic().unwrap());
    assert_eq!(topic.id, "100");
    assert_eq!(topic.title, "LRU Cache");
    assert_eq!(topic.link, "https://www.google.com/search?q=LRU+Cache+site%3Anaukri.com");
    assert!(matches!(handler.select_topic().unwrap(), Selection::NoTopicsRemaining));
  }

  #[test]
  fn test_store_failure_is_reported_with_context() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("sde_sheet").unwrap();
    env
      .store
      .pool()
      .lock()
      .unwrap()
      .execute_batch("DROP TABLE history;")
      .unwrap();

    let err = handler.select_topic().unwrap_err();
    match &err {
      SheetError::StoreUnavailable { sheet_type, operation, .. } => {
        assert_eq!(sheet_type, "sde_sheet");
        assert_eq!(*operation, "read history");
      }
      other => panic!("unexpected error: {}", other),
    }
    assert_eq!(err.user_message(), "Topic storage is unavailable");
  }
}
