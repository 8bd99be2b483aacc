use std::path::PathBuf;
use std::sync::Arc;

use super::{SheetError, SheetHandler};
use crate::sheets;
use crate::store::{ProgressStore, TopicStore};

/// Builds a `SheetHandler` for a sheet identifier.
///
/// Holds the store handles and the auxiliary root so every handler it
/// creates shares them.
#[derive(Clone)]
pub struct SheetHandlerFactory {
  topics: Arc<dyn TopicStore>,
  progress: Arc<dyn ProgressStore>,
  auxiliary_root: PathBuf,
}

impl SheetHandlerFactory {
  pub fn new(
    topics: Arc<dyn TopicStore>,
    progress: Arc<dyn ProgressStore>,
    auxiliary_root: impl Into<PathBuf>,
  ) -> Self {
    Self {
      topics,
      progress,
      auxiliary_root: auxiliary_root.into(),
    }
  }

  /// Exact, case-sensitive lookup in the registry.
  pub fn create(&self, sheet_type: &str) -> Result<SheetHandler, SheetError> {
    let definition = sheets::lookup(sheet_type).ok_or_else(|| {
      tracing::warn!("Invalid sheet type requested: {}", sheet_type);
      SheetError::UnknownSheetType(sheet_type.to_string())
    })?;

    match definition.subject() {
      Some(subject) => tracing::debug!("Creating handler for {} (core subject {})", definition.name, subject),
      None => tracing::debug!("Creating handler for {}", definition.name),
    }

    Ok(SheetHandler::new(
      definition,
      Arc::clone(&self.topics),
      Arc::clone(&self.progress),
      self.auxiliary_root.clone(),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sheets::{SheetFamily, SHEETS};
  use crate::testing::TestEnv;

  #[test]
  fn test_create_every_registered_sheet() {
    let env = TestEnv::new().unwrap();
    let factory = env.factory();
    for sheet in SHEETS.iter() {
      let handler = factory.create(sheet.name).unwrap();
      assert_eq!(handler.sheet_type(), sheet.name);
      assert_eq!(handler.definition().display_domain, sheet.display_domain);
    }
  }

  #[test]
  fn test_core_sheet_keeps_subject() {
    let env = TestEnv::new().unwrap();
    let handler = env.factory().create("dbms_core_sheet").unwrap();
    assert_eq!(handler.definition().family, SheetFamily::Core { subject: "dbms" });
    assert_eq!(handler.definition().subject(), Some("dbms"));
  }

  #[test]
  fn test_unknown_sheet_type() {
    let env = TestEnv::new().unwrap();
    let factory = env.factory();
    for name in ["history_sheet", "SDE_SHEET", ""] {
      match factory.create(name) {
        Err(SheetError::UnknownSheetType(n)) => assert_eq!(n, name),
        _ => panic!("{} should be rejected", name),
      }
    }
    let err = factory.create("nope").err().unwrap();
    assert_eq!(err.user_message(), "Invalid sheet type provided: nope");
  }
}
