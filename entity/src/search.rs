//! Lowercased twins of searchable text columns.
//!
//! SQLite `LIKE` folds ASCII letters only, so each searchable column has a `*_search` twin
//! holding [`fold`]ed text. The entities' `before_save` hooks keep the twins current.

use sea_orm::ActiveValue;

/// Unicode-aware lowercase used for both stored twins and search needles.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Recomputes `target` when `source` is being written.
pub fn refresh(source: &ActiveValue<String>, target: &mut ActiveValue<String>) {
    if let ActiveValue::Set(text) = source {
        *target = ActiveValue::Set(fold(text));
    }
}

pub fn refresh_optional(
    source: &ActiveValue<Option<String>>,
    target: &mut ActiveValue<Option<String>>,
) {
    if let ActiveValue::Set(text) = source {
        *target = ActiveValue::Set(text.as_deref().map(fold));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_non_ascii() {
        assert_eq!(fold("ĐẮC NHÂN TÂM"), "đắc nhân tâm");
    }

    #[test]
    fn refreshes_only_written_columns() {
        let mut target = ActiveValue::Unchanged("old".to_string());
        refresh(&ActiveValue::Unchanged("Ignored".to_string()), &mut target);
        assert_eq!(target, ActiveValue::Unchanged("old".to_string()));

        refresh(&ActiveValue::Set("Ünïcode".to_string()), &mut target);
        assert_eq!(target, ActiveValue::Set("ünïcode".to_string()));

        let mut optional = ActiveValue::NotSet;
        refresh_optional(&ActiveValue::Set(None), &mut optional);
        assert_eq!(optional, ActiveValue::Set(None));
    }
}
